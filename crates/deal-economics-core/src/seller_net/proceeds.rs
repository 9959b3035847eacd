use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{
    require_non_negative, require_percent_range, with_metadata, ComputationOutput,
    DollarOrPercent, Money, Percent,
};
use crate::DealEconomicsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Itemized closing-cost line items. Echoed back in the result so a report
/// renderer can display every line without recomputation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClosingCosts {
    pub title_escrow: Money,
    pub recording: Money,
    pub transfer_tax: Money,
    pub doc_stamps: Money,
    pub hoa_transfer: Money,
    pub staging: Money,
    pub other: Money,
}

impl ClosingCosts {
    pub fn total(&self) -> Money {
        self.title_escrow
            + self.recording
            + self.transfer_tax
            + self.doc_stamps
            + self.hoa_transfer
            + self.staging
            + self.other
    }
}

/// Input parameters for the seller net proceeds calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerNetInput {
    pub expected_sale_price: Money,
    pub first_loan_payoff: Money,
    pub second_loan_payoff: Money,
    pub total_commission_percent: Percent,
    /// Concessions to the buyer, in dollars or as a percent of sale price
    pub seller_concessions: DollarOrPercent,
    pub closing_costs: ClosingCosts,
    pub prorated_taxes: Money,
}

/// Sale-price waterfall down to the seller's estimated net.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerNetResult {
    pub gross_proceeds: Money,
    pub commission_amount: Money,
    pub concessions_amount: Money,
    pub closing_costs: ClosingCosts,
    pub total_closing_costs: Money,
    pub total_payoffs: Money,
    pub prorated_taxes: Money,
    pub total_deductions: Money,
    /// May be negative when the seller is underwater — never clamped
    pub estimated_seller_net: Money,
    pub net_as_percent_of_sale_price: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the seller's net proceeds waterfall. Returns `Ok(None)` when the
/// expected sale price is zero — "not yet entered", same convention as the
/// commission calculator.
pub fn calculate_seller_net(
    input: &SellerNetInput,
) -> DealEconomicsResult<Option<ComputationOutput<SellerNetResult>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    if input.expected_sale_price.is_zero() {
        return Ok(None);
    }

    let gross_proceeds = input.expected_sale_price;
    let commission_amount = gross_proceeds * input.total_commission_percent / dec!(100);
    let concessions_amount = input.seller_concessions.resolve(gross_proceeds);
    let total_closing_costs = input.closing_costs.total();
    let total_payoffs = input.first_loan_payoff + input.second_loan_payoff;

    let total_deductions = commission_amount
        + concessions_amount
        + total_closing_costs
        + total_payoffs
        + input.prorated_taxes;

    let estimated_seller_net = gross_proceeds - total_deductions;

    // gross_proceeds is non-zero here
    let net_as_percent_of_sale_price = estimated_seller_net / gross_proceeds * dec!(100);

    if estimated_seller_net < Decimal::ZERO {
        warnings.push(format!(
            "Deductions exceed the sale price — seller would owe ${:.2} at closing",
            -estimated_seller_net
        ));
    }
    if total_payoffs > gross_proceeds {
        warnings.push("Loan payoffs alone exceed the expected sale price".into());
    }

    let result = SellerNetResult {
        gross_proceeds,
        commission_amount,
        concessions_amount,
        closing_costs: input.closing_costs.clone(),
        total_closing_costs,
        total_payoffs,
        prorated_taxes: input.prorated_taxes,
        total_deductions,
        estimated_seller_net,
        net_as_percent_of_sale_price,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(Some(with_metadata(
        "Seller Net Proceeds (Sale-Price Waterfall)",
        input,
        warnings,
        elapsed,
        result,
    )))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &SellerNetInput) -> DealEconomicsResult<()> {
    require_non_negative("expected_sale_price", input.expected_sale_price)?;
    require_non_negative("first_loan_payoff", input.first_loan_payoff)?;
    require_non_negative("second_loan_payoff", input.second_loan_payoff)?;
    require_non_negative("prorated_taxes", input.prorated_taxes)?;
    require_percent_range("total_commission_percent", input.total_commission_percent)?;

    match input.seller_concessions {
        DollarOrPercent::Dollars(d) => require_non_negative("seller_concessions", d)?,
        DollarOrPercent::PercentOfPrice(p) => require_percent_range("seller_concessions", p)?,
    }

    let cc = &input.closing_costs;
    require_non_negative("closing_costs.title_escrow", cc.title_escrow)?;
    require_non_negative("closing_costs.recording", cc.recording)?;
    require_non_negative("closing_costs.transfer_tax", cc.transfer_tax)?;
    require_non_negative("closing_costs.doc_stamps", cc.doc_stamps)?;
    require_non_negative("closing_costs.hoa_transfer", cc.hoa_transfer)?;
    require_non_negative("closing_costs.staging", cc.staging)?;
    require_non_negative("closing_costs.other", cc.other)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
