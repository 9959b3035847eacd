use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{
    require_non_negative, require_percent_range, with_metadata, CommissionSide,
    ComputationOutput, Money, Percent,
};
use crate::DealEconomicsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for the commission split calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionInput {
    pub sale_price: Money,
    pub total_commission_percent: Percent,
    #[serde(default)]
    pub side: CommissionSide,
    /// The agent's retained share of the side GCI. Zero means "not yet
    /// configured" — the agent keeps the full side share, not 0%.
    pub brokerage_split_percent: Percent,
    /// Referral fee, as a percent of the agent's gross
    pub referral_percent: Percent,
    /// Team leader's cut, as a percent of the agent's gross
    pub team_split_percent: Percent,
    pub transaction_fee: Money,
    pub royalty_fee: Money,
}

/// GCI waterfall down to the agent's take-home.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionResult {
    pub gross_commission_income: Money,
    pub side_share_income: Money,
    pub agent_gross_before_deductions: Money,
    pub referral_amount: Money,
    pub team_amount: Money,
    pub fixed_fees_total: Money,
    /// May be negative when fixed fees exceed the gross — never clamped
    pub agent_take_home: Money,
    pub effective_commission_rate_percent: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the GCI waterfall. Returns `Ok(None)` when sale price or total
/// commission percent is zero — "not yet entered", distinct from a
/// legitimately zero-dollar result.
pub fn calculate_commission_split(
    input: &CommissionInput,
) -> DealEconomicsResult<Option<ComputationOutput<CommissionResult>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    if input.sale_price.is_zero() || input.total_commission_percent.is_zero() {
        return Ok(None);
    }

    let gross_commission_income = input.sale_price * input.total_commission_percent / dec!(100);

    let side_share = match input.side {
        CommissionSide::DualFull => Decimal::ONE,
        CommissionSide::ListingOrBuyerHalf => dec!(0.5),
    };
    let side_share_income = gross_commission_income * side_share;

    let agent_gross_before_deductions = if input.brokerage_split_percent > Decimal::ZERO {
        side_share_income * input.brokerage_split_percent / dec!(100)
    } else {
        side_share_income
    };

    let referral_amount = agent_gross_before_deductions * input.referral_percent / dec!(100);
    let team_amount = agent_gross_before_deductions * input.team_split_percent / dec!(100);
    let fixed_fees_total = input.transaction_fee + input.royalty_fee;

    let agent_take_home =
        agent_gross_before_deductions - referral_amount - team_amount - fixed_fees_total;

    // sale_price is non-zero here
    let effective_commission_rate_percent = agent_take_home / input.sale_price * dec!(100);

    if agent_take_home < Decimal::ZERO {
        warnings.push("Fees exceed the agent's gross — take-home is negative".into());
    }
    if input.total_commission_percent > dec!(10) {
        warnings.push(format!(
            "Total commission of {}% is above 10% — verify the entry",
            input.total_commission_percent
        ));
    }

    let result = CommissionResult {
        gross_commission_income,
        side_share_income,
        agent_gross_before_deductions,
        referral_amount,
        team_amount,
        fixed_fees_total,
        agent_take_home,
        effective_commission_rate_percent,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(Some(with_metadata(
        "Commission Split (GCI Waterfall)",
        input,
        warnings,
        elapsed,
        result,
    )))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &CommissionInput) -> DealEconomicsResult<()> {
    require_non_negative("sale_price", input.sale_price)?;
    require_non_negative("transaction_fee", input.transaction_fee)?;
    require_non_negative("royalty_fee", input.royalty_fee)?;
    require_percent_range("total_commission_percent", input.total_commission_percent)?;
    require_percent_range("brokerage_split_percent", input.brokerage_split_percent)?;
    require_percent_range("referral_percent", input.referral_percent)?;
    require_percent_range("team_split_percent", input.team_split_percent)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
