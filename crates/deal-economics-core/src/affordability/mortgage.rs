use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization;
use crate::error::DealEconomicsError;
use crate::types::{
    require_non_negative, require_percent_range, with_metadata, ComputationOutput,
    DollarOrPercent, LoanType, Money, Percent,
};
use crate::DealEconomicsResult;

/// Fixed qualification target: total obligations at or below 36% of gross
/// monthly income.
const TARGET_DTI: Decimal = dec!(0.36);

/// PMI applies above this loan-to-value percentage. All-or-nothing step,
/// not phased: exactly 80.0 carries no PMI.
const PMI_LTV_THRESHOLD_PERCENT: Decimal = dec!(80);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for the mortgage & affordability calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub home_price: Money,
    /// Down payment in dollars or as a percent of home price
    pub down_payment: DollarOrPercent,
    pub annual_interest_rate_percent: Percent,
    pub term_years: u32,
    /// Loan program — informational only, does not change the math
    #[serde(default)]
    pub loan_type: LoanType,
    /// Annual property taxes in dollars or as a percent of home price
    pub annual_property_taxes: DollarOrPercent,
    /// Annual homeowner's insurance in dollars or as a percent of home price
    pub annual_insurance: DollarOrPercent,
    /// Annual PMI rate applied to the loan amount when LTV exceeds 80%
    pub annual_pmi_rate_percent: Percent,
    pub monthly_hoa: Money,
    /// Gross monthly income — qualification fields are computed only when
    /// this is supplied and positive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_monthly_income: Option<Money>,
    /// Existing monthly debt obligations (car loans, student loans, cards)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_monthly_debt: Option<Money>,
}

/// DTI qualification block, present only when income was supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Qualification {
    /// 36% of gross income minus other monthly debt. May be negative when
    /// existing debt exceeds the budget — never clamped.
    pub max_allowed_piti: Money,
    pub debt_to_income_ratio_percent: Percent,
    pub qualified: bool,
    /// Price backsolved from the remaining PI budget at the current rate and
    /// term, holding today's tax/insurance/PMI/HOA dollar amounts fixed.
    pub max_affordable_price: Money,
}

/// Complete affordability output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub loan_type: LoanType,
    pub down_payment_amount: Money,
    pub loan_amount: Money,
    pub loan_to_value_ratio_percent: Percent,
    pub monthly_principal_interest: Money,
    pub monthly_taxes: Money,
    pub monthly_insurance: Money,
    pub monthly_pmi: Money,
    pub monthly_hoa: Money,
    /// Sum of the five monthly components above
    pub total_monthly_piti: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<Qualification>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the full PITI breakdown, and — when income is supplied — the 36%
/// DTI qualification and the max-affordable-price backsolve.
pub fn calculate_affordability(
    input: &AffordabilityInput,
) -> DealEconomicsResult<ComputationOutput<AffordabilityResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    // --- Loan sizing ---
    let down_payment_amount = input.down_payment.resolve(input.home_price);
    let loan_amount = input.home_price - down_payment_amount;
    let ltv = if input.home_price.is_zero() {
        Decimal::ZERO
    } else {
        loan_amount / input.home_price * dec!(100)
    };

    // --- Monthly components ---
    let monthly_pi = amortization::monthly_principal_interest(
        loan_amount,
        input.annual_interest_rate_percent,
        input.term_years,
    );
    let monthly_taxes = input.annual_property_taxes.resolve(input.home_price) / dec!(12);
    let monthly_insurance = input.annual_insurance.resolve(input.home_price) / dec!(12);

    let monthly_pmi = if ltv > PMI_LTV_THRESHOLD_PERCENT {
        loan_amount * input.annual_pmi_rate_percent / dec!(100) / dec!(12)
    } else {
        Decimal::ZERO
    };

    let total_monthly_piti =
        monthly_pi + monthly_taxes + monthly_insurance + monthly_pmi + input.monthly_hoa;

    if monthly_pmi > Decimal::ZERO {
        warnings.push(format!(
            "LTV of {ltv:.1}% exceeds 80% — PMI of ${monthly_pmi:.2}/mo applies"
        ));
    }

    // --- Qualification ---
    let qualification = match input.gross_monthly_income {
        Some(income) if income > Decimal::ZERO => Some(qualify(
            input,
            income,
            total_monthly_piti,
            monthly_taxes,
            monthly_insurance,
            monthly_pmi,
            down_payment_amount,
            &mut warnings,
        )),
        _ => None,
    };

    let result = AffordabilityResult {
        loan_type: input.loan_type.clone(),
        down_payment_amount,
        loan_amount,
        loan_to_value_ratio_percent: ltv,
        monthly_principal_interest: monthly_pi,
        monthly_taxes,
        monthly_insurance,
        monthly_pmi,
        monthly_hoa: input.monthly_hoa,
        total_monthly_piti,
        qualification,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Mortgage Affordability (PITI, 36% DTI)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Qualification & backsolve
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn qualify(
    input: &AffordabilityInput,
    income: Money,
    total_monthly_piti: Money,
    monthly_taxes: Money,
    monthly_insurance: Money,
    monthly_pmi: Money,
    down_payment_amount: Money,
    warnings: &mut Vec<String>,
) -> Qualification {
    let other_debt = input.other_monthly_debt.unwrap_or(Decimal::ZERO);

    let max_allowed_piti = income * TARGET_DTI - other_debt;
    let qualified = total_monthly_piti <= max_allowed_piti;
    let dti = (total_monthly_piti + other_debt) / income * dec!(100);

    // Backsolve: how much PI budget is left after today's fixed housing
    // costs, and what loan does that budget carry. Tax/insurance/PMI/HOA
    // dollar amounts are not re-derived at the new price.
    let available_for_pi = max_allowed_piti
        - monthly_taxes
        - monthly_insurance
        - input.monthly_hoa
        - monthly_pmi;

    let max_loan_amount = amortization::max_principal_for_payment(
        available_for_pi,
        input.annual_interest_rate_percent,
        input.term_years,
    );
    let max_affordable_price = max_loan_amount + down_payment_amount;

    if max_allowed_piti < Decimal::ZERO {
        warnings.push(
            "Existing monthly debt exceeds the 36% income budget — no housing payment qualifies"
                .into(),
        );
    }
    if dti > dec!(36) {
        warnings.push(format!("DTI of {dti:.1}% is above the 36% target"));
    }

    Qualification {
        max_allowed_piti,
        debt_to_income_ratio_percent: dti,
        qualified,
        max_affordable_price,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &AffordabilityInput) -> DealEconomicsResult<()> {
    require_non_negative("home_price", input.home_price)?;
    require_non_negative("monthly_hoa", input.monthly_hoa)?;
    require_percent_range(
        "annual_interest_rate_percent",
        input.annual_interest_rate_percent,
    )?;
    require_percent_range("annual_pmi_rate_percent", input.annual_pmi_rate_percent)?;

    match input.down_payment {
        DollarOrPercent::Dollars(d) => {
            require_non_negative("down_payment", d)?;
            if d > input.home_price {
                return Err(DealEconomicsError::InvalidInput {
                    field: "down_payment".into(),
                    reason: "Dollar down payment cannot exceed home price".into(),
                });
            }
        }
        DollarOrPercent::PercentOfPrice(p) => require_percent_range("down_payment", p)?,
    }

    match input.annual_property_taxes {
        DollarOrPercent::Dollars(d) => require_non_negative("annual_property_taxes", d)?,
        DollarOrPercent::PercentOfPrice(p) => {
            require_percent_range("annual_property_taxes", p)?
        }
    }
    match input.annual_insurance {
        DollarOrPercent::Dollars(d) => require_non_negative("annual_insurance", d)?,
        DollarOrPercent::PercentOfPrice(p) => require_percent_range("annual_insurance", p)?,
    }

    if let Some(income) = input.gross_monthly_income {
        require_non_negative("gross_monthly_income", income)?;
    }
    if let Some(debt) = input.other_monthly_debt {
        require_non_negative("other_monthly_debt", debt)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
