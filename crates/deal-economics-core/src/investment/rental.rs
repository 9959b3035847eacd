use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization;
use crate::error::DealEconomicsError;
use crate::types::{
    require_non_negative, require_percent_range, with_metadata, ComputationOutput, Money,
    Percent,
};
use crate::DealEconomicsResult;

/// Assumed equity share when no down payment is supplied — a documented
/// default, not an inferred value.
const DEFAULT_CASH_INVESTED_SHARE: Decimal = dec!(0.25);

const HOLDING_PERIOD_YEARS: u32 = 5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for the rental-property return analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub purchase_price: Money,
    pub down_payment: Money,
    /// Financed amount. Derived as `purchase_price - down_payment` when
    /// absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<Money>,
    pub interest_rate_percent: Percent,
    pub term_years: u32,
    pub monthly_rent: Money,
    pub other_monthly_income: Money,
    pub annual_property_taxes: Money,
    pub annual_insurance: Money,
    pub monthly_hoa: Money,
    pub monthly_maintenance_reserve: Money,
    pub monthly_vacancy_allowance: Money,
    pub monthly_property_management: Money,
    pub appreciation_rate_percent: Percent,
    pub exit_cap_rate_percent: Percent,
}

/// Pro-forma return metrics, including the simplified 5-year projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentResult {
    /// Annual gross income less the annualized vacancy allowance
    pub effective_gross_income: Money,
    /// Annual operating expenses — excludes debt service
    pub operating_expenses: Money,
    pub net_operating_income: Money,
    pub monthly_principal_interest: Money,
    pub annual_debt_service: Money,
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    pub cap_rate_percent: Percent,
    pub cash_on_cash_percent: Percent,
    pub debt_service_coverage_ratio: Decimal,
    pub break_even_occupancy_percent: Percent,
    pub five_year_exit_value: Money,
    /// Approximates IRR as a single compounding step over the total 5-year
    /// proceeds — not a discounted multi-period IRR.
    pub simplified_five_year_irr_percent: Percent,
    pub multiple_on_invested_capital: Decimal,
    pub rent_to_price_ratio_percent: Percent,
    pub cash_invested: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the income/expense pro forma, leverage metrics, and the
/// simplified 5-year return projection.
pub fn calculate_investment_metrics(
    input: &InvestmentInput,
) -> DealEconomicsResult<ComputationOutput<InvestmentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    // --- Financing ---
    let loan_amount = input
        .loan_amount
        .unwrap_or(input.purchase_price - input.down_payment);
    let monthly_pi = amortization::monthly_principal_interest(
        loan_amount,
        input.interest_rate_percent,
        input.term_years,
    );
    let annual_debt_service = monthly_pi * dec!(12);

    // --- Income ---
    let total_monthly_income = input.monthly_rent + input.other_monthly_income;
    let annual_gross_income = total_monthly_income * dec!(12);
    let effective_gross_income =
        annual_gross_income - input.monthly_vacancy_allowance * dec!(12);

    // --- Expenses ---
    let monthly_expenses_including_debt = input.annual_property_taxes / dec!(12)
        + input.annual_insurance / dec!(12)
        + input.monthly_hoa
        + input.monthly_maintenance_reserve
        + input.monthly_property_management
        + monthly_pi;
    let operating_expenses = monthly_expenses_including_debt * dec!(12) - annual_debt_service;

    let net_operating_income = effective_gross_income - operating_expenses;

    // --- Core ratios ---
    let cap_rate_percent = if input.purchase_price.is_zero() {
        Decimal::ZERO
    } else {
        net_operating_income / input.purchase_price * dec!(100)
    };

    let monthly_cash_flow = total_monthly_income - monthly_expenses_including_debt;
    let annual_cash_flow = monthly_cash_flow * dec!(12);

    let cash_invested = if input.down_payment > Decimal::ZERO {
        input.down_payment
    } else {
        input.purchase_price * DEFAULT_CASH_INVESTED_SHARE
    };

    let cash_on_cash_percent = if cash_invested > Decimal::ZERO {
        annual_cash_flow / cash_invested * dec!(100)
    } else {
        Decimal::ZERO
    };

    let debt_service_coverage_ratio = if annual_debt_service > Decimal::ZERO {
        net_operating_income / annual_debt_service
    } else {
        Decimal::ZERO
    };

    let break_even_occupancy_percent = if annual_gross_income > Decimal::ZERO {
        (operating_expenses + annual_debt_service) / annual_gross_income * dec!(100)
    } else {
        Decimal::ZERO
    };

    // --- Simplified 5-year projection ---
    let (five_year_exit_value, multiple_on_invested_capital, simplified_five_year_irr_percent) =
        project_five_year(
            input,
            net_operating_income,
            annual_cash_flow,
            cash_invested,
            &mut warnings,
        );

    let rent_to_price_ratio_percent = if input.purchase_price.is_zero() {
        Decimal::ZERO
    } else {
        input.monthly_rent / input.purchase_price * dec!(100)
    };

    if monthly_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative monthly cash flow of ${:.2}",
            -monthly_cash_flow
        ));
    }
    if debt_service_coverage_ratio > Decimal::ZERO
        && debt_service_coverage_ratio < dec!(1.2)
    {
        warnings.push(format!(
            "DSCR of {debt_service_coverage_ratio:.2} is below 1.20x — lender covenant risk"
        ));
    }

    let result = InvestmentResult {
        effective_gross_income,
        operating_expenses,
        net_operating_income,
        monthly_principal_interest: monthly_pi,
        annual_debt_service,
        monthly_cash_flow,
        annual_cash_flow,
        cap_rate_percent,
        cash_on_cash_percent,
        debt_service_coverage_ratio,
        break_even_occupancy_percent,
        five_year_exit_value,
        simplified_five_year_irr_percent,
        multiple_on_invested_capital,
        rent_to_price_ratio_percent,
        cash_invested,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Investment Return Analysis (Pro Forma, Simplified 5-Year Exit)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// 5-year projection
// ---------------------------------------------------------------------------

/// Exit value, MOIC, and the simplified IRR. The IRR treats the holding
/// period as one compounding step on total proceeds: `moic^(1/5) - 1`,
/// not a discounted multi-period solve.
fn project_five_year(
    input: &InvestmentInput,
    net_operating_income: Money,
    annual_cash_flow: Money,
    cash_invested: Money,
    warnings: &mut Vec<String>,
) -> (Money, Decimal, Percent) {
    let growth = Decimal::ONE + input.appreciation_rate_percent / dec!(100);
    let mut exit_noi = net_operating_income;
    for _ in 0..HOLDING_PERIOD_YEARS {
        exit_noi *= growth;
    }

    let exit_value = if input.exit_cap_rate_percent > Decimal::ZERO {
        exit_noi / (input.exit_cap_rate_percent / dec!(100))
    } else {
        warnings.push("Exit cap rate is zero — exit value not projected".into());
        Decimal::ZERO
    };

    let total_cash_flows = annual_cash_flow * Decimal::from(HOLDING_PERIOD_YEARS);

    let moic = if cash_invested > Decimal::ZERO {
        (exit_value + total_cash_flows) / cash_invested
    } else {
        Decimal::ZERO
    };

    let simplified_irr_percent = if moic > Decimal::ZERO {
        (moic.powd(dec!(0.2)) - Decimal::ONE) * dec!(100)
    } else {
        warnings.push("Non-positive 5-year multiple — simplified IRR not meaningful".into());
        Decimal::ZERO
    };

    (exit_value, moic, simplified_irr_percent)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &InvestmentInput) -> DealEconomicsResult<()> {
    require_non_negative("purchase_price", input.purchase_price)?;
    require_non_negative("down_payment", input.down_payment)?;
    require_non_negative("monthly_rent", input.monthly_rent)?;
    require_non_negative("other_monthly_income", input.other_monthly_income)?;
    require_non_negative("annual_property_taxes", input.annual_property_taxes)?;
    require_non_negative("annual_insurance", input.annual_insurance)?;
    require_non_negative("monthly_hoa", input.monthly_hoa)?;
    require_non_negative(
        "monthly_maintenance_reserve",
        input.monthly_maintenance_reserve,
    )?;
    require_non_negative("monthly_vacancy_allowance", input.monthly_vacancy_allowance)?;
    require_non_negative(
        "monthly_property_management",
        input.monthly_property_management,
    )?;
    require_percent_range("interest_rate_percent", input.interest_rate_percent)?;
    require_percent_range("appreciation_rate_percent", input.appreciation_rate_percent)?;
    require_percent_range("exit_cap_rate_percent", input.exit_cap_rate_percent)?;

    if let Some(loan) = input.loan_amount {
        require_non_negative("loan_amount", loan)?;
    } else if input.down_payment > input.purchase_price {
        return Err(DealEconomicsError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot exceed purchase price when the loan is derived".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// $400k duplex, 25% down, 6.5%/30yr, $3,500/mo rent.
    fn sample_input() -> InvestmentInput {
        InvestmentInput {
            purchase_price: dec!(400000),
            down_payment: dec!(100000),
            loan_amount: None,
            interest_rate_percent: dec!(6.5),
            term_years: 30,
            monthly_rent: dec!(3500),
            other_monthly_income: dec!(100),
            annual_property_taxes: dec!(7200),
            annual_insurance: dec!(1800),
            monthly_hoa: Decimal::ZERO,
            monthly_maintenance_reserve: dec!(150),
            monthly_vacancy_allowance: dec!(175),
            monthly_property_management: dec!(280),
            appreciation_rate_percent: dec!(3),
            exit_cap_rate_percent: dec!(6),
        }
    }

    #[test]
    fn test_income_and_noi() {
        let out = calculate_investment_metrics(&sample_input()).unwrap();
        let r = &out.result;

        // Gross: (3500 + 100) * 12 = 43200; EGI = 43200 - 175*12 = 41100
        assert_eq!(r.effective_gross_income, dec!(41100));

        // OpEx: (7200 + 1800)/12 + 150 + 280 = 750 + 430 = 1180/mo => 14160/yr
        assert_eq!(r.operating_expenses, dec!(14160));
        assert_eq!(r.net_operating_income, dec!(26940));
    }

    #[test]
    fn test_cap_rate() {
        let out = calculate_investment_metrics(&sample_input()).unwrap();
        // 26940 / 400000 * 100 = 6.735
        assert_eq!(out.result.cap_rate_percent, dec!(6.735));
    }

    #[test]
    fn test_cash_flow_and_debt_service() {
        let out = calculate_investment_metrics(&sample_input()).unwrap();
        let r = &out.result;

        // $300k at 6.5%/30yr ≈ $1,896.20/mo
        assert!(
            r.monthly_principal_interest > dec!(1896)
                && r.monthly_principal_interest < dec!(1897)
        );
        assert_eq!(r.annual_debt_service, r.monthly_principal_interest * dec!(12));
        assert_eq!(
            r.monthly_cash_flow,
            dec!(3600) - (dec!(1180) + r.monthly_principal_interest)
        );
        assert_eq!(r.annual_cash_flow, r.monthly_cash_flow * dec!(12));
    }

    #[test]
    fn test_dscr() {
        let out = calculate_investment_metrics(&sample_input()).unwrap();
        let r = &out.result;

        assert_eq!(
            r.debt_service_coverage_ratio,
            r.net_operating_income / r.annual_debt_service
        );
        assert!(r.debt_service_coverage_ratio > Decimal::ONE);
    }

    #[test]
    fn test_cash_on_cash_uses_down_payment() {
        let out = calculate_investment_metrics(&sample_input()).unwrap();
        let r = &out.result;

        assert_eq!(r.cash_invested, dec!(100000));
        assert_eq!(
            r.cash_on_cash_percent,
            r.annual_cash_flow / dec!(100000) * dec!(100)
        );
    }

    #[test]
    fn test_cash_invested_defaults_to_quarter() {
        let mut input = sample_input();
        input.down_payment = Decimal::ZERO;
        input.loan_amount = Some(dec!(400000));

        let out = calculate_investment_metrics(&input).unwrap();
        assert_eq!(out.result.cash_invested, dec!(100000));
    }

    #[test]
    fn test_zero_rate_loan_no_division_by_zero() {
        let mut input = sample_input();
        input.interest_rate_percent = Decimal::ZERO;

        let out = calculate_investment_metrics(&input).unwrap();
        // $300k / 360 payments exactly
        assert_eq!(
            out.result.monthly_principal_interest,
            dec!(300000) / dec!(360)
        );
    }

    #[test]
    fn test_all_cash_purchase_zero_dscr() {
        let mut input = sample_input();
        input.down_payment = dec!(400000);

        let out = calculate_investment_metrics(&input).unwrap();
        let r = &out.result;

        assert_eq!(r.annual_debt_service, Decimal::ZERO);
        assert_eq!(r.debt_service_coverage_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_break_even_occupancy() {
        let out = calculate_investment_metrics(&sample_input()).unwrap();
        let r = &out.result;

        let expected =
            (r.operating_expenses + r.annual_debt_service) / dec!(43200) * dec!(100);
        assert_eq!(r.break_even_occupancy_percent, expected);
        assert!(r.break_even_occupancy_percent < dec!(100));
    }

    #[test]
    fn test_five_year_exit_value() {
        let out = calculate_investment_metrics(&sample_input()).unwrap();
        let r = &out.result;

        // exit NOI = 26940 * 1.03^5; exit value = exit NOI / 0.06
        let mut exit_noi = dec!(26940);
        for _ in 0..5 {
            exit_noi *= dec!(1.03);
        }
        assert_eq!(r.five_year_exit_value, exit_noi / dec!(0.06));
    }

    #[test]
    fn test_moic_and_simplified_irr() {
        let out = calculate_investment_metrics(&sample_input()).unwrap();
        let r = &out.result;

        let expected_moic =
            (r.five_year_exit_value + r.annual_cash_flow * dec!(5)) / r.cash_invested;
        assert_eq!(r.multiple_on_invested_capital, expected_moic);

        // moic^(1/5) - 1 as a percent; moic here is well above 1
        assert!(r.multiple_on_invested_capital > Decimal::ONE);
        assert!(r.simplified_five_year_irr_percent > Decimal::ZERO);
        // Sanity: 5th root of moic compounds back to moic within tolerance
        let root = r.simplified_five_year_irr_percent / dec!(100) + Decimal::ONE;
        let mut compounded = Decimal::ONE;
        for _ in 0..5 {
            compounded *= root;
        }
        let diff = (compounded - r.multiple_on_invested_capital).abs();
        assert!(diff < dec!(0.0001), "5th root drifted by {diff}");
    }

    #[test]
    fn test_zero_exit_cap_rate_coerces_to_zero() {
        let mut input = sample_input();
        input.exit_cap_rate_percent = Decimal::ZERO;

        let out = calculate_investment_metrics(&input).unwrap();
        assert_eq!(out.result.five_year_exit_value, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("Exit cap rate")));
    }

    #[test]
    fn test_rent_to_price_ratio() {
        let out = calculate_investment_metrics(&sample_input()).unwrap();
        // 3500 / 400000 * 100 = 0.875
        assert_eq!(out.result.rent_to_price_ratio_percent, dec!(0.875));
    }

    #[test]
    fn test_explicit_loan_amount_overrides_derivation() {
        let mut input = sample_input();
        input.loan_amount = Some(dec!(250000));

        let out = calculate_investment_metrics(&input).unwrap();
        let expected =
            amortization::monthly_principal_interest(dec!(250000), dec!(6.5), 30);
        assert_eq!(out.result.monthly_principal_interest, expected);
    }

    #[test]
    fn test_negative_cash_flow_warning() {
        let mut input = sample_input();
        input.monthly_rent = dec!(1500);

        let out = calculate_investment_metrics(&input).unwrap();
        assert!(out.result.monthly_cash_flow < Decimal::ZERO);
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("Negative monthly cash flow")));
    }
}
