use deal_economics_core::affordability::mortgage::{self, AffordabilityInput};
use deal_economics_core::{DollarOrPercent, LoanType};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Mortgage & affordability tests
// ===========================================================================

fn qualified_buyer() -> AffordabilityInput {
    // Worked example: $400k home, $80k down, 7.5%/30yr, $8k taxes, $1.2k
    // insurance, 0.5% PMI, no HOA, $10k/mo income, no other debt.
    AffordabilityInput {
        home_price: dec!(400000),
        down_payment: DollarOrPercent::Dollars(dec!(80000)),
        annual_interest_rate_percent: dec!(7.5),
        term_years: 30,
        loan_type: LoanType::Conventional,
        annual_property_taxes: DollarOrPercent::Dollars(dec!(8000)),
        annual_insurance: DollarOrPercent::Dollars(dec!(1200)),
        annual_pmi_rate_percent: dec!(0.5),
        monthly_hoa: Decimal::ZERO,
        gross_monthly_income: Some(dec!(10000)),
        other_monthly_debt: Some(Decimal::ZERO),
    }
}

#[test]
fn test_qualified_buyer_scenario() {
    let out = mortgage::calculate_affordability(&qualified_buyer()).unwrap();
    let r = &out.result;

    assert_eq!(r.loan_amount, dec!(320000));
    assert_eq!(r.loan_to_value_ratio_percent, dec!(80));
    assert_eq!(r.monthly_pmi, Decimal::ZERO);

    // $666.67 taxes + $100 insurance on top of ~$2,237.49 PI
    assert_eq!(r.monthly_taxes, dec!(8000) / dec!(12));
    assert_eq!(r.monthly_insurance, dec!(100));
    assert!(r.total_monthly_piti > dec!(3000) && r.total_monthly_piti < dec!(3010));

    let q = r.qualification.as_ref().unwrap();
    assert_eq!(q.max_allowed_piti, dec!(3600));
    assert!(q.qualified);
}

#[test]
fn test_pmi_step_function_boundary() {
    // Exactly 80.0% LTV: no PMI
    let mut input = qualified_buyer();
    input.down_payment = DollarOrPercent::PercentOfPrice(dec!(20));
    let at_boundary = mortgage::calculate_affordability(&input).unwrap();
    assert_eq!(at_boundary.result.loan_to_value_ratio_percent, dec!(80));
    assert_eq!(at_boundary.result.monthly_pmi, Decimal::ZERO);

    // 80.01% LTV: PMI applies in full
    input.down_payment = DollarOrPercent::PercentOfPrice(dec!(19.99));
    let above = mortgage::calculate_affordability(&input).unwrap();
    assert_eq!(above.result.loan_to_value_ratio_percent, dec!(80.01));
    assert!(above.result.monthly_pmi > Decimal::ZERO);
}

#[test]
fn test_price_monotonicity_with_fixed_dollar_down() {
    let mut input = qualified_buyer();
    let base = mortgage::calculate_affordability(&input).unwrap();

    input.home_price = dec!(410000);
    let bigger = mortgage::calculate_affordability(&input).unwrap();

    assert!(bigger.result.loan_amount > base.result.loan_amount);
    assert!(
        bigger.result.monthly_principal_interest > base.result.monthly_principal_interest
    );
}

#[test]
fn test_backsolve_approximate_inverse() {
    // Overpriced for the income: $700k home on $10k/mo. PMI-free (20% would
    // not hold at $700k with $80k down, so push the down payment up).
    let mut input = qualified_buyer();
    input.home_price = dec!(700000);
    input.down_payment = DollarOrPercent::Dollars(dec!(200000));

    let first = mortgage::calculate_affordability(&input).unwrap();
    let q = first.result.qualification.as_ref().unwrap();
    assert!(!q.qualified, "buyer should not qualify at $700k");

    // Re-run at the backsolved price, holding tax/insurance dollar amounts
    // fixed (they were entered in dollars, so they carry over unchanged).
    let mut second_input = input.clone();
    second_input.home_price = q.max_affordable_price;

    let second = mortgage::calculate_affordability(&second_input).unwrap();
    let r2 = &second.result;
    assert!(
        r2.monthly_pmi.is_zero(),
        "backsolve inverse check assumes a PMI-free scenario"
    );

    // PITI at the backsolved price should land on the budget within a cent.
    let q2 = r2.qualification.as_ref().unwrap();
    let diff = (r2.total_monthly_piti - q2.max_allowed_piti).abs();
    assert!(diff < dec!(0.01), "PITI missed the budget by {diff}");
}

#[test]
fn test_zero_rate_backsolve_straight_line() {
    let mut input = qualified_buyer();
    input.annual_interest_rate_percent = Decimal::ZERO;
    input.home_price = dec!(2000000);
    input.down_payment = DollarOrPercent::Dollars(dec!(400000));

    let out = mortgage::calculate_affordability(&input).unwrap();
    let r = &out.result;

    // Straight-line PI: $1.6M / 360
    assert_eq!(r.monthly_principal_interest, dec!(1600000) / dec!(360));

    let q = r.qualification.as_ref().unwrap();
    assert!(!q.qualified);
    // Budget for PI: 3600 - 666.67 - 100 - 0 - 0; inverted straight-line
    let available = dec!(3600) - r.monthly_taxes - r.monthly_insurance;
    assert_eq!(
        q.max_affordable_price,
        available * dec!(360) + dec!(400000)
    );
}

#[test]
fn test_dti_reporting() {
    let mut input = qualified_buyer();
    input.other_monthly_debt = Some(dec!(800));

    let out = mortgage::calculate_affordability(&input).unwrap();
    let r = &out.result;
    let q = r.qualification.as_ref().unwrap();

    assert_eq!(
        q.debt_to_income_ratio_percent,
        (r.total_monthly_piti + dec!(800)) / dec!(10000) * dec!(100)
    );
    assert_eq!(q.max_allowed_piti, dec!(2800));
}

#[test]
fn test_result_serialization_is_stable() {
    let out = mortgage::calculate_affordability(&qualified_buyer()).unwrap();
    let json = serde_json::to_value(&out.result).unwrap();

    // Field names are the stable persistence contract
    assert!(json.get("total_monthly_piti").is_some());
    assert!(json.get("loan_to_value_ratio_percent").is_some());
    assert!(json["qualification"].get("max_affordable_price").is_some());

    // Bit-identical on re-invocation with identical input
    let again = mortgage::calculate_affordability(&qualified_buyer()).unwrap();
    assert_eq!(json, serde_json::to_value(&again.result).unwrap());
}

#[test]
fn test_no_income_omits_qualification_in_json() {
    let mut input = qualified_buyer();
    input.gross_monthly_income = None;

    let out = mortgage::calculate_affordability(&input).unwrap();
    let json = serde_json::to_value(&out.result).unwrap();

    assert!(json.get("qualification").is_none());
}
