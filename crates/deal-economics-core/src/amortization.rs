//! Fixed-rate amortization math shared by every calculator.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent};

/// Monthly principal & interest payment for a fully amortizing fixed-rate
/// loan: `P * r(1+r)^n / ((1+r)^n - 1)`.
///
/// Total over its domain: a zero rate falls back to straight-line
/// `P / n`, and a zero principal or zero term yields zero rather than
/// dividing by zero.
pub fn monthly_principal_interest(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> Money {
    let num_payments = term_years * 12;
    if principal.is_zero() || num_payments == 0 {
        return Decimal::ZERO;
    }

    let monthly_rate = monthly_rate(annual_rate_percent);
    if monthly_rate.is_zero() {
        return principal / Decimal::from(num_payments);
    }

    principal * payment_factor(monthly_rate, num_payments)
}

/// Largest principal whose payment fits the given monthly budget — the
/// inverse of `monthly_principal_interest` at the same rate and term.
pub fn max_principal_for_payment(
    monthly_payment: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> Money {
    let num_payments = term_years * 12;
    if monthly_payment <= Decimal::ZERO || num_payments == 0 {
        return Decimal::ZERO;
    }

    let monthly_rate = monthly_rate(annual_rate_percent);
    if monthly_rate.is_zero() {
        // Straight-line inversion
        return monthly_payment * Decimal::from(num_payments);
    }

    let factor = payment_factor(monthly_rate, num_payments);
    if factor.is_zero() {
        return Decimal::ZERO;
    }
    monthly_payment / factor
}

/// Lifetime totals for a fully amortizing loan: (total paid, total interest).
pub fn loan_totals(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> (Money, Money) {
    let payment = monthly_principal_interest(principal, annual_rate_percent, term_years);
    let total_paid = payment * Decimal::from(term_years * 12);
    (total_paid, total_paid - principal)
}

/// Annual percentage rate converted to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    annual_rate_percent / dec!(100) / dec!(12)
}

/// Payment per dollar of principal: `r(1+r)^n / ((1+r)^n - 1)`.
/// The affordability backsolve divides a payment budget by this factor.
pub fn payment_factor(monthly_rate: Decimal, num_payments: u32) -> Decimal {
    if num_payments == 0 {
        return Decimal::ZERO;
    }
    if monthly_rate.is_zero() {
        return Decimal::ONE / Decimal::from(num_payments);
    }

    let compound = compound_factor(monthly_rate, num_payments);
    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    monthly_rate * compound / denominator
}

/// (1 + r)^n via iterative multiplication — exact for integer exponents.
fn compound_factor(monthly_rate: Decimal, num_payments: u32) -> Decimal {
    let one_plus_r = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..num_payments {
        compound *= one_plus_r;
    }
    compound
}
