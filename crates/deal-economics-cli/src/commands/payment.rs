use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use deal_economics_core::amortization;

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal in dollars
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate as a percent (e.g. 7.5)
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub term: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct PaymentOutput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: u32,
    monthly_principal_interest: Decimal,
    total_paid: Decimal,
    total_interest: Decimal,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.principal < Decimal::ZERO {
        return Err("principal must be non-negative".into());
    }

    let monthly = amortization::monthly_principal_interest(args.principal, args.rate, args.term);
    let (total_paid, total_interest) = amortization::loan_totals(args.principal, args.rate, args.term);

    let output = PaymentOutput {
        principal: args.principal,
        annual_rate_percent: args.rate,
        term_years: args.term,
        monthly_principal_interest: monthly,
        total_paid,
        total_interest,
    };

    Ok(serde_json::to_value(output)?)
}
