use clap::Args;
use serde_json::Value;

use deal_economics_core::investment::rental::{self, InvestmentInput};

use crate::input;

#[derive(Args)]
pub struct InvestmentArgs {
    /// Path to a JSON file with the investment input record
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_investment(args: InvestmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inv_input: InvestmentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for investment analysis".into());
    };
    let result = rental::calculate_investment_metrics(&inv_input)?;
    Ok(serde_json::to_value(result)?)
}
