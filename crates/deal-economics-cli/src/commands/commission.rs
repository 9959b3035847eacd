use clap::Args;
use serde_json::Value;

use deal_economics_core::commission::split::{self, CommissionInput};

use crate::input;

#[derive(Args)]
pub struct CommissionArgs {
    /// Path to a JSON file with the commission input record
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_commission(args: CommissionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let split_input: CommissionInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for commission split".into());
    };
    match split::calculate_commission_split(&split_input)? {
        Some(result) => Ok(serde_json::to_value(result)?),
        None => {
            eprintln!("no result — sale price and commission percent must be non-zero");
            Ok(Value::Null)
        }
    }
}
