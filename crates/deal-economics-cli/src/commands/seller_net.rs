use clap::Args;
use serde_json::Value;

use deal_economics_core::seller_net::proceeds::{self, SellerNetInput};

use crate::input;

#[derive(Args)]
pub struct SellerNetArgs {
    /// Path to a JSON file with the seller net input record
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_seller_net(args: SellerNetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let net_input: SellerNetInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for seller net".into());
    };
    match proceeds::calculate_seller_net(&net_input)? {
        Some(result) => Ok(serde_json::to_value(result)?),
        None => {
            eprintln!("no result — expected sale price must be non-zero");
            Ok(Value::Null)
        }
    }
}
