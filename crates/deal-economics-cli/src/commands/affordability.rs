use clap::Args;
use serde_json::Value;

use deal_economics_core::affordability::mortgage::{self, AffordabilityInput};

use crate::input;

#[derive(Args)]
pub struct AffordabilityArgs {
    /// Path to a JSON file with the affordability input record
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let aff_input: AffordabilityInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for affordability".into());
    };
    let result = mortgage::calculate_affordability(&aff_input)?;
    Ok(serde_json::to_value(result)?)
}
