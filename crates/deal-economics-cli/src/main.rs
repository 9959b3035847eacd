mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::AffordabilityArgs;
use commands::commission::CommissionArgs;
use commands::investment::InvestmentArgs;
use commands::payment::PaymentArgs;
use commands::seller_net::SellerNetArgs;

/// Deal-economics calculations for real estate agents
#[derive(Parser)]
#[command(
    name = "deal",
    version,
    about = "Deal-economics calculations for real estate agents",
    long_about = "A CLI for real-estate deal economics with decimal precision. \
                  Supports mortgage payments, PITI affordability with 36% DTI \
                  qualification, commission splits, seller net proceeds, and \
                  rental investment return analysis."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly principal & interest payment for a fixed-rate loan
    Payment(PaymentArgs),
    /// PITI breakdown, DTI qualification, and max affordable price
    Affordability(AffordabilityArgs),
    /// Commission split: GCI waterfall to agent take-home
    Commission(CommissionArgs),
    /// Seller net proceeds from an expected sale price
    SellerNet(SellerNetArgs),
    /// Rental investment pro forma and 5-year return projection
    Investment(InvestmentArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::payment::run_payment(args),
        Commands::Affordability(args) => commands::affordability::run_affordability(args),
        Commands::Commission(args) => commands::commission::run_commission(args),
        Commands::SellerNet(args) => commands::seller_net::run_seller_net(args),
        Commands::Investment(args) => commands::investment::run_investment(args),
        Commands::Version => {
            println!("deal {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
