use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DealEconomicsError;
use crate::DealEconomicsResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages on the 0–100 scale, exactly as the product's input records
/// carry them (7.5 = 7.5%). Never 0–1 decimals.
pub type Percent = Decimal;

/// A figure entered either as an absolute dollar amount or as a percent of a
/// base price (home price, sale price). Used for down payments, property
/// taxes, insurance, and seller concessions. Resolved to dollars before any
/// formula sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum DollarOrPercent {
    Dollars(Money),
    PercentOfPrice(Percent),
}

impl DollarOrPercent {
    /// Resolve to an absolute dollar amount against the given base price.
    pub fn resolve(&self, base_price: Money) -> Money {
        match self {
            DollarOrPercent::Dollars(d) => *d,
            DollarOrPercent::PercentOfPrice(p) => base_price * *p / dec!(100),
        }
    }

    /// The raw entered value, whichever unit it carries.
    pub fn raw(&self) -> Decimal {
        match self {
            DollarOrPercent::Dollars(d) => *d,
            DollarOrPercent::PercentOfPrice(p) => *p,
        }
    }
}

impl Default for DollarOrPercent {
    fn default() -> Self {
        DollarOrPercent::Dollars(Decimal::ZERO)
    }
}

/// Loan program selector. Informational only — carried through to the result
/// untouched; the payment math does not change by program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    #[default]
    Conventional,
    Fha,
    Va,
    Usda,
    Jumbo,
    Other(String),
}

/// Which side of the deal the agent represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionSide {
    /// Listing or buyer side: the agent's brokerage receives half the GCI.
    #[default]
    ListingOrBuyerHalf,
    /// Dual agency: the agent's brokerage receives the full GCI.
    DualFull,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Reject a negative currency entry. The form layer is responsible for
/// refusing negative input; the engine enforces the same contract at its
/// boundary.
pub fn require_non_negative(field: &str, value: Money) -> DealEconomicsResult<()> {
    if value < Decimal::ZERO {
        return Err(DealEconomicsError::InvalidInput {
            field: field.into(),
            reason: "Currency inputs must be non-negative".into(),
        });
    }
    Ok(())
}

/// Reject a percentage outside [0, 100].
pub fn require_percent_range(field: &str, value: Percent) -> DealEconomicsResult<()> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(DealEconomicsError::InvalidInput {
            field: field.into(),
            reason: "Percentages must be between 0 and 100".into(),
        });
    }
    Ok(())
}
