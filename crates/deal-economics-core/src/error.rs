use thiserror::Error;

/// The taxonomy is deliberately narrow: inside the formulas every
/// zero-denominator case resolves to zero, so errors only arise at the
/// contract boundary (inputs the UI layer should have rejected) or when
/// serializing an input echo.
#[derive(Debug, Error)]
pub enum DealEconomicsError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DealEconomicsError {
    fn from(e: serde_json::Error) -> Self {
        DealEconomicsError::SerializationError(e.to_string())
    }
}
