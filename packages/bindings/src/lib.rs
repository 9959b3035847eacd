use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PaymentRequest {
    principal: Decimal,
    annual_interest_rate_percent: Decimal,
    term_years: u32,
}

#[napi]
pub fn calculate_payment(input_json: String) -> NapiResult<String> {
    let input: PaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = deal_economics_core::amortization::monthly_principal_interest(
        input.principal,
        input.annual_interest_rate_percent,
        input.term_years,
    );
    Ok(payment.to_string())
}

// ---------------------------------------------------------------------------
// Affordability
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_affordability(input_json: String) -> NapiResult<String> {
    let input: deal_economics_core::affordability::mortgage::AffordabilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal_economics_core::affordability::mortgage::calculate_affordability(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Commission
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_commission_split(input_json: String) -> NapiResult<String> {
    let input: deal_economics_core::commission::split::CommissionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal_economics_core::commission::split::calculate_commission_split(&input)
        .map_err(to_napi_error)?;
    match output {
        Some(output) => serde_json::to_string(&output).map_err(to_napi_error),
        None => Ok("null".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Seller net proceeds
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_seller_net(input_json: String) -> NapiResult<String> {
    let input: deal_economics_core::seller_net::proceeds::SellerNetInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal_economics_core::seller_net::proceeds::calculate_seller_net(&input)
        .map_err(to_napi_error)?;
    match output {
        Some(output) => serde_json::to_string(&output).map_err(to_napi_error),
        None => Ok("null".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Investment analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_investment_metrics(input_json: String) -> NapiResult<String> {
    let input: deal_economics_core::investment::rental::InvestmentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal_economics_core::investment::rental::calculate_investment_metrics(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
