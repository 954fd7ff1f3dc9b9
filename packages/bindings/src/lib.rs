use napi::Result as NapiResult;
use napi_derive::napi;

use amortization_core::loan::{self, LoanParameters};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_params(input_json: &str) -> NapiResult<LoanParameters> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan engine
// ---------------------------------------------------------------------------

/// Derived values (rate per period, payment count, level payment) as JSON.
#[napi]
pub fn recalculate(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let derived = loan::recalculate(&params).map_err(to_napi_error)?;
    serde_json::to_string(&derived).map_err(to_napi_error)
}

/// Full schedule with lifetime totals, wrapped in the computation envelope.
#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let output = loan::build_amortization(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Per-period interest rate as a decimal string.
#[napi]
pub fn effective_interest_rate(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let rate = loan::effective_interest_rate(&params).map_err(to_napi_error)?;
    Ok(rate.to_string())
}
