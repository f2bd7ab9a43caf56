use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Full calculation for one loan: payment, totals and the amortization schedule.
#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::mortgage::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::mortgage::analyze_mortgage(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Side-by-side comparison of 2 to 5 loans given as `{"mortgages": [...]}`.
#[napi]
pub fn compare_mortgages(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::comparison::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_core::comparison::analyze_comparison(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
