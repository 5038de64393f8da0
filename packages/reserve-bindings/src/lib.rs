use napi::Result as NapiResult;
use napi_derive::napi;

use reserve_core::multiplier::{self, report, SimulationInput};
use reserve_core::time_value::{self, InterestInput};
use reserve_core::CompoundingFrequency;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Money multiplier
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = multiplier::simulate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn report_rows(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::build_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_simulation_input() -> NapiResult<String> {
    serde_json::to_string(&SimulationInput::default()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Interest
// ---------------------------------------------------------------------------

#[napi]
pub fn compound_interest(input_json: String) -> NapiResult<String> {
    let input: InterestInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = time_value::calculate_interest(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Periods per year for a frequency given by name or selector index.
#[napi]
pub fn periods_per_year(frequency: String) -> NapiResult<String> {
    let resolved = match frequency.trim().parse::<usize>() {
        Ok(index) => CompoundingFrequency::from_index(index),
        Err(_) => frequency
            .parse::<CompoundingFrequency>()
            .map_err(to_napi_error)?,
    };
    Ok(resolved.periods_per_year().to_string())
}
