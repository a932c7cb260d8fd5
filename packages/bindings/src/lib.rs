use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::OnceLock;

use emi_advisor_core::reference::ReferenceTables;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Built-in tables, constructed on first use and shared by every call.
fn tables() -> &'static ReferenceTables {
    static TABLES: OnceLock<ReferenceTables> = OnceLock::new();
    TABLES.get_or_init(ReferenceTables::default)
}

// ---------------------------------------------------------------------------
// EMI
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ComputeEmiInput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    tenure_years: Decimal,
}

/// Bare EMI, returned as a decimal string to keep precision.
#[napi]
pub fn compute_emi(input_json: String) -> NapiResult<String> {
    let input: ComputeEmiInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let emi = emi_advisor_core::emi::compute_emi(
        input.principal,
        input.annual_rate_percent,
        input.tenure_years,
    )
    .map_err(to_napi_error)?;
    Ok(emi.to_string())
}

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: emi_advisor_core::emi::EmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = emi_advisor_core::emi::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: emi_advisor_core::emi::EmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = emi_advisor_core::amortization::build_amortization_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Advice
// ---------------------------------------------------------------------------

#[napi]
pub fn advise_strategies(input_json: String) -> NapiResult<String> {
    let input: emi_advisor_core::advisory::AdviceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let strategies = emi_advisor_core::advisory::advise(&input);
    serde_json::to_string(&strategies).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Enquiry form
// ---------------------------------------------------------------------------

#[napi]
pub fn form_options() -> NapiResult<String> {
    let options = emi_advisor_core::assessment::form_options(tables());
    serde_json::to_string(&options).map_err(to_napi_error)
}

#[napi]
pub fn assess_loan(input_json: String) -> NapiResult<String> {
    let input: emi_advisor_core::assessment::LoanRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        emi_advisor_core::assessment::assess_loan(tables(), &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
