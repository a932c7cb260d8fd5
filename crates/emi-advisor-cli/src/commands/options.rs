use serde_json::Value;

use emi_advisor_core::assessment;
use emi_advisor_core::reference::ReferenceTables;

/// Banks and caste categories offered on the enquiry form.
pub fn run_options(tables: &ReferenceTables) -> Result<Value, Box<dyn std::error::Error>> {
    let options = assessment::form_options(tables);
    Ok(serde_json::to_value(options)?)
}
