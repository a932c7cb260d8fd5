use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual interest rates expressed as percentages (8.4 = 8.4% p.a.),
/// the way banks quote them.
pub type RatePercent = Decimal;

/// Rates expressed as decimals (0.007 = 0.7%).
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Precision tag reported in every envelope.
pub const PRECISION: &str = "rust_decimal_128bit";

/// Result envelope shared by every public computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Wrap a result in the envelope, timing it from `started`.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    started: Instant,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: started.elapsed().as_micros() as u64,
            precision: PRECISION.to_string(),
        },
    }
}
