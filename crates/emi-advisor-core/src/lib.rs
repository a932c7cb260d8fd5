//! Loan EMI estimates, affordability advice and assistance-scheme lookup.
//!
//! Every computation is pure and synchronous. Reference data lives in an
//! immutable [`reference::ReferenceTables`] value that callers build once and
//! share by reference.

pub mod error;
pub mod types;

#[cfg(feature = "emi")]
pub mod emi;

#[cfg(feature = "advisory")]
pub mod advisory;

#[cfg(feature = "reference")]
pub mod reference;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "assessment")]
pub mod assessment;

pub use error::EmiAdvisorError;
pub use types::*;

/// Standard result type for all emi-advisor operations
pub type EmiAdvisorResult<T> = Result<T, EmiAdvisorError>;
