//! Equated Monthly Installment (EMI) for a fully amortizing loan.
//!
//! `emi = P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly decimal
//! rate and `n` the number of monthly payments. A zero rate degenerates to
//! `P / n`. All math in `rust_decimal::Decimal`; the installment is rounded
//! to 2 dp, midpoint away from zero.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::EmiAdvisorError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, RatePercent, Years};
use crate::EmiAdvisorResult;

/// Monthly payments per year.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Decimal places for currency output.
pub const CURRENCY_DP: u32 = 2;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    /// Loan amount in currency units.
    pub principal: Money,
    /// Annual interest rate as a percentage (8.4 = 8.4% p.a.).
    pub annual_rate_percent: RatePercent,
    /// Tenure in years; fractions allowed (2.5 = 30 months).
    pub tenure_years: Years,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub emi: Money,
    pub monthly_rate: Rate,
    pub months: Decimal,
    pub total_payment: Money,
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed monthly installment for `principal` at `annual_rate_percent` over
/// `tenure_years`, rounded to 2 dp.
///
/// Fails with [`EmiAdvisorError::InvalidArgument`] when principal or tenure is
/// not positive, the rate is negative, or the result leaves Decimal's range.
pub fn compute_emi(
    principal: Money,
    annual_rate_percent: RatePercent,
    tenure_years: Years,
) -> EmiAdvisorResult<Money> {
    validate(principal, annual_rate_percent, tenure_years)?;

    let r = monthly_rate(annual_rate_percent);
    let n = months(tenure_years)?;

    let raw = if r.is_zero() {
        equal_split(principal, n)?
    } else {
        let factor = (Decimal::ONE + r).checked_powd(n).ok_or_else(|| {
            EmiAdvisorError::invalid("tenure_years", "Compounding factor overflows.")
        })?;
        let denominator = factor - Decimal::ONE;
        if denominator.is_zero() {
            // Rate too small to register over n periods.
            equal_split(principal, n)?
        } else {
            principal
                .checked_mul(r)
                .and_then(|v| v.checked_mul(factor))
                .and_then(|v| v.checked_div(denominator))
                .ok_or_else(|| EmiAdvisorError::invalid("principal", "Principal too large."))?
        }
    };

    Ok(round_currency(raw))
}

/// EMI together with the totals a borrower compares lenders on.
pub fn calculate_emi(input: &EmiInput) -> EmiAdvisorResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let emi = compute_emi(input.principal, input.annual_rate_percent, input.tenure_years)?;
    let r = monthly_rate(input.annual_rate_percent);
    let n = months(input.tenure_years)?;

    if r.is_zero() {
        warnings.push("Interest rate is zero; EMI is principal divided equally over the tenure.".into());
    }
    if !n.fract().is_zero() {
        warnings.push(format!("Tenure is {n} months; the final fractional period is priced with a fractional exponent."));
    }

    let total_payment = emi
        .checked_mul(n)
        .map(round_currency)
        .ok_or_else(|| EmiAdvisorError::invalid("principal", "Total payment too large."))?;
    let total_interest = (total_payment - input.principal).max(Decimal::ZERO);

    debug!(%emi, %total_payment, %total_interest, "computed EMI");

    let output = EmiOutput {
        emi,
        monthly_rate: r,
        months: n,
        total_payment,
        total_interest,
    };

    let assumptions = serde_json::json!({
        "monthly_rate": "annual_rate_percent / 1200",
        "periods": "tenure_years * 12",
        "rounding": "2 dp, midpoint away from zero",
        "zero_rate": "principal / periods",
    });

    Ok(with_metadata(
        "Level-payment amortizing loan (reducing balance)",
        &assumptions,
        warnings,
        start,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

pub(crate) fn validate(
    principal: Money,
    annual_rate_percent: RatePercent,
    tenure_years: Years,
) -> EmiAdvisorResult<()> {
    if principal <= Decimal::ZERO {
        return Err(EmiAdvisorError::invalid("principal", "Principal must be positive."));
    }
    if tenure_years <= Decimal::ZERO {
        return Err(EmiAdvisorError::invalid("tenure_years", "Tenure must be positive."));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(EmiAdvisorError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative.",
        ));
    }
    Ok(())
}

/// Annual percentage to monthly decimal rate.
pub(crate) fn monthly_rate(annual_rate_percent: RatePercent) -> Rate {
    annual_rate_percent / (MONTHS_PER_YEAR * dec!(100))
}

pub(crate) fn months(tenure_years: Years) -> EmiAdvisorResult<Decimal> {
    tenure_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| EmiAdvisorError::invalid("tenure_years", "Tenure too large."))
}

/// `principal / n`; a sub-month tenure can push the quotient out of range.
fn equal_split(principal: Money, n: Decimal) -> EmiAdvisorResult<Money> {
    principal
        .checked_div(n)
        .ok_or_else(|| EmiAdvisorError::invalid("principal", "Principal too large for tenure."))
}

pub(crate) fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}
