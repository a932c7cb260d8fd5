//! Month-by-month amortization schedule for a level-EMI loan.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::emi::{self, EmiInput};
use crate::error::EmiAdvisorError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::EmiAdvisorResult;

/// Longest schedule produced (100 years of monthly rows).
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub emi: Money,
    pub months: u32,
    pub total_paid: Money,
    pub total_interest: Money,
    pub rows: Vec<AmortizationRow>,
}

/// Split every installment into interest and principal.
///
/// Interest accrues on the opening balance at the monthly rate and is rounded
/// to 2 dp each month. The final row absorbs the rounding residual so the loan
/// closes at exactly zero.
pub fn build_amortization_schedule(
    input: &EmiInput,
) -> EmiAdvisorResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let installment = emi::compute_emi(input.principal, input.annual_rate_percent, input.tenure_years)?;
    let r = emi::monthly_rate(input.annual_rate_percent);
    let exact_months = emi::months(input.tenure_years)?;

    let months = exact_months
        .ceil()
        .to_u32()
        .filter(|m| *m <= MAX_SCHEDULE_MONTHS)
        .ok_or_else(|| {
            EmiAdvisorError::invalid("tenure_years", "Schedule limited to 1200 months.")
        })?;

    if !exact_months.fract().is_zero() {
        warnings.push(format!(
            "Tenure of {exact_months} months rounded up to {months} schedule rows."
        ));
    }

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = input.principal;
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=months {
        let opening = balance;
        let interest = opening
            .checked_mul(r)
            .map(emi::round_currency)
            .ok_or_else(|| overflow(month))?;
        let due = opening.checked_add(interest).ok_or_else(|| overflow(month))?;

        let (payment, principal) = if month == months || installment >= due {
            (due, opening)
        } else {
            (installment, installment - interest)
        };

        balance = opening - principal;
        total_paid = total_paid.checked_add(payment).ok_or_else(|| overflow(month))?;
        total_interest = total_interest
            .checked_add(interest)
            .ok_or_else(|| overflow(month))?;

        rows.push(AmortizationRow {
            month,
            opening_balance: opening,
            payment,
            interest,
            principal,
            closing_balance: balance,
        });

        if balance.is_zero() {
            break;
        }
    }

    if rows.len() < months as usize {
        warnings.push(format!("Loan fully repaid after {} months.", rows.len()));
    }

    debug!(months, %total_interest, "amortization schedule built");

    let schedule = AmortizationSchedule {
        emi: installment,
        months,
        total_paid,
        total_interest,
        rows,
    };

    let assumptions = serde_json::json!({
        "interest_accrual": "opening balance * annual_rate_percent / 1200, rounded to 2 dp",
        "final_payment": "clears outstanding balance",
    });

    Ok(with_metadata(
        "Reducing-balance amortization schedule",
        &assumptions,
        warnings,
        start,
        schedule,
    ))
}

fn overflow(month: u32) -> EmiAdvisorError {
    EmiAdvisorError::invalid(
        "principal",
        &format!("Schedule totals exceed the representable range at month {month}."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(principal: Decimal, rate: Decimal, years: Decimal) -> EmiInput {
        EmiInput {
            principal,
            annual_rate_percent: rate,
            tenure_years: years,
        }
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let out = build_amortization_schedule(&input(dec!(500_000), dec!(8.4), dec!(5))).unwrap();
        let schedule = &out.result;
        assert_eq!(schedule.rows.len(), 60);
        assert_eq!(schedule.rows.last().unwrap().closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_first_row_interest() {
        let out = build_amortization_schedule(&input(dec!(500_000), dec!(8.4), dec!(5))).unwrap();
        let first = &out.result.rows[0];
        // 500_000 * 0.007
        assert_eq!(first.interest, dec!(3500.00));
        assert_eq!(first.principal, dec!(6734.18));
        assert_eq!(first.closing_balance, dec!(493265.82));
    }

    #[test]
    fn test_totals_reconcile() {
        let out = build_amortization_schedule(&input(dec!(250_000), dec!(9.1), dec!(3))).unwrap();
        let s = &out.result;
        assert_eq!(s.total_paid - s.total_interest, dec!(250_000));
        let expected_interest = s.emi * dec!(36) - dec!(250_000);
        assert!((s.total_interest - expected_interest).abs() < dec!(1));
    }

    #[test]
    fn test_zero_rate_schedule_has_no_interest() {
        let out = build_amortization_schedule(&input(dec!(120_000), Decimal::ZERO, dec!(1))).unwrap();
        assert_eq!(out.result.total_interest, Decimal::ZERO);
        assert!(out.result.rows.iter().all(|r| r.payment == dec!(10_000)));
    }

    #[test]
    fn test_fractional_tenure_rounds_up() {
        let out = build_amortization_schedule(&input(dec!(100_000), dec!(8), dec!(1.3))).unwrap();
        assert_eq!(out.result.months, 16);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_schedule_rejects_invalid_input() {
        assert!(build_amortization_schedule(&input(dec!(-5), dec!(8), dec!(1))).is_err());
    }

    #[test]
    fn test_huge_principal_total_overflow_is_error() {
        let principal = dec!(70_000_000_000_000_000_000_000_000_000);
        let err = build_amortization_schedule(&input(principal, dec!(8.4), dec!(5))).unwrap_err();
        assert!(matches!(err, EmiAdvisorError::InvalidArgument { ref field, .. } if field == "principal"));
    }
}
