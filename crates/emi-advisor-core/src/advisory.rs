//! Rule-based affordability advice.
//!
//! Four independent checks run in a fixed priority order; each contributes at
//! most one [`Advisory`]. The resulting list is never sorted, so consumers can
//! render it top-down as most-important-first.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Money, RatePercent};

/// Share of the EMI that the post-EMI surplus must exceed before prepayment
/// is suggested.
pub const PREPAYMENT_HEADROOM: Decimal = dec!(0.5);

/// Annual rates strictly above this percentage count as high-interest.
pub const HIGH_INTEREST_THRESHOLD: RatePercent = dec!(9);

/// Divisor applied to every term when the unscaled arithmetic leaves
/// Decimal's range. Comparisons between equally scaled terms keep their outcome.
const OVERFLOW_SCALE: Decimal = dec!(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// Surplus covers the EMI.
    Affordable,
    /// Surplus does not cover the EMI.
    ExceedsSurplus,
    /// Surplus after the EMI leaves room to prepay.
    PrepaymentRecommended,
    /// Household already spends more than it earns.
    ExpensesExceedIncome,
    /// Rate above [`HIGH_INTEREST_THRESHOLD`].
    HighInterest,
}

impl Advisory {
    /// Human-readable text for display.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Affordable => "You can easily afford EMI payments. Stick to the standard plan.",
            Self::ExceedsSurplus => {
                "EMI exceeds your surplus. Consider negotiating loan tenure or seeking subsidies."
            }
            Self::PrepaymentRecommended => "You can prepay loans to reduce total interest paid.",
            Self::ExpensesExceedIncome => {
                "Expenses exceed income. Focus on cost-cutting before taking a big loan."
            }
            Self::HighInterest => "High-interest loan! Try to refinance after 2 years if rates drop.",
        }
    }

    /// Whether the advisory flags a problem rather than an opportunity.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::ExceedsSurplus | Self::ExpensesExceedIncome | Self::HighInterest
        )
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// An advisory paired with its rendered text, as shipped to front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub code: Advisory,
    pub message: String,
    /// Set for advisories that flag a problem; front ends highlight these.
    pub warning: bool,
}

impl From<Advisory> for Strategy {
    fn from(code: Advisory) -> Self {
        Strategy {
            code,
            message: code.message().to_string(),
            warning: code.is_warning(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceInput {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub emi: Money,
    pub annual_rate_percent: RatePercent,
}

/// Ordered advisories for a household taking on `emi`.
///
/// Total over all inputs: zero or negative income simply trips more checks,
/// and amounts near Decimal's limits are compared without overflowing.
pub fn advise_strategies(
    monthly_income: Money,
    monthly_expenses: Money,
    emi: Money,
    annual_rate_percent: RatePercent,
) -> Vec<Advisory> {
    let terms = BudgetTerms::new(monthly_income, monthly_expenses, emi);
    let mut advice = Vec::with_capacity(4);

    if terms.surplus > terms.emi {
        advice.push(Advisory::Affordable);
    } else {
        advice.push(Advisory::ExceedsSurplus);
    }

    if terms.after_emi > terms.headroom {
        advice.push(Advisory::PrepaymentRecommended);
    }

    if monthly_income < monthly_expenses {
        advice.push(Advisory::ExpensesExceedIncome);
    }

    if annual_rate_percent > HIGH_INTEREST_THRESHOLD {
        advice.push(Advisory::HighInterest);
    }

    debug!(
        surplus = %terms.surplus,
        emi = %terms.emi,
        scaled = terms.scaled,
        count = advice.len(),
        "advisories evaluated"
    );
    advice
}

/// The quantities the affordability checks compare.
struct BudgetTerms {
    surplus: Decimal,
    emi: Decimal,
    after_emi: Decimal,
    headroom: Decimal,
    scaled: bool,
}

impl BudgetTerms {
    fn new(monthly_income: Money, monthly_expenses: Money, emi: Money) -> Self {
        let exact = monthly_income
            .checked_sub(monthly_expenses)
            .and_then(|surplus| {
                Some(BudgetTerms {
                    surplus,
                    emi,
                    after_emi: surplus.checked_sub(emi)?,
                    headroom: emi.checked_mul(PREPAYMENT_HEADROOM)?,
                    scaled: false,
                })
            });

        exact.unwrap_or_else(|| {
            // |income / 8 - expenses / 8| <= MAX / 4, so nothing below overflows.
            let surplus = monthly_income / OVERFLOW_SCALE - monthly_expenses / OVERFLOW_SCALE;
            let emi = emi / OVERFLOW_SCALE;
            BudgetTerms {
                surplus,
                emi,
                after_emi: surplus - emi,
                headroom: emi * PREPAYMENT_HEADROOM,
                scaled: true,
            }
        })
    }
}

/// [`advise_strategies`] over a deserialized input, with rendered messages.
pub fn advise(input: &AdviceInput) -> Vec<Strategy> {
    advise_strategies(
        input.monthly_income,
        input.monthly_expenses,
        input.emi,
        input.annual_rate_percent,
    )
    .into_iter()
    .map(Strategy::from)
    .collect()
}
