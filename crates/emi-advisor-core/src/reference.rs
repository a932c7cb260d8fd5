//! Bank interest rates and caste-category scheme lists.
//!
//! Both tables are built once (from the built-in data or a supplied
//! [`ReferenceTablesConfig`]) and only read afterwards. Lookups are total:
//! unknown keys resolve to [`DEFAULT_BANK_RATE`] or the
//! [`NO_SCHEMES_PLACEHOLDER`] list instead of failing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::error::EmiAdvisorError;
use crate::types::RatePercent;
use crate::EmiAdvisorResult;

/// Rate applied when a bank is not in the table.
pub const DEFAULT_BANK_RATE: RatePercent = dec!(9.0);

/// Sole entry returned for an unknown caste category.
pub const NO_SCHEMES_PLACEHOLDER: &str = "No specific schemes found.";

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRate {
    pub name: String,
    /// Annual rate, percent.
    pub rate: RatePercent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeEntry {
    pub category: String,
    pub schemes: Vec<String>,
}

/// Overrides for the built-in tables. Omitted sections keep built-in data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceTablesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_rate: Option<RatePercent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banks: Option<Vec<BankRate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemes: Option<Vec<SchemeEntry>>,
}

// ---------------------------------------------------------------------------
// Bank rates
// ---------------------------------------------------------------------------

/// Bank name to annual rate, in definition order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankRateTable {
    entries: Vec<BankRate>,
    default_rate: RatePercent,
}

impl BankRateTable {
    pub fn new(entries: Vec<BankRate>, default_rate: RatePercent) -> EmiAdvisorResult<Self> {
        if default_rate < Decimal::ZERO {
            return Err(EmiAdvisorError::ReferenceData(format!(
                "default rate {default_rate} is negative"
            )));
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(EmiAdvisorError::ReferenceData("bank name is empty".into()));
            }
            if entry.rate < Decimal::ZERO {
                return Err(EmiAdvisorError::ReferenceData(format!(
                    "bank '{}' has negative rate {}",
                    entry.name, entry.rate
                )));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(EmiAdvisorError::ReferenceData(format!(
                    "bank '{}' listed more than once",
                    entry.name
                )));
            }
        }
        Ok(BankRateTable {
            entries,
            default_rate,
        })
    }

    pub fn builtin() -> Self {
        let entries = [
            ("SBI", dec!(8.4)),
            ("HDFC", dec!(9.1)),
            ("ICICI", dec!(8.8)),
            ("Axis Bank", dec!(9.0)),
            ("Punjab National Bank", dec!(8.5)),
            ("Bank of Baroda", dec!(8.6)),
        ]
        .into_iter()
        .map(|(name, rate)| BankRate {
            name: name.to_string(),
            rate,
        })
        .collect();

        BankRateTable {
            entries,
            default_rate: DEFAULT_BANK_RATE,
        }
    }

    pub fn get(&self, bank_name: &str) -> Option<RatePercent> {
        self.entries
            .iter()
            .find(|e| e.name == bank_name)
            .map(|e| e.rate)
    }

    /// Rate for `bank_name`, or the table's default when unknown.
    pub fn resolve(&self, bank_name: &str) -> RatePercent {
        self.get(bank_name).unwrap_or_else(|| {
            debug!(bank = bank_name, rate = %self.default_rate, "unknown bank, using default rate");
            self.default_rate
        })
    }

    pub fn default_rate(&self) -> RatePercent {
        self.default_rate
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[BankRate] {
        &self.entries
    }
}

// ---------------------------------------------------------------------------
// Schemes
// ---------------------------------------------------------------------------

/// Caste category to assistance schemes, in definition order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeTable {
    entries: Vec<SchemeEntry>,
}

impl SchemeTable {
    pub fn new(entries: Vec<SchemeEntry>) -> EmiAdvisorResult<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.category.trim().is_empty() {
                return Err(EmiAdvisorError::ReferenceData("caste category is empty".into()));
            }
            if !seen.insert(entry.category.as_str()) {
                return Err(EmiAdvisorError::ReferenceData(format!(
                    "caste category '{}' listed more than once",
                    entry.category
                )));
            }
        }
        Ok(SchemeTable { entries })
    }

    pub fn builtin() -> Self {
        let entries: [(&str, &[&str]); 5] = [
            (
                "SC",
                &[
                    "Dr. Ambedkar Central Sector Scheme for Interest Subsidy",
                    "National Overseas Scholarship Scheme",
                ],
            ),
            (
                "ST",
                &[
                    "Top Class Education Scholarship",
                    "National Fellowship for Higher Education",
                ],
            ),
            (
                "OBC",
                &["Central Sector Scheme for OBCs", "NBCFDC Loan Assistance"],
            ),
            (
                "General",
                &["No caste-based schemes, check income-based subsidies"],
            ),
            (
                "EWS",
                &["EWS Quota: Special education loan subsidy and scholarships"],
            ),
        ];

        SchemeTable {
            entries: entries
                .into_iter()
                .map(|(category, schemes)| SchemeEntry {
                    category: category.to_string(),
                    schemes: schemes.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }

    pub fn get(&self, caste_category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.category == caste_category)
            .map(|e| e.schemes.as_slice())
    }

    /// Schemes for `caste_category`, or a single placeholder when unknown.
    pub fn resolve(&self, caste_category: &str) -> Vec<String> {
        match self.get(caste_category) {
            Some(schemes) => schemes.to_vec(),
            None => {
                debug!(category = caste_category, "unknown caste category, no schemes");
                vec![NO_SCHEMES_PLACEHOLDER.to_string()]
            }
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.category.as_str())
    }

    pub fn entries(&self) -> &[SchemeEntry] {
        &self.entries
    }
}

// ---------------------------------------------------------------------------
// Both tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceTables {
    pub banks: BankRateTable,
    pub schemes: SchemeTable,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        ReferenceTables {
            banks: BankRateTable::builtin(),
            schemes: SchemeTable::builtin(),
        }
    }
}

impl ReferenceTables {
    /// Built-in tables with any sections of `config` swapped in.
    pub fn from_config(config: ReferenceTablesConfig) -> EmiAdvisorResult<Self> {
        let builtin = ReferenceTables::default();

        let default_rate = config
            .default_rate
            .unwrap_or_else(|| builtin.banks.default_rate());
        let bank_entries = config
            .banks
            .unwrap_or_else(|| builtin.banks.entries().to_vec());
        let banks = BankRateTable::new(bank_entries, default_rate)?;

        let schemes = match config.schemes {
            Some(entries) => SchemeTable::new(entries)?,
            None => builtin.schemes,
        };

        debug!(
            banks = banks.entries().len(),
            categories = schemes.entries().len(),
            "reference tables loaded"
        );

        Ok(ReferenceTables { banks, schemes })
    }

    pub fn from_json(json: &str) -> EmiAdvisorResult<Self> {
        let config: ReferenceTablesConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    pub fn resolve_bank_rate(&self, bank_name: &str) -> RatePercent {
        self.banks.resolve(bank_name)
    }

    pub fn resolve_schemes(&self, caste_category: &str) -> Vec<String> {
        self.schemes.resolve(caste_category)
    }
}
