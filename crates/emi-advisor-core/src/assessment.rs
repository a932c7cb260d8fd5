//! One loan enquiry end to end: bank rate, EMI, advice and schemes.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::advisory::{advise_strategies, Strategy};
use crate::emi::compute_emi;
use crate::reference::ReferenceTables;
use crate::types::{with_metadata, ComputationOutput, Money, RatePercent, Years};
use crate::EmiAdvisorResult;

/// A submitted enquiry. Numeric fields are already parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRequest {
    pub bank: String,
    pub loan_amount: Money,
    /// Years.
    pub loan_period: Years,
    pub family_income: Money,
    pub family_expenses: Money,
    pub caste: String,
}

/// Everything the result view shows, and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAssessment {
    pub bank: String,
    pub interest_rate: RatePercent,
    pub emi: Money,
    pub strategies: Vec<Strategy>,
    pub schemes: Vec<String>,
}

/// Choices for the enquiry form's selection inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    pub banks: Vec<String>,
    pub caste_categories: Vec<String>,
}

pub fn form_options(tables: &ReferenceTables) -> FormOptions {
    FormOptions {
        banks: tables.banks.names().map(str::to_string).collect(),
        caste_categories: tables.schemes.categories().map(str::to_string).collect(),
    }
}

/// Resolve the bank's rate, price the loan, advise, and look up schemes.
///
/// Only the EMI step can fail; unknown banks and categories fall back to the
/// tables' defaults and are reported as warnings.
pub fn assess_loan(
    tables: &ReferenceTables,
    request: &LoanRequest,
) -> EmiAdvisorResult<ComputationOutput<LoanAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let interest_rate = tables.resolve_bank_rate(&request.bank);
    if tables.banks.get(&request.bank).is_none() {
        warnings.push(format!(
            "Bank '{}' not listed; assumed {}% p.a.",
            request.bank, interest_rate
        ));
    }

    let emi = compute_emi(request.loan_amount, interest_rate, request.loan_period)?;

    let strategies: Vec<Strategy> = advise_strategies(
        request.family_income,
        request.family_expenses,
        emi,
        interest_rate,
    )
    .into_iter()
    .map(Strategy::from)
    .collect();

    let schemes = tables.resolve_schemes(&request.caste);
    if tables.schemes.get(&request.caste).is_none() {
        warnings.push(format!("No scheme list for caste category '{}'.", request.caste));
    }

    info!(
        bank = %request.bank,
        rate = %interest_rate,
        %emi,
        advisories = strategies.len(),
        "loan assessed"
    );

    let assessment = LoanAssessment {
        bank: request.bank.clone(),
        interest_rate,
        emi,
        strategies,
        schemes,
    };

    let assumptions = serde_json::json!({
        "default_rate": tables.banks.default_rate(),
        "surplus": "family_income - family_expenses",
        "advisory_order": ["affordability", "prepayment", "expenses_vs_income", "high_interest"],
    });

    Ok(with_metadata(
        "EMI affordability assessment",
        &assumptions,
        warnings,
        start,
        assessment,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::Advisory;
    use rust_decimal_macros::dec;

    fn request(bank: &str, caste: &str) -> LoanRequest {
        LoanRequest {
            bank: bank.into(),
            loan_amount: dec!(500_000),
            loan_period: dec!(5),
            family_income: dec!(50_000),
            family_expenses: dec!(20_000),
            caste: caste.into(),
        }
    }

    #[test]
    fn test_assess_known_bank() {
        let tables = ReferenceTables::default();
        let out = assess_loan(&tables, &request("SBI", "SC")).unwrap();
        let a = &out.result;
        assert_eq!(a.interest_rate, dec!(8.4));
        assert_eq!(a.emi, dec!(10234.18));
        assert_eq!(a.schemes.len(), 2);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_assess_unknown_bank_and_caste() {
        let tables = ReferenceTables::default();
        let out = assess_loan(&tables, &request("Nowhere Bank", "Other")).unwrap();
        assert_eq!(out.result.interest_rate, dec!(9.0));
        assert_eq!(out.result.schemes.len(), 1);
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_high_rate_bank_flags_refinancing() {
        let tables = ReferenceTables::default();
        let out = assess_loan(&tables, &request("HDFC", "ST")).unwrap();
        let codes: Vec<Advisory> = out.result.strategies.iter().map(|s| s.code).collect();
        assert_eq!(codes.last(), Some(&Advisory::HighInterest));
    }

    #[test]
    fn test_invalid_amount_propagates() {
        let tables = ReferenceTables::default();
        let mut req = request("SBI", "SC");
        req.loan_amount = dec!(0);
        assert!(assess_loan(&tables, &req).is_err());
    }

    #[test]
    fn test_form_options_in_definition_order() {
        let options = form_options(&ReferenceTables::default());
        assert_eq!(options.banks.first().map(String::as_str), Some("SBI"));
        assert_eq!(
            options.caste_categories,
            vec!["SC", "ST", "OBC", "General", "EWS"]
        );
    }
}
