use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use emi_advisor_core::assessment::{self, LoanRequest};
use emi_advisor_core::reference::ReferenceTables;

use crate::input;

/// Arguments for a full loan enquiry
#[derive(Args)]
pub struct AssessArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Bank name; unknown banks use the default rate
    #[arg(long)]
    pub bank: Option<String>,

    /// Loan amount
    #[arg(long, alias = "principal")]
    pub loan_amount: Option<Decimal>,

    /// Loan period in years
    #[arg(long, alias = "years")]
    pub loan_period: Option<Decimal>,

    /// Family monthly income
    #[arg(long, alias = "income")]
    pub family_income: Option<Decimal>,

    /// Family monthly expenses
    #[arg(long, alias = "expenses")]
    pub family_expenses: Option<Decimal>,

    /// Caste category (SC, ST, OBC, General, EWS)
    #[arg(long)]
    pub caste: Option<String>,
}

pub fn run_assess(
    args: AssessArgs,
    tables: &ReferenceTables,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request: LoanRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        LoanRequest {
            bank: args.bank
                .ok_or("--bank is required (or provide --input)")?,
            loan_amount: args.loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            loan_period: args.loan_period
                .ok_or("--loan-period is required (or provide --input)")?,
            family_income: args.family_income
                .ok_or("--family-income is required (or provide --input)")?,
            family_expenses: args.family_expenses
                .ok_or("--family-expenses is required (or provide --input)")?,
            caste: args.caste
                .ok_or("--caste is required (or provide --input)")?,
        }
    };

    let result = assessment::assess_loan(tables, &request)?;
    Ok(serde_json::to_value(result)?)
}
