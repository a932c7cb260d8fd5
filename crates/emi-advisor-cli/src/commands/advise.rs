use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use emi_advisor_core::advisory::{self, AdviceInput};

use crate::input;

/// Arguments for affordability advice on a known EMI
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AdviseArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Monthly expenses
    #[arg(long)]
    pub expenses: Option<Decimal>,

    /// Monthly installment
    #[arg(long)]
    pub emi: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,
}

pub fn run_advise(args: AdviseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let advice_input: AdviceInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        AdviceInput {
            monthly_income: args.income
                .ok_or("--income is required (or provide --input)")?,
            monthly_expenses: args.expenses
                .ok_or("--expenses is required (or provide --input)")?,
            emi: args.emi
                .ok_or("--emi is required (or provide --input)")?,
            annual_rate_percent: args.rate
                .ok_or("--rate is required (or provide --input)")?,
        }
    };

    let strategies = advisory::advise(&advice_input);
    Ok(serde_json::json!({ "strategies": strategies }))
}
