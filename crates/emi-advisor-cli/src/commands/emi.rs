use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use emi_advisor_core::amortization;
use emi_advisor_core::emi::{self, EmiInput};
use emi_advisor_core::reference::ReferenceTables;

use crate::input;

/// Arguments shared by the EMI and schedule commands
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.4)
    #[arg(long, conflicts_with = "bank")]
    pub rate: Option<Decimal>,

    /// Take the rate from this bank instead of --rate
    #[arg(long)]
    pub bank: Option<String>,

    /// Tenure in years
    #[arg(long)]
    pub years: Option<Decimal>,
}

fn resolve_input(
    args: EmiArgs,
    tables: &ReferenceTables,
) -> Result<EmiInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(data);
    }

    let annual_rate_percent = match (args.rate, args.bank.as_deref()) {
        (Some(rate), _) => rate,
        (None, Some(bank)) => {
            let rate = tables.resolve_bank_rate(bank);
            debug!(bank, %rate, "rate taken from bank table");
            rate
        }
        (None, None) => return Err("--rate or --bank is required (or provide --input)".into()),
    };

    Ok(EmiInput {
        principal: args.principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent,
        tenure_years: args.years
            .ok_or("--years is required (or provide --input)")?,
    })
}

pub fn run_emi(args: EmiArgs, tables: &ReferenceTables) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input = resolve_input(args, tables)?;
    let result = emi::calculate_emi(&emi_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(
    args: EmiArgs,
    tables: &ReferenceTables,
) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input = resolve_input(args, tables)?;
    let result = amortization::build_amortization_schedule(&emi_input)?;
    Ok(serde_json::to_value(result)?)
}
