mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

use commands::advise::AdviseArgs;
use commands::assess::AssessArgs;
use commands::emi::EmiArgs;

/// Loan EMI estimates, affordability advice and scheme lookup
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan EMI estimates, affordability advice and scheme lookup",
    long_about = "Estimates the monthly installment on a loan from a bank's interest rate, \
                  principal and tenure, suggests budgeting strategies from household \
                  income and expenses, and lists assistance schemes by caste category."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// YAML or JSON file overriding the built-in bank rates and schemes
    #[arg(long, global = true)]
    tables: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the banks and caste categories the enquiry form offers
    Options,
    /// Assess a loan enquiry: rate, EMI, strategies and schemes
    Assess(AssessArgs),
    /// Calculate the EMI with total payment and interest
    Emi(EmiArgs),
    /// Month-by-month amortization schedule
    Schedule(EmiArgs),
    /// Affordability strategies for a known EMI
    Advise(AdviseArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let tables = input::file::load_tables(cli.tables.as_deref())?;

    match cli.command {
        Commands::Options => commands::options::run_options(&tables),
        Commands::Assess(args) => commands::assess::run_assess(args, &tables),
        Commands::Emi(args) => commands::emi::run_emi(args, &tables),
        Commands::Schedule(args) => commands::emi::run_schedule(args, &tables),
        Commands::Advise(args) => commands::advise::run_advise(args),
        Commands::Version => Ok(serde_json::json!({ "version": env!("CARGO_PKG_VERSION") })),
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let format = cli.output.clone();
    match run(cli) {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
