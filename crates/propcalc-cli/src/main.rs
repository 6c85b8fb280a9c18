mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::catalog::{CalcArgs, ListArgs};
use commands::mortgage::{CompareArgs, PaymentArgs, ScheduleArgs};
use commands::transfer_tax::{FlatTaxArgs, TransferTaxArgs};
use commands::waterfall::WaterfallArgs;

/// Real-estate financial calculations
#[derive(Parser)]
#[command(
    name = "propcalc",
    version,
    about = "Real-estate financial calculations",
    long_about = "A CLI for real-estate financial calculations with decimal precision. \
                  Supports amortization schedules, extra-payment comparisons, tiered and \
                  flat transfer taxes, and LP/GP syndication waterfalls."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the fixed monthly payment for a loan
    Payment(PaymentArgs),
    /// Simulate a month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Compare a standard schedule against one with extra payments
    CompareExtra(CompareArgs),
    /// Calculate a tiered (marginal-bracket) state transfer tax
    TransferTax(TransferTaxArgs),
    /// Calculate a flat per-increment transfer tax
    FlatTax(FlatTaxArgs),
    /// Allocate profit through an LP/GP distribution waterfall
    Waterfall(WaterfallArgs),
    /// Run a registered calculator against form values
    Calc(CalcArgs),
    /// List the registered calculators
    List(ListArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::mortgage::run_payment(args),
        Commands::Schedule(args) => commands::mortgage::run_schedule(args),
        Commands::CompareExtra(args) => commands::mortgage::run_compare(args),
        Commands::TransferTax(args) => commands::transfer_tax::run_transfer_tax(args),
        Commands::FlatTax(args) => commands::transfer_tax::run_flat_tax(args),
        Commands::Waterfall(args) => commands::waterfall::run_waterfall(args),
        Commands::Calc(args) => commands::catalog::run_calc(args),
        Commands::List(args) => commands::catalog::run_list(args),
        Commands::Version => {
            println!("propcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
