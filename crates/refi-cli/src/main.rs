mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{LoanStatusArgs, PaymentArgs};
use commands::tipping_point::TippingPointArgs;

/// Mortgage refinance tipping-point analysis
#[derive(Parser)]
#[command(
    name = "refi",
    version,
    about = "Mortgage refinance tipping-point analysis",
    long_about = "Finds the break-even refinance rates for a mortgage under a \
                  time-to-sell horizon and over the whole loan lifetime, with \
                  every financial figure computed in decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "markdown", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the refinance rates at which refinancing starts to pay off
    TippingPoint(TippingPointArgs),
    /// Fixed monthly principal-and-interest payment for a loan
    Payment(PaymentArgs),
    /// Remaining balance and interest after a number of payments
    LoanStatus(LoanStatusArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::TippingPoint(args) => commands::tipping_point::run_tipping_point(args),
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::LoanStatus(args) => commands::amortization::run_loan_status(args),
        Commands::Version => {
            println!("refi {}", env!("CARGO_PKG_VERSION"));
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
