use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use refi_core::tipping_point::{self, TippingPointInput};
use refi_core::types::{LoanTerms, ReferenceDate};

use crate::input;

/// Arguments for the tipping-point analysis.
///
/// Every flag carries the stock scenario as its default, so a bare
/// `refi tipping-point` reproduces the reference analysis. A JSON file
/// via `--input` (or piped through stdin) replaces the flags wholesale.
#[derive(Args)]
pub struct TippingPointArgs {
    /// Path to a JSON file holding the full analysis input
    #[arg(long)]
    pub input: Option<String>,

    /// Original loan amount
    #[arg(long, default_value = "697000.00")]
    pub amount: Decimal,

    /// Original annual interest rate in percent (e.g. 6.625)
    #[arg(long, default_value = "6.625")]
    pub rate: Decimal,

    /// Original loan term in months (360 for 30 years)
    #[arg(long, default_value = "360")]
    pub term: u32,

    /// Number of payments already made
    #[arg(long, default_value = "4")]
    pub paid: u32,

    /// Planned year of sale
    #[arg(long, default_value = "2035")]
    pub sell_year: i32,

    /// Planned month of sale (1 = Jan, 12 = Dec)
    #[arg(long, default_value = "7", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub sell_month: u32,

    /// Closing costs as a fraction of the remaining principal (0.02 for 2%)
    #[arg(long, default_value = "0.02")]
    pub costs_pct: Decimal,

    /// Calendar year anchoring the payments-made-to-date mapping
    #[arg(long, default_value = "2025")]
    pub current_year: i32,

    /// Calendar month anchoring the payments-made-to-date mapping
    #[arg(long, default_value = "11", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub current_month: u32,
}

pub fn run_tipping_point(args: TippingPointArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis_input: TippingPointInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        TippingPointInput {
            loan: LoanTerms {
                principal: args.amount,
                annual_rate: args.rate,
                term_months: args.term,
            },
            payments_made: args.paid,
            sale_year: args.sell_year,
            sale_month: args.sell_month,
            closing_cost_pct: args.costs_pct,
            current: ReferenceDate {
                year: args.current_year,
                month: args.current_month,
            },
        }
    };

    let result = tipping_point::analyze_tipping_point(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}
