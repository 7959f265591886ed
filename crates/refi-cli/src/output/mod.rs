pub mod csv_out;
pub mod markdown;
pub mod minimal;
pub mod table;

use rust_decimal::Decimal;
use serde_json::Value;

use refi_core::tipping_point::TippingPointAnalysis;
use refi_core::types::ComputationOutput;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Markdown => markdown::print_markdown(value),
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-print the raw envelope as JSON.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Decode the tipping-point envelope when the value holds one. Outputs of
/// the simpler subcommands fail the decode and take each formatter's
/// flat fallback path.
pub fn as_analysis(value: &Value) -> Option<ComputationOutput<TippingPointAnalysis>> {
    serde_json::from_value(value.clone()).ok()
}

/// Currency with thousands separators and exactly two decimals.
pub fn money(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Rates to three decimals.
pub fn rate(value: Decimal) -> String {
    format!("{:.3}", value)
}

/// GAIN for break-even-or-better savings, LOSS otherwise.
pub fn gain_loss(savings: Decimal) -> &'static str {
    if savings >= Decimal::ZERO {
        " (GAIN)"
    } else {
        " (LOSS)"
    }
}
