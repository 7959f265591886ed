use serde_json::Value;
use tabled::{builder::Builder, Table};

use refi_core::tipping_point::TippingPointAnalysis;
use refi_core::types::ComputationOutput;

use crate::output::{as_analysis, money, rate};

/// Format output with the tabled crate: dedicated tables for the analysis
/// envelope, a flat field/value table for everything else.
pub fn print_table(value: &Value) {
    match as_analysis(value) {
        Some(envelope) => print_analysis(&envelope),
        None => print_flat(value),
    }
}

fn print_analysis(envelope: &ComputationOutput<TippingPointAnalysis>) {
    let analysis = &envelope.result;

    let mut params = Builder::default();
    params.push_record(["Parameter", "Value"]);
    params.push_record(["First payment", analysis.horizon.first_payment.as_str()]);
    params.push_record([
        "Payments made",
        &analysis.benchmark.payments_made.to_string(),
    ]);
    params.push_record(["Sale date", analysis.horizon.sale.as_str()]);
    params.push_record([
        "Payments until sale",
        &analysis.horizon.months_until_sale.to_string(),
    ]);
    params.push_record(["Closing costs", &money(analysis.benchmark.closing_costs)]);
    params.push_record([
        "Refinanced principal",
        &money(analysis.benchmark.refinanced_principal),
    ]);
    println!("{}", Table::from(params));

    let mut tipping = Builder::default();
    tipping.push_record(["Horizon", "Rate %", "Drop %", "Found"]);
    for (label, point) in [
        ("Time-to-sell", &analysis.tipping.sale),
        ("Lifetime", &analysis.tipping.lifetime),
    ] {
        tipping.push_record([
            label.to_string(),
            rate(point.rate),
            rate(point.rate_drop),
            point.found.to_string(),
        ]);
    }
    println!();
    println!("{}", Table::from(tipping));

    let mut rows = Builder::default();
    rows.push_record(["Rate %", "Monthly savings", "At sale", "Lifetime"]);
    for row in &analysis.comparison {
        rows.push_record([
            rate(row.rate),
            money(row.monthly_savings),
            money(row.savings_at_sale),
            money(row.savings_lifetime),
        ]);
    }
    println!();
    println!("{}", Table::from(rows));

    if !envelope.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &envelope.warnings {
            println!("  - {}", warning);
        }
    }

    println!("\nMethodology: {}", envelope.methodology);
}

fn print_flat(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &flat_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", value);
    }
}

fn flat_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
