use serde_json::Value;

use refi_core::tipping_point::{TippingPointAnalysis, TippingPointInput, REFI_TERM_MONTHS};
use refi_core::types::ComputationOutput;

use crate::output::{as_analysis, gain_loss, money, rate};

/// Render the analysis as the three-table markdown report; anything else
/// falls back to a flat field table.
pub fn print_markdown(value: &Value) {
    match as_analysis(value) {
        Some(envelope) => print_analysis(&envelope),
        None => print_flat(value),
    }
}

fn print_analysis(envelope: &ComputationOutput<TippingPointAnalysis>) {
    let analysis = &envelope.result;
    // The envelope echoes the request, which is where the original loan
    // figures live.
    let request: Option<TippingPointInput> =
        serde_json::from_value(envelope.assumptions.clone()).ok();

    println!("## Mortgage Refinance Tipping Point Analysis");
    println!("{}", "-".repeat(50));
    println!("### Input Parameters");
    println!("| Parameter | Value |");
    println!("| :--- | :--- |");
    if let Some(ref request) = request {
        println!(
            "| Original Loan Amount | ${} |",
            money(request.loan.principal)
        );
        println!(
            "| Current Interest Rate | {}% |",
            rate(request.loan.annual_rate)
        );
    }
    println!(
        "| Loan Start (First Payment) | {} |",
        analysis.horizon.first_payment
    );
    println!("| Payments Made | {} |", analysis.benchmark.payments_made);
    println!("| Sale Date | {} |", analysis.horizon.sale);
    println!(
        "| **Total Payments Until Sale** | **{}** |",
        analysis.horizon.months_until_sale
    );
    println!(
        "| Estimated Closing Costs (Rolled In) | ${} |",
        money(analysis.benchmark.closing_costs)
    );

    println!();
    println!("### Critical Tipping Points");
    println!("| Tipping Point | Required New Rate | Required Rate Drop |");
    println!("| :--- | :--- | :--- |");
    println!(
        "| **Time-to-Sell** ({} months) | **{}%** | **{}%** |",
        analysis.horizon.months_until_sale,
        rate(analysis.tipping.sale.rate),
        rate(analysis.tipping.sale.rate_drop)
    );
    println!(
        "| **Entire Loan Lifetime** ({} Years) | **{}%** | **{}%** |",
        REFI_TERM_MONTHS / 12,
        rate(analysis.tipping.lifetime.rate),
        rate(analysis.tipping.lifetime.rate_drop)
    );

    println!();
    println!("### Refinance Comparison Table");
    println!("| New Rate | Monthly P&I Savings | Savings at Sale | Savings Lifetime |");
    println!("| :--- | :--- | :--- | :--- |");
    for row in &analysis.comparison {
        // Rates at or below the sale tipping point are the actionable ones.
        let rate_cell = if row.rate <= analysis.tipping.sale.rate {
            format!("**{}%**", rate(row.rate))
        } else {
            format!("{}%", rate(row.rate))
        };
        println!(
            "| {} | ${} | ${}{} | ${}{} |",
            rate_cell,
            money(row.monthly_savings),
            money(row.savings_at_sale),
            gain_loss(row.savings_at_sale),
            money(row.savings_lifetime),
            gain_loss(row.savings_lifetime)
        );
    }

    if !envelope.warnings.is_empty() {
        println!();
        for warning in &envelope.warnings {
            println!("> {}", warning);
        }
    }
}

fn print_flat(value: &Value) {
    if let Value::Object(map) = value {
        println!("| Field | Value |");
        println!("| :--- | :--- |");
        for (key, val) in map {
            println!("| {} | {} |", key, flat_value(val));
        }
    } else {
        println!("{}", value);
    }
}

fn flat_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
