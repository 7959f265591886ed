use serde_json::Value;
use std::io;

use crate::output::as_analysis;

/// Write output as CSV to stdout: the comparison rows for an analysis,
/// field/value pairs for anything else.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(envelope) = as_analysis(value) {
        let _ = wtr.write_record([
            "rate",
            "monthly_savings",
            "savings_at_sale",
            "savings_lifetime",
        ]);
        for row in &envelope.result.comparison {
            let _ = wtr.write_record([
                row.rate.to_string(),
                row.monthly_savings.round_dp(2).to_string(),
                row.savings_at_sale.round_dp(2).to_string(),
                row.savings_lifetime.round_dp(2).to_string(),
            ]);
        }
    } else if let Value::Object(map) = value {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &csv_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&csv_value(value)]);
    }

    let _ = wtr.flush();
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
