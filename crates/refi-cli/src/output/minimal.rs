use serde_json::Value;

use crate::output::{as_analysis, rate};

/// Print just the key answers: the two tipping rates for an analysis, the
/// first field of anything else.
pub fn print_minimal(value: &Value) {
    if let Some(envelope) = as_analysis(value) {
        let tipping = &envelope.result.tipping;
        println!("time-to-sell: {}%", rate(tipping.sale.rate));
        println!("lifetime: {}%", rate(tipping.lifetime.rate));
        return;
    }

    if let Value::Object(map) = value {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, minimal_value(val));
            return;
        }
    }

    println!("{}", value);
}

fn minimal_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
