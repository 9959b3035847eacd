use serde_json::Value;

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

/// Pick the headline figure from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object. The return
/// metrics come before `monthly_principal_interest` so an investment
/// result prints its cash-on-cash figure, not the payment that result
/// also carries.
fn minimal_line(value: &Value) -> String {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "total_monthly_piti",
        "agent_take_home",
        "estimated_seller_net",
        "cash_on_cash_percent",
        "cap_rate_percent",
        "simplified_five_year_irr_percent",
        "max_affordable_price",
        "monthly_principal_interest",
    ];

    if let Value::Object(map) = result_obj {
        // Try priority keys first (skip null values)
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    // Not an object, just print directly
    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
