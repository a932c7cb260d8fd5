use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scalar fields go into a Field/Value table; strategies are listed with
/// warnings highlighted, and other arrays of objects (schedule rows) get a
/// table of their own underneath.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_object(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object(res_map),
        other => println!("{}", format_value(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested: Vec<(&String, &Vec<Value>)> = Vec::new();
    let mut strategies: Option<&Vec<Value>> = None;

    for (key, val) in map {
        match val {
            Value::Array(items) if key == "strategies" => strategies = Some(items),
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                nested.push((key, items));
            }
            _ => builder.push_record([key.as_str(), &format_value(val)]),
        }
    }
    println!("{}", Table::from(builder));

    if let Some(items) = strategies {
        print_strategies(items);
    }

    for (key, items) in nested {
        println!("\n{}:", key);
        print_array_table(items);
    }
}

/// Strategies as a list, warnings in yellow and the rest in green.
fn print_strategies(items: &[Value]) {
    println!("\n{}", "Strategies:".bold());
    for item in items {
        let message = item
            .get("message")
            .map(format_value)
            .unwrap_or_else(|| format_value(item));
        let warning = item.get("warning").and_then(Value::as_bool).unwrap_or(false);
        if warning {
            println!("  ! {}", message.yellow());
        } else {
            println!("  - {}", message.green());
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join("\n")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
