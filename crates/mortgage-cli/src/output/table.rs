use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, result_object};

/// Columns shown for each amortization entry, in display order.
const SCHEDULE_COLUMNS: [(&str, &str); 8] = [
    ("payment_number", "#"),
    ("payment_date", "Date"),
    ("interest_rate", "Rate %"),
    ("principal_payment", "Principal"),
    ("interest_payment", "Interest"),
    ("additional_principal_payment", "Extra"),
    ("remaining_balance", "Balance"),
    ("interest_saved", "Saved"),
];

const OPTION_COLUMNS: [(&str, &str); 5] = [
    ("monthly_payment", "Payment"),
    ("total_interest", "Total Interest"),
    ("total_payments", "Total Paid"),
    ("number_of_payments", "Payments"),
    ("total_interest_saved", "Interest Saved"),
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    let Some(result) = result_object(value) else {
        println!("{}", value);
        return;
    };

    if result.contains_key("amortization_schedule") {
        print_calculation(result);
    } else if result.contains_key("comparison_summary") {
        print_comparison(result);
    } else {
        print_fields(result);
    }

    if let Some(envelope) = value.as_object() {
        print_envelope_notes(envelope);
    }
}

fn print_calculation(result: &Map<String, Value>) {
    print_fields(result);

    if let Some(Value::Object(summary)) = result.get("summary") {
        println!("\nLoan Summary:");
        print_fields(summary);
    }

    if let Some(Value::Array(schedule)) = result.get("amortization_schedule") {
        println!("\nAmortization Schedule:");
        print_rows(schedule, &SCHEDULE_COLUMNS);
    }
}

fn print_comparison(result: &Map<String, Value>) {
    if let Some(Value::String(id)) = result.get("comparison_id") {
        println!("Comparison {}", id);
    }

    if let Some(Value::Array(mortgages)) = result.get("mortgages") {
        let mut builder = Builder::default();
        let mut header = vec!["Option".to_string()];
        header.extend(OPTION_COLUMNS.iter().map(|(_, label)| label.to_string()));
        builder.push_record(header);
        for (idx, calc) in mortgages.iter().enumerate() {
            let mut row = vec![(idx + 1).to_string()];
            row.extend(
                OPTION_COLUMNS
                    .iter()
                    .map(|(key, _)| calc.get(*key).map(format_scalar).unwrap_or_default()),
            );
            builder.push_record(row);
        }
        println!("{}", Table::from(builder));
    }

    if let Some(Value::Object(summary)) = result.get("comparison_summary") {
        let mut builder = Builder::default();
        builder.push_record(["Best", "Value"]);
        for key in ["best_monthly_payment", "best_total_interest"] {
            if let Some(val) = summary.get(key) {
                builder.push_record([key.to_string(), format_scalar(val)]);
            }
        }
        println!("\n{}", Table::from(builder));

        if let Some(Value::Array(diffs)) = summary.get("differences") {
            println!("\nDifferences:");
            print_rows(
                diffs,
                &[
                    ("metric", "Metric"),
                    ("mortgage_1", "A"),
                    ("mortgage_2", "B"),
                    ("value_1", "A Value"),
                    ("value_2", "B Value"),
                    ("difference", "A - B"),
                    ("percentage_difference", "%"),
                ],
            );
        }
    }
}

/// Two-column table of the scalar fields of an object.
fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if val.is_array() || val.is_object() {
            continue;
        }
        builder.push_record([key.clone(), format_scalar(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value], columns: &[(&str, &str)]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|(_, label)| label.to_string()));
    for item in rows {
        if let Value::Object(map) = item {
            builder.push_record(
                columns
                    .iter()
                    .map(|(key, _)| map.get(*key).map(format_scalar).unwrap_or_default()),
            );
        }
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
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
