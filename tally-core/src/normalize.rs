//! Lenient coercion of raw JSON records into typed rows.
//!
//! The metrics API and old ledger blobs may carry numbers as strings, nulls,
//! or nothing at all. Every declared numeric field is coerced to a finite
//! `f64`, falling back to 0. Records are never dropped and nothing here can
//! fail.

use chrono::NaiveDate;
use serde_json::Value;

use crate::ledger::{Investment, LedgerTransaction, TransactionKind};
use crate::metrics::{DepartmentMetric, TimeSeriesPoint};

/// Coerce any JSON value to a finite number, 0 when that is impossible.
pub fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Coerce to a whole number, truncating toward zero.
pub fn coerce_int(value: &Value) -> i64 {
    coerce_number(value).trunc() as i64
}

pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Dates that do not parse fall back to the epoch so the record survives.
pub fn coerce_date(value: &Value) -> NaiveDate {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .unwrap_or_default()
}

fn field<'a>(record: &'a Value, name: &str) -> &'a Value {
    record.get(name).unwrap_or(&Value::Null)
}

pub fn normalize_department(record: &Value) -> DepartmentMetric {
    DepartmentMetric {
        region: coerce_string(field(record, "region")),
        department_name: coerce_string(field(record, "department_name")),
        total_transactions: coerce_number(field(record, "total_transactions")),
        total_revenue: coerce_number(field(record, "total_revenue")),
        total_margin: coerce_number(field(record, "total_margin")),
    }
}

pub fn normalize_departments(records: &[Value]) -> Vec<DepartmentMetric> {
    records.iter().map(normalize_department).collect()
}

pub fn normalize_time_point(record: &Value) -> TimeSeriesPoint {
    TimeSeriesPoint {
        year: i32::try_from(coerce_int(field(record, "year"))).unwrap_or(0),
        month: u32::try_from(coerce_int(field(record, "month"))).unwrap_or(0),
        revenue: coerce_number(field(record, "revenue")),
        margin: coerce_number(field(record, "margin")),
    }
}

pub fn normalize_time_series(records: &[Value]) -> Vec<TimeSeriesPoint> {
    records.iter().map(normalize_time_point).collect()
}

pub fn normalize_transaction(record: &Value) -> LedgerTransaction {
    let kind = TransactionKind::from(coerce_string(field(record, "type")));

    LedgerTransaction {
        id: coerce_int(field(record, "id")),
        kind,
        description: coerce_string(field(record, "description")),
        amount: coerce_number(field(record, "amount")),
        date: coerce_date(field(record, "date")),
    }
}

pub fn normalize_transactions(records: &[Value]) -> Vec<LedgerTransaction> {
    records.iter().map(normalize_transaction).collect()
}

pub fn normalize_investment(record: &Value) -> Investment {
    Investment {
        id: coerce_int(field(record, "id")),
        name: coerce_string(field(record, "name")),
        amount: coerce_number(field(record, "amount")),
        date: coerce_date(field(record, "date")),
    }
}

pub fn normalize_investments(records: &[Value]) -> Vec<Investment> {
    records.iter().map(normalize_investment).collect()
}
