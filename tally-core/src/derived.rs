//! Ratios computed from aggregates, formatted for display.
//!
//! Both ratios are guarded: a zero (or negative) denominator yields the
//! zero string rather than NaN or infinity.

use serde::Serialize;

use crate::aggregate::DepartmentTotals;
use crate::metrics::DepartmentMetric;

/// Margin as a percentage of revenue, one decimal place.
pub fn margin_percentage(total_margin: f64, total_revenue: f64) -> String {
    if total_revenue > 0.0 {
        format!("{:.1}", total_margin / total_revenue * 100.0)
    } else {
        "0.0".to_string()
    }
}

/// Revenue per transaction, two decimal places.
pub fn avg_transaction_value(total_revenue: f64, total_transactions: f64) -> String {
    if total_transactions > 0.0 {
        format!("{:.2}", total_revenue / total_transactions)
    } else {
        "0.00".to_string()
    }
}

pub fn row_margin_percentage(row: &DepartmentMetric) -> String {
    margin_percentage(row.total_margin, row.total_revenue)
}

/// KPI ratios for a filtered set of departments
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DerivedMetrics {
    pub margin_percentage: String,
    pub avg_transaction_value: String,
}

impl DerivedMetrics {
    pub fn from_totals(totals: &DepartmentTotals) -> Self {
        Self {
            margin_percentage: margin_percentage(totals.total_margin, totals.total_revenue),
            avg_transaction_value: avg_transaction_value(
                totals.total_revenue,
                totals.total_transactions,
            ),
        }
    }
}
