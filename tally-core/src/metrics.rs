//! Metric rows served by the remote metrics API

use serde::{Deserialize, Serialize};

/// Per-department totals for one region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DepartmentMetric {
    pub region: String,
    pub department_name: String,
    /// Count of sales; kept as f64 because the API may send it as a string
    pub total_transactions: f64,
    pub total_revenue: f64,
    pub total_margin: f64,
}

impl DepartmentMetric {
    pub fn new(
        region: impl Into<String>,
        department_name: impl Into<String>,
        total_transactions: f64,
        total_revenue: f64,
        total_margin: f64,
    ) -> Self {
        Self {
            region: region.into(),
            department_name: department_name.into(),
            total_transactions,
            total_revenue,
            total_margin,
        }
    }
}

/// Revenue and margin summed over one calendar month
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct TimeSeriesPoint {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub revenue: f64,
    pub margin: f64,
}

impl TimeSeriesPoint {
    pub fn new(year: i32, month: u32, revenue: f64, margin: f64) -> Self {
        Self {
            year,
            month,
            revenue,
            margin,
        }
    }
}
