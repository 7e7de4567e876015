//! Dashboard view model: everything the metrics screen shows for one
//! region selection.

use serde::Serialize;

use tally_core::{
    DepartmentMetric, DepartmentTotals, DerivedMetrics, department_totals, filter_by_region,
    format_thousands, month_label, observed_regions, revenue_share, row_margin_percentage,
};

use crate::client::MetricsData;

/// One line of the department table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DepartmentRow {
    #[serde(rename = "Department")]
    pub department_name: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Transactions")]
    pub total_transactions: f64,
    #[serde(rename = "Revenue")]
    pub total_revenue: f64,
    #[serde(rename = "Margin")]
    pub total_margin: f64,
    #[serde(rename = "Margin %")]
    pub margin_percentage: String,
}

impl From<&DepartmentMetric> for DepartmentRow {
    fn from(m: &DepartmentMetric) -> Self {
        Self {
            department_name: m.department_name.clone(),
            region: m.region.clone(),
            total_transactions: m.total_transactions,
            total_revenue: m.total_revenue,
            total_margin: m.total_margin,
            margin_percentage: row_margin_percentage(m),
        }
    }
}

/// A point on the monthly revenue trend
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub revenue: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kpi {
    pub title: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub selected_region: String,
    /// Regions present in the unfiltered data, first-seen order
    pub regions: Vec<String>,
    pub totals: DepartmentTotals,
    pub derived: DerivedMetrics,
    pub rows: Vec<DepartmentRow>,
    /// Department name → fraction of filtered revenue
    pub revenue_share: Vec<(String, f64)>,
    /// Not region filtered; the trend is always global
    pub trend: Vec<TrendPoint>,
}

impl DashboardView {
    pub fn build(data: &MetricsData, region: &str) -> Self {
        let filtered = filter_by_region(&data.departments, region);
        let totals = department_totals(&filtered);

        Self {
            selected_region: region.to_string(),
            regions: observed_regions(&data.departments),
            totals,
            derived: DerivedMetrics::from_totals(&totals),
            rows: filtered.iter().map(DepartmentRow::from).collect(),
            revenue_share: revenue_share(&filtered),
            trend: data
                .time_series
                .iter()
                .map(|p| TrendPoint {
                    label: month_label(p.year, p.month),
                    revenue: p.revenue,
                    margin: p.margin,
                })
                .collect(),
        }
    }

    /// True when the selection is a concrete region nobody reported
    pub fn region_unknown(&self) -> bool {
        self.selected_region != tally_core::ALL_REGIONS
            && !self.regions.iter().any(|r| r == &self.selected_region)
    }

    pub fn kpis(&self) -> Vec<Kpi> {
        vec![
            Kpi {
                title: "TOTAL REVENUE",
                value: format_thousands(self.totals.total_revenue),
            },
            Kpi {
                title: "TOTAL MARGIN",
                value: format_thousands(self.totals.total_margin),
            },
            Kpi {
                title: "MARGIN %",
                value: format!("{}%", self.derived.margin_percentage),
            },
            Kpi {
                title: "AVG TRANSACTION",
                value: format!("${}", self.derived.avg_transaction_value),
            },
        ]
    }
}
