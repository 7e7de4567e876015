//! tally-metrics: metrics API client, dashboard view model and table export

pub mod client;
pub mod dashboard;
pub mod export;

pub use client::{DEFAULT_HOST, DEFAULT_TIMEOUT, FetchError, MetricsClient, MetricsData};
pub use dashboard::{DashboardView, DepartmentRow, Kpi, TrendPoint};
pub use export::{export_table_csv, write_table_csv};
