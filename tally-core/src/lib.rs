//! tally-core: record types and the pure aggregation pipeline shared by the
//! metrics dashboard and the personal ledger.
//!
//! Nothing in this crate performs I/O.

pub mod aggregate;
pub mod derived;
pub mod filter;
pub mod format;
pub mod ledger;
pub mod metrics;
pub mod normalize;

pub use aggregate::{
    Breakdown, DepartmentTotals, LedgerTotals, department_totals, expenses_by_description,
    investments_by_name, ledger_totals, revenue_share,
};
pub use derived::{DerivedMetrics, avg_transaction_value, margin_percentage, row_margin_percentage};
pub use filter::{ALL_REGIONS, filter_by_region, observed_regions};
pub use format::{format_count, format_currency, format_thousands, month_label};
pub use ledger::{Dated, EntryId, Investment, LedgerTransaction, TransactionKind, sorted_by_date_desc};
pub use metrics::{DepartmentMetric, TimeSeriesPoint};
pub use normalize::{
    normalize_departments, normalize_investments, normalize_time_series, normalize_transactions,
};
