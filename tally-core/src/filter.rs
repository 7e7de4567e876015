//! Region selection over department metrics

use crate::metrics::DepartmentMetric;

/// Selector value that keeps every region
pub const ALL_REGIONS: &str = "All";

/// Rows whose region equals `selector`, or every row for [`ALL_REGIONS`].
///
/// A selector that matches no observed region yields an empty result.
pub fn filter_by_region(rows: &[DepartmentMetric], selector: &str) -> Vec<DepartmentMetric> {
    if selector == ALL_REGIONS {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|r| r.region == selector)
        .cloned()
        .collect()
}

/// Distinct regions in first-seen order, for building a selector list.
pub fn observed_regions(rows: &[DepartmentMetric]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for r in rows {
        if !out.iter().any(|seen| seen == &r.region) {
            out.push(r.region.clone());
        }
    }
    out
}
