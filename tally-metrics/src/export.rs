//! CSV export of the department table

use anyhow::{Context, Result};
use std::io;
use std::path::Path;

use crate::dashboard::DepartmentRow;

pub fn write_table_csv<W: io::Write>(rows: &[DepartmentRow], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    if rows.is_empty() {
        wtr.write_record(["Department", "Region", "Transactions", "Revenue", "Margin", "Margin %"])?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().context("flush csv")?;
    Ok(())
}

pub fn export_table_csv(rows: &[DepartmentRow], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_table_csv(rows, file).with_context(|| format!("write {}", path.display()))
}
