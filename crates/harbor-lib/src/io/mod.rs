pub mod gps;
pub mod wx;

use anyhow::{anyhow, Result};
use csv::StringRecord;

fn locate_column(headers: &StringRecord, requested: &str) -> Result<usize> {
    headers
        .iter()
        .position(|name| name.trim().eq_ignore_ascii_case(requested.trim()))
        .ok_or_else(|| anyhow!("missing column '{}'", requested))
}

fn field<'r>(record: &'r StringRecord, idx: usize, row: usize) -> Result<&'r str> {
    record
        .get(idx)
        .ok_or_else(|| anyhow!("row {}: missing column {}", row, idx))
}
