use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{field, locate_column};
use crate::clock::ClockTime;
use crate::config::{delimiter_byte, WxSchema};
use crate::signal::TimeSeries;

/// Load the cabin temperature log (header row, clock-time column plus one value column).
pub fn read_wx_csv(path: &Path, schema: &WxSchema) -> Result<TimeSeries> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let series =
        parse_wx_csv(file, schema).with_context(|| format!("reading {}", path.display()))?;
    info!(
        "loaded {} temperature samples from {}",
        series.len(),
        path.display()
    );
    Ok(series)
}

pub fn parse_wx_csv<R: Read>(input: R, schema: &WxSchema) -> Result<TimeSeries> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter_byte(schema.delimiter)?)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);
    let headers = reader.headers().context("reading header")?.clone();
    let time_idx = locate_column(&headers, &schema.time_column)?;
    let value_idx = locate_column(&headers, &schema.value_column)?;

    let mut readings = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.with_context(|| format!("reading row {}", row))?;
        let time_str = field(&record, time_idx, row)?;
        let clock: ClockTime = time_str
            .parse()
            .with_context(|| format!("row {}: parsing time", row))?;
        let value_str = field(&record, value_idx, row)?;
        let value: f64 = value_str
            .parse()
            .with_context(|| format!("row {}: '{}' is not numeric", row, value_str))?;
        readings.push((clock, value));
    }
    Ok(TimeSeries::from_clock_readings(&readings))
}
