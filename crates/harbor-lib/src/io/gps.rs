use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::field;
use crate::clock::ClockTime;
use crate::config::{delimiter_byte, GpsSchema};
use crate::signal::TimeSeries;

/// Load a GPS track export: banner rows, then hour/minute/second and altitude at fixed positions.
pub fn read_gps_tsv(path: &Path, schema: &GpsSchema) -> Result<TimeSeries> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let series =
        parse_gps_tsv(file, schema).with_context(|| format!("reading {}", path.display()))?;
    info!("loaded {} GPS fixes from {}", series.len(), path.display());
    Ok(series)
}

pub fn parse_gps_tsv<R: Read>(input: R, schema: &GpsSchema) -> Result<TimeSeries> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter_byte(schema.delimiter)?)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut readings = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading line {}", i + 1))?;
        if i < schema.skip_rows {
            debug!("skipping banner row {}: {:?}", i + 1, record);
            continue;
        }
        let row = i + 1 - schema.skip_rows;
        let hour = parse_int(&record, schema.hour, row, "hour")?;
        let minute = parse_int(&record, schema.minute, row, "minute")?;
        let second = parse_int(&record, schema.second, row, "second")?;
        let clock = ClockTime::new(hour, minute, second)
            .with_context(|| format!("row {}: building fix time", row))?;
        let alt_str = field(&record, schema.altitude, row)?;
        let altitude: f64 = alt_str
            .parse()
            .with_context(|| format!("row {}: altitude '{}' is not numeric", row, alt_str))?;
        readings.push((clock, altitude));
    }
    Ok(TimeSeries::from_clock_readings(&readings))
}

fn parse_int(record: &csv::StringRecord, idx: usize, row: usize, name: &str) -> Result<u32> {
    let text = field(record, idx, row)?;
    text.parse()
        .with_context(|| format!("row {}: {} '{}' is not an integer", row, name, text))
}
