use serde::{Deserialize, Serialize};

use crate::phase::{split_phases, SplitResult};
use crate::signal::RawSeries;

/// Temperature buckets paired with synthesized altitude axes of matching length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub temp_up: Vec<f64>,
    pub alt_up: Vec<f64>,
    pub temp_down: Vec<f64>,
    pub alt_down: Vec<f64>,
}

impl DerivedSeries {
    /// `[temperature, altitude]` pairs of the ascent.
    pub fn ascent_points(&self) -> Vec<[f64; 2]> {
        pair_points(&self.temp_up, &self.alt_up)
    }

    /// `[temperature, altitude]` pairs of the descent.
    pub fn descent_points(&self) -> Vec<[f64; 2]> {
        pair_points(&self.temp_down, &self.alt_down)
    }
}

/// Everything computed from one pair of loaded series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightRecord {
    pub split: SplitResult,
    pub derived: DerivedSeries,
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
///
/// `n == 1` yields `[start]`; the last element of longer axes is exactly `stop`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// Attach a uniformly spaced altitude axis to each temperature bucket.
///
/// Ascent runs from the first GPS altitude to the peak, descent from the peak
/// to the last GPS altitude. This assumes a constant climb and sink rate.
pub fn synthesize(raw: &RawSeries, split: &SplitResult) -> DerivedSeries {
    let start_alt = raw.gps.first().map(|s| s.value).unwrap_or(0.0);
    let end_alt = raw.gps.last().map(|s| s.value).unwrap_or(0.0);
    let peak_alt = split.peak.altitude;
    DerivedSeries {
        temp_up: split.up.values(),
        alt_up: linspace(start_alt, peak_alt, split.up.len()),
        temp_down: split.down.values(),
        alt_down: linspace(peak_alt, end_alt, split.down.len()),
    }
}

/// Split the temperature record at the altitude peak and synthesize both altitude axes.
pub fn correlate(raw: &RawSeries) -> FlightRecord {
    let split = split_phases(&raw.wx, &raw.gps);
    let derived = synthesize(raw, &split);
    FlightRecord { split, derived }
}

fn pair_points(xs: &[f64], ys: &[f64]) -> Vec<[f64; 2]> {
    xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect()
}
