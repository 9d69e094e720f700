use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;

/// One reading paired with its elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Hours since the first sample of the owning series
    pub time_h: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeriesError {
    #[error("series has {times} times but {values} values")]
    LengthMismatch { times: usize, values: usize },
}

/// Ordered series of (elapsed hours, value) samples.
///
/// Times are kept in input order and are not checked for monotonicity;
/// out-of-order input yields negative or decreasing elapsed times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn from_parts(times: &[f64], values: &[f64]) -> Result<Self, SeriesError> {
        if times.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            samples: times
                .iter()
                .zip(values)
                .map(|(&time_h, &value)| Sample { time_h, value })
                .collect(),
        })
    }

    /// Build a series whose zero point is the first reading's clock time.
    pub fn from_clock_readings(readings: &[(ClockTime, f64)]) -> Self {
        let Some((origin, _)) = readings.first() else {
            return Self::default();
        };
        Self {
            samples: readings
                .iter()
                .map(|(clock, value)| Sample {
                    time_h: clock.hours_since(origin),
                    value: *value,
                })
                .collect(),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// `[time, value]` pairs for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(|s| [s.time_h, s.value]).collect()
    }
}

/// The two series loaded for a flight: cabin temperature and GPS altitude.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSeries {
    /// Temperature (deg F) against elapsed hours
    pub wx: TimeSeries,
    /// Altitude (ft) against elapsed hours
    pub gps: TimeSeries,
}
