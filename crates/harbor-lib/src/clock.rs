use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Wall-clock time of day as recorded by the flight loggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockTime(NaiveTime);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockParseError {
    #[error("time '{text}' does not match H:M:S: {source}")]
    Format {
        text: String,
        source: chrono::ParseError,
    },
    #[error("{hour}:{minute}:{second} is not a valid time of day")]
    Range { hour: u32, minute: u32, second: u32 },
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self, ClockParseError> {
        NaiveTime::from_hms_opt(hour, minute, second)
            .map(Self)
            .ok_or(ClockParseError::Range {
                hour,
                minute,
                second,
            })
    }

    pub fn seconds_of_day(&self) -> u32 {
        self.0.num_seconds_from_midnight()
    }

    /// Hours elapsed since `origin`. Negative when `self` is earlier; no midnight wrap.
    pub fn hours_since(&self, origin: &ClockTime) -> f64 {
        (self.0 - origin.0).num_seconds() as f64 / 3600.0
    }
}

impl FromStr for ClockTime {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, CLOCK_FORMAT)
            .map(Self)
            .map_err(|source| ClockParseError::Format {
                text: trimmed.to_string(),
                source,
            })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CLOCK_FORMAT))
    }
}
