use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::signal::TimeSeries;

/// Boundary between the ascent and descent phases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Time of the first GPS fix that did not climb above the running maximum
    pub time_h: f64,
    /// Highest altitude reached before that fix
    pub altitude: f64,
}

impl Peak {
    /// Value left in place when the altitude never stops climbing.
    pub const SENTINEL: Peak = Peak {
        time_h: 0.0,
        altitude: 0.0,
    };

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl Default for Peak {
    fn default() -> Self {
        Self::SENTINEL
    }
}

/// Temperature samples partitioned around the peak.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitResult {
    pub peak: Peak,
    /// Samples recorded before the peak time
    pub up: TimeSeries,
    /// Samples from the peak time up to the last GPS fix
    pub down: TimeSeries,
    /// Trailing samples discarded once past the last GPS fix
    pub dropped: usize,
}

/// Scan the altitude track for the end of the climb.
///
/// The running maximum starts at zero. The scan stops at the first fix whose
/// altitude does not exceed it, and that fix's time becomes the peak time;
/// the altitude is the maximum reached so far. A track that climbs until its
/// last fix leaves the result at [`Peak::SENTINEL`].
pub fn locate_peak(gps: &TimeSeries) -> Peak {
    let mut peak = Peak::SENTINEL;
    for (idx, fix) in gps.iter().enumerate() {
        if fix.value > peak.altitude {
            peak.altitude = fix.value;
        } else {
            peak.time_h = fix.time_h;
            debug!(
                "climb ended at fix {} (t={:.4} h, alt={}); peak altitude {}",
                idx, fix.time_h, fix.value, peak.altitude
            );
            return peak;
        }
    }
    if !gps.is_empty() {
        warn!(
            "altitude never stopped climbing over {} fixes; using sentinel peak",
            gps.len()
        );
    }
    Peak::SENTINEL
}

/// Partition the temperature series at the peak time, bounded by the GPS track's last fix.
pub fn split_phases(wx: &TimeSeries, gps: &TimeSeries) -> SplitResult {
    let Some(last_fix) = gps.last() else {
        warn!(
            "empty GPS track; discarding all {} temperature samples",
            wx.len()
        );
        return SplitResult {
            dropped: wx.len(),
            ..SplitResult::default()
        };
    };
    let gps_end = last_fix.time_h;
    let peak = locate_peak(gps);

    let mut up = TimeSeries::default();
    let mut down = TimeSeries::default();
    let mut dropped = 0;
    for (idx, sample) in wx.iter().enumerate() {
        if sample.time_h < peak.time_h {
            up.push(*sample);
        } else if sample.time_h > gps_end {
            dropped = wx.len() - idx;
            debug!(
                "temperature sample {} at t={:.4} h is past the last GPS fix ({:.4} h)",
                idx, sample.time_h, gps_end
            );
            break;
        } else {
            down.push(*sample);
        }
    }
    if dropped > 0 {
        warn!(
            "dropped {} temperature samples recorded after GPS tracking ended",
            dropped
        );
    }
    info!(
        "peak {} ft at t={:.4} h: {} ascent / {} descent samples",
        peak.altitude,
        peak.time_h,
        up.len(),
        down.len()
    );
    SplitResult {
        peak,
        up,
        down,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(times: &[f64], values: &[f64]) -> TimeSeries {
        TimeSeries::from_parts(times, values).unwrap()
    }

    #[test]
    fn peak_time_is_first_non_climbing_fix() {
        let gps = series(&[0.0, 0.1, 0.2, 0.3], &[100.0, 200.0, 150.0, 100.0]);
        let peak = locate_peak(&gps);
        assert_eq!(peak.altitude, 200.0);
        assert_eq!(peak.time_h, 0.2);
    }

    #[test]
    fn plateau_ends_the_climb() {
        let gps = series(&[0.0, 1.0, 2.0, 3.0], &[10.0, 20.0, 20.0, 30.0]);
        let peak = locate_peak(&gps);
        assert_eq!(peak, Peak { time_h: 2.0, altitude: 20.0 });
    }

    #[test]
    fn non_positive_start_stops_immediately() {
        let gps = series(&[0.0, 0.5, 1.0], &[0.0, 500.0, 100.0]);
        assert_eq!(locate_peak(&gps), Peak { time_h: 0.0, altitude: 0.0 });
    }

    #[test]
    fn monotonic_climb_keeps_sentinel() {
        let gps = series(&[0.0, 0.1, 0.2], &[100.0, 200.0, 300.0]);
        let peak = locate_peak(&gps);
        assert!(peak.is_sentinel());

        let wx = series(&[0.0, 0.1, 0.2], &[50.0, 51.0, 52.0]);
        let split = split_phases(&wx, &gps);
        assert!(split.up.is_empty());
        assert_eq!(split.down.values(), vec![50.0, 51.0, 52.0]);
    }

    #[test]
    fn splits_around_peak_and_drops_tail() {
        let gps = series(&[0.0, 0.1, 0.2, 0.3], &[100.0, 200.0, 150.0, 100.0]);
        let wx = series(
            &[0.0, 0.05, 0.15, 0.25, 0.35],
            &[50.0, 52.0, 54.0, 56.0, 58.0],
        );
        let split = split_phases(&wx, &gps);
        assert_eq!(split.peak, Peak { time_h: 0.2, altitude: 200.0 });
        // 0.15 h precedes the peak time, so it belongs to the ascent
        assert_eq!(split.up.values(), vec![50.0, 52.0, 54.0]);
        assert_eq!(split.down.values(), vec![56.0]);
        assert_eq!(split.dropped, 1);
        assert!(split.up.iter().all(|s| s.time_h < 0.2));
        assert!(split.down.iter().all(|s| s.time_h >= 0.2 && s.time_h <= 0.3));
    }

    #[test]
    fn samples_after_first_overrun_are_discarded() {
        let gps = series(&[0.0, 0.1, 0.2], &[10.0, 20.0, 5.0]);
        // the scan stops at 0.5 even though 0.15 would otherwise fit
        let wx = series(&[0.0, 0.5, 0.15], &[1.0, 2.0, 3.0]);
        let split = split_phases(&wx, &gps);
        assert_eq!(split.up.values(), vec![1.0]);
        assert!(split.down.is_empty());
        assert_eq!(split.dropped, 2);
    }

    #[test]
    fn sample_at_gps_end_is_kept() {
        let gps = series(&[0.0, 0.1, 0.2], &[10.0, 20.0, 5.0]);
        let wx = series(&[0.2], &[7.0]);
        let split = split_phases(&wx, &gps);
        assert_eq!(split.down.values(), vec![7.0]);
        assert_eq!(split.dropped, 0);
    }

    #[test]
    fn empty_inputs_give_empty_buckets() {
        let empty = TimeSeries::default();
        let gps = series(&[0.0, 0.1], &[10.0, 5.0]);
        let wx = series(&[0.0, 0.1], &[1.0, 2.0]);

        assert!(locate_peak(&empty).is_sentinel());

        let split = split_phases(&empty, &gps);
        assert!(split.up.is_empty() && split.down.is_empty());
        assert_eq!(split.dropped, 0);

        let split = split_phases(&wx, &empty);
        assert!(split.up.is_empty() && split.down.is_empty());
        assert_eq!(split.dropped, 2);
        assert!(split.peak.is_sentinel());
    }
}
