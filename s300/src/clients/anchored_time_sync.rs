use tracing::debug;

use crate::traits::{TimeSync, TimeSyncConfig};

/// TimeSync that pins the device time base to the host clock once.
///
/// The offset between device time and host time is taken from the first
/// sample (and again whenever the scan counter goes backwards), then
/// `time_offset` is added. No filtering or drift estimation is done, so
/// the stamps are evenly spaced at the device cycle.
#[derive(Debug, Clone)]
pub struct AnchoredTimeSync {
    time_offset: f64,
    anchor: Option<f64>,
    last_nominal: f64,
}

impl AnchoredTimeSync {
    pub fn new(config: &TimeSyncConfig) -> Self {
        Self {
            time_offset: config.time_offset,
            anchor: None,
            last_nominal: f64::NEG_INFINITY,
        }
    }

    /// Host time minus device time, once the first sample arrived.
    pub fn anchor(&self) -> Option<f64> {
        self.anchor
    }
}

impl TimeSync for AnchoredTimeSync {
    fn sync(&mut self, nominal_secs: f64, wall_clock_secs: f64, sequence: u32) -> f64 {
        if nominal_secs < self.last_nominal {
            debug!(sequence, "scan counter went backwards, re-anchoring");
            self.anchor = None;
        }
        self.last_nominal = nominal_secs;
        let anchor = *self.anchor.get_or_insert(wall_clock_secs - nominal_secs);
        nominal_secs + anchor + self.time_offset
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_first_sample_anchors() {
        let mut sync = AnchoredTimeSync::new(&TimeSyncConfig::default());
        assert!(sync.anchor().is_none());
        assert_approx_eq!(sync.sync(0.4, 1000.0, 10), 1000.0);
        // jitter on the host side does not leak into the stamps
        assert_approx_eq!(sync.sync(0.44, 1000.07, 11), 1000.04);
        assert_approx_eq!(sync.sync(0.48, 1000.05, 12), 1000.08);
        assert_approx_eq!(sync.anchor().unwrap(), 999.6);
    }

    #[test]
    fn test_time_offset() {
        let config = TimeSyncConfig {
            time_offset: -0.02,
            ..Default::default()
        };
        let mut sync = AnchoredTimeSync::new(&config);
        assert_approx_eq!(sync.sync(1.0, 50.0, 25), 49.98);
    }

    #[test]
    fn test_counter_reset() {
        let mut sync = AnchoredTimeSync::new(&TimeSyncConfig::default());
        sync.sync(4.0, 100.0, 100);
        assert_approx_eq!(sync.sync(0.04, 200.0, 1), 200.0);
    }
}
