use std::time::{Duration, SystemTime};

use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::{
    consts::{RANGE_MAX_M, RANGE_MIN_M, SCAN_TIME_SECS, TIME_INCREMENT_SECS},
    window::WindowConfig,
};

/// One windowed laser scan, emitted once per successful acquisition cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanFrame {
    /// Coordinate frame the ranges are expressed in.
    pub frame_id: String,
    /// Acquisition time of the scan.
    pub stamp: SystemTime,
    /// The angle (in radians) of the first range.
    pub angle_min: f64,
    /// The angle (in radians) of the last range.
    pub angle_max: f64,
    /// The angular difference (in radians) between consecutive ranges.
    pub angle_increment: f64,
    /// The time difference (in seconds) between consecutive measurements.
    pub time_increment: f64,
    /// The time (in seconds) it takes for the laser to complete one scan.
    pub scan_time: f64,
    /// The minimum range (in meters) of valid distance measurements.
    pub range_min: f64,
    /// The maximum range (in meters) of valid distance measurements.
    pub range_max: f64,
    /// Distances (in meters) ordered by increasing angle.
    pub ranges: Vec<f32>,
    /// Intensities parallel to `ranges`, zero when the device does not report them.
    pub intensities: Vec<f32>,
}

impl ScanFrame {
    /// Creates a zeroed frame sized and described by `window`.
    pub fn new(frame_id: impl Into<String>, window: &WindowConfig) -> Self {
        Self {
            frame_id: frame_id.into(),
            stamp: SystemTime::UNIX_EPOCH,
            angle_min: window.angle_min(),
            angle_max: window.angle_max(),
            angle_increment: window.angle_increment(),
            time_increment: TIME_INCREMENT_SECS,
            scan_time: SCAN_TIME_SECS,
            range_min: RANGE_MIN_M,
            range_max: RANGE_MAX_M,
            ranges: vec![0.0; window.len()],
            intensities: vec![0.0; window.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// A transform between two named frames valid at `stamp`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StampedTransform {
    pub stamp: SystemTime,
    pub parent_frame_id: String,
    pub child_frame_id: String,
    pub transform: Isometry3<f64>,
}

impl StampedTransform {
    /// Pure translation with identity rotation.
    pub fn from_translation(
        translation: Translation3<f64>,
        stamp: SystemTime,
        parent_frame_id: impl Into<String>,
        child_frame_id: impl Into<String>,
    ) -> Self {
        Self {
            stamp,
            parent_frame_id: parent_frame_id.into(),
            child_frame_id: child_frame_id.into(),
            transform: Isometry3::from_parts(translation, UnitQuaternion::identity()),
        }
    }
}

/// Seconds since the unix epoch. Times before the epoch map to negative values.
pub fn to_secs(time: SystemTime) -> f64 {
    match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}

/// Inverse of [`to_secs`]. Non-finite input maps to the epoch.
pub fn from_secs(secs: f64) -> SystemTime {
    if !secs.is_finite() {
        return SystemTime::UNIX_EPOCH;
    }
    if secs >= 0.0 {
        SystemTime::UNIX_EPOCH + Duration::from_secs_f64(secs)
    } else {
        SystemTime::UNIX_EPOCH - Duration::from_secs_f64(-secs)
    }
}
