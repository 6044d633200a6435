use std::ops::Range;

use tracing::warn;

use crate::consts::{
    ANGLE_RESOLUTION_DEG, CENTER_INDEX, INDICES_PER_DEGREE, MAX_FIELD_OF_VIEW_DEG,
};

/// Contiguous sub-range of device-native indices selected for output,
/// together with the angular metadata declared on the emitted frames.
///
/// The index count is always even so the window sits symmetrically around
/// [`CENTER_INDEX`]. Angles are measured from the window center, so
/// `angle_max() == -angle_min()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    start: usize,
    end: usize,
    angle_min: f64,
    angle_max: f64,
    angle_increment: f64,
}

impl WindowConfig {
    /// Derives the window from a requested field of view in degrees.
    ///
    /// Values outside `[0, 270]` (including NaN) are replaced by 270 with a
    /// warning; this never fails.
    pub fn from_field_of_view(field_of_view_deg: f64) -> Self {
        let field_of_view_deg = clamp_field_of_view(field_of_view_deg);
        // clear the low bit so the window splits evenly around the center
        let count = ((field_of_view_deg * INDICES_PER_DEGREE).floor() as usize) & !1;
        let half = count / 2;
        let half_angle = (half as f64 / INDICES_PER_DEGREE).to_radians();
        Self {
            start: CENTER_INDEX - half,
            end: CENTER_INDEX + half,
            angle_min: -half_angle,
            angle_max: half_angle,
            angle_increment: ANGLE_RESOLUTION_DEG.to_radians(),
        }
    }

    /// First device-native index of the window (inclusive).
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last device-native index of the window (exclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Angle of the first sample in radians.
    pub fn angle_min(&self) -> f64 {
        self.angle_min
    }

    /// Angle of the last sample in radians.
    pub fn angle_max(&self) -> f64 {
        self.angle_max
    }

    /// Angle between two samples in radians.
    pub fn angle_increment(&self) -> f64 {
        self.angle_increment
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::from_field_of_view(MAX_FIELD_OF_VIEW_DEG)
    }
}

fn clamp_field_of_view(field_of_view_deg: f64) -> f64 {
    if (0.0..=MAX_FIELD_OF_VIEW_DEG).contains(&field_of_view_deg) {
        field_of_view_deg
    } else {
        warn!(
            "field of view {field_of_view_deg} is out of range (0-{MAX_FIELD_OF_VIEW_DEG}). \
             Assuming {MAX_FIELD_OF_VIEW_DEG}."
        );
        MAX_FIELD_OF_VIEW_DEG
    }
}
