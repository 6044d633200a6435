use std::{fmt, sync::Arc};

use nalgebra::Translation3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    consts::BASE_FRAME_ID,
    frame::StampedTransform,
    traits::{Clock, SystemClock, TransformBroadcaster},
};

/// Static mounting offset (in meters) of the scanner relative to the base frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SpatialOffset {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SpatialOffset {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn translation(&self) -> Translation3<f64> {
        Translation3::new(self.x, self.y, self.z)
    }
}

impl Default for SpatialOffset {
    fn default() -> Self {
        Self::new(0.115, 0.0, 0.21)
    }
}

/// Re-issues the static `base_link -> frame_id` transform every tick.
pub struct PoseBroadcaster<B> {
    offset: Option<SpatialOffset>,
    child_frame_id: String,
    broadcaster: B,
    clock: Arc<dyn Clock>,
}

impl<B: TransformBroadcaster> PoseBroadcaster<B> {
    /// `offset == None` disables broadcasting.
    pub fn new(
        offset: Option<SpatialOffset>,
        child_frame_id: impl Into<String>,
        broadcaster: B,
    ) -> Self {
        Self {
            offset,
            child_frame_id: child_frame_id.into(),
            broadcaster,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.offset.is_some()
    }

    /// Sends the transform stamped with the current time.
    ///
    /// Returns whether a transform was sent.
    pub fn broadcast(&self) -> bool {
        let Some(offset) = self.offset else {
            return false;
        };
        let transform = StampedTransform::from_translation(
            offset.translation(),
            self.clock.now(),
            BASE_FRAME_ID,
            self.child_frame_id.as_str(),
        );
        match self.broadcaster.send_transform(&transform) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to broadcast {}: {}", self.child_frame_id, e);
                false
            }
        }
    }

    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }
}

impl<B> fmt::Debug for PoseBroadcaster<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoseBroadcaster")
            .field("offset", &self.offset)
            .field("child_frame_id", &self.child_frame_id)
            .finish_non_exhaustive()
    }
}
