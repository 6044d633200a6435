use std::{path::Path, time::Duration};

use s300::{
    consts::{DEFAULT_BAUD_RATE, DEFAULT_DEVICE_NAME, DEFAULT_FRAME_ID, MAX_FIELD_OF_VIEW_DEG},
    AcquisitionConfig, SpatialOffset, TimeSyncConfig,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;

const DEFAULT_RATE: f64 = 20.0;

/// Settings of `s300_node`, read once at startup.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    /// Frame id of the published scans and child frame of the static transform.
    #[serde(default = "default_frame_id")]
    pub frame_id: String,
    /// Broadcast the static `base_link -> frame_id` transform every tick.
    #[serde(default = "default_true")]
    pub send_transform: bool,
    /// Correct scan timestamps with the device scan counter.
    #[serde(default = "default_true")]
    pub enable_time_sync: bool,
    /// Field of view in degrees, `0..=270`. Out-of-range values fall back to 270.
    #[serde(default = "default_field_of_view")]
    pub field_of_view: f64,
    /// Serial device of the scanner.
    #[serde(default = "default_device_name")]
    pub device_name: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Acquisition rate in Hz.
    #[serde(default = "default_rate")]
    pub rate: f64,
    /// Mounting offset of the scanner relative to `base_link`.
    #[serde(default)]
    pub transform: SpatialOffset,
    #[serde(default)]
    pub time_sync: TimeSyncConfig,
}

fn default_frame_id() -> String {
    DEFAULT_FRAME_ID.to_owned()
}

fn default_true() -> bool {
    true
}

fn default_field_of_view() -> f64 {
    MAX_FIELD_OF_VIEW_DEG
}

fn default_device_name() -> String {
    DEFAULT_DEVICE_NAME.to_owned()
}

fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

fn default_rate() -> f64 {
    DEFAULT_RATE
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            frame_id: default_frame_id(),
            send_transform: true,
            enable_time_sync: true,
            field_of_view: default_field_of_view(),
            device_name: default_device_name(),
            baud_rate: default_baud_rate(),
            rate: default_rate(),
            transform: SpatialOffset::default(),
            time_sync: TimeSyncConfig::default(),
        }
    }
}

impl NodeConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_str(
            &std::fs::read_to_string(&path)
                .map_err(|e| Error::NoFile(path.as_ref().to_owned(), e))?,
            path,
        )
    }

    pub fn from_str<P: AsRef<Path>>(s: &str, path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let config: NodeConfig =
            toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.to_owned(), e))?;
        if !(config.rate.is_finite() && config.rate > 0.0) {
            return Err(Error::InvalidRate(path.to_owned(), config.rate));
        }
        Ok(config)
    }

    pub fn acquisition_config(&self) -> AcquisitionConfig {
        AcquisitionConfig {
            device_name: self.device_name.clone(),
            baud_rate: self.baud_rate,
            frame_id: self.frame_id.clone(),
            field_of_view: self.field_of_view,
            enable_time_sync: self.enable_time_sync,
        }
    }

    /// The transform to broadcast, `None` if disabled.
    pub fn spatial_offset(&self) -> Option<SpatialOffset> {
        self.send_transform.then_some(self.transform)
    }

    /// Time between two ticks.
    pub fn period(&self) -> Duration {
        if self.rate.is_finite() && self.rate > 0.0 {
            Duration::from_secs_f64(1.0 / self.rate)
        } else {
            Duration::from_secs_f64(1.0 / DEFAULT_RATE)
        }
    }
}
