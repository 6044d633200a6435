use auto_impl::auto_impl;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maps a device-derived sample time onto the host clock.
#[auto_impl(&mut, Box)]
pub trait TimeSync: Send {
    /// Returns the corrected timestamp (seconds since the unix epoch) of the
    /// sample numbered `sequence`, measured at `nominal_secs` on the device
    /// time base and observed at `wall_clock_secs` on the host.
    fn sync(&mut self, nominal_secs: f64, wall_clock_secs: f64, sequence: u32) -> f64;
}

/// Tuning of the timestamp synchronizer.
///
/// The defaults are the values used on deployed S300 units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TimeSyncConfig {
    #[serde(default = "default_true")]
    pub use_median_filter: bool,
    /// Number of samples in the median filter window.
    #[serde(default = "default_median_filter_window")]
    pub median_filter_window: usize,
    #[serde(default = "default_true")]
    pub use_holt_winters: bool,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Smoothing factor used while fewer than `early_clamp_window` samples were seen.
    #[serde(default = "default_alpha_early")]
    pub alpha_early: f64,
    #[serde(default)]
    pub beta_early: f64,
    #[serde(default = "default_true")]
    pub early_clamp: bool,
    #[serde(default = "default_early_clamp_window")]
    pub early_clamp_window: usize,
    /// Static offset (in seconds) added to every corrected timestamp.
    #[serde(default)]
    pub time_offset: f64,
    /// Initial clock drift estimate (seconds per second).
    #[serde(default = "default_initial_drift")]
    pub initial_drift: f64,
}

fn default_true() -> bool {
    true
}

fn default_median_filter_window() -> usize {
    2500
}

fn default_alpha() -> f64 {
    3e-3
}

fn default_beta() -> f64 {
    2e-3
}

fn default_alpha_early() -> f64 {
    1e-1
}

fn default_early_clamp_window() -> usize {
    500
}

fn default_initial_drift() -> f64 {
    -3e-7
}

impl Default for TimeSyncConfig {
    fn default() -> Self {
        Self {
            use_median_filter: default_true(),
            median_filter_window: default_median_filter_window(),
            use_holt_winters: default_true(),
            alpha: default_alpha(),
            beta: default_beta(),
            alpha_early: default_alpha_early(),
            beta_early: 0.0,
            early_clamp: default_true(),
            early_clamp_window: default_early_clamp_window(),
            time_offset: 0.0,
            initial_drift: default_initial_drift(),
        }
    }
}
