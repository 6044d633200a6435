use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    assembler::ScanAssembler,
    consts::{
        DEFAULT_BAUD_RATE, DEFAULT_DEVICE_NAME, DEFAULT_FRAME_ID, DEVICE_CYCLE_SECS,
        MAX_FIELD_OF_VIEW_DEG, SYNC_PROTOCOL_NUMBER,
    },
    frame::{from_secs, to_secs, ScanFrame},
    traits::{Clock, DeviceLink, ScanPublisher, SystemClock, TimeSync},
    window::WindowConfig,
};

/// Settings of an [`AcquisitionLoop`], fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionConfig {
    pub device_name: String,
    pub baud_rate: u32,
    pub frame_id: String,
    /// Requested field of view in degrees.
    pub field_of_view: f64,
    /// Correct timestamps with the device scan counter when the protocol allows it.
    pub enable_time_sync: bool,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE_NAME.to_owned(),
            baud_rate: DEFAULT_BAUD_RATE,
            frame_id: DEFAULT_FRAME_ID.to_owned(),
            field_of_view: MAX_FIELD_OF_VIEW_DEG,
            enable_time_sync: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// What happened during one [`AcquisitionLoop::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was assembled and handed to the publisher.
    Published,
    /// The device was disconnected and reconnecting failed.
    ConnectFailed,
    /// Reading or assembling the scan failed; the link is marked disconnected.
    ReadFailed,
    /// The frame was assembled but the publisher rejected it.
    PublishFailed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionStats {
    pub published: u64,
    pub publish_failures: u64,
    pub read_failures: u64,
    pub connect_attempts: u64,
}

/// Reconnect, read, assemble, stamp and publish, once per [`update`](Self::update).
///
/// The loop does not pace itself and never blocks longer than one device
/// read plus one publish. Failures are logged and absorbed: a failed read
/// drops the tick and the next tick tries to reconnect, indefinitely.
pub struct AcquisitionLoop<D, T, P> {
    config: AcquisitionConfig,
    device: D,
    time_sync: T,
    publisher: P,
    clock: Arc<dyn Clock>,
    assembler: ScanAssembler,
    state: ConnectionState,
    stats: AcquisitionStats,
}

impl<D, T, P> AcquisitionLoop<D, T, P>
where
    D: DeviceLink,
    T: TimeSync,
    P: ScanPublisher,
{
    /// Creates the loop and makes the first connection attempt.
    pub fn new(config: AcquisitionConfig, device: D, time_sync: T, publisher: P) -> Self {
        let window = WindowConfig::from_field_of_view(config.field_of_view);
        debug!(?window, "scan window");
        let assembler = ScanAssembler::new(window, config.frame_id.clone());
        let mut this = Self {
            config,
            device,
            time_sync,
            publisher,
            clock: Arc::new(SystemClock),
            assembler,
            state: ConnectionState::Disconnected,
            stats: AcquisitionStats::default(),
        };
        this.ensure_connected();
        this
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Connects the device if it is disconnected.
    ///
    /// Returns whether the device is connected afterwards. While connected
    /// this does nothing and returns `true`.
    pub fn ensure_connected(&mut self) -> bool {
        if self.state == ConnectionState::Connected {
            return true;
        }
        self.stats.connect_attempts += 1;
        match self
            .device
            .connect(&self.config.device_name, self.config.baud_rate)
        {
            Ok(()) => {
                info!(
                    "Connected to {} ({} baud)",
                    self.config.device_name, self.config.baud_rate
                );
                self.state = ConnectionState::Connected;
                true
            }
            Err(e) => {
                warn!("Failed to connect to {}: {}", self.config.device_name, e);
                false
            }
        }
    }

    /// Runs one acquisition cycle.
    pub fn update(&mut self) -> TickOutcome {
        if !self.ensure_connected() {
            return TickOutcome::ConnectFailed;
        }

        if let Err(e) = self.device.read_data() {
            warn!("Failed to read scan: {}", e);
            return self.drop_tick();
        }

        let ranges = self.device.ranges();
        let num_ranges = self.device.num_ranges().min(ranges.len());
        if let Err(e) = self
            .assembler
            .copy_window(&ranges[..num_ranges], self.device.intensities())
        {
            error!("Dropping scan: {}", e);
            return self.drop_tick();
        }

        let now = self.clock.now();
        let stamp = if self.config.enable_time_sync
            && self.device.protocol_number() == SYNC_PROTOCOL_NUMBER
        {
            let scan_number = self.device.scan_number();
            let nominal = DEVICE_CYCLE_SECS * f64::from(scan_number);
            let wall_clock = to_secs(now);
            let corrected = self.time_sync.sync(nominal, wall_clock, scan_number);
            debug!(scan_number, delta = corrected - wall_clock, "synchronized stamp");
            from_secs(corrected)
        } else {
            now
        };
        self.assembler.set_stamp(stamp);

        match self.publisher.publish_scan(self.assembler.frame()) {
            Ok(()) => {
                self.stats.published += 1;
                TickOutcome::Published
            }
            Err(e) => {
                warn!("Failed to publish scan: {}", e);
                self.stats.publish_failures += 1;
                TickOutcome::PublishFailed
            }
        }
    }

    fn drop_tick(&mut self) -> TickOutcome {
        self.stats.read_failures += 1;
        self.state = ConnectionState::Disconnected;
        TickOutcome::ReadFailed
    }
}

impl<D, T, P> AcquisitionLoop<D, T, P> {
    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn stats(&self) -> AcquisitionStats {
        self.stats
    }

    pub fn window(&self) -> &WindowConfig {
        self.assembler.window()
    }

    /// The most recently assembled frame.
    pub fn frame(&self) -> &ScanFrame {
        self.assembler.frame()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}

impl<D, T, P> fmt::Debug for AcquisitionLoop<D, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcquisitionLoop")
            .field("config", &self.config)
            .field("window", self.assembler.window())
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnchoredTimeSync, DummyDeviceLink, DummyScanPublisher, TimeSyncConfig};

    fn new_loop(
        device: DummyDeviceLink,
    ) -> AcquisitionLoop<DummyDeviceLink, AnchoredTimeSync, DummyScanPublisher> {
        AcquisitionLoop::new(
            AcquisitionConfig::default(),
            device,
            AnchoredTimeSync::new(&TimeSyncConfig::default()),
            DummyScanPublisher::new(),
        )
    }

    #[test]
    fn test_connects_on_construction() {
        let acquisition = new_loop(DummyDeviceLink::new());
        assert!(acquisition.is_connected());
        assert_eq!(acquisition.device().connect_count(), 1);
        assert_eq!(acquisition.stats().connect_attempts, 1);
    }

    #[test]
    fn test_ensure_connected_is_idempotent() {
        let mut acquisition = new_loop(DummyDeviceLink::new());
        assert!(acquisition.ensure_connected());
        assert!(acquisition.ensure_connected());
        assert_eq!(acquisition.device().connect_count(), 1);
        assert_eq!(acquisition.state(), ConnectionState::Connected);
    }

    #[test]
    fn test_failed_initial_connect() {
        let mut device = DummyDeviceLink::new();
        device.connect_failures = 2;
        let mut acquisition = new_loop(device);
        assert_eq!(acquisition.state(), ConnectionState::Disconnected);
        assert_eq!(acquisition.update(), TickOutcome::ConnectFailed);
        assert_eq!(acquisition.update(), TickOutcome::Published);
        assert_eq!(acquisition.stats().connect_attempts, 3);
        assert_eq!(acquisition.publisher().scans().len(), 1);
    }

    #[test]
    fn test_short_sweep_drops_tick() {
        let mut device = DummyDeviceLink::new();
        device.ranges.truncate(300);
        let mut acquisition = new_loop(device);
        assert_eq!(acquisition.update(), TickOutcome::ReadFailed);
        assert!(!acquisition.is_connected());
        assert!(acquisition.publisher().scans().is_empty());
    }

    #[test]
    fn test_publish_failure_keeps_connection() {
        let mut acquisition = new_loop(DummyDeviceLink::new());
        acquisition.publisher().set_fail(true);
        assert_eq!(acquisition.update(), TickOutcome::PublishFailed);
        assert!(acquisition.is_connected());
        acquisition.publisher().set_fail(false);
        assert_eq!(acquisition.update(), TickOutcome::Published);
        assert_eq!(acquisition.stats().publish_failures, 1);
        assert_eq!(acquisition.stats().published, 1);
        assert_eq!(acquisition.device().connect_count(), 1);
    }
}
