use crate::{
    consts::{NATIVE_INDEX_COUNT, SYNC_PROTOCOL_NUMBER},
    error::Error,
    traits::DeviceLink,
};

/// Dummy DeviceLink for debug or tests.
///
/// Produces a fixed synthetic sweep and increments the scan counter on each
/// successful read. `connect_failures` / `read_failures` make the next
/// calls fail.
#[derive(Debug, Clone)]
pub struct DummyDeviceLink {
    pub ranges: Vec<f32>,
    pub intensities: Option<Vec<f32>>,
    pub protocol_number: u16,
    pub scan_number: u32,
    /// Number of upcoming `connect` calls that fail.
    pub connect_failures: usize,
    /// Number of upcoming `read_data` calls that fail.
    pub read_failures: usize,
    connected: bool,
    connect_count: usize,
    read_count: usize,
}

impl DummyDeviceLink {
    pub fn new() -> Self {
        Self {
            ranges: (0..NATIVE_INDEX_COUNT).map(|i| 1.0 + i as f32 * 0.01).collect(),
            intensities: None,
            protocol_number: SYNC_PROTOCOL_NUMBER,
            scan_number: 0,
            connect_failures: 0,
            read_failures: 0,
            connected: false,
            connect_count: 0,
            read_count: 0,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Number of `connect` calls so far.
    pub fn connect_count(&self) -> usize {
        self.connect_count
    }

    /// Number of `read_data` calls so far.
    pub fn read_count(&self) -> usize {
        self.read_count
    }
}

impl Default for DummyDeviceLink {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceLink for DummyDeviceLink {
    fn connect(&mut self, device_name: &str, _baud_rate: u32) -> Result<(), Error> {
        self.connect_count += 1;
        if self.connect_failures > 0 {
            self.connect_failures -= 1;
            self.connected = false;
            return Err(Error::Connection {
                message: format!("{device_name} is not available"),
            });
        }
        self.connected = true;
        Ok(())
    }

    fn read_data(&mut self) -> Result<(), Error> {
        self.read_count += 1;
        if !self.connected {
            return Err(Error::Read {
                message: "not connected".to_owned(),
            });
        }
        if self.read_failures > 0 {
            self.read_failures -= 1;
            return Err(Error::Read {
                message: "telegram checksum mismatch".to_owned(),
            });
        }
        self.scan_number = self.scan_number.wrapping_add(1);
        Ok(())
    }

    fn ranges(&self) -> &[f32] {
        &self.ranges
    }

    fn num_ranges(&self) -> usize {
        self.ranges.len()
    }

    fn scan_number(&self) -> u32 {
        self.scan_number
    }

    fn protocol_number(&self) -> u16 {
        self.protocol_number
    }

    fn intensities(&self) -> Option<&[f32]> {
        self.intensities.as_deref()
    }
}
