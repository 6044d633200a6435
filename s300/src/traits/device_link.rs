use auto_impl::auto_impl;

use crate::error::Error;

/// Byte-level link to the scanner.
///
/// Implementations decode the device protocol and keep the last complete
/// scan around until the next successful [`read_data`](Self::read_data).
/// After a successful read, [`ranges`](Self::ranges) must cover the whole
/// device-native index domain.
#[auto_impl(&mut, Box)]
pub trait DeviceLink: Send {
    /// Opens the link. Calling this on an open link re-opens it.
    fn connect(&mut self, device_name: &str, baud_rate: u32) -> Result<(), Error>;

    /// Reads one complete scan from the device.
    fn read_data(&mut self) -> Result<(), Error>;

    /// Ranges (in meters) of the last scan indexed by device-native index.
    fn ranges(&self) -> &[f32];

    /// Number of valid entries in [`ranges`](Self::ranges).
    fn num_ranges(&self) -> usize;

    /// Monotonically increasing scan counter of the last scan.
    fn scan_number(&self) -> u32;

    /// Protocol version announced by the device.
    fn protocol_number(&self) -> u16;

    /// Intensities of the last scan, if the protocol carries them.
    fn intensities(&self) -> Option<&[f32]> {
        None
    }
}
