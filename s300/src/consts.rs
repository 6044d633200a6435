//! Constants of the S300 hardware.
//!
//! These describe the device, not the acquisition logic: a different
//! scanner with the same protocol shape only needs new values here.

/// Angular resolution of one device-native index, in degrees.
pub const ANGLE_RESOLUTION_DEG: f64 = 0.5;

/// Number of device-native indices per degree (`1 / ANGLE_RESOLUTION_DEG`).
pub const INDICES_PER_DEGREE: f64 = 2.0;

/// Widest field of view the device can report, in degrees.
pub const MAX_FIELD_OF_VIEW_DEG: f64 = 270.0;

/// Size of the device-native index domain `[0, NATIVE_INDEX_COUNT)`.
pub const NATIVE_INDEX_COUNT: usize = 540;

/// Index of the sample straight ahead of the sensor.
pub const CENTER_INDEX: usize = NATIVE_INDEX_COUNT / 2;

/// Time between two consecutive scan counter increments, in seconds.
pub const DEVICE_CYCLE_SECS: f64 = 0.04;

/// Nominal duration of one full scan, in seconds.
pub const SCAN_TIME_SECS: f64 = 0.08;

/// Time between two samples of one scan as declared on the output frame.
pub const TIME_INCREMENT_SECS: f64 = 0.0;

/// Shortest range the device reports, in meters.
pub const RANGE_MIN_M: f64 = 0.1;

/// Longest range the device reports, in meters.
pub const RANGE_MAX_M: f64 = 29.0;

/// Protocol version whose telegrams carry a usable scan counter.
pub const SYNC_PROTOCOL_NUMBER: u16 = 0x0103;

/// Parent frame of the static sensor transform.
pub const BASE_FRAME_ID: &str = "base_link";

/// Default frame id of the emitted scans.
pub const DEFAULT_FRAME_ID: &str = "base_laser_link";

/// Default serial device of the scanner.
pub const DEFAULT_DEVICE_NAME: &str = "/dev/sick300";

/// Default serial baud rate of the scanner.
pub const DEFAULT_BAUD_RATE: u32 = 500_000;
