#![doc = include_str!("../README.md")]
#![warn(/*missing_docs,*/ rust_2018_idioms)]
// buggy: https://github.com/rust-lang/rust-clippy/issues?q=is%3Aissue+derive_partial_eq_without_eq
#![allow(clippy::derive_partial_eq_without_eq)]

pub mod de;

use std::time::SystemTime;

use tracing::trace;

#[derive(Debug)]
pub struct Tracing<T>(T);

impl<T> Tracing<T> {
    pub fn new(v: T) -> Self {
        Self(v)
    }

    pub fn get_ref(&self) -> &T {
        &self.0
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Tracing<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

fn split_time(time: SystemTime) -> (u64, u32) {
    // stamps before the epoch are logged as the epoch
    let d = time.duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
    (d.as_secs(), d.subsec_nanos())
}

impl<T: s300::DeviceLink> s300::DeviceLink for Tracing<T> {
    fn connect(&mut self, device_name: &str, baud_rate: u32) -> Result<(), s300::Error> {
        let result = self.0.connect(device_name, baud_rate);
        trace!(
            method = "s300::DeviceLink::connect",
            device_name,
            baud_rate,
            ok = result.is_ok()
        );
        result
    }

    fn read_data(&mut self) -> Result<(), s300::Error> {
        let result = self.0.read_data();
        trace!(
            method = "s300::DeviceLink::read_data",
            ok = result.is_ok(),
            scan_number = self.0.scan_number(),
            protocol_number = self.0.protocol_number(),
            num_ranges = self.0.num_ranges(),
        );
        result
    }

    fn ranges(&self) -> &[f32] {
        self.0.ranges()
    }

    fn num_ranges(&self) -> usize {
        self.0.num_ranges()
    }

    fn scan_number(&self) -> u32 {
        self.0.scan_number()
    }

    fn protocol_number(&self) -> u16 {
        self.0.protocol_number()
    }

    fn intensities(&self) -> Option<&[f32]> {
        self.0.intensities()
    }
}

impl<T: s300::TimeSync> s300::TimeSync for Tracing<T> {
    fn sync(&mut self, nominal_secs: f64, wall_clock_secs: f64, sequence: u32) -> f64 {
        let corrected_secs = self.0.sync(nominal_secs, wall_clock_secs, sequence);
        trace!(
            method = "s300::TimeSync::sync",
            nominal_secs,
            wall_clock_secs,
            sequence,
            corrected_secs,
        );
        corrected_secs
    }
}

impl<T: s300::ScanPublisher> s300::ScanPublisher for Tracing<T> {
    fn publish_scan(&self, scan: &s300::ScanFrame) -> Result<(), s300::Error> {
        let (stamp_secs, stamp_nanos) = split_time(scan.stamp);
        trace!(
            method = "s300::ScanPublisher::publish_scan",
            frame_id = scan.frame_id.as_str(),
            stamp_secs,
            stamp_nanos,
            angle_min = scan.angle_min,
            angle_max = scan.angle_max,
            num_ranges = scan.ranges.len(),
        );
        self.0.publish_scan(scan)
    }
}

impl<T: s300::TransformBroadcaster> s300::TransformBroadcaster for Tracing<T> {
    fn send_transform(&self, transform: &s300::StampedTransform) -> Result<(), s300::Error> {
        let (stamp_secs, stamp_nanos) = split_time(transform.stamp);
        let translation = &transform.transform.translation;
        let rotation = &transform.transform.rotation;
        trace!(
            method = "s300::TransformBroadcaster::send_transform",
            parent_frame_id = transform.parent_frame_id.as_str(),
            child_frame_id = transform.child_frame_id.as_str(),
            stamp_secs,
            stamp_nanos,
            translation_x = translation.x,
            translation_y = translation.y,
            translation_z = translation.z,
            rotation_w = rotation.w,
            rotation_i = rotation.i,
            rotation_j = rotation.j,
            rotation_k = rotation.k,
        );
        self.0.send_transform(transform)
    }
}
