mod anchored_time_sync;
mod dummy_device_link;
mod dummy_scan_publisher;
mod dummy_transform_broadcaster;
mod fixed_clock;

pub use anchored_time_sync::*;
pub use dummy_device_link::*;
pub use dummy_scan_publisher::*;
pub use dummy_transform_broadcaster::*;
pub use fixed_clock::*;
