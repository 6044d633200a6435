mod clock;
mod device_link;
mod scan_publisher;
mod time_sync;
mod transform_broadcaster;

pub use clock::*;
pub use device_link::*;
pub use scan_publisher::*;
pub use time_sync::*;
pub use transform_broadcaster::*;
