mod point_get;
mod system_get;

pub use point_get::{DevicePoints, PointGet};
pub use system_get::SystemsResponse;
