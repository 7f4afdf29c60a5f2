mod client;
mod discoverer;
mod domain;
mod oauth;
mod point_code;
mod point_value;

pub use client::{MyUplinkClient, MyUplinkError, PointWriteResponse, new_client};
pub use discoverer::discover;
pub use domain::DevicePoints;
pub use point_code::PointCode;
pub use point_value::PointValue;

#[cfg(test)]
pub(crate) use client::tests as test_support;
