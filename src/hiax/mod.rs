mod controller;
mod device;
mod error;
mod heater_state;
mod poller;

pub use device::HiaxDevice;
pub use error::HeaterError;
