use crate::domain::platform::PlatformError;
use crate::myuplink::MyUplinkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeaterError {
    /// A point write was not accepted by the heater.
    #[error("Unable to Control device - {0}")]
    Control(String),
    /// The heater could not be put into external mode or set up.
    #[error("Unable to initialize device - {0}")]
    Init(String),
    #[error("myUplink error: {0}")]
    Api(#[from] MyUplinkError),
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
}
