use crate::domain::capability::{Capability, CapabilityValue};
use crate::domain::settings::HeaterSettings;
use crate::domain::trigger::Trigger;

#[derive(PartialEq, Debug)]
pub enum Event {
    CapabilityChanged {
        device_id: String,
        capability: Capability,
        value: CapabilityValue,
    },
    SettingsStored {
        device_id: String,
        settings: HeaterSettings,
    },
    Triggered {
        device_id: String,
        trigger: Trigger,
    },
}
