use crate::domain::capability::{Capability, CapabilityValue};
use crate::domain::events::Event;
use crate::domain::settings::HeaterSettings;
use crate::domain::trigger::Trigger;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info, instrument};

pub type DeviceMap = Arc<RwLock<HashMap<String, DeviceView>>>;

/// What the host knows about a device.
#[derive(PartialEq, Debug, Default, Clone)]
pub struct DeviceView {
    pub capabilities: HashMap<Capability, CapabilityValue>,
    pub settings: Option<HeaterSettings>,
    pub triggers: Vec<Trigger>,
}

#[derive(Debug)]
pub struct Store {
    devices: DeviceMap,
    rx: Receiver<Event>,
}

impl Store {
    pub fn new(rx: Receiver<Event>) -> Self {
        Store {
            devices: Arc::new(RwLock::new(HashMap::new())),
            rx,
        }
    }

    pub fn devices(&self) -> DeviceMap {
        self.devices.clone()
    }

    #[instrument(skip(self))]
    pub async fn listen(&mut self) {
        while let Some(event) = self.rx.recv().await {
            debug!("🔵 Received event: {:?}", event);
            let mut write_guard = self.devices.write().await;

            match event {
                Event::CapabilityChanged {
                    device_id,
                    capability,
                    value,
                } => {
                    let device = write_guard.entry(device_id.clone()).or_default();
                    let previous_value = device.capabilities.insert(capability, value.clone());

                    if previous_value.as_ref() != Some(&value) {
                        match previous_value {
                            Some(previous_value) => {
                                info!(device_id, "🟢 Updated device '{}', set '{}' to '{}', was '{}'", device_id, capability, value, previous_value)
                            }
                            None => info!(device_id, "🟢 Updated device '{}', set '{}' to '{}'", device_id, capability, value),
                        }
                    }
                }
                Event::SettingsStored { device_id, settings } => {
                    info!(device_id, "🟢 Stored settings for device '{}': {:?}", device_id, settings);
                    write_guard.entry(device_id).or_default().settings = Some(settings);
                }
                Event::Triggered { device_id, trigger } => {
                    info!(device_id, "🔔 Device '{}' fired '{}' with {:?}", device_id, trigger.id(), trigger);
                    write_guard.entry(device_id).or_default().triggers.push(trigger);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;
    use tokio::sync::mpsc;

    #[test(tokio::test)]
    async fn listen_keeps_the_latest_view_per_device() {
        let (tx, rx) = mpsc::channel(8);
        let mut store = Store::new(rx);
        let devices = store.devices();

        tx.send(Event::CapabilityChanged {
            device_id: "dev-1".to_string(),
            capability: Capability::OnOff,
            value: CapabilityValue::Boolean(true),
        })
        .await
        .unwrap();
        tx.send(Event::CapabilityChanged {
            device_id: "dev-1".to_string(),
            capability: Capability::OnOff,
            value: CapabilityValue::Boolean(false),
        })
        .await
        .unwrap();
        tx.send(Event::SettingsStored {
            device_id: "dev-1".to_string(),
            settings: HeaterSettings::default(),
        })
        .await
        .unwrap();
        tx.send(Event::Triggered {
            device_id: "dev-1".to_string(),
            trigger: Trigger::MaxPowerChanged { max_power: 2000 },
        })
        .await
        .unwrap();
        drop(tx);

        store.listen().await;

        let devices = devices.read().await;
        assert_eq!(
            devices.get("dev-1"),
            Some(&DeviceView {
                capabilities: HashMap::from([(Capability::OnOff, CapabilityValue::Boolean(false))]),
                settings: Some(HeaterSettings::default()),
                triggers: vec![Trigger::MaxPowerChanged { max_power: 2000 }],
            })
        );
    }
}
