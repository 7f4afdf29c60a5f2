use crate::domain::capability::{Capability, CapabilityValue};
use crate::domain::events::Event;
use crate::domain::settings::HeaterSettings;
use crate::domain::trigger::Trigger;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;
use tokio::sync::mpsc::Sender;

/// The host surface a device adapter writes to.
#[async_trait]
pub trait Platform: Debug + Send + Sync {
    async fn set_capability_value(&self, device_id: &str, capability: Capability, value: CapabilityValue) -> Result<(), PlatformError>;

    async fn set_settings(&self, device_id: &str, settings: &HeaterSettings) -> Result<(), PlatformError>;

    async fn trigger(&self, device_id: &str, trigger: Trigger) -> Result<(), PlatformError>;
}

#[derive(Error, Debug, PartialEq)]
pub enum PlatformError {
    #[error("the platform is no longer accepting events")]
    Closed,
}

/// Forwards every host update to the store as an [`Event`].
#[derive(Debug, Clone)]
pub struct ChannelPlatform {
    tx: Sender<Event>,
}

impl ChannelPlatform {
    pub fn new(tx: Sender<Event>) -> Self {
        ChannelPlatform { tx }
    }

    async fn send(&self, event: Event) -> Result<(), PlatformError> {
        self.tx.send(event).await.map_err(|_| PlatformError::Closed)
    }
}

#[async_trait]
impl Platform for ChannelPlatform {
    async fn set_capability_value(&self, device_id: &str, capability: Capability, value: CapabilityValue) -> Result<(), PlatformError> {
        self.send(Event::CapabilityChanged {
            device_id: device_id.to_owned(),
            capability,
            value,
        })
        .await
    }

    async fn set_settings(&self, device_id: &str, settings: &HeaterSettings) -> Result<(), PlatformError> {
        self.send(Event::SettingsStored {
            device_id: device_id.to_owned(),
            settings: settings.clone(),
        })
        .await
    }

    async fn trigger(&self, device_id: &str, trigger: Trigger) -> Result<(), PlatformError> {
        self.send(Event::Triggered {
            device_id: device_id.to_owned(),
            trigger,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn forwards_capability_values_as_events() -> Result<(), PlatformError> {
        let (tx, mut rx) = mpsc::channel(4);
        let platform = ChannelPlatform::new(tx);

        platform.set_capability_value("dev-1", Capability::OnOff, CapabilityValue::Boolean(true)).await?;

        match rx.recv().await {
            Some(Event::CapabilityChanged { device_id, capability, value }) => {
                assert_eq!(device_id, "dev-1");
                assert_eq!(capability, Capability::OnOff);
                assert_eq!(value, CapabilityValue::Boolean(true));
            }
            other => panic!("unexpected event {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn returns_closed_when_the_store_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let platform = ChannelPlatform::new(tx);

        let result = platform.trigger("dev-1", Trigger::MaxPowerChanged { max_power: 700 }).await;

        assert_eq!(result, Err(PlatformError::Closed));
    }
}
