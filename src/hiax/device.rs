use crate::domain::capability::{Capability, CapabilityValue};
use crate::domain::controller_registry;
use crate::domain::platform::Platform;
use crate::domain::power::MaxPower;
use crate::domain::settings::{HeaterSettings, SettingKey, SettingsChange};
use crate::domain::trigger::Trigger;
use crate::hiax::heater_state::HeaterState;
use crate::hiax::poller::Poller;
use crate::hiax::HeaterError;
use crate::myuplink::{DevicePoints, MyUplinkClient, PointCode, PointValue, PointWriteResponse};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Heater mode that allows the heater to be controlled through device points.
const EXTERNAL_MODE: i64 = 8;

const SETTINGS_POINTS: [PointCode; 5] = [
    PointCode::AmbientTemperature,
    PointCode::InletTemperature,
    PointCode::LegionellaFrequency,
    PointCode::MaxWaterFlow,
    PointCode::RegulationDiff,
];

const STATE_POINTS: [PointCode; 7] = [
    PointCode::EnergyStored,
    PointCode::EnergyTotal,
    PointCode::EstimatedPower,
    PointCode::FillLevel,
    PointCode::RequestedPower,
    PointCode::RequestedTemperature,
    PointCode::MeasuredTemperature,
];

// Points mirrored one-to-one into read-only capabilities
const METER_CAPABILITIES: [(PointCode, Capability); 4] = [
    (PointCode::EnergyStored, Capability::MeterPowerInTank),
    (PointCode::EnergyTotal, Capability::MeterPowerAccumulated),
    (PointCode::EstimatedPower, Capability::MeasurePower),
    (PointCode::FillLevel, Capability::MeasureHumidityFillLevel),
];

fn setting_point(key: SettingKey) -> PointCode {
    match key {
        SettingKey::AmbientTemperature => PointCode::AmbientTemperature,
        SettingKey::InletTemperature => PointCode::InletTemperature,
        SettingKey::MaxWaterFlow => PointCode::MaxWaterFlow,
        SettingKey::RegulationDiff => PointCode::RegulationDiff,
        SettingKey::LegionellaFrequency => PointCode::LegionellaFrequency,
    }
}

/// Adapter between the host capabilities and a Hiax Connected 200 on myUplink.
#[derive(Debug)]
pub struct HiaxDevice {
    device_id: String,
    client: MyUplinkClient,
    platform: Arc<dyn Platform>,
    poll_interval: Duration,
    state: RwLock<HeaterState>,
    settings: RwLock<HeaterSettings>,
    poller: Mutex<Option<Poller>>,
}

impl HiaxDevice {
    pub fn new(device_id: impl Into<String>, client: MyUplinkClient, platform: Arc<dyn Platform>, poll_interval: Duration) -> Self {
        HiaxDevice {
            device_id: device_id.into(),
            client,
            platform,
            poll_interval,
            state: RwLock::new(HeaterState::default()),
            settings: RwLock::new(HeaterSettings::default()),
            poller: Mutex::new(None),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub async fn state(&self) -> HeaterState {
        *self.state.read().await
    }

    pub async fn settings(&self) -> HeaterSettings {
        self.settings.read().await.clone()
    }

    /// Puts the heater in external mode, mirrors its settings, refreshes the state and starts polling.
    #[instrument(skip(self), fields(device_id = %self.device_id))]
    pub async fn init(self: &Arc<Self>) -> Result<(), HeaterError> {
        info!("Initializing Hiax Connected 200...");
        self.ensure_external_mode().await?;

        // Assume the heater runs at full power until the first refresh says otherwise
        *self.state.write().await = HeaterState::default();

        let settings = self.read_settings().await?;
        self.store_settings(settings).await?;

        self.update_state().await?;
        self.start_polling();

        controller_registry::register(self.clone());
        info!("Initializing Hiax Connected 200... OK");
        Ok(())
    }

    /// Stops polling and removes the command handlers. Nothing is changed on the heater.
    #[instrument(skip(self), fields(device_id = %self.device_id))]
    pub fn on_deleted(&self) {
        let poller = self.poller.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(poller) = poller {
            poller.cancel();
        }

        controller_registry::unregister(&self.device_id);
        info!("Hiax Connected 200 was deleted");
    }

    #[instrument(skip(self), fields(device_id = %self.device_id))]
    pub async fn set_heater_state(&self, turn_on: bool, new_power: MaxPower) -> Result<(), HeaterError> {
        let requested_power = MaxPower::requested_power(turn_on, new_power);
        let response = self.write_point(PointCode::RequestedPower, PointValue::from(requested_power)).await?;
        if !response.ok {
            return Err(HeaterError::Control("Failed to power on/off".to_string()));
        }

        self.mirror(Capability::OnOff, CapabilityValue::Boolean(turn_on)).await;
        self.mirror(Capability::MaxPower, CapabilityValue::Text(new_power.capability_id().to_string())).await;

        let previous = self.state.write().await.commit(turn_on, new_power);
        if previous.max_power() != new_power {
            info!(device_id = self.device_id, "⚡ Max power changed from {} to {}", previous.max_power(), new_power);
            let trigger = Trigger::MaxPowerChanged { max_power: new_power.watts() };
            if let Err(e) = self.platform.trigger(&self.device_id, trigger).await {
                warn!(device_id = self.device_id, "⚠️ Could not fire the max power trigger: {}", e);
            }
        }

        Ok(())
    }

    #[instrument(skip(self), fields(device_id = %self.device_id))]
    pub async fn set_target_temperature(&self, value: f64) -> Result<(), HeaterError> {
        let response = self.write_point(PointCode::RequestedTemperature, PointValue::number(value)).await?;
        if !response.ok {
            return Err(HeaterError::Control("Failed to set target temperature".to_string()));
        }

        info!(device_id = self.device_id, "🌡️ Target temp: {}", value);
        self.mirror(Capability::TargetTemperature, CapabilityValue::Number(value)).await;
        Ok(())
    }

    /// Writes every changed setting to the heater, in a fixed order. The first rejected write
    /// aborts the remaining keys, writes that already went through are kept.
    #[instrument(skip(self, change), fields(device_id = %self.device_id))]
    pub async fn on_settings(&self, change: &SettingsChange) -> Result<(), HeaterError> {
        info!(device_id = self.device_id, "Settings changed");

        for key in SettingKey::ALL.into_iter().filter(|key| change.is_changed(*key)) {
            let value = change.new_settings.get(key);
            info!(device_id = self.device_id, "{} changed: {} -> {}", key.label(), change.old_settings.get(key), value);

            let response = self.write_point(setting_point(key), PointValue::number(value)).await?;
            if !response.ok {
                return Err(HeaterError::Control(format!("Failed to set {}", key.label())));
            }
        }

        Ok(())
    }

    /// Reads the current state of the heater and mirrors it into the capabilities.
    #[instrument(skip(self), fields(device_id = %self.device_id))]
    pub async fn update_state(&self) -> Result<(), HeaterError> {
        debug!(device_id = self.device_id, "🔄 Refreshing heater state...");
        let points = self.client.get_device_points(&self.device_id, &STATE_POINTS).await?;

        for (code, capability) in METER_CAPABILITIES {
            self.mirror_point(&points, code, capability).await;
        }

        match points.get(PointCode::RequestedPower).and_then(PointValue::as_i64) {
            Some(requested_power) => {
                let (is_on, max_power) = {
                    let mut state = self.state.write().await;
                    if let Err(e) = state.apply_requested_power(requested_power) {
                        warn!(device_id = self.device_id, "⚠️ Ignoring requested power reported by the heater: {}", e);
                    }
                    (state.is_on(), state.max_power())
                };

                // Writes the observed state back so the capabilities follow the heater
                self.set_heater_state(is_on, max_power).await?;
            }
            None => {
                warn!(device_id = self.device_id, "⚠️ Heater did not report point {}, keeping the current state", PointCode::RequestedPower);
            }
        }

        self.mirror_point(&points, PointCode::RequestedTemperature, Capability::TargetTemperature).await;
        self.mirror_point(&points, PointCode::MeasuredTemperature, Capability::MeasureTemperature).await;

        debug!(device_id = self.device_id, "🔄 Refreshing heater state... OK");
        Ok(())
    }

    /// Persists settings that the heater accepted.
    pub async fn store_settings(&self, settings: HeaterSettings) -> Result<(), HeaterError> {
        self.platform.set_settings(&self.device_id, &settings).await?;
        *self.settings.write().await = settings;
        Ok(())
    }

    fn start_polling(self: &Arc<Self>) {
        let poller = Poller::spawn(Arc::downgrade(self), self.poll_interval);
        let previous = self.poller.lock().unwrap_or_else(PoisonError::into_inner).replace(poller);
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    async fn ensure_external_mode(&self) -> Result<(), HeaterError> {
        let points = self.client.get_device_points(&self.device_id, &[PointCode::HeaterMode]).await?;
        let Some(mode) = points.get(PointCode::HeaterMode) else {
            return Err(HeaterError::Init("Problems reading heater mode".to_string()));
        };

        if mode.as_i64() == Some(EXTERNAL_MODE) {
            debug!(device_id = self.device_id, "Heater is in External mode");
            return Ok(());
        }

        info!(device_id = self.device_id, "Switching heater mode from {} to External...", mode);
        match self.write_point(PointCode::HeaterMode, PointValue::from(EXTERNAL_MODE)).await {
            Ok(response) if response.ok => {
                info!(device_id = self.device_id, "Switching heater mode from {} to External... OK", mode);
                Ok(())
            }
            Ok(_) => Err(HeaterError::Init("Failed to put it into External mode".to_string())),
            Err(e) => {
                warn!(device_id = self.device_id, "⚠️ Could not write the heater mode: {}", e);
                Err(HeaterError::Init("Failed to put it into External mode".to_string()))
            }
        }
    }

    async fn read_settings(&self) -> Result<HeaterSettings, HeaterError> {
        let points = self.client.get_device_points(&self.device_id, &SETTINGS_POINTS).await?;

        let mut settings = HeaterSettings::default();
        for key in SettingKey::ALL {
            let value = points
                .get(setting_point(key))
                .and_then(PointValue::as_f64)
                .ok_or_else(|| HeaterError::Init(format!("Problems reading {}", key.label())))?;
            settings.set(key, value);
        }

        Ok(settings)
    }

    async fn write_point(&self, code: PointCode, value: PointValue) -> Result<PointWriteResponse, HeaterError> {
        Ok(self.client.set_device_point(&self.device_id, code, value).await?)
    }

    async fn mirror_point(&self, points: &DevicePoints, code: PointCode, capability: Capability) {
        match points.get(code).and_then(PointValue::as_f64) {
            Some(value) => self.mirror(capability, CapabilityValue::Number(value)).await,
            None => warn!(device_id = self.device_id, "⚠️ Heater did not report point {}, '{}' not updated", code, capability),
        }
    }

    // Capability updates are cosmetic, a failure must not hide a successful write
    async fn mirror(&self, capability: Capability, value: CapabilityValue) {
        if let Err(e) = self.platform.set_capability_value(&self.device_id, capability, value).await {
            warn!(device_id = self.device_id, "⚠️ Could not update capability '{}': {}", capability, e);
        }
    }
}
