use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Editable device settings mirrored from the heater.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct HeaterSettings {
    pub ambient_temperature: f64,
    pub inlet_temperature: f64,
    pub legionella_frequency: f64,
    pub max_water_flow: f64,
    pub regulation_diff: f64,
}

impl HeaterSettings {
    pub fn get(&self, key: SettingKey) -> f64 {
        match key {
            SettingKey::AmbientTemperature => self.ambient_temperature,
            SettingKey::InletTemperature => self.inlet_temperature,
            SettingKey::MaxWaterFlow => self.max_water_flow,
            SettingKey::RegulationDiff => self.regulation_diff,
            SettingKey::LegionellaFrequency => self.legionella_frequency,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: f64) {
        match key {
            SettingKey::AmbientTemperature => self.ambient_temperature = value,
            SettingKey::InletTemperature => self.inlet_temperature = value,
            SettingKey::MaxWaterFlow => self.max_water_flow = value,
            SettingKey::RegulationDiff => self.regulation_diff = value,
            SettingKey::LegionellaFrequency => self.legionella_frequency = value,
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum SettingKey {
    AmbientTemperature,
    InletTemperature,
    MaxWaterFlow,
    RegulationDiff,
    LegionellaFrequency,
}

impl SettingKey {
    /// All keys, in the order changes are written to the heater.
    pub const ALL: [SettingKey; 5] = [
        SettingKey::AmbientTemperature,
        SettingKey::InletTemperature,
        SettingKey::MaxWaterFlow,
        SettingKey::RegulationDiff,
        SettingKey::LegionellaFrequency,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SettingKey::AmbientTemperature => "ambient_temperature",
            SettingKey::InletTemperature => "inlet_temperature",
            SettingKey::MaxWaterFlow => "max_water_flow",
            SettingKey::RegulationDiff => "regulation_diff",
            SettingKey::LegionellaFrequency => "legionella_frequency",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingKey::AmbientTemperature => "Ambient temperature",
            SettingKey::InletTemperature => "Inlet temperature",
            SettingKey::MaxWaterFlow => "max water flow",
            SettingKey::RegulationDiff => "regulation diff",
            SettingKey::LegionellaFrequency => "Legionella program frequency",
        }
    }
}

impl Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SettingKey {
    type Err = UnknownSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.key() == s)
            .ok_or_else(|| UnknownSettingError(s.to_string()))
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown setting '{0}'")]
pub struct UnknownSettingError(String);

/// A settings update as delivered by the host.
#[derive(PartialEq, Debug, Clone)]
pub struct SettingsChange {
    pub old_settings: HeaterSettings,
    pub new_settings: HeaterSettings,
    pub changed_keys: Vec<SettingKey>,
}

impl SettingsChange {
    pub fn single(old_settings: HeaterSettings, key: SettingKey, value: f64) -> Self {
        let mut new_settings = old_settings.clone();
        new_settings.set(key, value);

        SettingsChange {
            old_settings,
            new_settings,
            changed_keys: vec![key],
        }
    }

    pub fn is_changed(&self, key: SettingKey) -> bool {
        self.changed_keys.contains(&key)
    }
}
