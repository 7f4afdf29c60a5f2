use std::fmt::Display;

/// Device attributes exposed to the host.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Capability {
    OnOff,
    MaxPower,
    TargetTemperature,
    MeasurePower,
    MeasureTemperature,
    MeterPowerInTank,
    MeterPowerAccumulated,
    MeasureHumidityFillLevel,
}

impl Capability {
    pub fn id(&self) -> &'static str {
        match self {
            Capability::OnOff => "onoff",
            Capability::MaxPower => "max_power",
            Capability::TargetTemperature => "target_temperature",
            Capability::MeasurePower => "measure_power",
            Capability::MeasureTemperature => "measure_temperature",
            Capability::MeterPowerInTank => "meter_power.in_tank",
            Capability::MeterPowerAccumulated => "meter_power.accumulated",
            Capability::MeasureHumidityFillLevel => "measure_humidity.fill_level",
        }
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(PartialEq, Debug, Clone)]
pub enum CapabilityValue {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl Display for CapabilityValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityValue::Boolean(value) => write!(f, "{}", value),
            CapabilityValue::Number(value) => write!(f, "{}", value),
            CapabilityValue::Text(value) => f.write_str(value),
        }
    }
}
