use crate::domain::power::MaxPower;
use crate::domain::settings::SettingKey;

/// Host-side requests dispatched to a device controller.
#[derive(PartialEq, Debug, Clone)]
pub enum Command {
    /// The `onoff` capability listener.
    SetOnOff(bool),
    /// The `max_power` capability listener.
    SetMaxPower(MaxPower),
    /// The `change-maxpower` flow action.
    ChangeMaxPower(MaxPower),
    /// The `target_temperature` capability listener.
    SetTargetTemperature(f64),
    ChangeSetting { key: SettingKey, value: f64 },
}
