use crate::domain::power::{MaxPower, MaxPowerError};

/// On/off flag and power level as last commanded or observed.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct HeaterState {
    is_on: bool,
    max_power: MaxPower,
}

impl Default for HeaterState {
    fn default() -> Self {
        HeaterState {
            is_on: true,
            max_power: MaxPower::High,
        }
    }
}

#[cfg(test)]
impl HeaterState {
    pub fn new(is_on: bool, max_power: MaxPower) -> Self {
        HeaterState { is_on, max_power }
    }
}

impl HeaterState {
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn max_power(&self) -> MaxPower {
        self.max_power
    }

    /// Records a successful write and returns the state it replaced.
    pub fn commit(&mut self, is_on: bool, max_power: MaxPower) -> HeaterState {
        std::mem::replace(self, HeaterState { is_on, max_power })
    }

    /// Applies a requested power value read from the heater. Zero turns the heater off and keeps
    /// the power level, anything else must be a known level.
    pub fn apply_requested_power(&mut self, requested_power: i64) -> Result<(), MaxPowerError> {
        if requested_power == 0 {
            self.is_on = false;
            return Ok(());
        }

        self.max_power = MaxPower::try_from(requested_power)?;
        self.is_on = true;
        Ok(())
    }
}
