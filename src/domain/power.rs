use std::fmt::Display;
use thiserror::Error;

/// Heating element power level of the water heater.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum MaxPower {
    Low,
    Medium,
    High,
}

impl MaxPower {
    /// The value of the requested power point when the heater is on.
    pub fn code(&self) -> u8 {
        match self {
            MaxPower::Low => 1,
            MaxPower::Medium => 2,
            MaxPower::High => 3,
        }
    }

    pub fn watts(&self) -> u32 {
        match self {
            MaxPower::Low => 700,
            MaxPower::Medium => 1300,
            MaxPower::High => 2000,
        }
    }

    pub fn capability_id(&self) -> &'static str {
        match self {
            MaxPower::Low => "low_power",
            MaxPower::Medium => "medium_power",
            MaxPower::High => "high_power",
        }
    }

    /// Unknown ids select the highest level.
    pub fn from_capability_id(id: &str) -> MaxPower {
        match id {
            "low_power" => MaxPower::Low,
            "medium_power" => MaxPower::Medium,
            _ => MaxPower::High,
        }
    }

    /// Requested power written to the heater, 0 means off.
    pub fn requested_power(turn_on: bool, power: MaxPower) -> u8 {
        if turn_on { power.code() } else { 0 }
    }
}

impl TryFrom<i64> for MaxPower {
    type Error = MaxPowerError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(MaxPower::Low),
            2 => Ok(MaxPower::Medium),
            3 => Ok(MaxPower::High),
            other => Err(MaxPowerError::UnknownCode(other)),
        }
    }
}

impl Display for MaxPower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} W", self.watts())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum MaxPowerError {
    #[error("unknown power level {0}")]
    UnknownCode(i64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(MaxPower::Low, 1, 700)]
    #[case(MaxPower::Medium, 2, 1300)]
    #[case(MaxPower::High, 3, 2000)]
    fn code_and_watts(#[case] power: MaxPower, #[case] code: u8, #[case] watts: u32) {
        assert_eq!(power.code(), code);
        assert_eq!(power.watts(), watts);
        assert_eq!(MaxPower::try_from(code as i64), Ok(power));
    }

    #[rstest]
    fn requested_power_is_zero_when_off(#[values(MaxPower::Low, MaxPower::Medium, MaxPower::High)] power: MaxPower) {
        assert_eq!(MaxPower::requested_power(false, power), 0);
        assert_eq!(MaxPower::requested_power(true, power), power.code());
    }

    #[rstest]
    #[case("low_power", MaxPower::Low)]
    #[case("medium_power", MaxPower::Medium)]
    #[case("high_power", MaxPower::High)]
    #[case("turbo", MaxPower::High)]
    fn from_capability_id(#[case] id: &str, #[case] expected: MaxPower) {
        assert_eq!(MaxPower::from_capability_id(id), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(-1)]
    fn try_from_rejects_unknown_codes(#[case] code: i64) {
        assert_eq!(MaxPower::try_from(code), Err(MaxPowerError::UnknownCode(code)));
    }
}
