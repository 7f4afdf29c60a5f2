use serde::Serialize;

/// Flow triggers fired by the adapter, serialized as the trigger tokens.
#[derive(PartialEq, Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Trigger {
    MaxPowerChanged { max_power: u32 },
}

impl Trigger {
    pub fn id(&self) -> &'static str {
        match self {
            Trigger::MaxPowerChanged { .. } => "max_power_changed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn tokens_carry_the_wattage() -> Result<(), serde_json::Error> {
        let trigger = Trigger::MaxPowerChanged { max_power: 1300 };

        assert_eq!(serde_json::to_value(&trigger)?, json!({ "max_power": 1300 }));
        assert_eq!(trigger.id(), "max_power_changed");
        Ok(())
    }
}
