use crate::domain::commands::Command;
use crate::domain::controller_registry;
use crate::domain::power::MaxPower;
use crate::domain::settings::{SettingKey, UnknownSettingError};
use crate::store::DeviceMap;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, instrument, warn};

/// A line typed on the console.
#[derive(PartialEq, Debug)]
pub enum ConsoleInput {
    Command(Command),
    Status,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("unknown command '{0}', expected onoff, max_power, change-maxpower, target_temperature, setting or status")]
    UnknownCommand(String),
    #[error("missing {0}")]
    MissingValue(&'static str),
    #[error("'{0}' is not on or off")]
    InvalidSwitch(String),
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error(transparent)]
    UnknownSetting(#[from] UnknownSettingError),
}

pub fn parse_line(line: &str) -> Result<ConsoleInput, ParseError> {
    let mut parts = line.split_whitespace();
    let name = parts.next().ok_or(ParseError::MissingValue("command"))?;

    let input = match name {
        "status" => ConsoleInput::Status,
        "onoff" => ConsoleInput::Command(Command::SetOnOff(parse_switch(parts.next())?)),
        "max_power" => ConsoleInput::Command(Command::SetMaxPower(parse_power(parts.next())?)),
        "change-maxpower" => ConsoleInput::Command(Command::ChangeMaxPower(parse_power(parts.next())?)),
        "target_temperature" => ConsoleInput::Command(Command::SetTargetTemperature(parse_number(parts.next())?)),
        "setting" => {
            let key = parts.next().ok_or(ParseError::MissingValue("setting key"))?.parse::<SettingKey>()?;
            let value = parse_number(parts.next())?;
            ConsoleInput::Command(Command::ChangeSetting { key, value })
        }
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(input)
}

fn parse_switch(value: Option<&str>) -> Result<bool, ParseError> {
    match value.ok_or(ParseError::MissingValue("on or off"))? {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        other => Err(ParseError::InvalidSwitch(other.to_string())),
    }
}

fn parse_power(value: Option<&str>) -> Result<MaxPower, ParseError> {
    value.map(MaxPower::from_capability_id).ok_or(ParseError::MissingValue("power level"))
}

fn parse_number(value: Option<&str>) -> Result<f64, ParseError> {
    let value = value.ok_or(ParseError::MissingValue("number"))?;
    value.parse().map_err(|_| ParseError::InvalidNumber(value.to_string()))
}

/// Reads commands line by line and dispatches them to the controller of `device_id` until EOF.
#[instrument(skip(reader, devices))]
pub async fn listen<R: AsyncBufRead + Unpin>(reader: R, device_id: &str, devices: DeviceMap) -> io::Result<()> {
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(ConsoleInput::Status) => {
                let devices = devices.read().await;
                match devices.get(device_id) {
                    Some(view) => info!(device_id, "📋 {:?}", view),
                    None => warn!(device_id, "⚠️ Nothing known about device '{}' yet", device_id),
                }
            }
            Ok(ConsoleInput::Command(command)) => {
                let Some(controller) = controller_registry::get(device_id) else {
                    warn!(device_id, "⚠️ No controller registered for device '{}'", device_id);
                    continue;
                };

                match controller.execute(command.clone()).await {
                    Ok(()) => info!(device_id, "✅ Executed {:?}", command),
                    Err(e) => warn!(device_id, "⚠️ Could not execute {:?}: {}", command, e),
                }
            }
            Err(e) => warn!("⚠️ {}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::controller::Controller;
    use crate::hiax::HeaterError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::sync::RwLock;

    #[rstest]
    #[case("onoff on", ConsoleInput::Command(Command::SetOnOff(true)))]
    #[case("onoff false", ConsoleInput::Command(Command::SetOnOff(false)))]
    #[case("max_power low_power", ConsoleInput::Command(Command::SetMaxPower(MaxPower::Low)))]
    #[case("change-maxpower medium_power", ConsoleInput::Command(Command::ChangeMaxPower(MaxPower::Medium)))]
    #[case("target_temperature 65", ConsoleInput::Command(Command::SetTargetTemperature(65.0)))]
    #[case(
        "setting regulation_diff 6",
        ConsoleInput::Command(Command::ChangeSetting { key: SettingKey::RegulationDiff, value: 6.0 })
    )]
    #[case("  status  ", ConsoleInput::Status)]
    fn parses_commands(#[case] line: &str, #[case] expected: ConsoleInput) {
        assert_eq!(parse_line(line), Ok(expected));
    }

    #[rstest]
    #[case("reboot", ParseError::UnknownCommand("reboot".to_string()))]
    #[case("onoff", ParseError::MissingValue("on or off"))]
    #[case("onoff maybe", ParseError::InvalidSwitch("maybe".to_string()))]
    #[case("target_temperature hot", ParseError::InvalidNumber("hot".to_string()))]
    #[case("setting", ParseError::MissingValue("setting key"))]
    fn rejects_invalid_lines(#[case] line: &str, #[case] expected: ParseError) {
        assert_eq!(parse_line(line), Err(expected));
    }

    #[derive(Debug, Default)]
    struct RecordingController {
        commands: Mutex<Vec<Command>>,
    }

    #[async_trait]
    impl Controller for RecordingController {
        fn id(&self) -> &str {
            "console-test"
        }

        async fn execute(&self, command: Command) -> Result<(), HeaterError> {
            self.commands.lock().unwrap().push(command);
            Ok(())
        }
    }

    #[test_log::test(tokio::test)]
    async fn listen_dispatches_parsed_commands() -> io::Result<()> {
        let controller = Arc::new(RecordingController::default());
        controller_registry::register(controller.clone());
        let devices = Arc::new(RwLock::new(HashMap::new()));

        let input = b"onoff off\n\nbogus\nchange-maxpower low_power\nstatus\n";
        listen(&input[..], "console-test", devices).await?;

        assert_eq!(
            *controller.commands.lock().unwrap(),
            vec![Command::SetOnOff(false), Command::ChangeMaxPower(MaxPower::Low)]
        );
        controller_registry::unregister("console-test");
        Ok(())
    }
}
