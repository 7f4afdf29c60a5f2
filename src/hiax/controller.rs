use crate::domain::commands::Command;
use crate::domain::controller::Controller;
use crate::domain::settings::SettingsChange;
use crate::hiax::{HeaterError, HiaxDevice};
use async_trait::async_trait;
use tracing::instrument;

#[async_trait]
impl Controller for HiaxDevice {
    fn id(&self) -> &str {
        self.device_id()
    }

    #[instrument(skip(self), fields(device_id = self.device_id()))]
    async fn execute(&self, command: Command) -> Result<(), HeaterError> {
        match command {
            Command::SetOnOff(turn_on) => {
                let max_power = self.state().await.max_power();
                self.set_heater_state(turn_on, max_power).await
            }
            Command::SetMaxPower(max_power) | Command::ChangeMaxPower(max_power) => {
                let is_on = self.state().await.is_on();
                self.set_heater_state(is_on, max_power).await
            }
            Command::SetTargetTemperature(value) => self.set_target_temperature(value).await,
            Command::ChangeSetting { key, value } => {
                let change = SettingsChange::single(self.settings().await, key, value);
                self.on_settings(&change).await?;
                self.store_settings(change.new_settings).await
            }
        }
    }
}
