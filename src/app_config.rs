use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    myuplink: MyUplink,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()?;

        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let app_config: AppConfig = config.try_deserialize()?;
        if app_config.core.poll_interval.is_zero() {
            return Err(ConfigError::Message("core.poll_interval must be greater than zero".to_string()));
        }

        Ok(app_config)
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn myuplink(&self) -> &MyUplink {
        &self.myuplink
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    store_buffer_size: usize,
    #[serde(with = "humantime_serde")]
    poll_interval: Duration,
}

impl Core {
    pub fn store_buffer_size(&self) -> usize {
        self.store_buffer_size
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

#[derive(Debug, Deserialize)]
pub struct MyUplink {
    url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    device_id: Option<String>,
}

impl MyUplink {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    store_buffer_size: 64,
                    poll_interval: Duration::from_secs(300),
                },
                myuplink: MyUplink {
                    url: "https://api.myuplink.com".to_string(),
                    token_url: "https://api.myuplink.com/oauth/token".to_string(),
                    client_id: "client".to_string(),
                    client_secret: "secret".to_string(),
                    scope: "READSYSTEM WRITESYSTEM".to_string(),
                    device_id: None,
                },
            },
        }
    }

    /// Points both the API and the token endpoint at the given server.
    pub fn myuplink_url(mut self, url: String) -> Self {
        self.config.myuplink.token_url = format!("{}/oauth/token", url);
        self.config.myuplink.url = url;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn load_toml(poll_interval: &str) -> Result<AppConfig, ConfigError> {
        let toml = format!(
            r#"
            [core]
            store_buffer_size = 8
            poll_interval = "{}"

            [myuplink]
            url = "https://api.myuplink.com"
            token_url = "https://api.myuplink.com/oauth/token"
            client_id = "id"
            client_secret = "secret"
            scope = "READSYSTEM WRITESYSTEM"
        "#,
            poll_interval
        );

        let config = Config::builder()
            .add_source(config::File::from_str(&toml, config::FileFormat::Toml))
            .build()?;
        AppConfig::from_config(config)
    }

    #[test]
    fn deserializes_a_humantime_poll_interval() -> Result<(), ConfigError> {
        let config = load_toml("5m")?;

        assert_eq!(config.core().poll_interval(), Duration::from_secs(300));
        assert_eq!(config.core().store_buffer_size(), 8);
        assert_eq!(config.myuplink().device_id(), None);
        Ok(())
    }

    #[test]
    fn rejects_a_zero_poll_interval() {
        let result = load_toml("0s");

        assert!(matches!(result, Err(ConfigError::Message(message)) if message.contains("poll_interval")));
    }
}
