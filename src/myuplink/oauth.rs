use crate::app_config::MyUplink;
use crate::myuplink::MyUplinkError;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Tokens are refreshed this long before the server says they expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Client credentials grant with a cached access token.
#[derive(Debug)]
pub struct TokenProvider {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    cached: RwLock<Option<AccessToken>>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + TimeDelta::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl TokenProvider {
    pub fn new(http: Client, config: &MyUplink) -> Self {
        TokenProvider {
            http,
            token_url: config.token_url().to_owned(),
            client_id: config.client_id().to_owned(),
            client_secret: config.client_secret().to_owned(),
            scope: config.scope().to_owned(),
            cached: RwLock::new(None),
        }
    }

    /// Returns the `Authorization` header value for the next request.
    pub async fn authorization(&self) -> Result<HeaderValue, MyUplinkError> {
        let token = self.access_token().await?;
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
        value.set_sensitive(true);
        Ok(value)
    }

    async fn access_token(&self) -> Result<String, MyUplinkError> {
        if let Some(token) = self.cached.read().await.as_ref().filter(|token| token.is_fresh(Utc::now())) {
            return Ok(token.value.clone());
        }

        let mut cached = self.cached.write().await;
        // Another request may have refreshed the token while waiting for the lock
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(Utc::now())) {
            return Ok(token.value.clone());
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    #[instrument(skip(self))]
    async fn request_token(&self) -> Result<AccessToken, MyUplinkError> {
        debug!("🔑 Requesting myUplink access token...");
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", self.scope.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<TokenResponse>()
            .await?;

        info!(expires_in = response.expires_in, "🔑 Requesting myUplink access token... OK");
        Ok(AccessToken {
            value: response.access_token,
            expires_at: Utc::now() + TimeDelta::seconds(response.expires_in),
        })
    }
}
