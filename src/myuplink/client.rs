use crate::app_config::MyUplink;
use crate::myuplink::domain::{DevicePoints, PointGet, SystemsResponse};
use crate::myuplink::oauth::TokenProvider;
use crate::myuplink::point_code::PointCode;
use crate::myuplink::point_value::PointValue;
use reqwest::header::{self, HeaderValue};
use reqwest::{Client, RequestBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

pub fn new_client(config: &MyUplink) -> Result<MyUplinkClient, MyUplinkError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    let http = Client::builder().default_headers(headers).build()?;
    let tokens = Arc::new(TokenProvider::new(http.clone(), config));

    Ok(MyUplinkClient {
        http,
        base_url: config.url().trim_end_matches('/').to_owned(),
        tokens,
    })
}

#[derive(Debug, Clone)]
pub struct MyUplinkClient {
    http: Client,
    base_url: String,
    tokens: Arc<TokenProvider>,
}

/// Outcome of a point write, `ok` mirrors the HTTP success status.
#[derive(PartialEq, Debug)]
pub struct PointWriteResponse {
    pub ok: bool,
}

impl MyUplinkClient {
    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, MyUplinkError> {
        Ok(request.header(header::AUTHORIZATION, self.tokens.authorization().await?))
    }

    #[instrument(skip(self, codes), fields(parameters = %PointCode::join(codes)))]
    pub async fn get_device_points(&self, device_id: &str, codes: &[PointCode]) -> Result<DevicePoints, MyUplinkError> {
        let request = self
            .http
            .get(format!("{}/v2/devices/{}/points", self.base_url, device_id))
            .query(&[("parameters", PointCode::join(codes))]);

        let points = self
            .authorized(request)
            .await?
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<PointGet>>()
            .await?
            .into_iter()
            .collect::<DevicePoints>();

        debug!(device_id, "Retrieved {} of {} point(s)", points.len(), codes.len());
        Ok(points)
    }

    #[instrument(skip(self, value), fields(value = %value))]
    pub async fn set_device_point(&self, device_id: &str, code: PointCode, value: PointValue) -> Result<PointWriteResponse, MyUplinkError> {
        let body = HashMap::from([(code.code(), value)]);
        let request = self.http.patch(format!("{}/v2/devices/{}/points", self.base_url, device_id)).json(&body);

        let response = self.authorized(request).await?.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await;
            warn!(device_id, status_code = %status, "⚠️ Unable to write point {}, request to myUplink failed. Response: {:?}", code, body);
        }

        Ok(PointWriteResponse { ok: status.is_success() })
    }

    #[instrument(skip(self))]
    pub async fn systems(&self) -> Result<SystemsResponse, MyUplinkError> {
        let request = self.http.get(format!("{}/v2/systems/me", self.base_url));

        let systems = self
            .authorized(request)
            .await?
            .send()
            .await?
            .error_for_status()?
            .json::<SystemsResponse>()
            .await?;

        Ok(systems)
    }
}

#[derive(Error, Debug)]
pub enum MyUplinkError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("myUplink client set an invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
    #[error("no device found in any myUplink system")]
    NoDevice,
}
