use serde::Deserialize;

// API: https://api.myuplink.com/swagger/index.html, GET /v2/systems/me
#[derive(Debug, Deserialize)]
pub struct SystemsResponse {
    pub systems: Vec<SystemGet>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemGet {
    pub system_id: String,
    pub name: String,
    pub devices: Vec<SystemDevice>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemDevice {
    pub id: String,
    pub connection_state: Option<String>,
    pub product: Product,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub serial_number: Option<String>,
    pub name: String,
}
