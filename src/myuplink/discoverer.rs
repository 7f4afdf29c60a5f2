use crate::myuplink::{MyUplinkClient, MyUplinkError};
use tracing::{info, instrument};

/// Returns the id of the first device registered to the account.
#[instrument(skip(client))]
pub async fn discover(client: &MyUplinkClient) -> Result<String, MyUplinkError> {
    info!("Retrieving myUplink systems...");
    let response = client.systems().await?;
    info!("Retrieving myUplink systems... OK, {} found", response.systems.len());

    let device = response
        .systems
        .into_iter()
        .flat_map(|system| system.devices)
        .next()
        .ok_or(MyUplinkError::NoDevice)?;

    info!(device_id = device.id, "Using device '{}'", device.product.name);
    Ok(device.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::myuplink::test_support::{client_for, mock_token};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn discover_returns_the_first_device() -> Result<(), MyUplinkError> {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;

        let mock = server
            .mock("GET", "/v2/systems/me")
            .match_header("authorization", "Bearer token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/myuplink_systems_response.json"))
            .create_async()
            .await;

        let client = client_for(&server);

        let device_id = discover(&client).await?;

        mock.assert_async().await;
        assert_eq!(device_id, "hiax-r-1234-5678");
        Ok(())
    }

    #[tokio::test]
    async fn discover_fails_without_devices() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;

        let _mock = server
            .mock("GET", "/v2/systems/me")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "page": 1, "itemsPerPage": 10, "numItems": 0, "systems": [] }"#)
            .create_async()
            .await;

        let client = client_for(&server);

        let result = discover(&client).await;

        assert!(matches!(result, Err(MyUplinkError::NoDevice)));
    }
}
