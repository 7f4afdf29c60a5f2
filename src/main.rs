use crate::app_config::AppConfig;
use crate::domain::events::Event;
use crate::domain::platform::ChannelPlatform;
use crate::hiax::HiaxDevice;
use crate::store::Store;
use std::future::Future;
use std::io;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::task;
use tracing::{info, warn};

mod app_config;
mod console;
mod domain;
mod hiax;
mod myuplink;
mod store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let client = myuplink::new_client(config.myuplink())?;

    let (tx, rx) = mpsc::channel::<Event>(config.core().store_buffer_size());
    let mut store = Store::new(rx);
    let devices = store.devices();

    task::spawn(async move {
        store.listen().await;
    });
    info!("✅  Initialized store");

    let device_id = match config.myuplink().device_id() {
        Some(device_id) => device_id.to_owned(),
        None => myuplink::discover(&client).await?,
    };
    info!(device_id, "✅  Using device '{}'", device_id);

    let platform = Arc::new(ChannelPlatform::new(tx));
    let device = Arc::new(HiaxDevice::new(device_id.clone(), client, platform, config.core().poll_interval()));
    device.init().await?;

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    let console = console::listen(BufReader::new(tokio::io::stdin()), &device_id, devices);
    if let Err(e) = wait_for_shutdown(console, tokio::signal::ctrl_c()).await {
        warn!("⚠️ Unable to listen for Ctrl-C: {}", e);
    }

    device.on_deleted();
    info!("👋 {} stopped", env!("CARGO_PKG_NAME"));

    Ok(())
}

/// Runs the console until shutdown is requested. A closed console (stdin at EOF) keeps the device running.
async fn wait_for_shutdown<C, S>(console: C, shutdown: S) -> io::Result<()>
where
    C: Future<Output = io::Result<()>>,
    S: Future<Output = io::Result<()>>,
{
    tokio::pin!(shutdown);

    tokio::select! {
        result = console => {
            match result {
                Ok(()) => info!("⌨️ Console closed, waiting for Ctrl-C"),
                Err(e) => warn!("⚠️ Console stopped: {}", e),
            }
            (&mut shutdown).await?;
        }
        result = &mut shutdown => result?,
    }

    info!("🛑 Received Ctrl-C");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn keeps_running_after_the_console_closes() -> io::Result<()> {
        let (tx, rx) = oneshot::channel::<()>();
        let shutdown = async move { rx.await.map_err(io::Error::other) };

        let handle = tokio::spawn(wait_for_shutdown(async { Ok(()) }, shutdown));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_finished());

        tx.send(()).expect("shutdown receiver should be alive");
        handle.await.expect("shutdown task should not panic")
    }

    #[tokio::test]
    async fn stops_on_shutdown_while_the_console_is_open() -> io::Result<()> {
        let console = std::future::pending::<io::Result<()>>();

        wait_for_shutdown(console, async { Ok(()) }).await
    }
}
