use crate::hiax::HiaxDevice;
use std::sync::Weak;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

/// Refreshes a device on a fixed interval until cancelled or the device is dropped.
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// The first refresh runs one period from now, callers refresh right away themselves.
    pub fn spawn(device: Weak<HiaxDevice>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let Some(device) = device.upgrade() else {
                    debug!("🕗 Device is gone, stopping the poller");
                    break;
                };

                if let Err(e) = device.update_state().await {
                    warn!(device_id = device.device_id(), "⚠️ Could not refresh the heater state: {}", e);
                }
            }
        });

        info!(period = ?period, "🕗 Polling heater state");
        Poller { handle }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
