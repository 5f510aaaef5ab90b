//! Background keep-alive ping against the service root.
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::ApiClient;

/// Spawns the keep-alive task: one `GET /` per interval, response discarded.
///
/// The first ping fires one full interval after startup. Failures are traced
/// and otherwise ignored; the ping never writes to the output log.
pub fn spawn(api: Arc<ApiClient>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Keep-alive ping every {:?} against {}",
            interval,
            api.base_url()
        );
        let mut timer = tokio::time::interval(interval);
        timer.tick().await; // Skip the first immediate tick.
        loop {
            timer.tick().await;
            if let Err(e) = api.ping().await {
                debug!("Keep-alive ping failed: {}", e);
            }
        }
    })
}
