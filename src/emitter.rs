use std::sync::Arc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::config::EmitterConfig;
use crate::error::Result;
use crate::transport::EventSink;
use crate::vitals::{self, DEFAULT_PATIENT_ID};

/// Publishes one generated vitals record per interval until cancelled.
pub struct Emitter {
    config: EmitterConfig,
    sink: Arc<dyn EventSink>,
}

impl Emitter {
    pub fn new(config: EmitterConfig, sink: Arc<dyn EventSink>) -> Emitter {
        Emitter { config, sink }
    }

    /// Runs the emission loop until `cancel` fires or an error occurs.
    ///
    /// Cancellation is a clean shutdown, not an error. Whatever way the loop
    /// exits, the sink is closed exactly once before the result is returned.
    pub async fn run(&self, cancel: CancellationToken) -> Result<()> {
        let result = self.emit_loop(&cancel).await;

        if let Err(e) = self.sink.close().await {
            log::warn!("Failed to release the transport client: {}", e);
        }

        result
    }

    async fn emit_loop(&self, cancel: &CancellationToken) -> Result<()> {
        while !cancel.is_cancelled() {
            let record = vitals::generate(DEFAULT_PATIENT_ID);
            let message = serde_json::to_string(&record)?;

            self.sink.send(&message).await?;
            log::info!("Sent: {}", message);

            tokio::select! {
                _ = cancel.cancelled() => {
                    log::info!("Simulation stopped by user.");
                    break;
                }
                _ = sleep(self.config.interval) => {}
            }
        }

        Ok(())
    }
}
