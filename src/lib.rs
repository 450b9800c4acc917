use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::EmitterConfig;
use crate::emitter::Emitter;
use crate::error::Result;
use crate::transport::EventSink;

pub mod config;
pub mod emitter;
pub mod error;
pub mod logger;
pub mod transport;
pub mod vitals;

/// Drives the simulation against an already-acquired sink until `cancel` fires.
pub async fn run_simulation(config: EmitterConfig, sink: Arc<dyn EventSink>, cancel: CancellationToken) -> Result<()> {
    log::info!("Connecting to Event Hub...");

    Emitter::new(config, sink).run(cancel).await
}
