use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use vitals_simulator::config::EmitterConfig;
use vitals_simulator::transport::event_hub::EventHubSink;
use vitals_simulator::{logger, run_simulation};

#[tokio::main]
async fn main() {
    logger::init();

    log::info!("Logger initialized. Starting vitals simulator.");

    // Configuration and client setup must succeed before anything is generated
    let config = match EmitterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("An error occurred: {}", e);
            std::process::exit(1);
        }
    };

    let sink = match EventHubSink::new(&config) {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            log::error!("An error occurred: {}", e);
            std::process::exit(1);
        }
    };

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    if let Err(e) = run_simulation(config, sink, cancel).await {
        log::error!("An error occurred: {}", e);
        std::process::exit(1);
    }
}
