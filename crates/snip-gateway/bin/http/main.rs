mod cli;

use crate::cli::CLI;
use clap::Parser;
use snip_gateway::{App, AppState};
use snip_generator::RandomGenerator;
use snip_shortener::{AllocationSettings, ShortenerService};
use snip_storage::InMemoryRegistry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::parse();

    snip_telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        max_allocation_attempts = config.max_allocation_attempts,
        "starting gateway server"
    );

    let settings = AllocationSettings::builder()
        .max_attempts(config.max_allocation_attempts)
        .reserved(App::reserved_codes())
        .build();
    let shortener =
        ShortenerService::with_settings(InMemoryRegistry::new(), RandomGenerator::new(), settings);
    let state = AppState::new(Arc::new(shortener), config.base_url);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
