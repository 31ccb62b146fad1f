use std::error::Error;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit_status::config::AppConfig;
use transit_status::poller::Poller;
use transit_status::transit::{HafasClient, MockTransitClient, TransitSource};
use transit_status::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    // Create the departure source
    let source = match &config.mock_data_dir {
        Some(dir) => {
            warn!(dir = %dir.display(), "Using mock departures, not the live API");
            TransitSource::Mock(MockTransitClient::new(dir)?)
        }
        None => {
            info!(base_url = %config.transit.base_url, "Using live departures");
            TransitSource::Hafas(HafasClient::new(config.transit.clone())?)
        }
    };

    let stations: Vec<_> = config
        .poller
        .stations
        .iter()
        .map(|s| s.to_string())
        .collect();
    info!(stations = %stations.join(","), "Monitoring stations");

    // Start sampling; the first poll runs straight away
    let poller = Poller::new(source, config.poller.clone());
    poller.start();

    let app = create_router(AppState::new(poller.clone()), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Listening on http://{}", config.bind_addr);
    info!("API endpoints: GET /api/status, GET /api/voice, GET /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.stop();
    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
