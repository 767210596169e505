use anyhow::Result;
use course_api::{config::Config, server, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let prometheus_handle = telemetry::init(&config.telemetry)?;

    info!("Starting course catalogue API");
    info!("HTTP server listening on {}", config.http_addr());

    server::run(config, prometheus_handle).await
}
