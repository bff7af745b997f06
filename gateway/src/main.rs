//! Hukum Chat gateway binary.

use std::env;
use std::sync::Arc;

use hukum_gateway::{app, logging, AppState, Config};
use tokio::net::TcpListener;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("hukum-gateway {}", VERSION);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle --version / -V
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        print_version();
        return Ok(());
    }

    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check config.toml and GATEWAY__SECTION__KEY environment variables.",
            e
        )
    })?;

    logging::init(&config.logging.level);

    tracing::info!("Starting Hukum Chat gateway {}", VERSION);
    tracing::info!("Backend at {}", config.backend_url());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::from_config(config)?);
    let app = app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
