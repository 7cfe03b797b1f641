use anyhow::Context;
use portfolio_backend::{
    domain::secrets::{SecretMode, ENVIRONMENT_VARIABLE, LOCAL_ENVIRONMENT},
    infrastructure::{build_mailer, secret_source_for},
    shared::logging::LoggingUtils,
    AppConfig, HttpServer, Settings,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    load_dotenv();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    if let Err(e) = LoggingUtils::initialize(&config.logging.level, &config.logging.format) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting portfolio backend...");

    let server = match build_server(config).await {
        Ok(server) => {
            info!("Server initialized successfully");
            server
        }
        Err(e) => {
            error!("Failed to initialize server: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Server starting on {}", server.config().server_address());

    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Local development keeps its secrets in a `.env` file
fn load_dotenv() {
    let indicator = std::env::var(ENVIRONMENT_VARIABLE).ok();
    if indicator.is_none() || indicator.as_deref() == Some(LOCAL_ENVIRONMENT) {
        dotenv::dotenv().ok();
    }
}

async fn build_server(config: AppConfig) -> anyhow::Result<HttpServer> {
    let mode = SecretMode::from_process_env();
    info!(mode = ?mode, "Selected secret source");

    let source = secret_source_for(mode, &config.secret_manager)
        .context("failed to create secret source")?;
    let settings = Settings::load(source.as_ref())
        .await
        .context("failed to resolve settings")?;
    info!(settings = ?settings, "Settings resolved");

    let mailer = build_mailer(&settings.email).context("failed to configure email delivery")?;

    Ok(HttpServer::new(config, Arc::new(settings), mailer))
}
