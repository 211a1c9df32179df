use tracing::{error, info};

use cloudstore::{Config, WebServer};

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = cloudstore::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        cloudstore::logging::init_console_only(&config.logging.level);
    }

    // Apply environment overrides
    config.apply_env_overrides();

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    info!("cloudstore - file storage service");

    let server = match WebServer::new(&config.server, &config.files) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Server configured on {} (max upload {}MB)",
        server.addr(),
        config.files.max_upload_size_mb
    );

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
