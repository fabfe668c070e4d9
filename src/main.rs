use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};

use bonsai_api::web::{AppState, WebServer};
use bonsai_api::{Config, MailDispatcher};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let mut config = if Path::new(CONFIG_PATH).exists() {
        match Config::load(CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {CONFIG_PATH}: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Config::default()
    };
    config.apply_env_overrides();

    // Initialize logging
    if let Err(e) = bonsai_api::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        bonsai_api::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    info!(
        "{} API v{} starting on {}:{}",
        config.site.name,
        env!("CARGO_PKG_VERSION"),
        config.web.host,
        config.web.port
    );

    let dispatcher = match MailDispatcher::from_config(&config.mail, &config.site) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            error!("Failed to set up mail delivery: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(dispatcher, config.site.clone());
    let server = match WebServer::new(&config.web, state) {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
