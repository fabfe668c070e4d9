//! Web server for the bonsai club API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::WebConfig;
use crate::{BonsaiError, Result};

use super::handlers::AppState;
use super::middleware::RateLimitState;
use super::router::create_router_with_rate_limit;

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Web configuration.
    web_config: WebConfig,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &WebConfig, app_state: AppState) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| {
                BonsaiError::Config(format!(
                    "invalid web server address {}:{}: {e}",
                    config.host, config.port
                ))
            })?;

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            web_config: config.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_router(&self) -> Router {
        let rate_limit_state = Arc::new(RateLimitState::from_config(&self.web_config));
        rate_limit_state.clone().start_cleanup_task();

        create_router_with_rate_limit(self.app_state.clone(), &self.web_config, rate_limit_state)
    }

    /// Run the web server until SIGINT or SIGTERM.
    ///
    /// In-flight requests get `shutdown_grace_secs` to finish; after that the
    /// process exits with status 1.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = self.build_router();
        let grace = Duration::from_secs(self.web_config.shutdown_grace_secs);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        let delivery = if self.app_state.dispatcher.is_live() {
            "smtp"
        } else {
            "log-only"
        };
        tracing::info!(delivery, "Bonsai club API listening on http://{}", local_addr);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            spawn_forced_exit(grace);
        })
        .await?;

        tracing::info!("Server closed");
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("SIGINT received, shutting down gracefully");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("SIGTERM received, shutting down gracefully");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Exit the process if draining takes longer than `grace`.
fn spawn_forced_exit(grace: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        tracing::error!(
            grace_secs = grace.as_secs(),
            "Could not close connections in time, forcefully shutting down"
        );
        std::process::exit(1);
    });
}
