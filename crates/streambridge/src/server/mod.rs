//! HTTP surface of the service.
//!
//! Two routes are exposed, optionally nested under
//! [`ServerConfig::route_prefix`](crate::config::ServerConfig::route_prefix):
//!
//! | Method | Path                | Handler                                  |
//! |--------|---------------------|------------------------------------------|
//! | POST   | `/ProcessCrashDump` | [`handlers::process_crash_dump`]         |
//! | GET    | `/health`           | [`handlers::health`]                     |

pub mod handlers;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{Error, Result};

/// Build the application router.
#[must_use]
pub fn router(config: &Config) -> Router {
    let routes = Router::new()
        .route("/ProcessCrashDump", post(handlers::process_crash_dump))
        .route("/health", get(handlers::health));

    let app = match config.route_prefix() {
        Some(prefix) => Router::new().nest(prefix, routes),
        None => routes,
    };

    let app = app
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(TraceLayer::new_for_http());

    if config.server.cors_enabled {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}

/// Serve HTTP until Ctrl-C is received.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;

    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
