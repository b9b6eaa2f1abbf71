//! # Admit Card Lookup Server
//!
//! Serves roll number searches against the in-memory [`catalog`] index.
//!
//! ## Routes
//! - `POST /search` with `{ "roll_no": "..." }`: admit card links, or 404 with a
//!   reason that tells "unknown roll" apart from "known roll, no card uploaded"
//! - `GET /health`: table sizes, visitor count, build time
//! - `POST /reload`: rebuild from the configured files and swap the index in
//!
//! ## Startup
//! The index is built before the listener binds. A missing or broken manifest,
//! or a mapping file whose columns cannot be inferred, stops the process.
//! Mapping files that do not exist are skipped with a warning.
//!
//! ## Environment
//! - `RUST_PORT` (default `8000`)
//! - `MAPPING_FILES`: comma-separated, loaded in order, later files win
//! - `MANIFEST_PATH` (default `data/drive_manifest.csv`)
//! - `COUNTER_PATH` (default `data/visitors.txt`)
//! - `CORS_ORIGINS`: `*` or a comma-separated list
//! - `RUST_LOG`: tracing filter, `info` when unset
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod counter;
pub mod error;
pub mod routes;
pub mod state;

use config::{Config, split_list};
use error::StartupError;
use routes::{health_handler, reload_handler, search_handler};
use state::State;

pub async fn start_server() -> Result<(), StartupError> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    info!("Building index...");
    let state = State::new(config).await?;

    let stats = state.index.snapshot().stats();
    info!(
        "Index ready: {} college -> exam, {} admit cards",
        stats.college_to_exam, stats.exam_to_file
    );

    let app = router(state.clone())?;

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.visitors.flush().await;
    info!("Server shut down");

    Ok(())
}

pub fn router(state: Arc<State>) -> Result<Router, StartupError> {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&state.config.cors_origins)?)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Ok(Router::new()
        .route("/search", post(search_handler))
        .route("/health", get(health_handler))
        .route("/reload", post(reload_handler))
        .layer(cors)
        .with_state(state))
}

fn allowed_origins(origins: &str) -> Result<AllowOrigin, StartupError> {
    if origins.trim() == "*" {
        return Ok(AllowOrigin::any());
    }

    let origins = split_list(origins)
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| StartupError::Config {
                key: "CORS_ORIGINS",
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
