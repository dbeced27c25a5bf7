//! Gateway module - the authenticated HTTP control surface
//!
//! ```text
//!   client ──► TraceLayer ──► require_token ──► /play_pause, /next, ... ──► Executor::run
//!                                          └──► /launch?name=X        ──► Executor::spawn
//! ```
//!
//! Unmatched paths never reach the token check and get axum's default 404.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    middleware,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::actions::Action;
use crate::config::{Config, ConfigStore};
use crate::error::Result;

pub use auth::{authenticate, bearer_token};
pub use error::GatewayError;
pub use state::GatewayState;

/// Route of the program launcher
pub const LAUNCH_ROUTE: &str = "/launch";

/// Build the router with every action route behind the token check
pub fn build_router(state: GatewayState) -> Router {
    let mut router = Router::new();

    for action in Action::ALL {
        router = router.route(
            action.route(),
            any(
                move |State(state): State<GatewayState>,
                      Extension(config): Extension<Arc<Config>>| async move {
                    handlers::run_action(state, config, action).await
                },
            ),
        );
    }

    router
        .route(LAUNCH_ROUTE, any(handlers::launch))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until Ctrl-C / SIGTERM
pub async fn serve(state: GatewayState) -> Result<()> {
    let config = state.config.snapshot().await;
    let port = config.server.port_number()?;
    let host = config.server.bind_host().to_string();

    let listener = TcpListener::bind((host.as_str(), port)).await?;
    info!("Gateway listening on http://{}", listener.local_addr()?);

    let reloader = match spawn_reloader(state.config.clone()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Reload signal unavailable");
            None
        }
    };

    let result = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(reloader) = reloader {
        reloader.abort();
    }
    result?;

    info!("Gateway stopped");
    Ok(())
}

/// Start reloading the configuration whenever the operator asks for it
/// (SIGHUP on Unix, Ctrl-Break on Windows).
///
/// The signal handler is installed before this returns, so a signal sent
/// right after the call is not lost.
pub fn spawn_reloader(store: Arc<ConfigStore>) -> std::io::Result<JoinHandle<()>> {
    #[cfg(unix)]
    let mut signals = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())?;

    #[cfg(windows)]
    let mut signals = tokio::signal::windows::ctrl_break()?;

    Ok(tokio::spawn(async move {
        #[cfg(any(unix, windows))]
        while signals.recv().await.is_some() {
            info!(path = %store.path().display(), "Reloading configuration");
            if let Err(e) = store.reload().await {
                error!(error = %e, "Reload failed, keeping previous configuration");
            }
        }

        #[cfg(not(any(unix, windows)))]
        let _ = store;
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received");
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    fn write_config(path: &std::path::Path, program: &str) {
        let raw = serde_json::json!({
            "token": "reload-token-0123456789",
            "programs": [{ "name": program, "path": "true" }]
        });
        std::fs::write(path, raw.to_string()).unwrap();
    }

    #[tokio::test]
    async fn test_sighup_reloads_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        write_config(&path, "before");

        let store = Arc::new(ConfigStore::open(&path).unwrap());
        let reloader = spawn_reloader(store.clone()).unwrap();

        write_config(&path, "after");
        let status = std::process::Command::new("kill")
            .args(["-HUP", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        let mut reloaded = false;
        for _ in 0..100 {
            if store.snapshot().await.find_program("after").is_some() {
                reloaded = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        reloader.abort();

        assert!(reloaded, "SIGHUP did not reload the configuration");
    }
}
