//! Route handlers

use std::sync::Arc;

use axum::extract::{Extension, Query, State};
use tracing::{error, info};

use super::error::GatewayError;
use super::state::GatewayState;
use crate::actions::{Action, CommandLine};
use crate::config::Config;

/// Run one media or power action
pub async fn run_action(
    state: GatewayState,
    config: Arc<Config>,
    action: Action,
) -> Result<&'static str, GatewayError> {
    let command = action.command(&config.commands);

    match state.executor.run(&command).await {
        Ok(()) => {
            info!(%action, "Action executed");
            Ok(action.ack())
        }
        Err(e) => {
            error!(%action, command = %command, error = %e, "Action failed");
            Err(GatewayError::ActionFailed(action.failure()))
        }
    }
}

/// First value of `key` in a decoded query string; repeats are ignored
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// `GET /launch?name=<program>`
pub async fn launch(
    State(state): State<GatewayState>,
    Extension(config): Extension<Arc<Config>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<String, GatewayError> {
    let name = first_param(&params, "name").unwrap_or_default();
    if name.is_empty() {
        return Err(GatewayError::BadRequest("Missing program name parameter"));
    }

    let program = config.find_program(name).ok_or_else(|| {
        info!(name, "No configured program matches");
        GatewayError::NotFound("Program not found")
    })?;

    let command = CommandLine::from(program);
    if let Err(e) = state.executor.spawn(&command).await {
        error!(program = %program.name, path = %program.path, error = %e, "Failed to launch program");
        return Err(GatewayError::ActionFailed("Failed to launch program"));
    }

    info!(program = %program.name, path = %program.path, "Program launched");
    Ok(format!("Launched program: {}", program.name))
}
