//! End-to-end tests for the HTTP gateway.
//!
//! Requests go straight into the axum router via `tower::ServiceExt::oneshot`;
//! a recording executor stands in for the operating system.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use devicectl::actions::{Action, CommandLine, Executor};
use devicectl::config::{CommandSpec, Config, ConfigStore, ProgramConfig};
use devicectl::gateway::{build_router, GatewayState};
use devicectl::{Error, Result};

const TOKEN: &str = "test-token-0123456789";

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Run(CommandLine),
    Spawn(CommandLine),
}

#[derive(Default)]
struct RecordingExecutor {
    calls: Mutex<Vec<Call>>,
    fail_run: bool,
    fail_spawn: bool,
}

impl RecordingExecutor {
    fn failing() -> Self {
        RecordingExecutor {
            fail_run: true,
            fail_spawn: true,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn run(&self, command: &CommandLine) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Run(command.clone()));
        if self.fail_run {
            return Err(Error::Command(format!("{} exited with 1", command.program)));
        }
        Ok(())
    }

    async fn spawn(&self, command: &CommandLine) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Spawn(command.clone()));
        if self.fail_spawn {
            return Err(Error::Spawn(format!("{}: not found", command.program)));
        }
        Ok(())
    }
}

fn test_config() -> Config {
    Config::new(TOKEN)
        .with_program(ProgramConfig::new("foo", "/opt/foo/bin/foo"))
        .with_program(ProgramConfig::new("Browser", "/usr/bin/firefox"))
}

fn test_app(config: Config, executor: Arc<RecordingExecutor>) -> Router {
    let store = Arc::new(ConfigStore::with_config("config.json", config));
    build_router(GatewayState::new(store, executor))
}

/// Sends a request and returns (status, body text).
async fn send(app: &Router, method: Method, path: &str, auth: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn get(app: &Router, path: &str) -> (StatusCode, String) {
    send(app, Method::GET, path, Some(&format!("Bearer {}", TOKEN))).await
}

fn all_routes() -> Vec<String> {
    let mut routes: Vec<String> = Action::ALL.iter().map(|a| a.route().to_string()).collect();
    routes.push("/launch?name=foo".to_string());
    routes
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_missing_token_rejected_on_every_route() {
    let executor = Arc::new(RecordingExecutor::default());
    let app = test_app(test_config(), executor.clone());

    for route in all_routes() {
        let (status, body) = send(&app, Method::GET, &route, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "route {route}");
        assert_eq!(body, "Unauthorized");
    }
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_wrong_token_rejected_on_every_route() {
    let executor = Arc::new(RecordingExecutor::default());
    let app = test_app(test_config(), executor.clone());

    for route in all_routes() {
        let (status, _) = send(&app, Method::POST, &route, Some("Bearer nope")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "route {route}");
    }
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_unauthorized_response_carries_challenge() {
    let app = test_app(test_config(), Arc::new(RecordingExecutor::default()));

    let response = app
        .oneshot(Request::builder().uri("/next").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn test_token_without_bearer_prefix_accepted() {
    let executor = Arc::new(RecordingExecutor::default());
    let app = test_app(test_config(), executor.clone());

    let (status, _) = send(&app, Method::GET, "/next", Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(executor.calls().len(), 1);
}

// ---------------------------------------------------------------------------
// Media and power actions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_each_action_runs_exactly_one_command() {
    for action in Action::ALL {
        let executor = Arc::new(RecordingExecutor::default());
        let app = test_app(test_config(), executor.clone());

        let (status, body) = get(&app, action.route()).await;
        assert_eq!(status, StatusCode::OK, "action {action}");
        assert_eq!(body, action.ack());

        let config = test_config();
        assert_eq!(
            executor.calls(),
            vec![Call::Run(action.command(&config.commands))],
            "action {action}"
        );
    }
}

#[tokio::test]
async fn test_action_failure_is_500() {
    for action in [Action::Shutdown, Action::Reboot, Action::VolumeUp] {
        let executor = Arc::new(RecordingExecutor::failing());
        let app = test_app(test_config(), executor.clone());

        let (status, body) = get(&app, action.route()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, action.failure());
        assert_eq!(executor.calls().len(), 1);
    }
}

#[tokio::test]
async fn test_command_override_is_used() {
    let mut config = test_config();
    config.commands.play_pause = Some(CommandSpec::new("mpc", ["toggle"]));

    let executor = Arc::new(RecordingExecutor::default());
    let app = test_app(config, executor.clone());

    let (status, _) = get(&app, "/play_pause").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        executor.calls(),
        vec![Call::Run(CommandLine::new("mpc", ["toggle"]))]
    );
}

#[tokio::test]
async fn test_any_method_accepted() {
    let executor = Arc::new(RecordingExecutor::default());
    let app = test_app(test_config(), executor.clone());

    let auth = format!("Bearer {}", TOKEN);
    let (status, _) = send(&app, Method::POST, "/volume_down", Some(&auth)).await;
    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Launcher
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_launch_empty_name_is_400() {
    let executor = Arc::new(RecordingExecutor::default());
    let app = test_app(test_config(), executor.clone());

    let (status, body) = get(&app, "/launch?name=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing program name parameter");

    let (status, _) = get(&app, "/launch").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_launch_matches_case_insensitively() {
    for name in ["foo", "Foo", "FOO"] {
        let executor = Arc::new(RecordingExecutor::default());
        let app = test_app(test_config(), executor.clone());

        let (status, body) = get(&app, &format!("/launch?name={name}")).await;
        assert_eq!(status, StatusCode::OK, "name {name}");
        assert_eq!(body, "Launched program: foo");
        assert_eq!(
            executor.calls(),
            vec![Call::Spawn(CommandLine::new(
                "/opt/foo/bin/foo",
                Vec::<String>::new()
            ))]
        );
    }
}

#[tokio::test]
async fn test_launch_first_match_wins() {
    let config = test_config().with_program(ProgramConfig::new("FOO", "/somewhere/else"));
    let executor = Arc::new(RecordingExecutor::default());
    let app = test_app(config, executor.clone());

    let (status, _) = get(&app, "/launch?name=foo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        executor.calls(),
        vec![Call::Spawn(CommandLine::new(
            "/opt/foo/bin/foo",
            Vec::<String>::new()
        ))]
    );
}

#[tokio::test]
async fn test_launch_repeated_name_uses_first() {
    let executor = Arc::new(RecordingExecutor::default());
    let app = test_app(test_config(), executor.clone());

    let (status, body) = get(&app, "/launch?name=foo&name=browser").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Launched program: foo");
    assert_eq!(
        executor.calls(),
        vec![Call::Spawn(CommandLine::new(
            "/opt/foo/bin/foo",
            Vec::<String>::new()
        ))]
    );
}

#[tokio::test]
async fn test_launch_unknown_is_404() {
    let executor = Arc::new(RecordingExecutor::default());
    let app = test_app(test_config(), executor.clone());

    let (status, body) = get(&app, "/launch?name=Unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Program not found");
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_launch_spawn_failure_is_500() {
    let executor = Arc::new(RecordingExecutor::failing());
    let app = test_app(test_config(), executor.clone());

    let (status, body) = get(&app, "/launch?name=browser").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to launch program");
}

// ---------------------------------------------------------------------------
// Routing and reload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unmatched_route_is_404() {
    let executor = Arc::new(RecordingExecutor::default());
    let app = test_app(test_config(), executor.clone());

    let (status, _) = get(&app, "/format_disk").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // No token needed to learn a route does not exist
    let (status, _) = send(&app, Method::GET, "/format_disk", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_reload_changes_accepted_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let write = |token: &str| {
        let raw = serde_json::json!({ "token": token, "programs": [] });
        std::fs::write(&path, raw.to_string()).unwrap();
    };

    write("first-token-0123456789");
    let store = Arc::new(ConfigStore::open(&path).unwrap());
    let executor = Arc::new(RecordingExecutor::default());
    let app = build_router(GatewayState::new(store.clone(), executor));

    let (status, _) = send(&app, Method::GET, "/next", Some("Bearer first-token-0123456789")).await;
    assert_eq!(status, StatusCode::OK);

    write("second-token-0123456789");
    store.reload().await.unwrap();

    let (status, _) = send(&app, Method::GET, "/next", Some("Bearer first-token-0123456789")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, Method::GET, "/next", Some("Bearer second-token-0123456789")).await;
    assert_eq!(status, StatusCode::OK);
}
