#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use compose_hook::auth::RequestAuthenticator;
use compose_hook::exec::CommandSpec;
use compose_hook::resolve::DockerCli;
use compose_hook::server::{AppState, router};
use compose_hook_test_utils::builders::{inspect_with_compose_file, ps_listing};
use compose_hook_test_utils::{FakeExecutor, TEST_SECRET, signed_headers};
use secrecy::SecretString;
use serde::de::DeserializeOwned;

pub const COMPOSE_FILE: &str = "/srv/app/docker-compose.yml";

/// Executor scripted with containers `db` and `web`, where `web` belongs to
/// [`COMPOSE_FILE`].
pub fn scripted_executor() -> FakeExecutor {
    FakeExecutor::new()
        .succeed("docker ps -a --format=json", ps_listing(&["db", "web"]))
        .succeed("docker inspect web", inspect_with_compose_file(COMPOSE_FILE))
}

pub fn state_with(executor: FakeExecutor, serialize_per_container: bool) -> AppState {
    let authenticator = RequestAuthenticator::new(SecretString::from(TEST_SECRET.to_string()));
    AppState::new(
        authenticator,
        Arc::new(executor),
        DockerCli::default(),
        serialize_per_container,
    )
}

/// Router over a fake executor plus a handle to the commands it ran.
pub fn app(executor: FakeExecutor) -> (Router, Arc<Mutex<Vec<CommandSpec>>>) {
    let executed = executor.executed();
    (router(state_with(executor, false)), executed)
}

/// POST `body` to `uri` with a fresh, valid signature.
pub fn signed_post(uri: &str, body: &str) -> Request<Body> {
    let (ts, sig) = signed_headers(body.as_bytes());
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("X-Timestamp", ts)
        .header("X-Signature", sig)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json<T: DeserializeOwned>(resp: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
