// src/server/handlers.rs

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use tracing::{info, warn};

use crate::auth::AuthenticatedRequest;
use crate::types::{ContainerIdentity, Operation};

use super::AppState;
use super::error::RejectError;
use super::types::{RequestData, ReturnMessage};

pub async fn health_check() -> &'static str {
    "ok"
}

/// `POST /pull`: pull the newest image, then recreate the container.
pub async fn pull_container(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ReturnMessage>, RejectError> {
    trigger(&state, Operation::Pull, &headers, body).await
}

/// `POST /build`: rebuild the image and recreate the container.
pub async fn rebuild_container(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ReturnMessage>, RejectError> {
    trigger(&state, Operation::Rebuild, &headers, body).await
}

/// Validate, acknowledge, and leave the actual work to the dispatcher.
async fn trigger(
    state: &AppState,
    operation: Operation,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Json<ReturnMessage>, RejectError> {
    let request = request_from_parts(headers, body);

    let identity = validate_request(state, request).await.inspect_err(|err| {
        warn!(%operation, error = %err, "trigger rejected");
    })?;

    let commands = state
        .resolver
        .docker()
        .operation_commands(operation, &identity);
    // Detached: the response does not wait for the sequence.
    let _ = state.dispatcher.dispatch(operation, &identity.name, commands);

    info!(%operation, container = %identity.name, "trigger accepted");
    Ok(Json(ReturnMessage::accepted(operation, &identity)))
}

/// Authenticate, then resolve the declared container.
///
/// The body is only parsed once its signature has been checked.
pub async fn validate_request(
    state: &AppState,
    mut request: AuthenticatedRequest,
) -> Result<ContainerIdentity, RejectError> {
    state
        .authenticator
        .authenticate(&request.headers, &request.raw_body)?;

    let data: RequestData = serde_json::from_slice(&request.raw_body)
        .map_err(|e| RejectError::InvalidBody(e.to_string()))?;
    request.declared_container_name = data.container_name;

    let identity = state
        .resolver
        .resolve(request.declared_container_name.as_deref())
        .await?;
    Ok(identity)
}

/// Header values that are not valid UTF-8 are dropped, i.e. treated as
/// absent. For repeated headers the first value is used.
fn request_from_parts(headers: &HeaderMap, body: Bytes) -> AuthenticatedRequest {
    AuthenticatedRequest::new(body.to_vec()).with_headers(
        headers
            .iter()
            .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?))),
    )
}
