use super::error::ApiError;
use super::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// Reject any request the configured authorizer does not accept.
///
/// Runs ahead of routing, so unauthorized callers get 401 even on
/// unknown paths or unsupported methods.
pub async fn require_authorization(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.authorizer.is_authorized(request.headers()) {
        warn!(method = %request.method(), path = %request.uri().path(), "Unauthorized request");
        return Err(ApiError::unauthorized());
    }

    Ok(next.run(request).await)
}
