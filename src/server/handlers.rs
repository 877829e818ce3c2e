//! HTTP handlers for the ticket routes.

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::models::{Ticket, TicketDraft, TicketId};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode},
    Json,
};
use tracing::info;

fn parse_ticket_id(raw: &str) -> ApiResult<TicketId> {
    raw.parse::<TicketId>()
        .map_err(|e| ApiError::bad_request(format!("invalid ticket id {:?}: {}", raw, e)))
}

fn parse_draft(body: Result<Json<TicketDraft>, JsonRejection>) -> ApiResult<TicketDraft> {
    body.map(|Json(draft)| draft).map_err(ApiError::from)
}

/// GET /tickets
pub async fn list_tickets(State(state): State<AppState>) -> ApiResult<Json<Vec<Ticket>>> {
    info!("GET /tickets");
    Ok(Json(state.tickets.get_all_tickets().await?))
}

/// POST /tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    body: Result<Json<TicketDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Ticket>)> {
    let draft = parse_draft(body)?;
    info!("POST /tickets");
    let ticket = state.tickets.create_ticket(draft).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /ticket/{id}
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Ticket>> {
    let id = parse_ticket_id(&raw_id)?;
    info!(id, "GET /ticket");
    Ok(Json(state.tickets.get_ticket(id).await?))
}

/// PUT /ticket/{id}
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<TicketDraft>, JsonRejection>,
) -> ApiResult<Json<Ticket>> {
    let id = parse_ticket_id(&raw_id)?;
    let draft = parse_draft(body)?;
    info!(id, "PUT /ticket");
    Ok(Json(state.tickets.update_ticket(id, draft).await?))
}

/// DELETE /ticket/{id}
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_ticket_id(&raw_id)?;
    info!(id, "DELETE /ticket");
    state.tickets.delete_ticket(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Any method on /ticket without an id.
pub async fn missing_ticket_id() -> ApiError {
    ApiError::bad_request("expect /ticket/<id>")
}

/// A known path with a method it does not serve.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(&method)
}
