use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::{DocumentState, EventState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use packhouse_core::models::{sanitize_packer_fields, Packer, RealtimeEvent};
use packhouse_core::AppError;
use serde_json::Value;
use uuid::Uuid;

fn packer_not_found(id: impl std::fmt::Display) -> HttpAppError {
    HttpAppError(AppError::NotFound(format!("Packer {} not found", id)))
}

/// Ids that are not UUIDs can never name a stored packer, so they are absent.
fn parse_packer_id(raw: &str) -> Result<Uuid, HttpAppError> {
    Uuid::parse_str(raw).map_err(|_| packer_not_found(raw))
}

#[utoipa::path(
    get,
    path = "/packers",
    tag = "packers",
    responses(
        (status = 200, description = "All packers", body = Vec<Object>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(documents))]
pub async fn list_packers(
    State(documents): State<DocumentState>,
) -> Result<Json<Vec<Packer>>, HttpAppError> {
    let packers = documents.packers.list().await?;
    tracing::debug!(count = packers.len(), "Listed packers");
    Ok(Json(packers))
}

#[utoipa::path(
    post,
    path = "/packers",
    tag = "packers",
    request_body(content = inline(Object), description = "Free-form packer fields; `name` is required"),
    responses(
        (status = 201, description = "Packer created", body = Object),
        (status = 400, description = "Body is not an object or lacks a name", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(documents, events, body))]
pub async fn create_packer(
    State(documents): State<DocumentState>,
    State(EventState(events)): State<EventState>,
    ValidatedJson(body): ValidatedJson<Value>,
) -> Result<impl IntoResponse, HttpAppError> {
    let fields = sanitize_packer_fields(body, true)?;
    let packer = documents.packers.create(fields).await?;

    tracing::info!(packer_id = %packer.id, "Packer created");
    events.publish(RealtimeEvent::packer_created(packer.clone()));

    Ok((StatusCode::CREATED, Json(packer)))
}

#[utoipa::path(
    put,
    path = "/packers/{id}",
    tag = "packers",
    params(("id" = String, Path, description = "Packer ID (UUID)")),
    request_body(content = inline(Object), description = "Replacement packer fields; `name` is required"),
    responses(
        (status = 200, description = "Packer replaced", body = Object),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Packer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(documents, events, body), fields(packer_id = %raw_id))]
pub async fn replace_packer(
    Path(raw_id): Path<String>,
    State(documents): State<DocumentState>,
    State(EventState(events)): State<EventState>,
    ValidatedJson(body): ValidatedJson<Value>,
) -> Result<Json<Packer>, HttpAppError> {
    let id = parse_packer_id(&raw_id)?;
    let fields = sanitize_packer_fields(body, true)?;
    let packer = documents
        .packers
        .replace(id, fields)
        .await?
        .ok_or_else(|| packer_not_found(id))?;

    events.publish(RealtimeEvent::packer_updated(packer.clone()));
    Ok(Json(packer))
}

#[utoipa::path(
    patch,
    path = "/packers/{id}",
    tag = "packers",
    params(("id" = String, Path, description = "Packer ID (UUID)")),
    request_body(content = inline(Object), description = "Fields to merge into the packer"),
    responses(
        (status = 200, description = "Packer updated", body = Object),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Packer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(documents, events, body), fields(packer_id = %raw_id))]
pub async fn update_packer(
    Path(raw_id): Path<String>,
    State(documents): State<DocumentState>,
    State(EventState(events)): State<EventState>,
    ValidatedJson(body): ValidatedJson<Value>,
) -> Result<Json<Packer>, HttpAppError> {
    let id = parse_packer_id(&raw_id)?;
    let fields = sanitize_packer_fields(body, false)?;
    let packer = documents
        .packers
        .merge(id, fields)
        .await?
        .ok_or_else(|| packer_not_found(id))?;

    events.publish(RealtimeEvent::packer_updated(packer.clone()));
    Ok(Json(packer))
}

#[utoipa::path(
    delete,
    path = "/packers/{id}",
    tag = "packers",
    params(("id" = String, Path, description = "Packer ID (UUID)")),
    responses(
        (status = 204, description = "Packer deleted"),
        (status = 404, description = "Packer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(documents, events), fields(packer_id = %raw_id))]
pub async fn delete_packer(
    Path(raw_id): Path<String>,
    State(documents): State<DocumentState>,
    State(EventState(events)): State<EventState>,
) -> Result<StatusCode, HttpAppError> {
    let id = parse_packer_id(&raw_id)?;
    if !documents.packers.delete(id).await? {
        return Err(packer_not_found(id));
    }

    tracing::info!("Packer deleted");
    events.publish(RealtimeEvent::packer_deleted(id));
    Ok(StatusCode::NO_CONTENT)
}
