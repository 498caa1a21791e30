use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use rollcall_event::{CreateEventInput, Event, EventFilter, PublicEvent};
use rollcall_member::Member;
use serde::Serialize;

use crate::{
    auth::Officer,
    error::{ApiError, ApiResult},
    routes::AppState,
};

#[derive(Serialize)]
pub struct DeletedEvent {
    message: &'static str,
    event: Event,
}

/// GET /events/upcoming - public, never exposes access codes
#[tracing::instrument(skip_all)]
pub async fn upcoming(State(state): State<AppState>) -> ApiResult<Json<Vec<PublicEvent>>> {
    Ok(Json(state.event_query.upcoming().await?))
}

/// GET /events
#[tracing::instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    Officer(_): Officer,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(state.event_query.list(EventFilter::All).await?))
}

/// GET /events/{id}
#[tracing::instrument(skip_all, fields(event_id = %id))]
pub async fn get(
    State(state): State<AppState>,
    _officer: Officer,
    Path(id): Path<String>,
) -> ApiResult<Json<Event>> {
    Ok(Json(state.event_query.get(&id).await?))
}

/// POST /events
#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Officer(officer): Officer,
    payload: Result<Json<CreateEventInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload.map_err(ApiError::json)?;

    let event = state.event_command.create(input).await?;
    tracing::info!(event_id = %event.id, officer_id = %officer.id, "event created by officer");

    Ok((StatusCode::CREATED, Json(event)))
}

/// DELETE /events/{id}
#[tracing::instrument(skip_all, fields(event_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    Officer(officer): Officer,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedEvent>> {
    let event = state.event_command.delete(&id).await?;
    tracing::info!(event_id = %event.id, officer_id = %officer.id, "event deleted by officer");

    Ok(Json(DeletedEvent {
        message: "Event deleted",
        event,
    }))
}

/// GET /events/{id}/attendees
#[tracing::instrument(skip_all, fields(event_id = %id))]
pub async fn attendees(
    State(state): State<AppState>,
    _officer: Officer,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Member>>> {
    let event = state.event_query.get(&id).await?;

    Ok(Json(state.attendance_query.attendees_of(&event.id).await?))
}
