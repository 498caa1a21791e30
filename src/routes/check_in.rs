use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    CheckInInput,
    auth::Authenticated,
    error::{ApiError, ApiResult},
    routes::AppState,
};

/// POST /events/check-in
#[tracing::instrument(skip_all)]
pub async fn action(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    payload: Result<Json<CheckInInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload.map_err(ApiError::json)?;

    let receipt = state.check_in.check_in(&identity, input).await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}
