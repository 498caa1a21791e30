use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use rollcall_attendance::{MemberStatus, StatusFilter};
use serde::Deserialize;

use crate::{
    auth::Officer,
    error::{ApiError, ApiResult},
    routes::AppState,
};

#[derive(Deserialize)]
pub struct StatusParams {
    #[serde(default)]
    filter: StatusFilter,
}

/// GET /members/status?filter=all|active|inactive
#[tracing::instrument(skip_all)]
pub async fn status(
    State(state): State<AppState>,
    Officer(_): Officer,
    params: Result<Query<StatusParams>, QueryRejection>,
) -> ApiResult<Json<Vec<MemberStatus>>> {
    let Query(params) = params.map_err(ApiError::query)?;

    let roster = state.attendance_query.roster(params.filter).await?;

    Ok(Json(roster))
}
