use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use rollcall_attendance::AttendedEvent;
use rollcall_shared::Error;
use serde::Deserialize;

use crate::{
    auth::Authenticated,
    error::{ApiError, ApiResult},
    routes::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceParams {
    member_id: Option<String>,
}

/// GET /attendance?memberId=
///
/// A member's history is visible to that member and to officers.
#[tracing::instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    params: Result<Query<AttendanceParams>, QueryRejection>,
) -> ApiResult<Json<Vec<AttendedEvent>>> {
    let Query(params) = params.map_err(ApiError::query)?;

    let Some(member_id) = params
        .member_id
        .map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty())
    else {
        return Err(Error::InvalidInput("memberId is required".to_owned()).into());
    };

    let caller = state.member_command.find_by_email(&identity.email).await?;
    if !caller.is_some_and(|caller| caller.id == member_id || caller.is_officer()) {
        return Err(Error::Forbidden.into());
    }

    let attendance = state.attendance_query.attendance_for(&member_id).await?;

    Ok(Json(attendance))
}
