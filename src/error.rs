use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rollcall_shared::{Error, ErrorKind};
use serde::Serialize;

/// Error returned by every handler, rendered as `{"error": kind, "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl<E: Into<Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl ApiError {
    pub fn json(rejection: JsonRejection) -> Self {
        ApiError(Error::InvalidInput(rejection.body_text()))
    }

    pub fn query(rejection: QueryRejection) -> Self {
        ApiError(Error::InvalidInput(rejection.body_text()))
    }
}

pub fn status_code(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status = status_code(kind);

        let message = match kind {
            ErrorKind::Internal => {
                tracing::error!(error = ?self.0, "request failed");
                "Internal server error".to_owned()
            }
            ErrorKind::Unavailable => {
                tracing::error!(error = ?self.0, "storage unavailable");
                "Service temporarily unavailable".to_owned()
            }
            _ => self.0.to_string(),
        };

        (
            status,
            Json(ErrorBody {
                error: kind.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(Error::AlreadyCheckedIn).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError(Error::WindowClosed).into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError(Error::NotFound("event")).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(Error::Unauthenticated).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError(Error::Unavailable("pool timed out".to_owned()))
                .into_response()
                .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
