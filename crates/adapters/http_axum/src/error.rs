//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homeguard_domain::error::{HomeGuardError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HomeGuardError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HomeGuardError);

impl From<HomeGuardError> for ApiError {
    fn from(err: HomeGuardError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HomeGuardError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HomeGuardError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            HomeGuardError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storage unavailable, retry later".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeguard_domain::error::NotFoundError;

    #[test]
    fn should_map_validation_error_to_bad_request() {
        let response = ApiError::from(ValidationError::UnknownMode("turbo".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_not_found_error_to_not_found() {
        let err: HomeGuardError = NotFoundError {
            entity: "Notification",
            id: "42".to_string(),
        }
        .into();
        assert_eq!(ApiError::from(err).into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn should_map_storage_error_to_service_unavailable() {
        let err = HomeGuardError::Storage(Box::new(std::io::Error::other("locked")));
        assert_eq!(
            ApiError::from(err).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
