use application::ApplicationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code,
                message: message.into(),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    pub fn code(&self) -> &'static str {
        self.body.code
    }
}

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        use application::ApplicationError as AppErr;
        use domain::DomainError;

        match error {
            AppErr::Domain(DomainError::InvalidArgument { field, reason }) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "INVALID_ARGUMENT",
                format!("{}: {}", field, reason),
            ),
            AppErr::Domain(DomainError::DoctorNotFound) => {
                ApiError::new(StatusCode::NOT_FOUND, "DOCTOR_NOT_FOUND", "doctor not found")
            }
            AppErr::Domain(DomainError::LinkNotFound) => {
                ApiError::new(StatusCode::NOT_FOUND, "LINK_NOT_FOUND", "link not found")
            }
            AppErr::Domain(DomainError::UserNotFound) => {
                ApiError::new(StatusCode::NOT_FOUND, "USER_NOT_FOUND", "user not found")
            }
            AppErr::Domain(DomainError::EmailAlreadyRegistered) => ApiError::new(
                StatusCode::CONFLICT,
                "EMAIL_EXISTS",
                "email already registered",
            ),
            AppErr::Domain(DomainError::UsernameAlreadyTaken) => ApiError::new(
                StatusCode::CONFLICT,
                "USERNAME_EXISTS",
                "username already taken",
            ),
            AppErr::Repository(repo_err) => match repo_err {
                domain::RepositoryError::NotFound => ApiError::new(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "requested resource not found",
                ),
                domain::RepositoryError::Conflict => {
                    ApiError::new(StatusCode::CONFLICT, "CONFLICT", "resource already exists")
                }
                domain::RepositoryError::Storage { message, .. } => ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    format!("database error: {}", message),
                ),
            },
            AppErr::Password(err) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "PASSWORD_ERROR",
                format!("password error: {}", err),
            ),
            AppErr::Authentication => ApiError::new(
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_FAILED",
                "authentication failed",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{DomainError, RepositoryError};

    #[test]
    fn domain_errors_map_to_expected_statuses() {
        let cases = [
            (
                ApplicationError::Domain(DomainError::DoctorNotFound),
                StatusCode::NOT_FOUND,
                "DOCTOR_NOT_FOUND",
            ),
            (
                ApplicationError::Domain(DomainError::LinkNotFound),
                StatusCode::NOT_FOUND,
                "LINK_NOT_FOUND",
            ),
            (
                ApplicationError::Domain(DomainError::EmailAlreadyRegistered),
                StatusCode::CONFLICT,
                "EMAIL_EXISTS",
            ),
            (
                ApplicationError::Domain(DomainError::UsernameAlreadyTaken),
                StatusCode::CONFLICT,
                "USERNAME_EXISTS",
            ),
            (
                ApplicationError::Authentication,
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_FAILED",
            ),
            (
                ApplicationError::Repository(RepositoryError::NotFound),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                ApplicationError::Repository(RepositoryError::storage("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
            ),
        ];

        for (err, status, code) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status(), status);
            assert_eq!(api.code(), code);
        }
    }

    #[test]
    fn invalid_argument_maps_to_bad_request() {
        let api: ApiError =
            ApplicationError::Domain(DomainError::invalid_argument("action", "unknown")).into();
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.code(), "INVALID_ARGUMENT");
    }
}
