/*
 * Responsibility
 * - the application-wide AppError
 * - IntoResponse (HTTP status + JSON error body)
 * - mapping of auth failures onto 401 / 500
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        let mut res = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            // Conduit clients send `Authorization: Token <jwt>`
            res.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Token"));
        }
        res
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        // The concrete reason stays in the logs, never in the response body.
        if e.is_fatal() {
            AppError::Internal
        } else {
            AppError::Unauthorized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_carries_token_challenge() {
        let res = AppError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Token");
    }

    #[test]
    fn internal_has_no_challenge() {
        let res = AppError::Internal.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[test]
    fn only_lookup_failures_become_internal() {
        assert!(matches!(
            AppError::from(AuthError::NoCredential),
            AppError::Unauthorized
        ));
        assert!(matches!(
            AppError::from(AuthError::UnknownSubject(7)),
            AppError::Unauthorized
        ));
        assert!(matches!(
            AppError::from(AuthError::LookupFailure(
                crate::services::auth::LookupError::TimedOut(std::time::Duration::from_millis(5))
            )),
            AppError::Internal
        ));
    }
}
