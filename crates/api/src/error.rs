//! HTTP rendering of application errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ledgerly_core::EngineError;
use ledgerly_shared::AppError;
use serde_json::json;
use tracing::error;

/// Error returned by route handlers and the auth layer.
///
/// Wraps an [`AppError`] with the code rendered in the `error` field. The
/// code defaults to the `AppError` category but engine errors keep their
/// own finer-grained code.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    code: &'static str,
}

impl ApiError {
    /// Wraps `error` with its default code.
    #[must_use]
    pub const fn new(error: AppError) -> Self {
        let code = error.error_code();
        Self { error, code }
    }

    /// Overrides the rendered code.
    #[must_use]
    pub const fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }

    /// Shorthand for a 401 with a specific code.
    #[must_use]
    pub fn unauthorized(code: &'static str, message: &str) -> Self {
        Self::new(AppError::Unauthorized(message.to_string())).with_code(code)
    }

    /// The wrapped application error.
    #[must_use]
    pub const fn app_error(&self) -> &AppError {
        &self.error
    }

    /// The code rendered in the response body.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self::new(error)
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let code = err.error_code();
        Self::new(AppError::from(err)).with_code(code)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Upstream and internal failures carry backend details; keep them in the logs only.
        let message = if self.error.is_client_facing() {
            self.error.message().to_string()
        } else {
            error!(error = %self.error, code = self.code, "Request failed");
            "An error occurred".to_string()
        };

        (
            status,
            Json(json!({
                "error": self.code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use ledgerly_core::ledger::StoreError;
    use ledgerly_shared::types::AccountId;
    use rstest::rstest;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_engine_error_keeps_engine_code() {
        let err = ApiError::from(EngineError::AccountNotFound(AccountId::new()));
        assert_eq!(err.code(), "account_not_found");
        assert!(matches!(err.app_error(), AppError::NotFound(_)));
    }

    #[test]
    fn test_app_error_uses_category_code() {
        let err = ApiError::from(AppError::Validation("bad".into()));
        assert_eq!(err.code(), "validation_error");
    }

    #[rstest]
    #[case(ApiError::from(EngineError::AccountNotFound(AccountId::new())), StatusCode::NOT_FOUND)]
    #[case(ApiError::unauthorized("token_expired", "Token has expired"), StatusCode::UNAUTHORIZED)]
    #[case(
        ApiError::from(EngineError::Upstream(StoreError::Unavailable("down".into()))),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn test_status(#[case] err: ApiError, #[case] expected: StatusCode) {
        assert_eq!(err.into_response().status(), expected);
    }

    #[tokio::test]
    async fn test_client_message_has_no_category_prefix() {
        let id = AccountId::new();
        let body = body_json(ApiError::from(EngineError::AccountNotFound(id)).into_response()).await;

        assert_eq!(body["error"], "account_not_found");
        assert_eq!(body["message"], format!("Account not found: {id}"));
    }

    #[tokio::test]
    async fn test_upstream_details_are_hidden() {
        let err = ApiError::from(EngineError::Upstream(StoreError::Unavailable(
            "password authentication failed for user ledgerly".into(),
        )));
        let body = body_json(err.into_response()).await;

        assert_eq!(body["error"], "upstream_failure");
        assert_eq!(body["message"], "An error occurred");
    }

    #[tokio::test]
    async fn test_unauthorized_renders_specific_code() {
        let body = body_json(ApiError::unauthorized("missing_token", "Token required").into_response()).await;

        assert_eq!(body["error"], "missing_token");
        assert_eq!(body["message"], "Token required");
    }
}
