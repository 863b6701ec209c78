//! Error handler for converting AppError to HTTP responses.
//!
//! Implements `IntoResponse` for `AppError` and provides a fallback
//! middleware that wraps bare error statuses in the standard JSON envelope.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - StatusSource → 500 INTERNAL_SERVER_ERROR
    /// - Timeout → 504 GATEWAY_TIMEOUT
    /// - Configuration → 500 INTERNAL_SERVER_ERROR
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        match &self {
            AppError::Configuration { source, .. } | AppError::Internal { source } => {
                tracing::error!(error = %self, cause = %source, "Request failed");
            }
            _ => tracing::warn!(error = %self, "Request failed"),
        }

        let status = error_to_status_code(&self);
        let code = error_to_code(&self);
        let response = match &self {
            AppError::NotFound { message } => ErrorResponse::new(code, message),
            AppError::StatusSource {
                source_name,
                message,
            } => ErrorResponse::new(code, message).with_details(json!({
                "source": source_name
            })),
            AppError::Timeout { source_name } => ErrorResponse::new(
                code,
                &format!("Timed out reading {}", source_name),
            )
            .with_details(json!({
                "source": source_name
            })),
            AppError::Configuration { key, .. } => {
                ErrorResponse::new(code, &format!("Configuration error: {}", key))
                    .with_details(json!({
                        "key": key
                    }))
            }
            AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
        };

        (status, Json(response)).into_response()
    }
}

/// Wraps error responses that carry no JSON body (unknown routes, wrong
/// methods) in the standard `ErrorResponse` format.
pub async fn global_error_handler(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (_parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let original_message = String::from_utf8_lossy(&body_bytes).trim().to_string();

    let (code, fallback) = match status {
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => (
            "METHOD_NOT_ALLOWED",
            "HTTP method not allowed for this endpoint",
        ),
        StatusCode::BAD_REQUEST => ("BAD_REQUEST", "Bad request"),
        StatusCode::SERVICE_UNAVAILABLE => {
            ("SERVICE_UNAVAILABLE", "Service temporarily unavailable")
        }
        StatusCode::GATEWAY_TIMEOUT => ("GATEWAY_TIMEOUT", "Gateway timeout"),
        s if s.is_server_error() => ("INTERNAL_SERVER_ERROR", "An internal server error occurred"),
        _ => ("UNKNOWN_ERROR", "An unknown error occurred"),
    };
    let message = if original_message.is_empty() {
        fallback
    } else {
        original_message.as_str()
    };

    (status, Json(ErrorResponse::new(code, message))).into_response()
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::StatusSource { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::StatusSource { .. } => "STATUS_SOURCE_ERROR",
        AppError::Timeout { .. } => "STATUS_SOURCE_TIMEOUT",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                AppError::NotFound {
                    message: "gone".to_string(),
                },
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                AppError::StatusSource {
                    source_name: "commit".to_string(),
                    message: "git failed".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "STATUS_SOURCE_ERROR",
            ),
            (
                AppError::Timeout {
                    source_name: "commit".to_string(),
                },
                StatusCode::GATEWAY_TIMEOUT,
                "STATUS_SOURCE_TIMEOUT",
            ),
            (
                AppError::Internal {
                    source: anyhow::anyhow!("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            assert_eq!(error_to_status_code(&error), status);
            assert_eq!(error_to_code(&error), code);
        }
    }

    #[tokio::test]
    async fn test_not_found_response_body() {
        let response = AppError::NotFound {
            message: "File not found: package.json".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "File not found: package.json");
    }

    #[tokio::test]
    async fn test_status_source_includes_details() {
        let response = AppError::StatusSource {
            source_name: "deployment".to_string(),
            message: "expected a JSON object".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["details"]["source"], "deployment");
    }

    #[tokio::test]
    async fn test_internal_error_is_sanitized() {
        let response = AppError::Internal {
            source: anyhow::anyhow!("secret stack trace"),
        }
        .into_response();

        let json = body_json(response).await;
        assert_eq!(json["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_global_error_handler_wraps_plain_404() {
        use axum::{Router, middleware};
        use tower::ServiceExt;

        let app = Router::new().layer(middleware::from_fn(global_error_handler));
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
    }
}
