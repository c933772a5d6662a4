use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        FromRequest,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

const MALFORMED_BODY_HINT: &str =
    "Request body could not be read. Send a JSON object matching the endpoint's schema, \
     e.g. {\"content\": \"...\"}.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed request body: {detail}")]
    MalformedBody { detail: String },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Error generating cover letter: {0}")]
    Generation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody {
            detail: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::MalformedBody {
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut detail = None;
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MalformedBody { detail: raw } => {
                detail = Some(raw.clone());
                (
                    StatusCode::BAD_REQUEST,
                    "MALFORMED_REQUEST",
                    MALFORMED_BODY_HINT.to_string(),
                )
            }
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    msg.clone(),
                )
            }
            AppError::Generation(_) => {
                tracing::error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    self.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = match detail {
            Some(detail) => json!({
                "error": { "code": code, "message": message, "detail": detail }
            }),
            None => json!({
                "error": { "code": code, "message": message }
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// `Json` extractor whose rejection is reported through `AppError`, so every
/// malformed body gets the same 400 shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_is_400_with_message() {
        let (status, body) = body_json(AppError::Validation("Resume not set".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Resume not set");
    }

    #[tokio::test]
    async fn test_malformed_body_carries_hint_and_detail() {
        let (status, body) = body_json(AppError::MalformedBody {
            detail: "missing field `content`".into(),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MALFORMED_REQUEST");
        assert_eq!(body["error"]["detail"], "missing field `content`");
        assert!(body["error"]["message"].as_str().unwrap().contains("JSON"));
    }

    #[tokio::test]
    async fn test_generation_error_exposes_cause() {
        let (status, body) = body_json(AppError::Generation("API error (status 401)".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"]["message"],
            "Error generating cover letter: API error (status 401)"
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let (status, body) = body_json(AppError::Internal(anyhow::anyhow!("secret path"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"]["message"].as_str().unwrap().contains("secret"));
    }
}
