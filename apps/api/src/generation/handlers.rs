//! Axum route handlers for cover letter generation.

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{generate_cover_letter, GeneratedLetter};
use crate::generation::sanitize::{escape_bare_controls_in_strings, sanitize_text};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobDescriptionRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub filename: String,
    pub filepath: String,
    pub company: String,
    pub job_title: String,
    pub job_id: Option<String>,
}

impl From<GeneratedLetter> for GenerateResponse {
    fn from(letter: GeneratedLetter) -> Self {
        Self {
            message: "Cover letter generated and saved successfully".to_string(),
            filename: letter.filename,
            filepath: letter.filepath.display().to_string(),
            company: letter.metadata.company_name,
            job_title: letter.metadata.job_title,
            job_id: letter.metadata.job_id,
        }
    }
}

/// Reads a request body as UTF-8. Anything else is a malformed body, not a
/// plain-text rejection from the extractor.
fn body_text(body: Bytes) -> Result<String, AppError> {
    String::from_utf8(body.to_vec()).map_err(|e| AppError::MalformedBody {
        detail: e.to_string(),
    })
}

/// Sanitizes a raw JSON body and decodes it.
///
/// Control characters are stripped first, then newlines and tabs left inside
/// string literals are escaped so pasted multi-line text decodes.
fn decode_job_description(raw: &str) -> Result<JobDescriptionRequest, AppError> {
    let cleaned = escape_bare_controls_in_strings(&sanitize_text(raw));
    serde_json::from_str(&cleaned).map_err(|e| AppError::MalformedBody {
        detail: e.to_string(),
    })
}

/// POST /generate-cover-letter
///
/// Body: `{"content": "<job description>"}`.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, AppError> {
    let request = decode_job_description(&body_text(body)?)?;
    let letter = generate_cover_letter(
        &state.profile,
        state.llm.as_ref(),
        &state.page_config,
        &request.content,
    )
    .await?;
    Ok(Json(letter.into()))
}

/// POST /generate-cover-letter-text
///
/// Body: the job description as `text/plain`.
pub async fn handle_generate_text(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, AppError> {
    let job_description = body_text(body)?;
    let letter = generate_cover_letter(
        &state.profile,
        state.llm.as_ref(),
        &state.page_config,
        &job_description,
    )
    .await?;
    Ok(Json(letter.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_accepts_pasted_multiline_text() {
        let raw = "{\"content\": \"Senior Engineer\n\nAcme Corp\tRemote\u{0}\"}";
        let request = decode_job_description(raw).unwrap();
        assert_eq!(request.content, "Senior Engineer\n\nAcme Corp\tRemote");
    }

    #[test]
    fn test_decode_rejects_missing_content() {
        let err = decode_job_description("{\"text\": \"x\"}").unwrap_err();
        assert!(matches!(err, AppError::MalformedBody { .. }));
    }

    #[test]
    fn test_body_text_rejects_invalid_utf8() {
        let err = body_text(Bytes::from_static(b"{\xff\xfe}")).unwrap_err();
        assert!(matches!(err, AppError::MalformedBody { detail } if detail.contains("utf-8")));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode_job_description("content=hello").unwrap_err();
        assert!(matches!(err, AppError::MalformedBody { .. }));
    }
}
