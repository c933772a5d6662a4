//! Axum route handlers for résumé, save location and status.

use std::path::PathBuf;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppJson};
use crate::profile::ingest::extract_resume_text;
use crate::profile::store::{char_len, ProfileStatus};
use crate::state::AppState;

/// Multipart field carrying the résumé upload.
const RESUME_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub message: String,
    pub length: usize,
}

#[derive(Debug, Deserialize)]
pub struct SaveLocationRequest {
    pub directory_path: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /resume
pub async fn handle_set_resume(
    State(state): State<AppState>,
    AppJson(request): AppJson<ResumeRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let length = char_len(&request.content);
    state.profile.set_resume(request.content).await;

    Ok(Json(ResumeResponse {
        message: "Resume saved successfully".to_string(),
        length,
    }))
}

/// POST /resume-file
///
/// Accepts `.txt`, `.md` or `.pdf` in the `file` field, or the first field
/// that carries a filename.
pub async fn handle_set_resume_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResumeResponse>, AppError> {
    let mut multipart = multipart?;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::MalformedBody { detail: e.body_text() })?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let is_resume_field = field.name() == Some(RESUME_FIELD);
        if upload.is_some() && !is_resume_field {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::MalformedBody { detail: e.body_text() })?;
        upload = Some((filename, bytes.to_vec()));
        if is_resume_field {
            break;
        }
    }

    let (filename, bytes) = upload.ok_or_else(|| {
        AppError::Validation(format!("No file uploaded. Send the resume in the '{RESUME_FIELD}' field."))
    })?;

    let resume = extract_resume_text(&filename, bytes).await?;
    let length = char_len(&resume);
    state.profile.set_resume(resume).await;

    Ok(Json(ResumeResponse {
        message: format!("Resume file '{filename}' processed successfully"),
        length,
    }))
}

/// POST /save-location
pub async fn handle_set_save_location(
    State(state): State<AppState>,
    AppJson(request): AppJson<SaveLocationRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let path = PathBuf::from(&request.directory_path);

    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|_| AppError::Validation("Directory does not exist".to_string()))?;
    if !metadata.is_dir() {
        return Err(AppError::Validation("Path is not a directory".to_string()));
    }

    state.profile.set_save_directory(path).await;

    Ok(Json(MessageResponse {
        message: format!("Save location set to: {}", request.directory_path),
    }))
}

/// GET /status
pub async fn handle_status(State(state): State<AppState>) -> Json<ProfileStatus> {
    Json(state.profile.status().await)
}
