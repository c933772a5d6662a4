//! Cover letter generation: the end-to-end flow behind both generate endpoints.
//!
//! Flow: preconditions → sanitize → build prompt → model call → parse reply →
//!       derive filename → render PDF into the save directory.
//!
//! The model call is the only await on a remote service. Nothing is retried,
//! and a PDF left behind by a failed render is not cleaned up.

use std::path::PathBuf;

use tracing::info;

use crate::errors::AppError;
use crate::generation::filename::derive_filename;
use crate::generation::prompts::{build_cover_letter_prompt, COVER_LETTER_SYSTEM};
use crate::generation::reply_parser::{parse_reply, JobMetadata};
use crate::generation::sanitize::sanitize_text;
use crate::llm_client::TextGenerator;
use crate::profile::store::ProfileStore;
use crate::render::{render_letter_pdf, PageConfig};

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedLetter {
    pub filename: String,
    pub filepath: PathBuf,
    pub metadata: JobMetadata,
}

/// Inputs that passed every precondition.
struct ReadyInputs {
    resume: String,
    save_directory: PathBuf,
    job_description: String,
}

/// Checks, in order: résumé set, save directory set and still a directory,
/// job description non-empty. The first failure wins.
async fn check_preconditions(
    profile: &ProfileStore,
    job_description: &str,
) -> Result<ReadyInputs, AppError> {
    let snapshot = profile.snapshot().await;

    let resume = snapshot
        .resume
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation(
                "Resume not set. Use /resume or /resume-file endpoint first.".to_string(),
            )
        })?;

    let save_directory = snapshot.save_directory.ok_or_else(|| {
        AppError::Validation(
            "Save location not set. Use /save-location endpoint first.".to_string(),
        )
    })?;
    let is_dir = tokio::fs::metadata(&save_directory)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(AppError::Validation(format!(
            "Save location {} no longer exists. Use /save-location endpoint to set a new one.",
            save_directory.display()
        )));
    }

    let job_description = sanitize_text(job_description);
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty".to_string(),
        ));
    }

    Ok(ReadyInputs {
        resume,
        save_directory,
        job_description,
    })
}

/// Runs the full generation flow and writes the letter to
/// `<save_directory>/<derived filename>`.
pub async fn generate_cover_letter(
    profile: &ProfileStore,
    llm: &dyn TextGenerator,
    page_config: &PageConfig,
    job_description: &str,
) -> Result<GeneratedLetter, AppError> {
    let inputs = check_preconditions(profile, job_description).await?;

    let prompt = build_cover_letter_prompt(&inputs.resume, &inputs.job_description);
    info!(
        resume_length = inputs.resume.len(),
        job_description_length = inputs.job_description.len(),
        "Requesting cover letter"
    );

    let reply = llm
        .complete(&prompt, COVER_LETTER_SYSTEM)
        .await
        .map_err(|e| AppError::Generation(e.to_string()))?;

    let parsed = parse_reply(&reply);
    let filename = derive_filename(
        &parsed.metadata.company_name,
        &parsed.metadata.job_title,
        parsed.metadata.job_id.as_deref(),
    );
    let filepath = inputs.save_directory.join(&filename);
    info!(
        company = %parsed.metadata.company_name,
        job_title = %parsed.metadata.job_title,
        path = %filepath.display(),
        "Rendering cover letter"
    );

    // CPU-bound layout and blocking file IO stay off the async executor.
    let letter = parsed.letter_body;
    let target = filepath.clone();
    let config = page_config.clone();
    tokio::task::spawn_blocking(move || render_letter_pdf(&letter, &target, &config))
        .await
        .map_err(|e| AppError::Generation(format!("PDF rendering task failed: {e}")))?
        .map_err(|e| AppError::Generation(format!("{e:#}")))?;

    Ok(GeneratedLetter {
        filename,
        filepath,
        metadata: parsed.metadata,
    })
}
