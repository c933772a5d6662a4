//! Turns an uploaded résumé file into plain text.

use std::path::Path;

use crate::errors::AppError;

/// Upload formats accepted for a résumé.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    PlainText,
    Markdown,
    Pdf,
}

impl ResumeFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("txt") {
            Some(ResumeFormat::PlainText)
        } else if ext.eq_ignore_ascii_case("md") {
            Some(ResumeFormat::Markdown)
        } else if ext.eq_ignore_ascii_case("pdf") {
            Some(ResumeFormat::Pdf)
        } else {
            None
        }
    }
}

/// Decodes an upload into résumé text.
///
/// Unsupported extensions are a client error; undecodable text or a PDF the
/// extractor cannot read is a server-side extraction error.
pub async fn extract_resume_text(filename: &str, bytes: Vec<u8>) -> Result<String, AppError> {
    let format = ResumeFormat::from_filename(filename).ok_or_else(|| {
        AppError::Validation("Only .txt, .md, and .pdf files are supported".to_string())
    })?;

    match format {
        ResumeFormat::PlainText | ResumeFormat::Markdown => decode_utf8(bytes),
        ResumeFormat::Pdf => tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
            .await
            // pdf-extract panics on some malformed inputs; report that as a failed extraction.
            .map_err(|e| AppError::Extraction(format!("Error extracting text from PDF: {e}")))?,
    }
}

fn decode_utf8(bytes: Vec<u8>) -> Result<String, AppError> {
    String::from_utf8(bytes)
        .map_err(|e| AppError::Extraction(format!("Error reading resume file: {e}")))
}

/// Extracts each page and joins them with newlines, trimming trailing whitespace.
fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| AppError::Extraction(format!("Error extracting text from PDF: {e}")))?;
    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    pages.join("\n").trim_end().to_string()
}
