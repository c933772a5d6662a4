//! Splits a model reply into the letter body and its trailing metadata block.
//!
//! The model is asked to end its reply with
//!
//! ```text
//! JSON_DATA:
//! {"company_name": "...", "job_title": "...", "job_id": "... or null"}
//! ```
//!
//! Missing or malformed metadata is never an error: each field falls back to
//! its default and the letter body is still used.

use serde_json::Value;
use tracing::warn;

use crate::llm_client::strip_json_fences;

/// Delimiter between the letter text and the metadata block.
pub const SENTINEL: &str = "JSON_DATA:";

pub const DEFAULT_COMPANY: &str = "Unknown_Company";
pub const DEFAULT_JOB_TITLE: &str = "Position";

/// Company, title and optional job id describing the posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMetadata {
    pub company_name: String,
    pub job_title: String,
    pub job_id: Option<String>,
}

impl Default for JobMetadata {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY.to_string(),
            job_title: DEFAULT_JOB_TITLE.to_string(),
            job_id: None,
        }
    }
}

/// A model reply after splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub letter_body: String,
    pub metadata: JobMetadata,
}

/// Splits `reply` at the first sentinel.
///
/// With no sentinel the whole reply is the letter body and metadata is defaulted.
pub fn parse_reply(reply: &str) -> ParsedReply {
    match reply.split_once(SENTINEL) {
        Some((body, block)) => ParsedReply {
            letter_body: body.trim().to_string(),
            metadata: parse_metadata_block(block),
        },
        None => ParsedReply {
            letter_body: reply.to_string(),
            metadata: JobMetadata::default(),
        },
    }
}

/// Parses the text after the sentinel. Anything that is not a JSON object
/// yields the defaults for all three fields.
pub fn parse_metadata_block(block: &str) -> JobMetadata {
    let block = strip_json_fences(block);
    // Only the first JSON value counts; models sometimes add a closing remark after it.
    let mut values = serde_json::Deserializer::from_str(block).into_iter::<Value>();
    let value = match values.next() {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            warn!("Metadata block is not valid JSON, using defaults: {e}");
            return JobMetadata::default();
        }
        None => {
            warn!("Metadata block is empty, using defaults");
            return JobMetadata::default();
        }
    };

    let Some(fields) = value.as_object() else {
        warn!("Metadata block is not a JSON object, using defaults");
        return JobMetadata::default();
    };

    JobMetadata {
        company_name: text_field(fields.get("company_name"))
            .unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
        job_title: text_field(fields.get("job_title"))
            .unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string()),
        job_id: fields.get("job_id").and_then(job_id_text),
    }
}

fn text_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// Any scalar becomes text; null, blank strings and the literal "null" mean no id.
fn job_id_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if text.is_empty() || text.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(text)
    }
}
