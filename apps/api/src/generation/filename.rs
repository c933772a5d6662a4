//! Derives a filesystem-safe PDF filename from posting metadata.
//!
//! `<company_slug>_<TITLE_ACRONYM>[_<job_id>].pdf`, e.g.
//! `("Acme, Inc.", "Senior Software Engineer", "123-A")` → `Acme_Inc_SSE_123-A.pdf`.

/// Used when every segment degenerates to nothing.
pub const FALLBACK_FILENAME: &str = "cover_letter.pdf";

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Keeps word characters, whitespace and hyphens.
fn strip_punctuation(s: &str) -> String {
    s.chars()
        .filter(|&c| is_word_char(c) || c.is_whitespace() || c == '-')
        .collect()
}

/// Trims, then collapses every run of hyphens and whitespace into one underscore.
pub fn company_slug(company_name: &str) -> String {
    let cleaned = strip_punctuation(company_name);
    let mut slug = String::with_capacity(cleaned.len());
    let mut in_separator = false;

    for c in cleaned.trim().chars() {
        if c == '-' || c.is_whitespace() {
            if !in_separator {
                slug.push('_');
                in_separator = true;
            }
        } else {
            slug.push(c);
            in_separator = false;
        }
    }
    slug
}

/// Uppercase first letter of each word: "Senior Software Engineer" → "SSE".
pub fn title_acronym(job_title: &str) -> String {
    strip_punctuation(job_title)
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Keeps word characters and hyphens only.
pub fn job_id_slug(job_id: &str) -> String {
    job_id
        .chars()
        .filter(|&c| is_word_char(c) || c == '-')
        .collect()
}

/// Joins the non-empty slugs with underscores and appends `.pdf`.
pub fn derive_filename(company_name: &str, job_title: &str, job_id: Option<&str>) -> String {
    let mut parts = vec![company_slug(company_name), title_acronym(job_title)];
    if let Some(id) = job_id {
        parts.push(job_id_slug(id));
    }
    parts.retain(|p| !p.is_empty());

    if parts.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }
    format!("{}.pdf", parts.join("_"))
}
