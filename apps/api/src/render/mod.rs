// Letter rendering: paragraph layout on US letter, written out as PDF.
// Layout and file IO are blocking; async callers run `render_letter_pdf`
// inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod layout;
pub mod pdf;

use std::path::Path;

use anyhow::Result;
use tracing::debug;

pub use font_metrics::{letter_page_config, PageConfig, HELVETICA};

/// Lays out `letter` and writes it to `path`, overwriting any existing file.
///
/// Not atomic: a failure part-way through may leave a partial file behind.
pub fn render_letter_pdf(letter: &str, path: &Path, config: &PageConfig) -> Result<()> {
    let pages = layout::layout_letter(letter, &HELVETICA, config);
    debug!(
        pages = pages.len(),
        lines = pages.iter().map(|p| p.lines.len()).sum::<usize>(),
        "Letter laid out"
    );
    pdf::write_pdf(&pages, config, path)
}
