//! Paragraph splitting, greedy word wrap and pagination.
//!
//! Pure and synchronous. The PDF writer only places the lines this module produces.

use crate::render::font_metrics::{FontMetricTable, PageConfig};

/// A single line placed on a page. `baseline_pt` is measured from the page bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub baseline_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

/// Maps typographic punctuation the model likes to emit onto ASCII so it
/// survives the single-byte built-in font encoding.
pub fn normalize_typography(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2013}' | '\u{2012}' | '\u{2010}' | '\u{2011}' => out.push('-'),
            '\u{2014}' | '\u{2015}' => out.push_str("--"),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => out.push(' '),
            '\u{2022}' => out.push('*'),
            _ => out.push(c),
        }
    }
    out
}

/// Splits on blank lines and drops paragraphs that are empty after trimming.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Greedy word wrap at `config.text_width_em()`. Whitespace inside a paragraph
/// (single newlines included) is collapsed, and a word wider than the line
/// gets a line to itself.
pub fn wrap_paragraph(paragraph: &str, metrics: &FontMetricTable, config: &PageConfig) -> Vec<String> {
    let max_width = config.text_width_em();
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in paragraph.split_whitespace() {
        let word_w = metrics.measure_str(word);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + metrics.space_width + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += metrics.space_width + word_w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lays the whole letter out into pages.
///
/// A line whose baseline would cross the bottom margin starts a new page.
/// The paragraph gap is always applied; if it runs past the margin, the next
/// line's check moves it to a fresh page. Always returns at least one page so
/// an empty letter still produces a valid document.
pub fn layout_letter(text: &str, metrics: &FontMetricTable, config: &PageConfig) -> Vec<PageLayout> {
    let normalized = normalize_typography(text);
    let top = config.page_height_pt - config.margin_pt;
    let bottom = config.margin_pt;

    let mut pages = vec![PageLayout::default()];
    // Baseline of the first line sits one font size below the top margin.
    let mut cursor = top;

    for paragraph in split_paragraphs(&normalized) {
        for line in wrap_paragraph(&paragraph, metrics, config) {
            let baseline = cursor - config.font_size_pt;
            if baseline < bottom {
                pages.push(PageLayout::default());
                cursor = top;
            }
            let baseline = cursor - config.font_size_pt;
            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine {
                    text: line,
                    baseline_pt: baseline,
                });
            }
            cursor -= config.leading_pt;
        }
        cursor -= config.paragraph_gap_pt;
    }

    pages
}
