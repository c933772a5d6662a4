use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::render::font_metrics::PageConfig;
use crate::render::layout::PageLayout;

const DOCUMENT_TITLE: &str = "Cover Letter";

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// Writes laid-out pages to `path` with the Helvetica built-in font,
/// creating or overwriting the file.
pub fn write_pdf(pages: &[PageLayout], config: &PageConfig, path: &Path) -> Result<()> {
    let width = pt_to_mm(config.page_width_pt);
    let height = pt_to_mm(config.page_height_pt);

    let (doc, first_page, first_layer) = PdfDocument::new(DOCUMENT_TITLE, width, height, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("Failed to load built-in font: {e}"))?;

    let x = pt_to_mm(config.margin_pt);
    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) = doc.add_page(width, height, "Layer 1");
            doc.get_page(page_ref).get_layer(layer_ref)
        };

        for line in &page.lines {
            layer.use_text(
                line.text.as_str(),
                config.font_size_pt,
                x,
                pt_to_mm(line.baseline_pt),
                &font,
            );
        }
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create PDF file at {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| anyhow!("Failed to write PDF to {}: {e}", path.display()))?;

    Ok(())
}
