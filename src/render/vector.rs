//! Vector page rendering: SVG markup to a one-page PDF.
//!
//! Drawing strokes and paths is delegated entirely to `usvg` + `svg2pdf`.
//! The PDF renderer only imports the resulting page content and overlays
//! its own annotations.

use svg2pdf::usvg;
use svg2pdf::{ConversionOptions, PageOptions};

use crate::error::{Error, Result};

/// Renders one page of SVG markup into a single-page PDF document.
///
/// The page is drawn at origin (0, 0) and carries no annotations.
pub trait VectorRenderer {
    /// Render standalone SVG markup to PDF bytes.
    fn render(&self, svg: &str) -> Result<Vec<u8>>;
}

/// [`VectorRenderer`] backed by `usvg` and `svg2pdf`.
pub struct SvgPageRenderer {
    options: usvg::Options<'static>,
}

impl SvgPageRenderer {
    /// Create a renderer, optionally loading system fonts for `<text>` content.
    pub fn new(load_system_fonts: bool) -> Self {
        let mut options = usvg::Options::default();
        if load_system_fonts {
            options.fontdb_mut().load_system_fonts();
            log::debug!("Loaded {} font faces", options.fontdb.len());
        }
        Self { options }
    }
}

impl Default for SvgPageRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl VectorRenderer for SvgPageRenderer {
    fn render(&self, svg: &str) -> Result<Vec<u8>> {
        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|e| Error::Render(format!("failed to parse page SVG: {}", e)))?;

        svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
            .map_err(|e| Error::Render(format!("failed to convert page SVG: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple_page() {
        let renderer = SvgPageRenderer::new(false);
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100"><rect x="10" y="10" width="50" height="20" fill="black"/></svg>"#;

        let pdf = renderer.render(svg).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));

        let doc = lopdf::Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_invalid_svg() {
        let renderer = SvgPageRenderer::new(false);
        let result = renderer.render("<svg xmlns=\"http://www.w3.org/2000/svg\"");
        assert!(matches!(result, Err(Error::Render(_))));
    }
}
