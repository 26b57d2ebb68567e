//! Rendering module for converting Write documents to output formats.
//!
//! Every output format implements [`PageRenderer`]: pages are emitted one at
//! a time in source order, and the finished artifact is produced once all
//! pages succeed.

mod html;
mod markup;
mod options;
mod pdf;
mod vector;

pub use html::HtmlRenderer;
pub use markup::to_svg_string;
pub use options::RenderOptions;
pub use pdf::PdfRenderer;
pub use vector::{SvgPageRenderer, VectorRenderer};

use crate::convert::OutputFormat;
use crate::error::{Error, Result};
use crate::model::{Document, LinkTarget, Page};

/// Per-page rendering contract shared by all output formats.
pub trait PageRenderer {
    /// The format this renderer produces.
    fn format(&self) -> OutputFormat;

    /// Render one page. Each page is emitted exactly once, in order.
    fn emit(&mut self, page: &Page) -> Result<()>;

    /// Close the output container and return the artifact bytes.
    fn finish(self: Box<Self>) -> Result<Vec<u8>>;
}

/// Create the renderer for an output format.
pub fn renderer_for(format: OutputFormat, options: &RenderOptions) -> Box<dyn PageRenderer> {
    match format {
        OutputFormat::Html => Box::new(HtmlRenderer::new(options)),
        OutputFormat::Pdf => Box::new(PdfRenderer::new(options)),
    }
}

/// Drive a renderer over every page of a document.
///
/// The first page error aborts the run; no partial artifact is returned.
pub fn render_document(doc: &Document, mut renderer: Box<dyn PageRenderer>) -> Result<Vec<u8>> {
    if doc.is_empty() {
        log::warn!("Document has no pages; writing an empty {}", renderer.format());
    }

    warn_dangling_links(doc);

    for page in &doc.pages {
        renderer.emit(page)?;
    }
    renderer.finish()
}

/// Warn about internal links whose key matches no bookmark. The link is
/// still rendered.
fn warn_dangling_links(doc: &Document) -> usize {
    let mut dangling = 0;
    for page in &doc.pages {
        for link in &page.links {
            if let LinkTarget::Internal(key) = link.target() {
                if doc.find_bookmark(key).is_none() {
                    log::warn!(
                        "Link on page {} targets bookmark '{}', which does not exist",
                        page.number,
                        key
                    );
                    dangling += 1;
                }
            }
        }
    }
    dangling
}

/// Render a document to an HTML string.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let bytes = render_document(doc, Box::new(HtmlRenderer::new(options)))?;
    String::from_utf8(bytes).map_err(|e| Error::Render(format!("HTML output is not UTF-8: {}", e)))
}

/// Render a document to PDF bytes.
pub fn to_pdf(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    render_document(doc, Box::new(PdfRenderer::new(options)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bookmark, Element, Link, QName};

    struct Recording {
        pages: Vec<u32>,
    }

    impl PageRenderer for Recording {
        fn format(&self) -> OutputFormat {
            OutputFormat::Html
        }

        fn emit(&mut self, page: &Page) -> Result<()> {
            if page.number == 3 {
                return Err(Error::Render("boom".into()));
            }
            self.pages.push(page.number);
            Ok(())
        }

        fn finish(self: Box<Self>) -> Result<Vec<u8>> {
            Ok(self
                .pages
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(",")
                .into_bytes())
        }
    }

    fn document(pages: u32) -> Document {
        let mut doc = Document::new();
        for n in 1..=pages {
            doc.add_page(Page::new(n, 10, 10, Element::new(QName::svg("svg"))));
        }
        doc
    }

    #[test]
    fn test_render_document_in_order() {
        let out = render_document(&document(2), Box::new(Recording { pages: vec![] })).unwrap();
        assert_eq!(out, b"1,2");
    }

    #[test]
    fn test_render_document_aborts_on_page_error() {
        let result = render_document(&document(4), Box::new(Recording { pages: vec![] }));
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_dangling_links_counted() {
        let mut doc = document(2);
        doc.pages[0].links.push(Link::new("#summary"));
        doc.pages[0].links.push(Link::new("#missing"));
        doc.pages[0].links.push(Link::new("https://example.com/#missing"));
        doc.pages[1].bookmarks.push(Bookmark::new("summary", 0.0, 0.0));

        assert_eq!(warn_dangling_links(&doc), 1);
        let out = render_document(&doc, Box::new(Recording { pages: vec![] })).unwrap();
        assert_eq!(out, b"1,2");
    }

    #[test]
    fn test_renderer_for_format() {
        let options = RenderOptions::default();
        assert_eq!(renderer_for(OutputFormat::Html, &options).format(), OutputFormat::Html);
        let options = options.with_system_fonts(false);
        assert_eq!(renderer_for(OutputFormat::Pdf, &options).format(), OutputFormat::Pdf);
    }

    #[test]
    fn test_to_html_matches_render_document() {
        let doc = document(2);
        let options = RenderOptions::default();
        let direct = to_html(&doc, &options).unwrap();
        let driven = render_document(&doc, renderer_for(OutputFormat::Html, &options)).unwrap();
        assert_eq!(direct.into_bytes(), driven);
    }
}
