//! HTML rendering for Write documents.
//!
//! Pages are emitted as inline SVG, one after another, inside a minimal
//! HTML shell. Link anchors already carry a plain `href` (see
//! [`crate::parser::AnnotationExtractor`]), so no coordinate work happens
//! here.

use crate::convert::OutputFormat;
use crate::error::Result;
use crate::model::{Metadata, Page};

use super::markup::to_svg_string;
use super::{PageRenderer, RenderOptions};

/// HTML document renderer.
pub struct HtmlRenderer {
    buffer: String,
    pages: u32,
}

impl HtmlRenderer {
    /// Create a renderer and write the document head.
    pub fn new(options: &RenderOptions) -> Self {
        let mut buffer = String::new();
        write_head(&mut buffer, &options.metadata);
        Self { buffer, pages: 0 }
    }

    /// Number of pages emitted so far.
    pub fn page_count(&self) -> u32 {
        self.pages
    }

    /// Close the document and return the markup.
    pub fn into_string(mut self) -> String {
        self.buffer.push_str("</body></html>");
        self.buffer
    }
}

impl PageRenderer for HtmlRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn emit(&mut self, page: &Page) -> Result<()> {
        self.buffer.push_str(&to_svg_string(&page.content));
        self.pages += 1;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>> {
        Ok(self.into_string().into_bytes())
    }
}

fn write_head(out: &mut String, metadata: &Metadata) {
    out.push_str("<!DOCTYPE html><html><head><meta charset='UTF-8'>");

    if let Some(ref title) = metadata.title {
        out.push_str("<title>");
        out.push_str(&html_escape::encode_text(title));
        out.push_str("</title>");
    }
    if let Some(ref author) = metadata.author {
        push_meta(out, "author", author);
    }
    if let Some(ref description) = metadata.description {
        push_meta(out, "description", description);
    }
    if let Some(ref keywords) = metadata.keywords {
        push_meta(out, "keywords", keywords);
    }

    out.push_str("</head><body>");
}

fn push_meta(out: &mut String, name: &str, content: &str) {
    out.push_str("<meta name='");
    out.push_str(name);
    out.push_str("' content='");
    out.push_str(&html_escape::encode_single_quoted_attribute(content));
    out.push_str("'>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, QName, XLINK_NS};

    fn render(options: &RenderOptions, pages: &[Page]) -> String {
        let mut renderer = HtmlRenderer::new(options);
        for page in pages {
            renderer.emit(page).unwrap();
        }
        renderer.into_string()
    }

    fn page(number: u32, content: Element) -> Page {
        Page::new(number, 100, 200, content)
    }

    #[test]
    fn test_no_metadata_no_tags() {
        let html = render(&RenderOptions::default(), &[]);
        assert_eq!(
            html,
            "<!DOCTYPE html><html><head><meta charset='UTF-8'></head><body></body></html>"
        );
        assert!(!html.contains("<title>"));
        assert!(!html.contains("name='author'"));
        assert!(!html.contains("name='description'"));
        assert!(!html.contains("name='keywords'"));
    }

    #[test]
    fn test_metadata_tags() {
        let options = RenderOptions::new()
            .with_title("Notes & Sketches")
            .with_author("O'Brien")
            .with_description("Week 1")
            .with_keywords("a,b");
        let html = render(&options, &[]);

        assert!(html.contains("<title>Notes &amp; Sketches</title>"));
        assert!(html.contains("<meta name='author' content='O&"));
        assert!(!html.contains("O'Brien"));
        assert!(html.contains("<meta name='description' content='Week 1'>"));
        assert!(html.contains("<meta name='keywords' content='a,b'>"));
    }

    #[test]
    fn test_only_supplied_tags() {
        let html = render(&RenderOptions::new().with_author("Ada"), &[]);
        assert!(html.contains("name='author'"));
        assert!(!html.contains("<title>"));
        assert!(!html.contains("name='description'"));
    }

    #[test]
    fn test_pages_in_order() {
        let first = Element::new(QName::svg("svg")).with_attr("id", "p1");
        let second = Element::new(QName::svg("svg")).with_attr("id", "p2");
        let html = render(
            &RenderOptions::default(),
            &[page(1, first), page(2, second)],
        );

        let p1 = html.find(r#"id="p1""#).unwrap();
        let p2 = html.find(r#"id="p2""#).unwrap();
        assert!(p1 < p2);
        assert!(html.ends_with("</svg></body></html>"));
    }

    #[test]
    fn test_link_without_rect_renders() {
        let content = Element::new(QName::svg("svg")).with_child(
            Element::new(QName::svg("a"))
                .with_attr_ns(XLINK_NS, "href", "https://example.com")
                .with_attr("href", "https://example.com")
                .with_text("example"),
        );
        let mut renderer = HtmlRenderer::new(&RenderOptions::default());
        renderer.emit(&page(1, content)).unwrap();
        assert_eq!(renderer.page_count(), 1);

        let html = renderer.into_string();
        assert!(html.contains(r#"href="https://example.com">example</a>"#));
    }
}
