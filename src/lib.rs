//! # unwrite
//!
//! Convert Stylus Labs Write documents to HTML or PDF.
//!
//! A Write document is an SVG file (optionally gzip-compressed as `.svgz`)
//! whose root carries `id="write-document"` and whose pages are nested
//! `<svg class="write-page">` elements. Internal links between pages and
//! named bookmarks survive the conversion; for PDF output their positions
//! are remapped into PDF page space.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unwrite::{load_file, render};
//!
//! fn main() -> unwrite::Result<()> {
//!     // Load a Write document
//!     let doc = load_file("notes.svgz")?;
//!
//!     // Convert to HTML
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     std::fs::write("notes.html", html)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two output formats**: a single HTML page with inline SVG, or a paginated PDF
//! - **Navigation preserved**: bookmarks become PDF named destinations, links
//!   become PDF link annotations
//! - **Metadata**: title, author, description and keywords
//! - **Atomic output**: a failed conversion never leaves a partial file

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod remap;
pub mod render;

// Re-export commonly used types
pub use convert::{convert_bytes, convert_file, ConvertOptions, ConvertResult, OutputFormat};
pub use detect::{detect_encoding_from_bytes, detect_encoding_from_path, InputEncoding};
pub use error::{Error, Result};
pub use model::{Bookmark, Document, Element, Link, LinkTarget, Metadata, Page, Rect};
pub use parser::{ParseOptions, WriteParser};
pub use render::{HtmlRenderer, PageRenderer, PdfRenderer, RenderOptions};

use std::io::Read;
use std::path::Path;

/// Load a Write document file (`.svg` or `.svgz`).
///
/// # Arguments
///
/// * `path` - Path to the document
///
/// # Returns
///
/// A `Result` containing the loaded `Document` with all bookmarks and links
/// extracted, or an error.
///
/// # Example
///
/// ```no_run
/// use unwrite::load_file;
///
/// let doc = load_file("notes.svgz").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    WriteParser::open(path)?.parse()
}

/// Load a Write document file with custom options.
///
/// # Example
///
/// ```no_run
/// use unwrite::{load_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_page_class("page");
/// let doc = load_file_with_options("notes.svg", options).unwrap();
/// ```
pub fn load_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    WriteParser::open_with_options(path, options)?.parse()
}

/// Load a Write document from bytes. Gzip input is detected by content.
///
/// # Example
///
/// ```no_run
/// use unwrite::load_bytes;
///
/// let data = std::fs::read("notes.svgz").unwrap();
/// let doc = load_bytes(&data).unwrap();
/// ```
pub fn load_bytes(data: &[u8]) -> Result<Document> {
    WriteParser::from_bytes(data)?.parse()
}

/// Load a Write document from bytes with custom options.
pub fn load_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    WriteParser::from_bytes_with_options(data, options)?.parse()
}

/// Load a Write document from a reader.
pub fn load_reader<R: Read>(reader: R) -> Result<Document> {
    WriteParser::from_reader(reader)?.parse()
}

/// Convert a Write document file to an HTML string.
///
/// # Example
///
/// ```no_run
/// use unwrite::to_html;
///
/// let html = to_html("notes.svgz").unwrap();
/// std::fs::write("notes.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = load_file(path)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Convert a Write document file to PDF bytes.
///
/// # Example
///
/// ```no_run
/// use unwrite::to_pdf;
///
/// let pdf = to_pdf("notes.svgz").unwrap();
/// std::fs::write("notes.pdf", pdf).unwrap();
/// ```
pub fn to_pdf<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let doc = load_file(path)?;
    render::to_pdf(&doc, &RenderOptions::default())
}

/// Builder for converting Write documents.
///
/// # Example
///
/// ```no_run
/// use unwrite::{OutputFormat, Unwrite};
///
/// let result = Unwrite::new()
///     .with_format(OutputFormat::Pdf)
///     .with_title("Lecture notes")
///     .with_author("A. Student")
///     .convert("notes.svgz", "notes.pdf")?;
/// println!("{} pages", result.page_count);
/// # Ok::<(), unwrite::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unwrite {
    options: ConvertOptions,
}

impl Unwrite {
    /// Create a new Unwrite builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.options.format = format;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.render = self.options.render.with_title(title);
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.options.render = self.options.render.with_author(author);
        self
    }

    /// Set the document description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.options.render = self.options.render.with_description(description);
        self
    }

    /// Set comma-separated keywords (HTML only).
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.options.render = self.options.render.with_keywords(keywords);
        self
    }

    /// Enable or disable system font loading for PDF output.
    pub fn with_system_fonts(mut self, load: bool) -> Self {
        self.options.render = self.options.render.with_system_fonts(load);
        self
    }

    /// Set loading options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.options.parse = options;
        self
    }

    /// Get the accumulated conversion options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert `input` and write the result to `output`.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConvertResult> {
        convert_file(input, output, &self.options)
    }

    /// Convert a document held in memory.
    pub fn convert_bytes(&self, data: &[u8]) -> Result<ConvertResult> {
        convert_bytes(data, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_options() {
        let builder = Unwrite::new()
            .with_format(OutputFormat::Pdf)
            .with_title("Title")
            .with_author("Author")
            .with_description("Description")
            .with_keywords("a,b")
            .with_system_fonts(false)
            .with_parse_options(ParseOptions::new().with_root_id("doc"));

        let options = builder.options();
        assert_eq!(options.format, OutputFormat::Pdf);
        assert_eq!(options.render.metadata.title.as_deref(), Some("Title"));
        assert_eq!(options.render.metadata.author.as_deref(), Some("Author"));
        assert_eq!(
            options.render.metadata.description.as_deref(),
            Some("Description")
        );
        assert_eq!(options.render.metadata.keywords.as_deref(), Some("a,b"));
        assert!(!options.render.load_system_fonts);
        assert_eq!(options.parse.root_id, "doc");
    }

    #[test]
    fn test_builder_defaults_to_html() {
        let builder = Unwrite::default();
        assert_eq!(builder.options().format, OutputFormat::Html);
        assert!(builder.options().render.metadata.is_empty());
    }

    #[test]
    fn test_load_bytes_rejects_non_write_svg() {
        let result = load_bytes(br#"<svg xmlns="http://www.w3.org/2000/svg"/>"#);
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_load_reader() {
        let data = br#"<svg xmlns="http://www.w3.org/2000/svg" id="write-document"><svg class="write-page" width="10" height="20"/></svg>"#;
        let doc = load_reader(&data[..]).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].dimensions(), (10, 20));
    }
}
