//! End-to-end conversion: load, extract, render, write.
//!
//! # Example
//!
//! ```no_run
//! use unwrite::convert::{convert_file, ConvertOptions, OutputFormat};
//!
//! fn main() -> unwrite::Result<()> {
//!     let options = ConvertOptions::new().with_format(OutputFormat::Pdf);
//!     let result = convert_file("notes.svgz", "notes.pdf", &options)?;
//!     println!("{} pages, {} links", result.page_count, result.link_count);
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::Document;
use crate::parser::{ParseOptions, WriteParser};
use crate::render::{render_document, renderer_for, RenderOptions};

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// A single HTML document with inline SVG pages
    #[default]
    Html,

    /// A paginated PDF document
    Pdf,
}

impl OutputFormat {
    /// Conventional file extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Pdf => "pdf",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Html => "text/html",
            OutputFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(Error::Other(format!(
                "unknown output format '{}' (expected html or pdf)",
                other
            ))),
        }
    }
}

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Output format
    pub format: OutputFormat,

    /// Loading options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set loading options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Output bytes (UTF-8 markup for HTML)
    pub content: Vec<u8>,

    /// Output format
    pub format: OutputFormat,

    /// Number of pages rendered
    pub page_count: u32,

    /// Number of bookmarks found
    pub bookmark_count: usize,

    /// Number of links found
    pub link_count: usize,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    fn new(doc: &Document, format: OutputFormat, content: Vec<u8>) -> Self {
        Self {
            content,
            format,
            page_count: doc.page_count(),
            bookmark_count: doc.bookmark_count(),
            link_count: doc.link_count(),
            mime_type: format.mime_type(),
        }
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Render an already-loaded document.
pub fn convert_document(doc: &Document, options: &ConvertOptions) -> Result<ConvertResult> {
    let renderer = renderer_for(options.format, &options.render);
    let content = render_document(doc, renderer)?;
    Ok(ConvertResult::new(doc, options.format, content))
}

/// Convert a Write document held in memory. Gzip input is detected by content.
pub fn convert_bytes(data: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
    let doc = WriteParser::from_bytes_with_options(data, options.parse.clone())?.parse()?;
    convert_document(&doc, options)
}

/// Convert a Write document file and write the artifact to `output`.
///
/// The whole artifact is rendered before the destination is touched, then
/// written through a temporary file in the same directory and renamed into
/// place. On error no output file is created.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    let input = input.as_ref();
    let output = output.as_ref();

    let doc = WriteParser::open_with_options(input, options.parse.clone())?.parse()?;
    let result = convert_document(&doc, options)?;
    write_atomic(output, &result.content)?;

    log::debug!(
        "Wrote {} ({} bytes, {} pages) to {}",
        result.format,
        result.content_len(),
        result.page_count,
        output.display()
    );
    Ok(result)
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
