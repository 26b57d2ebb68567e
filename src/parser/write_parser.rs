//! Write document loader using roxmltree.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use roxmltree::{Document as XmlDocument, Node as XmlNode, ParsingOptions};

use crate::detect::{detect_encoding_from_bytes, detect_encoding_from_path, InputEncoding};
use crate::error::{Error, Result};
use crate::model::{
    parse_dimension, well_known_prefix, Attribute, Document, Element, Node, Page, QName, SVG_NS,
};

use super::annotations::AnnotationExtractor;
use super::options::ParseOptions;

/// Write document parser.
///
/// Holds the decoded markup text; [`WriteParser::parse`] builds the
/// [`Document`].
pub struct WriteParser {
    text: String,
    options: ParseOptions,
}

impl WriteParser {
    /// Open a `.svg` or `.svgz` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a `.svg` or `.svgz` file with custom options.
    ///
    /// Decompression is selected by the file suffix; any other suffix fails
    /// with [`Error::UnsupportedInput`] before the file is read.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let encoding = detect_encoding_from_path(path)?;

        let file = File::open(path)?;
        let data = read_content(BufReader::new(file), encoding)?;
        log::debug!(
            "Read {} bytes of markup from {} ({})",
            data.len(),
            path.display(),
            encoding
        );

        Self::from_markup(data, options)
    }

    /// Parse a document from bytes, detecting gzip compression by magic number.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a document from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let encoding = detect_encoding_from_bytes(data);
        let data = read_content(data, encoding)?;
        Self::from_markup(data, options)
    }

    /// Parse a document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a document from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    fn from_markup(data: Vec<u8>, options: ParseOptions) -> Result<Self> {
        let mut text = String::from_utf8(data)
            .map_err(|e| Error::Format(format!("content is not valid UTF-8: {}", e)))?;
        if text.starts_with('\u{feff}') {
            text.remove(0);
        }
        Ok(Self { text, options })
    }

    /// Parse the markup and return the document with all annotations extracted.
    pub fn parse(&self) -> Result<Document> {
        let xml = XmlDocument::parse_with_options(
            &self.text,
            ParsingOptions {
                allow_dtd: true,
                ..ParsingOptions::default()
            },
        )?;

        let root = xml
            .descendants()
            .find(|n| n.is_element() && n.attribute("id") == Some(self.options.root_id.as_str()))
            .ok_or_else(|| {
                Error::Format(format!(
                    "Write document root (id '{}') not found; ensure the input file comes from Stylus Labs Write",
                    self.options.root_id
                ))
            })?;

        let mut page_nodes = Vec::new();
        self.collect_pages(root, &mut page_nodes);

        let extractor = AnnotationExtractor::new(self.options.bookmark_class.as_str());
        let mut document = Document::new();

        for (index, node) in page_nodes.into_iter().enumerate() {
            let number = index as u32 + 1;
            let mut page = build_page(number, node)?;
            extractor.extract(&mut page)?;
            document.add_page(page);
        }

        log::debug!("Loaded Write document with {} pages", document.page_count());
        Ok(document)
    }

    /// Collect page elements under `node` in document order, without
    /// descending into a page once found.
    fn collect_pages<'a, 'input>(
        &self,
        node: XmlNode<'a, 'input>,
        out: &mut Vec<XmlNode<'a, 'input>>,
    ) {
        for child in node.children().filter(|n| n.is_element()) {
            if self.is_page(child) {
                out.push(child);
            } else {
                self.collect_pages(child, out);
            }
        }
    }

    fn is_page(&self, node: XmlNode<'_, '_>) -> bool {
        let name = node.tag_name();
        name.name() == "svg"
            && name.namespace() == Some(SVG_NS)
            && node
                .attribute("class")
                .map(|c| c.split_whitespace().any(|t| t == self.options.page_class))
                .unwrap_or(false)
    }
}

/// Read all content, gunzipping if the encoding requires it.
fn read_content<R: Read>(mut reader: R, encoding: InputEncoding) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    if encoding.is_compressed() {
        GzDecoder::new(reader)
            .read_to_end(&mut data)
            .map_err(|e| Error::Format(format!("gzip decompression failed: {}", e)))?;
    } else {
        reader.read_to_end(&mut data)?;
    }
    Ok(data)
}

fn build_page(number: u32, node: XmlNode<'_, '_>) -> Result<Page> {
    let dimension = |name: &str| -> Result<u32> {
        let value = node.attribute(name).ok_or_else(|| {
            Error::Format(format!("page {} has no '{}' attribute", number, name))
        })?;
        parse_dimension(value).ok_or_else(|| {
            Error::Format(format!(
                "page {} has an invalid {} '{}'",
                number, name, value
            ))
        })
    };
    let width = dimension("width")?;
    let height = dimension("height")?;

    Ok(Page::new(number, width, height, to_element(node)))
}

/// Detach an element subtree from the parsed document.
fn to_element(node: XmlNode<'_, '_>) -> Element {
    let tag = node.tag_name();
    let mut element = Element::new(qualify(node, tag.namespace(), tag.name()));

    element.attributes = node
        .attributes()
        .map(|a| Attribute::new(qualify(node, a.namespace(), a.name()), a.value()))
        .collect();

    for child in node.children() {
        if child.is_element() {
            element.children.push(Node::Element(to_element(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                element.children.push(Node::Text(text.to_string()));
            }
        }
    }

    element
}

/// Resolve the serialization prefix for a name: none for SVG, the
/// conventional one for well-known namespaces, otherwise whatever prefix
/// the source bound in scope.
fn qualify(node: XmlNode<'_, '_>, namespace: Option<&str>, local: &str) -> QName {
    let Some(uri) = namespace else {
        return QName::local(local);
    };
    let prefix = if uri == SVG_NS {
        None
    } else {
        well_known_prefix(uri).map(str::to_string).or_else(|| {
            node.namespaces()
                .find(|ns| ns.uri() == uri)
                .and_then(|ns| ns.name())
                .map(str::to_string)
        })
    };
    QName {
        namespace: Some(uri.to_string()),
        prefix,
        local: local.to_string(),
    }
}
