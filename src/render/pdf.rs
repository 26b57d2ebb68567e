//! PDF rendering for Write documents.
//!
//! Each page goes through the same steps:
//!
//! 1. the page size is set from the page's declared width and height;
//! 2. the page SVG is drawn at the origin by a [`VectorRenderer`] and its
//!    content is imported into the output document;
//! 3. every bookmark becomes a named destination;
//! 4. every link becomes a link annotation, either a `GoTo` to a named
//!    destination or a `URI` action;
//! 5. the page is appended to the page tree and never touched again.
//!
//! A page that fails any step leaves the output unchanged: link geometry is
//! checked before rendering, and destinations are registered only once the
//! page is in the tree.
//!
//! Destinations are `[page /XYZ left top null]` rather than a fit-the-page
//! view, so a jump lands on the bookmark's remapped position at the current
//! zoom.
//!
//! Positions are remapped into PDF space with [`crate::remap`]. One pixel
//! maps to one PDF point.

use std::collections::{BTreeMap, HashMap};

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, StringFormat};

use crate::convert::OutputFormat;
use crate::error::{Error, Result};
use crate::model::{LinkTarget, Metadata, Page};
use crate::remap::{remap_bookmark, remap_rect};

use super::markup::to_svg_string;
use super::vector::{SvgPageRenderer, VectorRenderer};
use super::{PageRenderer, RenderOptions};

/// PDF version written to the output header.
const PDF_VERSION: &str = "1.7";

/// Page dictionary keys the output page sets itself.
const PAGE_KEYS_REPLACED: &[&[u8]] = &[b"Type", b"Parent", b"MediaBox", b"CropBox", b"Annots"];

/// PDF document renderer.
pub struct PdfRenderer {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    destinations: BTreeMap<String, Vec<Object>>,
    metadata: Metadata,
    compress: bool,
    vector: Box<dyn VectorRenderer>,
}

impl PdfRenderer {
    /// Create a renderer that draws pages with [`SvgPageRenderer`].
    pub fn new(options: &RenderOptions) -> Self {
        let vector = SvgPageRenderer::new(options.load_system_fonts);
        Self::with_vector_renderer(options, Box::new(vector))
    }

    /// Create a renderer that draws pages with a custom vector renderer.
    pub fn with_vector_renderer(options: &RenderOptions, vector: Box<dyn VectorRenderer>) -> Self {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();

        if options.metadata.keywords.is_some() {
            log::warn!("Keywords are only written to HTML output; ignoring them for PDF");
        }

        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            destinations: BTreeMap::new(),
            metadata: options.metadata.clone(),
            compress: options.compress,
            vector,
        }
    }

    /// Number of pages emitted so far.
    pub fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    /// Register a named destination unless the key is already taken.
    fn add_destination(&mut self, page_number: u32, key: &str, dest: Vec<Object>) {
        if self.destinations.contains_key(key) {
            log::warn!(
                "Duplicate bookmark '{}' on page {}; keeping the first one",
                key,
                page_number
            );
            return;
        }
        self.destinations.insert(key.to_string(), dest);
    }

    fn build_info(&mut self) -> ObjectId {
        let mut info = dictionary! {
            "Producer" => Object::string_literal(concat!("unwrite ", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(
                chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()
            ),
        };
        if let Some(ref title) = self.metadata.title {
            info.set("Title", text_string(title));
        }
        if let Some(ref author) = self.metadata.author {
            info.set("Author", text_string(author));
        }
        if let Some(ref description) = self.metadata.description {
            info.set("Subject", text_string(description));
        }
        self.doc.add_object(info)
    }

    fn build_catalog(&mut self) -> ObjectId {
        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        };

        if !self.destinations.is_empty() {
            // Name tree leaves must be sorted by key; BTreeMap iterates in order.
            let names: Vec<Object> = self
                .destinations
                .iter()
                .flat_map(|(key, dest)| {
                    [
                        Object::String(key.as_bytes().to_vec(), StringFormat::Literal),
                        Object::Array(dest.clone()),
                    ]
                })
                .collect();
            let dests_id = self.doc.add_object(dictionary! { "Names" => names });
            catalog.set("Names", dictionary! { "Dests" => dests_id });
        }

        self.doc.add_object(catalog)
    }
}

impl PageRenderer for PdfRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn emit(&mut self, page: &Page) -> Result<()> {
        let width = page.width as f32;
        let height = page.height as f32;
        let page_height = page.height as f64;

        // Every fallible step runs before the output document is touched, so
        // a failed page leaves no destinations or objects behind.
        let mut link_rects = Vec::with_capacity(page.links.len());
        for link in &page.links {
            let bounds = link.bounds.ok_or_else(|| {
                Error::malformed(
                    page.number,
                    format!(
                        "link '{}' has no bounding <rect>; PDF output needs one to place the annotation",
                        link.href
                    ),
                )
            })?;
            link_rects.push((link, remap_rect(OutputFormat::Pdf, page_height, &bounds)));
        }

        let svg = to_svg_string(&page.content);
        let rendered = self.vector.render(&svg)?;
        let source = Document::load_mem(&rendered).map_err(|e| {
            Error::Render(format!(
                "page {}: renderer produced an unreadable PDF: {}",
                page.number, e
            ))
        })?;

        let max_id = self.doc.max_id;
        let mut page_dict = match import_page(&mut self.doc, &source, page.number) {
            Ok(page_dict) => page_dict,
            Err(e) => {
                // Drop whatever the copier had already added.
                self.doc.objects.retain(|id, _| id.0 <= max_id);
                self.doc.max_id = max_id;
                return Err(e);
            }
        };
        let page_id = self.doc.new_object_id();

        let mut annots = Vec::with_capacity(link_rects.len());
        for (link, mapped) in link_rects {
            let action = match link.target() {
                LinkTarget::Internal(key) => dictionary! {
                    "Type" => "Action",
                    "S" => "GoTo",
                    "D" => Object::String(key.as_bytes().to_vec(), StringFormat::Literal),
                },
                LinkTarget::External(uri) => dictionary! {
                    "Type" => "Action",
                    "S" => "URI",
                    "URI" => Object::String(uri.as_bytes().to_vec(), StringFormat::Literal),
                },
            };

            // PDF rectangles are [llx lly urx ury].
            let rect: Vec<Object> = vec![
                (mapped.left.min(mapped.right) as f32).into(),
                (mapped.bottom.min(mapped.top) as f32).into(),
                (mapped.left.max(mapped.right) as f32).into(),
                (mapped.bottom.max(mapped.top) as f32).into(),
            ];
            let annot_id = self.doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Link",
                "Rect" => rect,
                "Border" => vec![0.into(), 0.into(), 0.into()],
                "A" => action,
            });
            annots.push(Object::Reference(annot_id));
        }

        page_dict.set("Type", "Page");
        page_dict.set("Parent", self.pages_id);
        page_dict.set(
            "MediaBox",
            vec![0.into(), 0.into(), width.into(), height.into()],
        );
        if !annots.is_empty() {
            page_dict.set("Annots", annots);
        }
        self.doc.objects.insert(page_id, Object::Dictionary(page_dict));
        self.page_ids.push(page_id);

        for bookmark in &page.bookmarks {
            let point = remap_bookmark(OutputFormat::Pdf, page_height, bookmark);
            let dest = vec![
                Object::Reference(page_id),
                "XYZ".into(),
                (point.left as f32).into(),
                (point.top as f32).into(),
                Object::Null,
            ];
            self.add_destination(page.number, &bookmark.key, dest);
        }

        log::debug!(
            "Emitted PDF page {} ({}x{}) with {} destinations and {} link annotations",
            page.number,
            page.width,
            page.height,
            page.bookmarks.len(),
            page.links.len()
        );
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<Vec<u8>> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.build_catalog();
        let info_id = self.build_info();
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        if self.compress {
            self.doc.compress();
        }

        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

/// Encode a PDF text string: literal for ASCII, UTF-16BE with BOM otherwise.
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::String(value.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Copy the first page of `source` into `target`, returning the page
/// dictionary entries (contents, resources, groups, ...) with references
/// remapped to the copied objects. Entries the output page sets itself are
/// left out.
fn import_page(target: &mut Document, source: &Document, page_number: u32) -> Result<Dictionary> {
    let source_page_id = source.get_pages().into_values().next().ok_or_else(|| {
        Error::Render(format!("page {}: renderer produced no page", page_number))
    })?;
    let source_page = source.get_dictionary(source_page_id)?;

    let mut copier = ObjectCopier::new(source, target);
    let mut page_dict = Dictionary::new();

    for (key, value) in source_page.iter() {
        if PAGE_KEYS_REPLACED.contains(&key.as_slice()) {
            continue;
        }
        page_dict.set(key.clone(), copier.remap_references(value.clone())?);
    }

    if !page_dict.has(b"Resources") {
        if let Some(resources) = inherited_resources(source, source_page) {
            page_dict.set("Resources", copier.remap_references(resources)?);
        }
    }

    Ok(page_dict)
}

/// Walk up the page tree for an inherited `/Resources` entry.
fn inherited_resources(source: &Document, page: &Dictionary) -> Option<Object> {
    let mut parent_id = page.get(b"Parent").and_then(Object::as_reference).ok();
    while let Some(id) = parent_id {
        let node = source.get_dictionary(id).ok()?;
        if let Ok(resources) = node.get(b"Resources") {
            return Some(resources.clone());
        }
        parent_id = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

/// Copies objects between documents, following references.
struct ObjectCopier<'a> {
    source: &'a Document,
    target: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source: &'a Document, target: &'a mut Document) -> Self {
        Self {
            source,
            target,
            id_map: HashMap::new(),
        }
    }

    /// Deep copy an object, copying each referenced object at most once.
    fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        // Reserve the id before recursing so reference cycles terminate.
        let new_id = self.target.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let obj = self.source.get_object(source_id)?.clone();
        let new_obj = self.remap_references(obj)?;
        self.target.objects.insert(new_id, new_obj);

        Ok(new_id)
    }

    /// Replace every reference inside `obj` with the id of its copy.
    fn remap_references(&mut self, obj: Object) -> Result<Object> {
        match obj {
            Object::Reference(id) => Ok(Object::Reference(self.copy_object(id)?)),
            Object::Array(items) => Ok(Object::Array(
                items
                    .into_iter()
                    .map(|o| self.remap_references(o))
                    .collect::<Result<Vec<_>>>()?,
            )),
            Object::Dictionary(mut dict) => {
                for (_, value) in dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Dictionary(dict))
            }
            Object::Stream(mut stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Stream(stream))
            }
            other => Ok(other),
        }
    }
}
