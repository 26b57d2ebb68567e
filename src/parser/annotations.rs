//! Bookmark and link extraction from page content.
//!
//! Two scans run over each page subtree, both in document order:
//!
//! - **Bookmarks**: elements carrying an `id` and the bookmark class marker.
//!   Their position comes from a `translate(A,B)` transform, which is
//!   required.
//! - **Links**: SVG `<a>` elements with an `xlink:href`. The reference is
//!   copied to a plain `href` so the markup works as inline HTML, and any
//!   explicit `target` is normalized to `_blank`. The first descendant
//!   `<rect>` with usable geometry gives the clickable bounds.
//!
//! A node is never both: an anchor that qualifies as a bookmark is only
//! reported as a bookmark.

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Bookmark, Element, Link, Page, Rect, XLINK_NS};

/// Matches `translate(A,B)` or `translate(A B)` and captures both numbers.
const TRANSLATE_PATTERN: &str = r"translate\(\s*([-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)\s*(?:,\s*|\s+)([-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)\s*\)";

/// Extracts bookmarks and links from page content.
#[derive(Debug, Clone)]
pub struct AnnotationExtractor {
    bookmark_class: String,
    translate_regex: Regex,
}

impl AnnotationExtractor {
    /// Create an extractor for the given bookmark class marker.
    pub fn new(bookmark_class: impl Into<String>) -> Self {
        Self {
            bookmark_class: bookmark_class.into(),
            translate_regex: Regex::new(TRANSLATE_PATTERN).unwrap(),
        }
    }

    /// Scan a page, filling its bookmark and link lists and rewriting link
    /// attributes in its content.
    pub fn extract(&self, page: &mut Page) -> Result<()> {
        page.bookmarks = self.scan_bookmarks(page.number, &page.content)?;
        page.links = self.scan_links(&mut page.content);

        log::debug!(
            "Page {}: {} bookmarks, {} links",
            page.number,
            page.bookmarks.len(),
            page.links.len()
        );
        Ok(())
    }

    /// Find all bookmarks under `content`.
    ///
    /// A bookmark node without a decodable `translate(A,B)` transform is
    /// treated as corruption and fails the page.
    pub fn scan_bookmarks(&self, page_number: u32, content: &Element) -> Result<Vec<Bookmark>> {
        let mut bookmarks = Vec::new();

        for element in content.descendants() {
            if !self.is_bookmark(element) {
                continue;
            }
            let key = element.attribute("id").unwrap_or_default();
            let transform = element.attribute("transform").unwrap_or_default();
            let (raw_x, raw_y) = self.parse_translate(transform).ok_or_else(|| {
                Error::malformed(
                    page_number,
                    format!(
                        "bookmark '{}' has no translate(x,y) transform (found {:?})",
                        key, transform
                    ),
                )
            })?;
            bookmarks.push(Bookmark::new(key, raw_x, raw_y));
        }

        Ok(bookmarks)
    }

    /// Find all links under `content`, rewriting each anchor in place.
    pub fn scan_links(&self, content: &mut Element) -> Vec<Link> {
        let mut links = Vec::new();

        content.for_each_mut(&mut |element: &mut Element| {
            if !element.is_svg("a") || self.is_bookmark(element) {
                return;
            }
            let Some(href) = element.attribute_ns(Some(XLINK_NS), "href").map(str::to_string)
            else {
                return;
            };

            element.set_attribute("href", href.as_str());
            let new_window = element.attribute("target").is_some();
            if new_window {
                element.set_attribute("target", "_blank");
            }

            let rects: Vec<&Element> = element.descendants().filter(|e| e.is_svg("rect")).collect();
            let bounds = rects.iter().find_map(|rect| rect_bounds(rect));
            if bounds.is_none() && !rects.is_empty() {
                log::warn!("Link '{}' has no <rect> with usable geometry", href);
            } else if rects.len() > 1 {
                log::warn!(
                    "Link '{}' has {} <rect> elements; using the first usable one as its bounds",
                    href,
                    rects.len()
                );
            }

            links.push(Link {
                href,
                new_window,
                bounds,
            });
        });

        links
    }

    /// Decode the two offsets of a `translate(A,B)` transform, in order.
    pub fn parse_translate(&self, transform: &str) -> Option<(f64, f64)> {
        let caps = self.translate_regex.captures(transform)?;
        let a = caps.get(1)?.as_str().parse().ok()?;
        let b = caps.get(2)?.as_str().parse().ok()?;
        Some((a, b))
    }

    fn is_bookmark(&self, element: &Element) -> bool {
        element.attribute("id").is_some() && element.has_class(&self.bookmark_class)
    }
}

/// Bounds of a `<rect>` element. `x` and `y` default to zero; `width` and
/// `height` are required.
fn rect_bounds(rect: &Element) -> Option<Rect> {
    let coord = |name: &str| match rect.attribute(name) {
        Some(value) => parse_length(value),
        None => Some(0.0),
    };
    let x = coord("x")?;
    let y = coord("y")?;
    let width = rect.attribute("width").and_then(parse_length)?;
    let height = rect.attribute("height").and_then(parse_length)?;
    Some(Rect::new(x, y, width, height))
}

/// Parse a length attribute, ignoring any unit suffix (`px`, `pt`, `%`, ...).
fn parse_length(value: &str) -> Option<f64> {
    let value = value
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
        .trim_end();
    value.parse().ok().filter(|v: &f64| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QName, SVG_NS};

    fn extractor() -> AnnotationExtractor {
        AnnotationExtractor::new("bookmark")
    }

    fn bookmark(id: &str, transform: &str) -> Element {
        Element::new(QName::svg("g"))
            .with_attr("id", id)
            .with_attr("class", "bookmark")
            .with_attr("transform", transform)
    }

    fn anchor(href: &str) -> Element {
        Element::new(QName::svg("a")).with_attr_ns(XLINK_NS, "href", href)
    }

    fn rect(x: &str, y: &str, w: &str, h: &str) -> Element {
        Element::new(QName::svg("rect"))
            .with_attr("x", x)
            .with_attr("y", y)
            .with_attr("width", w)
            .with_attr("height", h)
    }

    fn page_svg() -> Element {
        Element::new(QName::svg("svg")).with_attr("class", "write-page")
    }

    #[test]
    fn test_parse_translate_comma_and_space() {
        let ex = extractor();
        assert_eq!(ex.parse_translate("translate(15.5,42.0)"), Some((15.5, 42.0)));
        assert_eq!(ex.parse_translate("translate(3 4)"), Some((3.0, 4.0)));
        assert_eq!(
            ex.parse_translate("scale(2) translate( -1.5e1 , .5 )"),
            Some((-15.0, 0.5))
        );
    }

    #[test]
    fn test_parse_translate_missing() {
        let ex = extractor();
        assert_eq!(ex.parse_translate("scale(2)"), None);
        assert_eq!(ex.parse_translate("translate(10)"), None);
        assert_eq!(ex.parse_translate(""), None);
    }

    #[test]
    fn test_scan_bookmarks_in_order() {
        let content = page_svg()
            .with_child(bookmark("first", "translate(1,2)"))
            .with_child(
                Element::new(QName::svg("g")).with_child(bookmark("second", "translate(3,4)")),
            );

        let bookmarks = extractor().scan_bookmarks(1, &content).unwrap();
        assert_eq!(
            bookmarks,
            vec![
                Bookmark::new("first", 1.0, 2.0),
                Bookmark::new("second", 3.0, 4.0)
            ]
        );
    }

    #[test]
    fn test_bookmark_requires_id_and_class() {
        let content = page_svg()
            .with_child(
                Element::new(QName::svg("g"))
                    .with_attr("class", "bookmark")
                    .with_attr("transform", "translate(1,2)"),
            )
            .with_child(
                Element::new(QName::svg("g"))
                    .with_attr("id", "plain")
                    .with_attr("transform", "translate(1,2)"),
            );

        let bookmarks = extractor().scan_bookmarks(1, &content).unwrap();
        assert!(bookmarks.is_empty());
    }

    #[test]
    fn test_bookmark_without_translate_is_fatal() {
        let content = page_svg().with_child(bookmark("broken", "rotate(45)"));

        let result = extractor().scan_bookmarks(4, &content);
        match result {
            Err(Error::MalformedAnnotation { page, message }) => {
                assert_eq!(page, 4);
                assert!(message.contains("broken"));
            }
            other => panic!("expected MalformedAnnotation, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_links_rewrites_href() {
        let mut content = page_svg().with_child(
            anchor("https://example.com").with_child(rect("10", "20", "100", "50")),
        );

        let links = extractor().scan_links(&mut content);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "https://example.com");
        assert_eq!(links[0].bounds, Some(Rect::new(10.0, 20.0, 100.0, 50.0)));
        assert!(!links[0].new_window);

        let a = content.descendants().find(|e| e.is_svg("a")).unwrap();
        assert_eq!(a.attribute("href"), Some("https://example.com"));
        assert_eq!(a.attribute_ns(Some(XLINK_NS), "href"), Some("https://example.com"));
        assert_eq!(a.attribute("target"), None);
    }

    #[test]
    fn test_scan_links_normalizes_target() {
        let mut content =
            page_svg().with_child(anchor("https://example.com").with_attr("target", "_self"));

        let links = extractor().scan_links(&mut content);
        assert!(links[0].new_window);
        let a = content.descendants().find(|e| e.is_svg("a")).unwrap();
        assert_eq!(a.attribute("target"), Some("_blank"));
    }

    #[test]
    fn test_link_without_rect_has_no_bounds() {
        let mut content = page_svg().with_child(anchor("#intro").with_text("Intro"));

        let links = extractor().scan_links(&mut content);
        assert_eq!(links.len(), 1);
        assert!(links[0].bounds.is_none());
    }

    #[test]
    fn test_rect_defaults_and_units() {
        let mut content = page_svg().with_child(
            anchor("#a").with_child(
                Element::new(QName::svg("rect"))
                    .with_attr("width", "30px")
                    .with_attr("height", "40"),
            ),
        );

        let links = extractor().scan_links(&mut content);
        assert_eq!(links[0].bounds, Some(Rect::new(0.0, 0.0, 30.0, 40.0)));
    }

    #[test]
    fn test_rect_units_stripped() {
        let mut content = page_svg()
            .with_child(anchor("#pt").with_child(rect("1pt", "2mm", "10pt", "20em")))
            .with_child(anchor("#pct").with_child(rect("0", "0", "50%", " 25 % ")));

        let links = extractor().scan_links(&mut content);
        assert_eq!(links[0].bounds, Some(Rect::new(1.0, 2.0, 10.0, 20.0)));
        assert_eq!(links[1].bounds, Some(Rect::new(0.0, 0.0, 50.0, 25.0)));
        assert_eq!(parse_length("px"), None);
        assert_eq!(parse_length("abc"), None);
    }

    #[test]
    fn test_first_usable_rect_gives_bounds() {
        let mut content = page_svg().with_child(
            anchor("#a")
                .with_child(Element::new(QName::svg("rect")).with_attr("width", "5"))
                .with_child(rect("3", "4", "wide", "tall"))
                .with_child(rect("7", "8", "9", "10"))
                .with_child(rect("0", "0", "1", "1")),
        );

        let links = extractor().scan_links(&mut content);
        assert_eq!(links[0].bounds, Some(Rect::new(7.0, 8.0, 9.0, 10.0)));
    }

    #[test]
    fn test_no_usable_rect_has_no_bounds() {
        let mut content =
            page_svg().with_child(anchor("#a").with_child(rect("0", "0", "auto", "1")));

        let links = extractor().scan_links(&mut content);
        assert!(links[0].bounds.is_none());
    }

    #[test]
    fn test_anchor_without_xlink_is_ignored() {
        let mut content = page_svg()
            .with_child(Element::new(QName::svg("a")).with_attr("href", "#plain"))
            .with_child(Element::new(QName::ns("urn:other", "a")).with_attr_ns(
                XLINK_NS,
                "href",
                "#foreign",
            ));

        let links = extractor().scan_links(&mut content);
        assert!(links.is_empty());
    }

    #[test]
    fn test_bookmark_anchor_is_not_a_link() {
        let mut page = Page::new(
            1,
            100,
            100,
            page_svg().with_child(
                anchor("#elsewhere")
                    .with_attr("id", "mark")
                    .with_attr("class", "bookmark")
                    .with_attr("transform", "translate(5,6)"),
            ),
        );

        extractor().extract(&mut page).unwrap();
        assert_eq!(page.bookmarks.len(), 1);
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_extract_fills_page() {
        let mut page = Page::new(
            2,
            100,
            100,
            page_svg()
                .with_child(bookmark("top", "translate(0,0)"))
                .with_child(anchor("#top").with_child(rect("1", "2", "3", "4"))),
        );

        extractor().extract(&mut page).unwrap();
        assert_eq!(page.bookmarks.len(), 1);
        assert_eq!(page.links.len(), 1);
        assert!(page.links[0].is_internal());
        assert!(page.content.name.is(Some(SVG_NS), "svg"));
    }
}
