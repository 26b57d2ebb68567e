//! Markup serialization for page subtrees.
//!
//! Each page serializes as a standalone SVG fragment: the page element
//! declares the SVG default namespace and every prefixed namespace used
//! below it, so the output works both inline in HTML and as input to the
//! vector renderer.

use std::collections::BTreeMap;

use crate::model::{Element, Node, XML_NS};

/// Serialize an element subtree as standalone SVG markup.
pub fn to_svg_string(element: &Element) -> String {
    let mut prefixes = BTreeMap::new();
    collect_prefixes(element, &mut prefixes);

    let mut out = String::new();
    write_element(&mut out, element, None, Some(&prefixes));
    out
}

fn collect_prefixes<'a>(element: &'a Element, out: &mut BTreeMap<&'a str, &'a str>) {
    let names = std::iter::once(&element.name).chain(element.attributes.iter().map(|a| &a.name));
    for name in names {
        if let (Some(prefix), Some(uri)) = (name.prefix.as_deref(), name.namespace.as_deref()) {
            if uri != XML_NS {
                out.entry(prefix).or_insert(uri);
            }
        }
    }
    for child in element.child_elements() {
        collect_prefixes(child, out);
    }
}

fn write_element(
    out: &mut String,
    element: &Element,
    default_ns: Option<&str>,
    declarations: Option<&BTreeMap<&str, &str>>,
) {
    let name = element.name.qualified();
    out.push('<');
    out.push_str(&name);

    // An unprefixed element outside the inherited default namespace
    // re-declares it.
    let mut own_default = default_ns;
    if element.name.prefix.is_none() && element.name.namespace.as_deref() != default_ns {
        own_default = element.name.namespace.as_deref();
        push_attr(out, "xmlns", own_default.unwrap_or(""));
    }

    if let Some(declarations) = declarations {
        for (prefix, uri) in declarations {
            push_attr(out, &format!("xmlns:{}", prefix), uri);
        }
    }

    for attr in &element.attributes {
        push_attr(out, &attr.name.qualified(), &attr.value);
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(out, e, own_default, None),
            Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
        }
    }
    out.push_str("</");
    out.push_str(&name);
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(value));
    out.push('"');
}
