//! Owned markup tree for page content.
//!
//! Pages are detached from the parsed source text so they can be rewritten
//! (link attributes) and re-serialized independently of each other.

/// SVG namespace URI.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// XLink namespace URI.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// XML namespace URI (`xml:space`, `xml:lang`).
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// A namespace-qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    /// Namespace URI, if any
    pub namespace: Option<String>,

    /// Prefix used when serializing, if any
    pub prefix: Option<String>,

    /// Local part of the name
    pub local: String,
}

impl QName {
    /// A name in no namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local: local.into(),
        }
    }

    /// A name in the given namespace, with the conventional prefix for
    /// well-known namespaces.
    pub fn ns(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let prefix = well_known_prefix(&namespace).map(str::to_string);
        Self {
            namespace: Some(namespace),
            prefix,
            local: local.into(),
        }
    }

    /// An element name in the SVG namespace.
    pub fn svg(local: impl Into<String>) -> Self {
        Self::ns(SVG_NS, local)
    }

    /// Check namespace and local name.
    pub fn is(&self, namespace: Option<&str>, local: &str) -> bool {
        self.namespace.as_deref() == namespace && self.local == local
    }

    /// Serialized form (`prefix:local` or `local`).
    pub fn qualified(&self) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }
}

/// Prefix conventionally bound to a namespace.
///
/// The SVG namespace is the default namespace and has no prefix.
pub fn well_known_prefix(namespace: &str) -> Option<&'static str> {
    match namespace {
        XLINK_NS => Some("xlink"),
        XML_NS => Some("xml"),
        _ => None,
    }
}

/// An attribute on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name
    pub name: QName,

    /// Attribute value (unescaped)
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element
    Element(Element),

    /// Character data (unescaped)
    Text(String),
}

/// An element with attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element name
    pub name: QName,

    /// Attributes in source order
    pub attributes: Vec<Attribute>,

    /// Child nodes in source order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute in no namespace.
    pub fn with_attr(mut self, local: &str, value: impl Into<String>) -> Self {
        self.set_attribute(local, value);
        self
    }

    /// Builder: add a namespaced attribute.
    pub fn with_attr_ns(mut self, namespace: &str, local: &str, value: impl Into<String>) -> Self {
        self.attributes
            .push(Attribute::new(QName::ns(namespace, local), value));
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Builder: append a text node.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Get an attribute in no namespace.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attribute_ns(None, local)
    }

    /// Get an attribute under the given namespace.
    pub fn attribute_ns(&self, namespace: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.is(namespace, local))
            .map(|a| a.value.as_str())
    }

    /// Set an attribute in no namespace, replacing any existing value.
    pub fn set_attribute(&mut self, local: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name.is(None, local)) {
            Some(attr) => attr.value = value,
            None => self
                .attributes
                .push(Attribute::new(QName::local(local), value)),
        }
    }

    /// Check whether the whitespace-separated `class` attribute contains a token.
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|value| value.split_whitespace().any(|token| token == class))
            .unwrap_or(false)
    }

    /// Check whether this is an SVG element with the given local name.
    pub fn is_svg(&self, local: &str) -> bool {
        self.name.is(Some(SVG_NS), local)
    }

    /// Child elements in order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.child_elements().collect::<Vec<_>>().into_iter().rev().collect(),
        }
    }

    /// Visit `self` and every descendant element mutably, in document order.
    pub fn for_each_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        f(self);
        for child in &mut self.children {
            if let Node::Element(e) = child {
                e.for_each_mut(f);
            }
        }
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        let children: Vec<_> = next.child_elements().collect();
        self.stack.extend(children.into_iter().rev());
        Some(next)
    }
}
