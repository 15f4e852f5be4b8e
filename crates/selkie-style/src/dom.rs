//! Owned SVG document model.
//!
//! The read side goes through `roxmltree`; the write side is a plain owned
//! tree with order-preserving attribute maps and a hand-written serializer.
//! This is not a general XML library: it keeps exactly what the styler and
//! export pipeline need from engine-produced SVG.

use indexmap::IndexMap;
use ryu_js::Buffer;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, thiserror::Error)]
#[error("failed to parse SVG document: {0}")]
pub struct ParseError(#[from] roxmltree::Error);

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    /// Numeric attribute read; absent or malformed values read as 0,
    /// matching how the engine's own geometry attributes behave.
    pub fn attr_f64(&self, name: &str) -> f64 {
        self.attr(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Sets one declaration inside the inline `style` attribute, replacing an
    /// existing declaration for the same property. Engine stylesheets target
    /// inline style, so attribute-only mutation is not enough.
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        let mut declarations: Vec<(String, String)> = self
            .attr("style")
            .map(|style| {
                style
                    .split(';')
                    .filter_map(|decl| {
                        let (name, value) = decl.split_once(':')?;
                        let name = name.trim();
                        if name.is_empty() {
                            return None;
                        }
                        Some((name.to_string(), value.trim().to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        match declarations.iter_mut().find(|(name, _)| name == property) {
            Some((_, slot)) => *slot = value.to_string(),
            None => declarations.push((property.to_string(), value.to_string())),
        }

        let serialized = declarations
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("style", &serialized);
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Depth-first walk over this element and every descendant element.
    pub fn for_each_element_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in self.child_elements_mut() {
            child.for_each_element_mut(f);
        }
    }

    /// True when any element in this subtree (excluding self) has the tag.
    pub fn has_descendant(&self, tag: &str) -> bool {
        self.child_elements()
            .any(|el| el.name == tag || el.has_descendant(tag))
    }
}

/// Formats a computed geometry value the way JS `Number#toString()` would,
/// so substituted shapes serialize like engine-produced ones.
pub fn fmt_number(value: f64) -> String {
    let mut buffer = Buffer::new();
    buffer.format(value).to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    root: Element,
}

impl SvgDocument {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let parsed = roxmltree::Document::parse(text)?;
        let mut root = convert(parsed.root_element());
        // roxmltree reports namespace declarations separately from attributes;
        // re-pin the SVG namespace on the root so serialization round-trips.
        if root.name == "svg" && root.attr("xmlns").is_none() {
            root.attrs
                .shift_insert(0, "xmlns".to_string(), SVG_NS.to_string());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        write_element(&self.root, &mut out);
        out
    }
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut el = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        el.attrs
            .insert(attr.name().to_string(), attr.value().to_string());
    }
    for child in node.children() {
        if child.is_element() {
            el.children.push(Node::Element(convert(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                el.children.push(Node::Text(text.to_string()));
            }
        }
    }
    el
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attr(value, out);
        out.push('"');
    }
    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &el.children {
        match child {
            Node::Element(child) => write_element(child, out),
            Node::Text(text) => escape_text(text, out),
        }
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}
