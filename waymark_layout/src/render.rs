// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render tree: the element/text structure components emit.
//!
//! Components build [`Element`]s with a small builder API and return [`Node`]s.
//! The host turns the tree into real markup or widgets; [`Node`]'s `Display`
//! impl produces HTML-like text for inspection and demos.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Kind of element in the render tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Primary landmark region of a page.
    Main,
    /// Generic section.
    Section,
    /// Self-contained article.
    Article,
    /// Navigation landmark.
    Nav,
    /// Page or section header.
    Header,
    /// Footer.
    Footer,
    /// Generic container.
    Div,
    /// Top-level heading.
    H1,
    /// Second-level heading.
    H2,
    /// Paragraph.
    P,
    /// Unordered list.
    Ul,
    /// List item.
    Li,
    /// Anchor.
    A,
    /// Image.
    Img,
    /// Vector graphic root.
    Svg,
    /// Vector circle.
    Circle,
}

impl ElementKind {
    /// Tag name used when serializing.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Section => "section",
            Self::Article => "article",
            Self::Nav => "nav",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Div => "div",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::P => "p",
            Self::Ul => "ul",
            Self::Li => "li",
            Self::A => "a",
            Self::Img => "img",
            Self::Svg => "svg",
            Self::Circle => "circle",
        }
    }

    fn is_void(self) -> bool {
        matches!(self, Self::Img)
    }
}

/// A node in the render tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// A run of text.
    Text(String),
}

/// An element: kind, ordered attributes, and children.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Element kind.
    pub kind: ElementKind,
    /// Attributes in insertion order. Names are unique.
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an existing one of the same name.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_owned(), value)),
        }
        self
    }

    /// Append a class name; empty names are ignored.
    pub fn class(self, class: &str) -> Self {
        let class = class.trim();
        if class.is_empty() {
            return self;
        }
        let joined = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => {
                let mut s = existing.to_owned();
                s.push(' ');
                s.push_str(class);
                s
            }
            _ => class.to_owned(),
        };
        self.attr("class", joined)
    }

    /// Append an optional class name.
    pub fn class_opt(self, class: Option<&str>) -> Self {
        match class {
            Some(c) => self.class(c),
            None => self,
        }
    }

    /// Append one child.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Value of attribute `name`.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Whether the space-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|x| x == class))
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(Node::as_element)
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Self::Element(e)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl Node {
    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The element, if this is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            Self::Text(_) => None,
        }
    }

    /// All elements in pre-order, including this one.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack: Vec<&Self> = Vec::new();
        stack.push(self);
        while let Some(node) = stack.pop() {
            if let Self::Element(e) = node {
                out.push(e);
                stack.extend(e.children.iter().rev());
            }
        }
        out
    }

    /// All elements of `kind` in pre-order.
    pub fn find_all(&self, kind: ElementKind) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|e| e.kind == kind)
            .collect()
    }

    /// First element in pre-order whose `id` is `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.descendants().into_iter().find(|e| e.id() == Some(id))
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(t),
        Node::Element(e) => {
            for child in &e.children {
                collect_text(child, out);
            }
        }
    }
}

fn escape(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for c in s.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' => f.write_str("&quot;")?,
            c => fmt::Write::write_char(f, c)?,
        }
    }
    Ok(())
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.kind.tag())?;
        for (name, value) in &self.attrs {
            write!(f, " {name}=\"")?;
            escape(value, f)?;
            f.write_str("\"")?;
        }
        f.write_str(">")?;
        if self.kind.is_void() {
            return Ok(());
        }
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.kind.tag())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(e) => fmt::Display::fmt(e, f),
            Self::Text(t) => escape(t, f),
        }
    }
}
