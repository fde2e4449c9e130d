// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic page navbar: a header bar that puts its logo ahead of everything else.

use alloc::string::String;
use alloc::vec::Vec;

use crate::render::{Element, ElementKind, Node};

/// Props for [`navbar_root`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavbarProps {
    /// Extra class on the header.
    pub class_name: Option<String>,
    /// Keep the bar pinned while scrolling.
    pub sticky: bool,
}

impl NavbarProps {
    /// Pin the bar.
    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    /// Add a class to the header.
    pub fn with_class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }
}

/// A logo slot, optionally linking to the site root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Logo {
    /// Wrap the content in a link to `/`.
    pub link_home: bool,
    /// Logo content.
    pub children: Vec<Node>,
}

impl Logo {
    /// A logo around `child`.
    pub fn new(child: impl Into<Node>) -> Self {
        Self {
            link_home: false,
            children: alloc::vec![child.into()],
        }
    }

    /// Link the logo to the site root.
    pub fn link_home(mut self) -> Self {
        self.link_home = true;
        self
    }

    /// Build the logo wrapper.
    pub fn render(&self) -> Node {
        let wrapper = if self.link_home {
            Element::new(ElementKind::A).attr("href", "/")
        } else {
            Element::new(ElementKind::Div)
        };
        wrapper.children(self.children.iter().cloned()).into()
    }
}

/// A child of the navbar.
#[derive(Clone, Debug, PartialEq)]
pub enum NavbarItem {
    /// Hoisted to the front of the bar.
    Logo(Logo),
    /// Anything else, kept in order.
    Other(Node),
}

impl From<Logo> for NavbarItem {
    fn from(logo: Logo) -> Self {
        Self::Logo(logo)
    }
}

impl From<Node> for NavbarItem {
    fn from(node: Node) -> Self {
        Self::Other(node)
    }
}

impl From<Element> for NavbarItem {
    fn from(element: Element) -> Self {
        Self::Other(element.into())
    }
}

/// Render the navbar header: logos first, then the remaining items, each group in order.
pub fn navbar_root(props: &NavbarProps, items: impl IntoIterator<Item = NavbarItem>) -> Node {
    let (logos, rest): (Vec<_>, Vec<_>) = items
        .into_iter()
        .partition(|item| matches!(item, NavbarItem::Logo(_)));
    let children = logos.into_iter().chain(rest).map(|item| match item {
        NavbarItem::Logo(logo) => logo.render(),
        NavbarItem::Other(node) => node,
    });

    let header = Element::new(ElementKind::Header).class("container");
    let header = if props.sticky {
        header.class("sticky")
    } else {
        header
    };
    header
        .class_opt(props.class_name.as_deref())
        .children(children)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn link(label: &str) -> NavbarItem {
        Element::new(ElementKind::A)
            .attr("href", "/docs")
            .child(label)
            .into()
    }

    // The logo is hoisted ahead of items declared before it.
    #[test]
    fn logo_renders_first() {
        let out = navbar_root(
            &NavbarProps::default(),
            [link("Docs"), Logo::new("W").into(), link("Blog")],
        );
        assert_eq!(
            out.to_string(),
            "<header class=\"container\"><div>W</div><a href=\"/docs\">Docs</a><a href=\"/docs\">Blog</a></header>"
        );
    }

    #[test]
    fn sticky_and_class_name() {
        let out = navbar_root(
            &NavbarProps::default().sticky().with_class_name("glass"),
            Vec::<NavbarItem>::new(),
        );
        let header = out.as_element().unwrap();
        assert_eq!(header.get_attr("class"), Some("container sticky glass"));
    }

    #[test]
    fn logo_links_home() {
        let out = Logo::new("W").link_home().render();
        assert_eq!(out.to_string(), "<a href=\"/\">W</a>");
    }
}
