// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side navigation: a link per registered section, with the active one marked.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Cell, RefCell};

use waymark_store::Subscription;

use crate::error::ContextMisuseError;
use crate::render::{Element, ElementKind, Node};
use crate::scope::Scope;
use crate::session::{HeaderStore, SectionId, ViewStore};

/// Class given to the list item of the active section.
pub const ACTIVE_CLASS: &str = "active";

/// Builds the label shown inside a navigation link from its section id.
pub type LinkRenderer = Rc<dyn Fn(&str) -> Node>;

/// Props for [`Navigation`].
#[derive(Clone, Default)]
pub struct NavigationProps {
    /// Replacement for the default link label (the section id itself).
    pub links_as: Option<LinkRenderer>,
    /// Extra class on the `nav` element.
    pub class_name: Option<String>,
}

impl core::fmt::Debug for NavigationProps {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavigationProps")
            .field("links_as", &self.links_as.is_some())
            .field("class_name", &self.class_name)
            .finish()
    }
}

impl NavigationProps {
    /// Render link labels with `f`.
    pub fn with_links_as(mut self, f: impl Fn(&str) -> Node + 'static) -> Self {
        self.links_as = Some(Rc::new(f));
        self
    }

    /// Add a class to the `nav` element.
    pub fn with_class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }
}

/// Render the navigation for `headers`, marking `active`.
pub fn render_navigation(props: &NavigationProps, headers: &[SectionId], active: Option<&str>) -> Node {
    let items = headers.iter().map(|heading| {
        let label = match &props.links_as {
            Some(f) => f(heading.as_str()),
            None => Node::text(heading.as_str()),
        };
        let link = Element::new(ElementKind::A)
            .attr("href", format!("#{heading}"))
            .child(label);
        let item = Element::new(ElementKind::Li);
        let item = if active == Some(heading.as_str()) {
            item.class(ACTIVE_CLASS)
        } else {
            item
        };
        Node::from(item.child(link))
    });

    Element::new(ElementKind::Nav)
        .class_opt(props.class_name.as_deref())
        .child(Element::new(ElementKind::H2).child("Contents"))
        .child(Element::new(ElementKind::Ul).children(items))
        .into()
}

struct Output {
    node: RefCell<Node>,
    renders: Cell<usize>,
}

impl Output {
    fn rebuild(&self, props: &NavigationProps, headers: &HeaderStore, view: &ViewStore) {
        // Owned copies: a label renderer may write either store, which rebuilds
        // re-entrantly. The innermost build sees the newest values and wins.
        let build = self.renders.get() + 1;
        self.renders.set(build);
        let headers = headers.get();
        let active = view.get();
        let node = render_navigation(props, &headers, active.as_deref());
        if self.renders.get() == build {
            *self.node.borrow_mut() = node;
        }
    }
}

/// A mounted navigation.
///
/// Subscribes to both session stores for as long as it is mounted and rebuilds its
/// output on every notification. Dropping it (or calling [`unmount`](Self::unmount))
/// unsubscribes from both.
pub struct Navigation {
    output: Rc<Output>,
    headers_sub: Subscription,
    view_sub: Subscription,
}

impl core::fmt::Debug for Navigation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Navigation")
            .field("renders", &self.render_count())
            .field("subscribed", &self.is_subscribed())
            .finish_non_exhaustive()
    }
}

impl Navigation {
    /// Component name used in misuse errors.
    pub const NAME: &'static str = "Layout.Navigation";

    /// Mount inside `scope`, which must carry a session.
    pub fn mount(scope: &Scope, props: NavigationProps) -> Result<Self, ContextMisuseError> {
        let headers = scope.headers(Self::NAME)?;
        let view = scope.view(Self::NAME)?;

        let output = Rc::new(Output {
            node: RefCell::new(Node::text("")),
            renders: Cell::new(0),
        });
        output.rebuild(&props, &headers, &view);

        let rebuild = {
            let output = output.clone();
            let headers = headers.clone();
            let view = view.clone();
            move || output.rebuild(&props, &headers, &view)
        };
        let rebuild = Rc::new(rebuild);
        let headers_sub = headers.subscribe({
            let rebuild = rebuild.clone();
            move || rebuild()
        });
        let view_sub = view.subscribe(move || rebuild());
        tracing::trace!("navigation mounted");

        Ok(Self {
            output,
            headers_sub,
            view_sub,
        })
    }

    /// The latest rendered output.
    pub fn render(&self) -> Node {
        self.output.node.borrow().clone()
    }

    /// Number of times the output has been built, including the initial build.
    pub fn render_count(&self) -> usize {
        self.output.renders.get()
    }

    /// Whether both store subscriptions are live.
    pub fn is_subscribed(&self) -> bool {
        self.headers_sub.is_active() && self.view_sub.is_active()
    }

    /// Unsubscribe from both stores.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for Navigation {
    fn drop(&mut self) {
        self.headers_sub.unsubscribe();
        self.view_sub.unsubscribe();
        tracing::trace!("navigation unmounted");
    }
}
