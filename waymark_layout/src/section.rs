// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section: a navigable landmark that publishes itself as active when scrolled into view.

use alloc::string::String;
use alloc::vec::Vec;

use waymark_intersect::{ElementHandle, IntersectionWatcher, WatchOptions};

use crate::error::ContextMisuseError;
use crate::render::{Element, ElementKind, Node};
use crate::scope::Scope;
use crate::session::{SectionId, ViewStore};

/// Props for [`Section`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionProps {
    /// Id, anchor target, and default navigation label.
    pub heading: SectionId,
    /// Section body.
    pub children: Vec<Node>,
    /// Render as a self-contained `article` instead of a `section`.
    pub as_article: bool,
    /// Extra class on the landmark element.
    pub class_name: Option<String>,
}

impl SectionProps {
    /// Props for a section with the given heading and no body.
    pub fn new(heading: impl Into<SectionId>) -> Self {
        Self {
            heading: heading.into(),
            ..Default::default()
        }
    }

    /// Append a body node.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Render as an `article`.
    pub fn as_article(mut self) -> Self {
        self.as_article = true;
        self
    }

    /// Add a class to the landmark element.
    pub fn with_class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }
}

/// A mounted section.
///
/// Owns the host element handle for its landmark and one [`IntersectionWatcher`].
/// The watcher is attached on [`commit`](Self::commit), re-attached when the heading
/// changes, and detached when the section is dropped.
pub struct Section {
    props: SectionProps,
    view: ViewStore,
    element: ElementHandle,
    watcher: IntersectionWatcher,
    watched: Option<SectionId>,
}

impl core::fmt::Debug for Section {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Section")
            .field("heading", &self.props.heading)
            .field("watched", &self.watched)
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

impl Section {
    /// Component name used in misuse errors.
    pub const NAME: &'static str = "Layout.Section";

    /// Mount inside `scope`, which must carry a session.
    pub fn mount(scope: &Scope, props: SectionProps) -> Result<Self, ContextMisuseError> {
        let view = scope.view(Self::NAME)?;
        Ok(Self {
            props,
            view,
            element: ElementHandle::new_unplaced(),
            watcher: IntersectionWatcher::new(scope.viewport()),
            watched: None,
        })
    }

    /// The section id.
    pub fn heading(&self) -> &str {
        &self.props.heading
    }

    /// Current props.
    pub fn props(&self) -> &SectionProps {
        &self.props
    }

    /// Host geometry handle of the landmark element.
    pub fn element(&self) -> &ElementHandle {
        &self.element
    }

    /// Whether the watcher is observing the element.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_attached()
    }

    /// Replace props. A heading change takes effect on the watcher at the next commit.
    pub fn update(&mut self, props: SectionProps) {
        self.props = props;
    }

    /// Build the landmark element.
    pub fn render(&self) -> Node {
        let kind = if self.props.as_article {
            ElementKind::Article
        } else {
            ElementKind::Section
        };
        Element::new(kind)
            .attr("id", self.props.heading.as_str())
            .class_opt(self.props.class_name.as_deref())
            .children(self.props.children.iter().cloned())
            .into()
    }

    /// Attach the watcher if it is not already watching the current heading.
    pub fn commit(&mut self) {
        if self.watched.as_deref() == Some(self.props.heading.as_str()) && self.is_watching() {
            return;
        }
        let heading = self.props.heading.clone();
        let view = self.view.clone();
        let on_enter = {
            let heading = heading.clone();
            move || {
                tracing::debug!(section = %heading, "section entered view");
                view.set(Some(heading.clone()));
            }
        };
        self.watcher
            .attach(Some(&self.element), on_enter, WatchOptions::default());
        self.watched = Some(heading);
    }

    /// Detach the watcher and remove the element from the document.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for Section {
    fn drop(&mut self) {
        self.watcher.detach();
        self.element.unmount();
    }
}
