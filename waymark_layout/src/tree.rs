// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host driver for one layout tree.
//!
//! [`LayoutTree`] owns a mounted [`Root`] and runs the render and commit phases in order,
//! so the header list is published after the navigation has subscribed and section
//! watchers are attached after their elements exist. Geometry is the host's job: after
//! mounting, place section elements with [`LayoutTree::place`] and call
//! [`Viewport::refresh`] or scroll the viewport.

use alloc::vec::Vec;

use kurbo::Rect;
use waymark_intersect::{ElementHandle, Viewport};

use crate::content::ContentProps;
use crate::error::ContextMisuseError;
use crate::navigation::NavigationProps;
use crate::render::Node;
use crate::root::{Root, RootProps};
use crate::scope::Scope;
use crate::session::LayoutSession;

/// Lifecycle of a [`LayoutTree`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TreeState {
    /// Nothing mounted yet.
    #[default]
    Uninitialized,
    /// A root is mounted and committed.
    Active,
    /// The root was unmounted.
    Destroyed,
}

/// A mounted layout tree bound to one viewport.
#[derive(Debug)]
pub struct LayoutTree {
    viewport: Viewport,
    root: Option<Root>,
    state: TreeState,
}

impl LayoutTree {
    /// An empty tree observing sections in `viewport`.
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            viewport: viewport.clone(),
            root: None,
            state: TreeState::Uninitialized,
        }
    }

    /// Mount a root and commit it.
    ///
    /// A previously mounted root is unmounted first.
    pub fn mount(
        &mut self,
        props: RootProps,
        navigation: NavigationProps,
        content: ContentProps,
    ) -> Result<(), ContextMisuseError> {
        if let Some(old) = self.root.take() {
            old.unmount();
        }
        let mut root = Root::mount(&Scope::new(&self.viewport), props, navigation, content)?;
        root.commit();
        tracing::debug!(sections = root.content().sections().len(), "layout tree mounted");
        self.root = Some(root);
        self.state = TreeState::Active;
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TreeState {
        self.state
    }

    /// The viewport sections are observed in.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The mounted root.
    pub fn root(&self) -> Option<&Root> {
        self.root.as_ref()
    }

    /// The mounted root's session.
    pub fn session(&self) -> Option<&LayoutSession> {
        self.root.as_ref().map(Root::session)
    }

    /// Render the whole tree.
    pub fn render(&self) -> Option<Node> {
        self.root.as_ref().map(Root::render)
    }

    /// Replace the content's sections and commit.
    ///
    /// Returns `false` if nothing is mounted.
    pub fn set_sections(&mut self, content: ContentProps) -> Result<bool, ContextMisuseError> {
        let Some(root) = self.root.as_mut() else {
            return Ok(false);
        };
        root.content_mut().set_sections(content)?;
        root.commit();
        Ok(true)
    }

    /// Host element of the first section with id `id`.
    pub fn element(&self, id: &str) -> Option<ElementHandle> {
        self.root
            .as_ref()
            .and_then(|root| root.content().section(id))
            .map(|section| section.element().clone())
    }

    /// Host elements of every section with id `id`, in document order.
    pub fn elements(&self, id: &str) -> Vec<ElementHandle> {
        self.root
            .as_ref()
            .map(|root| {
                root.content()
                    .sections()
                    .iter()
                    .filter(|section| section.heading() == id)
                    .map(|section| section.element().clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Set the layout bounds of the first section with id `id`.
    /// Returns `false` if there is no such section.
    ///
    /// Observers are not re-evaluated until the viewport refreshes or scrolls.
    /// Use [`place_at`](Self::place_at) to reach later sections sharing an id.
    pub fn place(&self, id: &str, bounds: Rect) -> bool {
        match self.element(id) {
            Some(element) => {
                element.set_bounds(bounds);
                true
            }
            None => false,
        }
    }

    /// Set the layout bounds of the section at document position `index`.
    /// Returns `false` if `index` is out of range.
    pub fn place_at(&self, index: usize, bounds: Rect) -> bool {
        let Some(section) = self
            .root
            .as_ref()
            .and_then(|root| root.content().sections().get(index))
        else {
            return false;
        };
        section.element().set_bounds(bounds);
        true
    }

    /// Unmount the root. Does nothing if nothing is mounted.
    pub fn unmount(&mut self) {
        if let Some(root) = self.root.take() {
            root.unmount();
            self.state = TreeState::Destroyed;
        }
    }
}

impl Drop for LayoutTree {
    fn drop(&mut self) {
        self.unmount();
    }
}
