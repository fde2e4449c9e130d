// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Layout: a page layout with a side navigation that follows the reader.
//!
//! A [`Root`] holds two slots: a [`Navigation`] listing every section and a [`Content`]
//! holding the [`Section`]s themselves. Content publishes the section headings in
//! document order; each section watches its own landmark and publishes itself as the
//! active section once it is at least 80% visible. The navigation renders one link per
//! heading and marks the active one.
//!
//! ## Sessions
//!
//! The header list and the active section live in two [`waymark_store::Store`]s grouped
//! in a [`LayoutSession`]. Each root creates its own session and hands it down through a
//! [`Scope`], so independent layouts on the same page never share state. Mounting a
//! navigation, content, or section outside a root fails with [`ContextMisuseError`].
//!
//! ## Render and commit
//!
//! `render` is pure on every component. Store writes and watcher attachment happen in
//! `commit`, which the host calls after rendering. [`LayoutTree`] drives both phases.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect};
//! use waymark_intersect::Viewport;
//! use waymark_layout::{ContentProps, LayoutTree, NavigationProps, RootProps, SectionProps};
//!
//! let viewport = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let mut tree = LayoutTree::new(&viewport);
//! tree.mount(
//!     RootProps::default().as_main(),
//!     NavigationProps::default(),
//!     ContentProps::new([SectionProps::new("Introduction"), SectionProps::new("Problem")]),
//! )
//! .unwrap();
//!
//! // The host lays the sections out and tells the viewport.
//! tree.place("Introduction", Rect::new(0.0, 0.0, 800.0, 600.0));
//! tree.place("Problem", Rect::new(0.0, 600.0, 800.0, 1200.0));
//! viewport.refresh();
//!
//! viewport.scroll_to(Point::new(0.0, 600.0));
//! let session = tree.session().unwrap();
//! assert_eq!(session.view().get().as_deref(), Some("Problem"));
//! ```
//!
//! The [`navbar`] and [`logo`] modules hold two stateless presentational pieces used
//! alongside the layout.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod content;
mod error;
mod navigation;
mod render;
mod root;
mod scope;
mod section;
mod session;
mod tree;

pub mod logo;
pub mod navbar;

pub use content::{Content, ContentProps, derive_headers};
pub use error::ContextMisuseError;
pub use navigation::{ACTIVE_CLASS, LinkRenderer, Navigation, NavigationProps, render_navigation};
pub use render::{Element, ElementKind, Node};
pub use root::{Root, RootProps};
pub use scope::Scope;
pub use section::{Section, SectionProps};
pub use session::{
    ActiveSection, HeaderList, HeaderStore, LayoutSession, SectionId, ViewStore, create_session,
};
pub use tree::{LayoutTree, TreeState};
