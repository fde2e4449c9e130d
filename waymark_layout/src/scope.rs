// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree-scoped environment passed down the composition.
//!
//! A [`Scope`] is handed by reference to every component as it mounts. [`Root`](crate::Root)
//! derives a child scope carrying its [`LayoutSession`] with [`Scope::provide`], so
//! descendants reach the session without it being threaded through intermediate props,
//! and independent trees never share one.

use waymark_intersect::Viewport;

use crate::error::ContextMisuseError;
use crate::session::{HeaderStore, LayoutSession, ViewStore};

/// Environment visible to a component while it mounts.
#[derive(Clone, Debug)]
pub struct Scope {
    viewport: Viewport,
    session: Option<LayoutSession>,
}

impl Scope {
    /// A top-level scope with no session.
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            viewport: viewport.clone(),
            session: None,
        }
    }

    /// A child scope carrying `session`, sharing this scope's viewport.
    pub fn provide(&self, session: LayoutSession) -> Self {
        Self {
            viewport: self.viewport.clone(),
            session: Some(session),
        }
    }

    /// The viewport sections are observed in.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Whether a session has been provided.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// The enclosing session, or an error naming `component`.
    pub fn session(&self, component: &'static str) -> Result<&LayoutSession, ContextMisuseError> {
        self.session
            .as_ref()
            .ok_or(ContextMisuseError { component })
    }

    /// The enclosing session's header store.
    pub fn headers(&self, component: &'static str) -> Result<HeaderStore, ContextMisuseError> {
        self.session(component).map(|s| s.headers().clone())
    }

    /// The enclosing session's view store.
    pub fn view(&self, component: &'static str) -> Result<ViewStore, ContextMisuseError> {
        self.session(component).map(|s| s.view().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::create_session;
    use alloc::string::ToString;
    use kurbo::Rect;

    fn viewport() -> Viewport {
        Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn accessors_fail_fast_without_session() {
        let scope = Scope::new(&viewport());
        let err = scope.headers("Layout.Navigation").unwrap_err();
        assert_eq!(err.component, "Layout.Navigation");
        assert_eq!(
            err.to_string(),
            "Layout.Navigation must be a descendant of Layout.Root"
        );
        assert!(scope.view("Layout.Section").is_err());
    }

    #[test]
    fn provided_session_is_reachable() {
        let vp = viewport();
        let session = create_session();
        let child = Scope::new(&vp).provide(session.clone());
        assert!(child.has_session());
        assert!(child.session("x").unwrap().ptr_eq(&session));
        assert!(child.viewport().ptr_eq(&vp));
    }

    // Providing to a child never leaks into the parent.
    #[test]
    fn provide_does_not_touch_parent() {
        let parent = Scope::new(&viewport());
        let _child = parent.provide(create_session());
        assert!(!parent.has_session());
    }
}
