// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout session: the header and view stores shared by one layout tree.

use alloc::string::String;
use alloc::vec::Vec;

use waymark_store::Store;

/// Identifier of one navigable section; doubles as its anchor and element id.
pub type SectionId = String;

/// Section ids in document order.
pub type HeaderList = Vec<SectionId>;

/// The section currently considered in view, if any.
pub type ActiveSection = Option<SectionId>;

/// Store of the registered section ids.
pub type HeaderStore = Store<HeaderList>;

/// Store of the active section.
pub type ViewStore = Store<ActiveSection>;

/// The stores shared by one [`Root`](crate::Root) and its descendants.
///
/// Cloning yields another handle to the same stores.
#[derive(Clone, Debug, Default)]
pub struct LayoutSession {
    headers: HeaderStore,
    view: ViewStore,
}

/// Create a session with an empty header list and no active section.
pub fn create_session() -> LayoutSession {
    tracing::debug!("layout session created");
    LayoutSession::default()
}

impl LayoutSession {
    /// The header store. Written by [`Content`](crate::Content).
    pub fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// The view store. Written by [`Section`](crate::Section) watchers.
    pub fn view(&self) -> &ViewStore {
        &self.view
    }

    /// Whether two handles refer to the same session.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.headers.ptr_eq(&other.headers) && self.view.ptr_eq(&other.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_empty() {
        let s = create_session();
        assert!(s.headers().get().is_empty());
        assert_eq!(s.view().get(), None);
    }

    // Each call creates independent stores.
    #[test]
    fn sessions_are_independent() {
        let a = create_session();
        let b = create_session();
        a.view().set(Some("Intro".into()));
        assert_eq!(b.view().get(), None);
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }
}
