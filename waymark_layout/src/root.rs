// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root: creates the session and lays out the navigation and content slots.

use alloc::string::String;

use crate::content::{Content, ContentProps};
use crate::error::ContextMisuseError;
use crate::navigation::{Navigation, NavigationProps};
use crate::render::{Element, ElementKind, Node};
use crate::scope::Scope;
use crate::session::{LayoutSession, create_session};

/// Props for [`Root`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootProps {
    /// Render as the page's primary `main` landmark instead of a `section`.
    pub as_main: bool,
    /// Extra class on the container.
    pub class_name: Option<String>,
}

impl RootProps {
    /// Render as `main`.
    pub fn as_main(mut self) -> Self {
        self.as_main = true;
        self
    }

    /// Add a class to the container.
    pub fn with_class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }
}

/// A mounted layout root.
///
/// Owns one [`LayoutSession`] and the two slot components. The navigation is mounted
/// before the content so it observes the content's first publication.
pub struct Root {
    props: RootProps,
    session: LayoutSession,
    navigation: Navigation,
    content: Content,
}

impl core::fmt::Debug for Root {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Root")
            .field("props", &self.props)
            .field("navigation", &self.navigation)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

impl Root {
    /// Mount a root with its navigation and content children, in that order.
    ///
    /// The children are mounted in a child of `scope` carrying a fresh session, so this
    /// only fails if a child's own accessor fails.
    pub fn mount(
        scope: &Scope,
        props: RootProps,
        navigation: NavigationProps,
        content: ContentProps,
    ) -> Result<Self, ContextMisuseError> {
        let session = create_session();
        let inner = scope.provide(session.clone());
        let navigation = Navigation::mount(&inner, navigation)?;
        let content = Content::mount(&inner, content)?;
        Ok(Self {
            props,
            session,
            navigation,
            content,
        })
    }

    /// The session shared by this root's descendants.
    pub fn session(&self) -> &LayoutSession {
        &self.session
    }

    /// The navigation slot.
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// The content slot.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// The content slot, for updating its sections.
    pub fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    /// Build the container with the navigation slot first and the content slot second.
    pub fn render(&self) -> Node {
        let kind = if self.props.as_main {
            ElementKind::Main
        } else {
            ElementKind::Section
        };
        Element::new(kind)
            .class("container")
            .class_opt(self.props.class_name.as_deref())
            .child(
                Element::new(ElementKind::Div)
                    .class("navigation")
                    .child(self.navigation.render()),
            )
            .child(
                Element::new(ElementKind::Div)
                    .class("content")
                    .child(self.content.render()),
            )
            .into()
    }

    /// Run post-render effects of the subtree.
    pub fn commit(&mut self) {
        self.content.commit();
    }

    /// Tear down the subtree: sections detach their watchers, the navigation unsubscribes.
    pub fn unmount(self) {
        let Self {
            content,
            navigation,
            ..
        } = self;
        drop(content);
        drop(navigation);
        tracing::debug!("layout root unmounted");
    }
}
