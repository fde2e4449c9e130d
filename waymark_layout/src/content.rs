// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content: the container of sections and producer of the header list.
//!
//! ## Header publication
//!
//! The header list is derived from the sections' headings in document order each time the
//! children change. It is compared structurally with the last published list and written to
//! the session's header store only on [`Content::commit`], and only when it differs. Renders
//! never touch the store.

use alloc::vec::Vec;

use crate::error::ContextMisuseError;
use crate::render::{Element, ElementKind, Node};
use crate::scope::Scope;
use crate::section::{Section, SectionProps};
use crate::session::{HeaderList, HeaderStore};

/// Props for [`Content`]: one or more sections in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentProps {
    /// Section children.
    pub sections: Vec<SectionProps>,
}

impl ContentProps {
    /// Props from any sequence of sections.
    pub fn new(sections: impl IntoIterator<Item = SectionProps>) -> Self {
        Self {
            sections: sections.into_iter().collect(),
        }
    }
}

impl From<SectionProps> for ContentProps {
    fn from(section: SectionProps) -> Self {
        Self {
            sections: alloc::vec![section],
        }
    }
}

impl From<Vec<SectionProps>> for ContentProps {
    fn from(sections: Vec<SectionProps>) -> Self {
        Self { sections }
    }
}

/// Headings of `sections` in document order.
pub fn derive_headers(sections: &[SectionProps]) -> HeaderList {
    sections.iter().map(|s| s.heading.clone()).collect()
}

/// A mounted content container.
pub struct Content {
    scope: Scope,
    headers: HeaderStore,
    sections: Vec<Section>,
    derived: HeaderList,
    published: Option<HeaderList>,
}

impl core::fmt::Debug for Content {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Content")
            .field("derived", &self.derived)
            .field("published", &self.published)
            .field("sections", &self.sections.len())
            .finish_non_exhaustive()
    }
}

impl Content {
    /// Component name used in misuse errors.
    pub const NAME: &'static str = "Layout.Content";

    /// Mount inside `scope`, which must carry a session.
    pub fn mount(scope: &Scope, props: ContentProps) -> Result<Self, ContextMisuseError> {
        let headers = scope.headers(Self::NAME)?;
        let mut content = Self {
            scope: scope.clone(),
            headers,
            sections: Vec::new(),
            derived: Vec::new(),
            published: None,
        };
        content.set_sections(props)?;
        Ok(content)
    }

    /// Replace the section children.
    ///
    /// Sections are matched to existing instances by heading, in order; matched instances
    /// keep their element and watcher. Unmatched old instances are unmounted and new
    /// headings are mounted. Call [`commit`](Self::commit) after rendering to publish.
    pub fn set_sections(&mut self, props: ContentProps) -> Result<(), ContextMisuseError> {
        let derived = derive_headers(&props.sections);
        let mut previous: Vec<Option<Section>> =
            core::mem::take(&mut self.sections).into_iter().map(Some).collect();
        let mut next = Vec::with_capacity(props.sections.len());
        for section_props in props.sections {
            let reused = previous.iter_mut().find_map(|slot| {
                if slot
                    .as_ref()
                    .is_some_and(|s| s.heading() == section_props.heading)
                {
                    slot.take()
                } else {
                    None
                }
            });
            let section = match reused {
                Some(mut section) => {
                    section.update(section_props);
                    section
                }
                None => Section::mount(&self.scope, section_props)?,
            };
            next.push(section);
        }
        // Whatever was not reused is dropped here, detaching its watcher.
        drop(previous);
        self.sections = next;

        if derived != self.derived {
            tracing::trace!(headers = ?derived, "header list derived");
            self.derived = derived;
        }
        Ok(())
    }

    /// The header list derived from the current children.
    pub fn headers(&self) -> &[crate::SectionId] {
        &self.derived
    }

    /// Mounted sections in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First mounted section with `heading`.
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading() == heading)
    }

    /// Build the container and its sections.
    pub fn render(&self) -> Node {
        Element::new(ElementKind::Section)
            .children(self.sections.iter().map(Section::render))
            .into()
    }

    /// Run post-render effects: attach section watchers and publish a changed header list.
    ///
    /// Returns `true` if the header store was written.
    pub fn commit(&mut self) -> bool {
        for section in &mut self.sections {
            section.commit();
        }
        if self.published.as_ref() == Some(&self.derived) {
            return false;
        }
        let headers = self.derived.clone();
        self.published = Some(headers.clone());
        tracing::debug!(count = headers.len(), "publishing section headers");
        self.headers.set(headers);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{LayoutSession, create_session};
    use alloc::rc::Rc;
    use alloc::string::String;
    use core::cell::Cell;
    use kurbo::Rect;
    use waymark_intersect::Viewport;

    fn setup() -> (Viewport, Scope, LayoutSession) {
        let vp = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let session = create_session();
        let scope = Scope::new(&vp).provide(session.clone());
        (vp, scope, session)
    }

    fn props(ids: &[&str]) -> ContentProps {
        ContentProps::new(ids.iter().map(|id| SectionProps::new(*id)))
    }

    fn notifications(session: &LayoutSession) -> (Rc<Cell<usize>>, waymark_store::Subscription) {
        let hits = Rc::new(Cell::new(0));
        let sub = session.headers().subscribe({
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });
        (hits, sub)
    }

    #[test]
    fn mount_outside_root_fails_fast() {
        let vp = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let err = Content::mount(&Scope::new(&vp), props(&["A"])).unwrap_err();
        assert_eq!(err.component, "Layout.Content");
    }

    // Headers follow document order and are published on commit, not on mount.
    #[test]
    fn publishes_headers_in_document_order_on_commit() {
        let (_vp, scope, session) = setup();
        let mut content = Content::mount(&scope, props(&["Intro", "Problem", "Solution"])).unwrap();
        assert!(session.headers().get().is_empty());
        assert!(content.commit());
        assert_eq!(session.headers().get(), ["Intro", "Problem", "Solution"]);

        content.set_sections(props(&["Solution", "Intro", "Problem"])).unwrap();
        content.commit();
        assert_eq!(session.headers().get(), ["Solution", "Intro", "Problem"]);
    }

    // Re-rendering with structurally equal children does not notify again.
    #[test]
    fn unchanged_headers_are_not_republished() {
        let (_vp, scope, session) = setup();
        let (hits, _sub) = notifications(&session);
        let mut content = Content::mount(&scope, props(&["A", "B"])).unwrap();
        content.commit();
        content.set_sections(props(&["A", "B"])).unwrap();
        assert!(!content.commit());
        assert!(!content.commit());
        assert_eq!(hits.get(), 1);
    }

    // Body changes alone keep the header list, the instances, and their watchers.
    #[test]
    fn body_change_reuses_instances() {
        let (vp, scope, session) = setup();
        let (hits, _sub) = notifications(&session);
        let mut content = Content::mount(&scope, props(&["A"])).unwrap();
        content.commit();
        let element = content.section("A").unwrap().element().clone();

        let changed = ContentProps::from(SectionProps::new("A").child("new body"));
        content.set_sections(changed).unwrap();
        content.commit();
        assert!(content.section("A").unwrap().element().ptr_eq(&element));
        assert_eq!(vp.observation_count(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(content.render().text_content(), "new body");
    }

    #[test]
    fn removed_sections_are_unmounted() {
        let (vp, scope, _session) = setup();
        let mut content = Content::mount(&scope, props(&["A", "B", "C"])).unwrap();
        content.commit();
        assert_eq!(vp.observation_count(), 3);
        let b = content.section("B").unwrap().element().clone();

        content.set_sections(props(&["A", "C"])).unwrap();
        content.commit();
        assert_eq!(vp.observation_count(), 2);
        assert!(!b.is_mounted());
    }

    // Duplicate ids are kept as separate instances.
    #[test]
    fn duplicate_headings_are_kept() {
        let (vp, scope, session) = setup();
        let mut content = Content::mount(&scope, props(&["A", "A"])).unwrap();
        content.commit();
        assert_eq!(content.sections().len(), 2);
        assert_eq!(vp.observation_count(), 2);
        assert_eq!(session.headers().get(), ["A", "A"]);
        let ids: alloc::vec::Vec<String> = content
            .render()
            .find_all(ElementKind::Section)
            .iter()
            .filter_map(|e| e.id().map(String::from))
            .collect();
        assert_eq!(ids, ["A", "A"]);
    }

    #[test]
    fn derive_headers_reads_headings() {
        let sections = props(&["X", "Y"]).sections;
        assert_eq!(derive_headers(&sections), ["X", "Y"]);
    }
}
