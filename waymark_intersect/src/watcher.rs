// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped single-element watcher.

use crate::crossing::Crossing;
use crate::options::{Transitions, WatchOptions};
use crate::viewport::{ElementHandle, ObservationId, Viewport};

/// Watches at most one element of a [`Viewport`] at a time.
///
/// Attaching replaces any previous observation, [`detach`](Self::detach) is idempotent,
/// and dropping the watcher detaches. No callback runs after the watcher has
/// detached or been dropped.
///
/// ```
/// use core::cell::Cell;
/// use std::rc::Rc;
/// use kurbo::{Point, Rect};
/// use waymark_intersect::{ElementHandle, IntersectionWatcher, Viewport, WatchOptions};
///
/// let viewport = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
/// let element = ElementHandle::new(Rect::new(0.0, 200.0, 100.0, 300.0));
/// let entered = Rc::new(Cell::new(0));
///
/// let mut watcher = IntersectionWatcher::new(&viewport);
/// watcher.attach(Some(&element), {
///     let entered = entered.clone();
///     move || entered.set(entered.get() + 1)
/// }, WatchOptions::default());
///
/// viewport.scroll_to(Point::new(0.0, 200.0));
/// assert_eq!(entered.get(), 1);
///
/// drop(watcher);
/// viewport.scroll_to(Point::new(0.0, 0.0));
/// viewport.scroll_to(Point::new(0.0, 200.0));
/// assert_eq!(entered.get(), 1);
/// ```
pub struct IntersectionWatcher {
    viewport: Viewport,
    observation: Option<ObservationId>,
}

impl core::fmt::Debug for IntersectionWatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntersectionWatcher")
            .field("observation", &self.observation)
            .finish_non_exhaustive()
    }
}

impl IntersectionWatcher {
    /// Create a detached watcher for `viewport`.
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            viewport: viewport.clone(),
            observation: None,
        }
    }

    /// Observe `element`, calling `on_enter` each time it crosses into view.
    ///
    /// Only entries are reported regardless of `options.transitions`. Any previous
    /// observation is detached first. With no element, or an unmounted one, nothing
    /// is observed and `false` is returned.
    pub fn attach(
        &mut self,
        element: Option<&ElementHandle>,
        on_enter: impl Fn() + 'static,
        options: WatchOptions,
    ) -> bool {
        self.attach_with(
            element,
            move |crossing| {
                if crossing == Crossing::Enter {
                    on_enter();
                }
            },
            options.with_transitions(Transitions::ENTER),
        )
    }

    /// Observe `element`, calling `on_crossing` for each crossing in `options.transitions`.
    pub fn attach_with(
        &mut self,
        element: Option<&ElementHandle>,
        on_crossing: impl Fn(Crossing) + 'static,
        options: WatchOptions,
    ) -> bool {
        self.detach();
        let Some(element) = element else {
            return false;
        };
        self.observation = self.viewport.observe(element, options, on_crossing);
        self.observation.is_some()
    }

    /// Stop observing. Calling this when detached is a no-op.
    pub fn detach(&mut self) {
        if let Some(id) = self.observation.take() {
            self.viewport.unobserve(id);
        }
    }

    /// Whether an observation is live.
    pub fn is_attached(&self) -> bool {
        self.observation
            .is_some_and(|id| self.viewport.is_observing(id))
    }
}

impl Drop for IntersectionWatcher {
    fn drop(&mut self) {
        self.detach();
    }
}
