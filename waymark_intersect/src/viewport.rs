// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport: the scroll container that owns observations and delivers crossings.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::{Point, Rect, Size, Vec2};

use crate::crossing::{Crossing, CrossingState};
use crate::geometry::intersection_ratio;
use crate::options::WatchOptions;

/// Host-owned geometry of one rendered element.
///
/// An element starts either placed ([`new`](Self::new)) or unplaced
/// ([`new_unplaced`](Self::new_unplaced)); unplaced elements count as not visible.
/// The layout engine writes bounds with [`set_bounds`](Self::set_bounds) and then
/// calls [`Viewport::refresh`]. Bounds share the coordinate space of the viewport.
/// Cloning yields another handle to the same element.
#[derive(Clone)]
pub struct ElementHandle {
    inner: Rc<ElementInner>,
}

struct ElementInner {
    bounds: Cell<Option<Rect>>,
    mounted: Cell<bool>,
}

impl core::fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementHandle")
            .field("bounds", &self.bounds())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

impl Default for ElementHandle {
    fn default() -> Self {
        Self::new_unplaced()
    }
}

impl ElementHandle {
    /// Create a mounted element with the given bounds.
    pub fn new(bounds: Rect) -> Self {
        Self::with_bounds(Some(bounds))
    }

    /// Create a mounted element that has not been laid out yet.
    pub fn new_unplaced() -> Self {
        Self::with_bounds(None)
    }

    fn with_bounds(bounds: Option<Rect>) -> Self {
        Self {
            inner: Rc::new(ElementInner {
                bounds: Cell::new(bounds),
                mounted: Cell::new(true),
            }),
        }
    }

    /// Current bounds, or `None` before the first layout.
    pub fn bounds(&self) -> Option<Rect> {
        self.inner.bounds.get()
    }

    /// Whether the element has been laid out.
    pub fn is_placed(&self) -> bool {
        self.bounds().is_some()
    }

    /// Replace the bounds. Observers see the change on the next [`Viewport::refresh`].
    pub fn set_bounds(&self, bounds: Rect) {
        self.inner.bounds.set(Some(bounds));
    }

    /// Mark the element as removed from the document. Unmounted elements are never observed.
    pub fn unmount(&self) {
        self.inner.mounted.set(false);
    }

    /// Whether the element is still in the document.
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    /// Whether two handles refer to the same element.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Identifier of one observation registered with a [`Viewport`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObservationId(u64);

struct Observation {
    id: ObservationId,
    element: ElementHandle,
    options: WatchOptions,
    state: Cell<CrossingState>,
    /// Bumped on every crossing; a pending delivery whose count is behind is stale.
    crossings: Cell<u64>,
    active: Cell<bool>,
    callback: Box<dyn Fn(Crossing)>,
}

/// A crossing waiting to be delivered, tagged with the crossing count it was computed at.
type Pending = (Rc<Observation>, Crossing, u64);

struct ViewportInner {
    bounds: Cell<Rect>,
    observations: RefCell<Vec<Rc<Observation>>>,
    next_id: Cell<u64>,
}

/// A scrolling container and the observations measured against it.
///
/// Every geometry change ([`set_bounds`](Self::set_bounds), [`scroll_to`](Self::scroll_to),
/// [`scroll_by`](Self::scroll_by), [`resize`](Self::resize), [`refresh`](Self::refresh))
/// re-evaluates all observations and delivers crossings synchronously, in registration
/// order, after internal state is released. Callbacks may observe or unobserve; an
/// observation removed during delivery is not called afterwards.
///
/// Cloning yields another handle to the same viewport.
#[derive(Clone)]
pub struct Viewport {
    inner: Rc<ViewportInner>,
}

impl core::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Viewport")
            .field("bounds", &self.bounds())
            .field("observations", &self.observation_count())
            .finish()
    }
}

impl Viewport {
    /// Create a viewport covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            inner: Rc::new(ViewportInner {
                bounds: Cell::new(bounds),
                observations: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Current visible rectangle.
    pub fn bounds(&self) -> Rect {
        self.inner.bounds.get()
    }

    /// Replace the visible rectangle and re-evaluate observations.
    pub fn set_bounds(&self, bounds: Rect) {
        self.inner.bounds.set(bounds);
        self.refresh();
    }

    /// Move the visible rectangle so its origin is at `origin`.
    pub fn scroll_to(&self, origin: Point) {
        self.set_bounds(self.bounds().with_origin(origin));
    }

    /// Move the visible rectangle by `delta`.
    pub fn scroll_by(&self, delta: Vec2) {
        self.set_bounds(self.bounds() + delta);
    }

    /// Resize the visible rectangle, keeping its origin.
    pub fn resize(&self, size: Size) {
        self.set_bounds(self.bounds().with_size(size));
    }

    /// Number of live observations.
    pub fn observation_count(&self) -> usize {
        self.inner.observations.borrow().len()
    }

    /// Whether `id` is still registered.
    pub fn is_observing(&self, id: ObservationId) -> bool {
        self.inner
            .observations
            .borrow()
            .iter()
            .any(|o| o.id == id)
    }

    /// Whether two handles refer to the same viewport.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Start observing `element`.
    ///
    /// The element is evaluated immediately; if it already meets the threshold the
    /// callback receives [`Crossing::Enter`] before this returns. Returns `None` without
    /// registering anything when the element is unmounted.
    pub fn observe(
        &self,
        element: &ElementHandle,
        options: WatchOptions,
        callback: impl Fn(Crossing) + 'static,
    ) -> Option<ObservationId> {
        if !element.is_mounted() {
            return None;
        }
        let id = ObservationId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        let observation = Rc::new(Observation {
            id,
            element: element.clone(),
            options,
            state: Cell::new(CrossingState::new(options.threshold)),
            crossings: Cell::new(0),
            active: Cell::new(true),
            callback: Box::new(callback),
        });
        self.inner
            .observations
            .borrow_mut()
            .push(observation.clone());
        tracing::trace!(observation = id.0, threshold = options.threshold, "observe");

        let pending: Vec<Pending> = self
            .evaluate(&observation)
            .map(|(c, n)| (observation, c, n))
            .into_iter()
            .collect();
        deliver(pending);
        Some(id)
    }

    /// Stop observing. Returns `false` if `id` was not registered.
    pub fn unobserve(&self, id: ObservationId) -> bool {
        let mut observations = self.inner.observations.borrow_mut();
        let Some(pos) = observations.iter().position(|o| o.id == id) else {
            return false;
        };
        let removed = observations.remove(pos);
        removed.active.set(false);
        tracing::trace!(observation = id.0, "unobserve");
        true
    }

    /// Re-evaluate every observation against the current geometry.
    ///
    /// Call this after moving or resizing elements. A callback may itself scroll the
    /// viewport; crossings superseded by that nested evaluation are dropped.
    pub fn refresh(&self) {
        let snapshot: Vec<Rc<Observation>> = self.inner.observations.borrow().clone();
        let pending: Vec<Pending> = snapshot
            .into_iter()
            .filter_map(|o| self.evaluate(&o).map(|(c, n)| (o, c, n)))
            .collect();
        deliver(pending);
    }

    fn evaluate(&self, observation: &Observation) -> Option<(Crossing, u64)> {
        if !observation.active.get() || !observation.element.is_mounted() {
            return None;
        }
        let root = observation.options.root.resolve(self.bounds());
        let ratio = observation.element.bounds().map_or(0.0, |bounds| {
            intersection_ratio(bounds, root, observation.options.root_margin)
        });
        let mut state = observation.state.get();
        let crossing = state.update(ratio);
        observation.state.set(state);
        let crossing = crossing?;
        let count = observation.crossings.get() + 1;
        observation.crossings.set(count);
        tracing::debug!(observation = observation.id.0, ?crossing, ratio, "intersection crossing");
        Some((crossing, count))
    }
}

fn deliver(pending: Vec<Pending>) {
    for (observation, crossing, count) in pending {
        if observation.crossings.get() != count {
            tracing::trace!(observation = observation.id.0, ?crossing, "stale crossing dropped");
            continue;
        }
        if observation.active.get() && observation.options.transitions.reports(crossing) {
            (observation.callback)(crossing);
        }
    }
}
