// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Intersect: Kurbo-native viewport intersection tracking.
//!
//! Tracks how much of an element is visible inside a scrolling container and reports
//! when that fraction crosses a threshold, once per crossing rather than once per
//! geometry update.
//!
//! ## Pieces
//!
//! - [`intersection_ratio`]: visible fraction of a rectangle inside a root, after a [`RootMargin`].
//! - [`CrossingState`]: turns successive ratios into [`Crossing::Enter`] / [`Crossing::Leave`].
//! - [`Viewport`]: the scroll container. Owns observations and re-evaluates them whenever
//!   it scrolls, resizes, or is told element geometry changed.
//! - [`ElementHandle`]: host-owned element bounds, shared with the viewport.
//! - [`IntersectionWatcher`]: scoped, single-element observation with an `on_enter` callback,
//!   detached on drop.
//! - [`WatchOptions`]: threshold (default `0.8`), root margin (default `0px`), root
//!   (default the viewport), and reported [`Transitions`].
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange anything.
//! The host computes element bounds in viewport coordinates, writes them with
//! [`ElementHandle::set_bounds`], and calls [`Viewport::refresh`].
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect};
//! use waymark_intersect::{Crossing, ElementHandle, Transitions, Viewport, WatchOptions};
//!
//! let viewport = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let section = ElementHandle::new(Rect::new(0.0, 600.0, 800.0, 1000.0));
//!
//! let options = WatchOptions::default().with_transitions(Transitions::all());
//! let _id = viewport.observe(&section, options, |crossing| {
//!     if crossing == Crossing::Enter {
//!         // highlight the matching navigation entry
//!     }
//! });
//!
//! viewport.scroll_to(Point::new(0.0, 500.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod crossing;
mod geometry;
mod options;
mod viewport;
mod watcher;

pub use crossing::{Crossing, CrossingState, DEFAULT_THRESHOLD, clamp_threshold};
pub use geometry::{MarginValue, ObserveRoot, RootMargin, RootMarginParseError, intersection_ratio};
pub use options::{Transitions, WatchOptions};
pub use viewport::{ElementHandle, ObservationId, Viewport};
pub use watcher::IntersectionWatcher;
