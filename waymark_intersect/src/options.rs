// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observation options.

use crate::crossing::{Crossing, DEFAULT_THRESHOLD, clamp_threshold};
use crate::geometry::{ObserveRoot, RootMargin};

bitflags::bitflags! {
    /// Which threshold crossings an observation reports.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Transitions: u8 {
        /// Report below → at/above crossings.
        const ENTER = 0b0000_0001;
        /// Report at/above → below crossings.
        const LEAVE = 0b0000_0010;
    }
}

impl Default for Transitions {
    fn default() -> Self {
        Self::ENTER
    }
}

impl Transitions {
    /// Whether `crossing` is one of the reported transitions.
    pub fn reports(self, crossing: Crossing) -> bool {
        match crossing {
            Crossing::Enter => self.contains(Self::ENTER),
            Crossing::Leave => self.contains(Self::LEAVE),
        }
    }
}

/// Options for one observation.
///
/// Defaults match the usual "section scrolled into view" setup: threshold `0.8`,
/// no root margin, measured against the viewport, reporting entries only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatchOptions {
    /// Visible fraction in `[0, 1]` the element must reach. Out-of-range values are clamped
    /// when the observation starts; NaN falls back to `0.8`.
    pub threshold: f64,
    /// Margin applied to the root before intersecting.
    pub root_margin: RootMargin,
    /// Container the visible fraction is measured against.
    pub root: ObserveRoot,
    /// Crossings delivered to the callback.
    pub transitions: Transitions,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: RootMargin::ZERO,
            root: ObserveRoot::Viewport,
            transitions: Transitions::ENTER,
        }
    }
}

impl WatchOptions {
    /// Set the threshold, sanitized into `[0, 1]`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = clamp_threshold(threshold);
        self
    }

    /// Set the root margin.
    pub fn with_root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    /// Set the observation root.
    pub fn with_root(mut self, root: ObserveRoot) -> Self {
        self.root = root;
        self
    }

    /// Set the reported transitions.
    pub fn with_transitions(mut self, transitions: Transitions) -> Self {
        self.transitions = transitions;
        self
    }
}
