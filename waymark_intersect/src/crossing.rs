// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold crossing state: turn a stream of intersection ratios into transitions.
//!
//! ## Usage
//!
//! 1) Compute the visible fraction of an element, e.g. with [`intersection_ratio`](crate::intersection_ratio).
//! 2) Feed it to [`CrossingState::update`].
//! 3) Act on `Some(Crossing::Enter)` / `Some(Crossing::Leave)`; `None` means the
//!    element stayed on the same side of the threshold.
//!
//! ## Minimal example
//!
//! ```
//! use waymark_intersect::{Crossing, CrossingState};
//! let mut s = CrossingState::new(0.8);
//! assert_eq!(s.update(0.5), None);
//! assert_eq!(s.update(0.9), Some(Crossing::Enter));
//! assert_eq!(s.update(0.95), None);
//! assert_eq!(s.update(0.7), Some(Crossing::Leave));
//! ```

/// Threshold used when none is given or the given one is not a number.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// A threshold transition event.
///
/// Returned by [`CrossingState::update`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Crossing {
    /// The visible fraction moved from below the threshold to at/above it.
    Enter,
    /// The visible fraction moved from at/above the threshold to below it.
    Leave,
}

/// Sanitize a threshold into `[0, 1]`; NaN becomes [`DEFAULT_THRESHOLD`].
pub fn clamp_threshold(threshold: f64) -> f64 {
    if threshold.is_nan() {
        DEFAULT_THRESHOLD
    } else {
        threshold.clamp(0.0, 1.0)
    }
}

/// Two-state machine over intersection ratios.
///
/// Starts "below" the threshold, so the first ratio at/above it reports
/// [`Crossing::Enter`]. With a threshold of `0`, any strictly positive ratio
/// counts as above.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CrossingState {
    threshold: f64,
    above: bool,
    last_ratio: Option<f64>,
}

impl Default for CrossingState {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl CrossingState {
    /// Create a state in the "below" position. `threshold` is sanitized with [`clamp_threshold`].
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: clamp_threshold(threshold),
            above: false,
            last_ratio: None,
        }
    }

    /// The sanitized threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the last ratio was at/above the threshold.
    pub fn is_above(&self) -> bool {
        self.above
    }

    /// The last ratio fed to [`update`](Self::update), if any.
    pub fn last_ratio(&self) -> Option<f64> {
        self.last_ratio
    }

    fn meets(&self, ratio: f64) -> bool {
        if self.threshold == 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        }
    }

    /// Record a new ratio and return the transition it causes, if any.
    ///
    /// NaN ratios are ignored.
    pub fn update(&mut self, ratio: f64) -> Option<Crossing> {
        if ratio.is_nan() {
            return None;
        }
        self.last_ratio = Some(ratio);
        let above = self.meets(ratio);
        if above == self.above {
            return None;
        }
        self.above = above;
        Some(if above {
            Crossing::Enter
        } else {
            Crossing::Leave
        })
    }

    /// Return to the initial "below" position, forgetting the last ratio.
    pub fn reset(&mut self) {
        self.above = false;
        self.last_ratio = None;
    }
}
