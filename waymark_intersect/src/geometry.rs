// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection geometry: root margins, observation roots, and visible fractions.

use core::fmt;
use core::str::FromStr;

use kurbo::{Insets, Rect};

/// One side of a [`RootMargin`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarginValue {
    /// Absolute length in layout units.
    Px(f64),
    /// Percentage of the root's extent along the same axis.
    Percent(f64),
}

impl MarginValue {
    fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => extent * p / 100.0,
        }
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Amount by which the observation root is grown (positive) or shrunk (negative)
/// before intersecting.
///
/// Parses from CSS-style shorthand with one to four values in
/// top/right/bottom/left order: `"0px"`, `"10px 20px"`, `"-5% 0px 10px"`,
/// `"1px 2px 3px 4px"`. A bare number is read as pixels.
///
/// ```
/// use waymark_intersect::{MarginValue, RootMargin};
/// let m: RootMargin = "10px 5%".parse().unwrap();
/// assert_eq!(m.top, MarginValue::Px(10.0));
/// assert_eq!(m.left, MarginValue::Percent(5.0));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RootMargin {
    /// Top margin.
    pub top: MarginValue,
    /// Right margin.
    pub right: MarginValue,
    /// Bottom margin.
    pub bottom: MarginValue,
    /// Left margin.
    pub left: MarginValue,
}

impl RootMargin {
    /// No margin (`"0px"`).
    pub const ZERO: Self = Self::uniform(MarginValue::Px(0.0));

    /// The same margin on all four sides.
    pub const fn uniform(value: MarginValue) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Resolve percentages against `root` and return Kurbo insets.
    pub fn to_insets(&self, root: Rect) -> Insets {
        let (w, h) = (root.width(), root.height());
        Insets::new(
            self.left.resolve(w),
            self.top.resolve(h),
            self.right.resolve(w),
            self.bottom.resolve(h),
        )
    }

    /// Apply this margin to `root`.
    pub fn apply(&self, root: Rect) -> Rect {
        root.inset(self.to_insets(root))
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Error returned when a [`RootMargin`] string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RootMarginParseError {
    /// The string had no values or more than four.
    #[error("root margin must have 1 to 4 values, found {0}")]
    ValueCount(usize),
    /// A value was not a number followed by `px`, `%`, or nothing.
    #[error("invalid root margin value at position {0}")]
    InvalidValue(usize),
}

fn parse_value(token: &str, position: usize) -> Result<MarginValue, RootMarginParseError> {
    let invalid = || RootMarginParseError::InvalidValue(position);
    let value = if let Some(n) = token.strip_suffix("px") {
        MarginValue::Px(n.parse().map_err(|_| invalid())?)
    } else if let Some(n) = token.strip_suffix('%') {
        MarginValue::Percent(n.parse().map_err(|_| invalid())?)
    } else {
        MarginValue::Px(token.parse().map_err(|_| invalid())?)
    };
    match value {
        MarginValue::Px(v) | MarginValue::Percent(v) if !v.is_finite() => Err(invalid()),
        _ => Ok(value),
    }
}

impl FromStr for RootMargin {
    type Err = RootMarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = [MarginValue::Px(0.0); 4];
        let mut count = 0;
        for (i, token) in s.split_whitespace().enumerate() {
            if i >= 4 {
                return Err(RootMarginParseError::ValueCount(s.split_whitespace().count()));
            }
            values[i] = parse_value(token, i)?;
            count += 1;
        }
        let [a, b, c, d] = values;
        match count {
            1 => Ok(Self::uniform(a)),
            2 => Ok(Self {
                top: a,
                right: b,
                bottom: a,
                left: b,
            }),
            3 => Ok(Self {
                top: a,
                right: b,
                bottom: c,
                left: b,
            }),
            4 => Ok(Self {
                top: a,
                right: b,
                bottom: c,
                left: d,
            }),
            n => Err(RootMarginParseError::ValueCount(n)),
        }
    }
}

/// The container an element's visibility is measured against.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum ObserveRoot {
    /// The [`Viewport`](crate::Viewport) the observation is registered with.
    #[default]
    Viewport,
    /// A fixed rectangle in the same coordinate space as element bounds.
    Bounds(Rect),
}

impl ObserveRoot {
    /// The root rectangle, given the current viewport bounds.
    pub fn resolve(self, viewport: Rect) -> Rect {
        match self {
            Self::Viewport => viewport,
            Self::Bounds(r) => r,
        }
    }
}

/// Fraction of `target` visible inside `root` after applying `margin`, in `[0, 1]`.
///
/// A zero-area target reports `1.0` when it touches or lies within the root and
/// `0.0` otherwise.
///
/// ```
/// use kurbo::Rect;
/// use waymark_intersect::{RootMargin, intersection_ratio};
///
/// let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
/// let half_out = Rect::new(0.0, 50.0, 100.0, 150.0);
/// assert_eq!(intersection_ratio(half_out, viewport, RootMargin::ZERO), 0.5);
/// ```
pub fn intersection_ratio(target: Rect, root: Rect, margin: RootMargin) -> f64 {
    let target = target.abs();
    let root = margin.apply(root);
    if root.x1 < root.x0 || root.y1 < root.y0 {
        return 0.0;
    }

    let area = target.area();
    if area <= 0.0 {
        let touches = target.x0 <= root.x1
            && target.x1 >= root.x0
            && target.y0 <= root.y1
            && target.y1 >= root.y0;
        return if touches { 1.0 } else { 0.0 };
    }

    let visible = target.intersect(root).area();
    (visible / area).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn fully_inside_is_one() {
        let r = intersection_ratio(Rect::new(10.0, 10.0, 50.0, 50.0), viewport(), RootMargin::ZERO);
        assert_eq!(r, 1.0);
    }

    #[test]
    fn disjoint_is_zero() {
        let r = intersection_ratio(
            Rect::new(0.0, 200.0, 100.0, 300.0),
            viewport(),
            RootMargin::ZERO,
        );
        assert_eq!(r, 0.0);
    }

    // Partial overlap along the scroll axis.
    #[test]
    fn partial_overlap_is_fraction() {
        let r = intersection_ratio(
            Rect::new(0.0, 80.0, 100.0, 180.0),
            viewport(),
            RootMargin::ZERO,
        );
        assert!(r > 0.199 && r < 0.201);
    }

    // Inverted input rects are normalized first.
    #[test]
    fn inverted_target_is_normalized() {
        let r = intersection_ratio(
            Rect::new(50.0, 50.0, 10.0, 10.0),
            viewport(),
            RootMargin::ZERO,
        );
        assert_eq!(r, 1.0);
    }

    // Growing the root brings an adjacent element fully in.
    #[test]
    fn positive_margin_grows_root() {
        let target = Rect::new(0.0, 100.0, 100.0, 150.0);
        assert_eq!(intersection_ratio(target, viewport(), RootMargin::ZERO), 0.0);
        let margin: RootMargin = "50px".parse().unwrap();
        assert_eq!(intersection_ratio(target, viewport(), margin), 1.0);
    }

    // Shrinking past the root's size leaves nothing visible.
    #[test]
    fn collapsed_root_sees_nothing() {
        let margin: RootMargin = "-60%".parse().unwrap();
        let r = intersection_ratio(Rect::new(40.0, 40.0, 60.0, 60.0), viewport(), margin);
        assert_eq!(r, 0.0);
    }

    #[test]
    fn zero_area_target_edges() {
        let on_edge = Rect::new(0.0, 100.0, 100.0, 100.0);
        let outside = Rect::new(0.0, 101.0, 100.0, 101.0);
        assert_eq!(intersection_ratio(on_edge, viewport(), RootMargin::ZERO), 1.0);
        assert_eq!(intersection_ratio(outside, viewport(), RootMargin::ZERO), 0.0);
    }

    #[test]
    fn parse_shorthand_forms() {
        let one: RootMargin = "0px".parse().unwrap();
        assert_eq!(one, RootMargin::ZERO);

        let two: RootMargin = "10px 20".parse().unwrap();
        assert_eq!(two.top, MarginValue::Px(10.0));
        assert_eq!(two.bottom, MarginValue::Px(10.0));
        assert_eq!(two.left, MarginValue::Px(20.0));

        let three: RootMargin = "1px 2px 3px".parse().unwrap();
        assert_eq!(three.bottom, MarginValue::Px(3.0));
        assert_eq!(three.left, MarginValue::Px(2.0));

        let four: RootMargin = " 1px 2px 3px -4% ".parse().unwrap();
        assert_eq!(four.left, MarginValue::Percent(-4.0));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            "".parse::<RootMargin>(),
            Err(RootMarginParseError::ValueCount(0))
        );
        assert_eq!(
            "1px 2px 3px 4px 5px".parse::<RootMargin>(),
            Err(RootMarginParseError::ValueCount(5))
        );
        assert_eq!(
            "1px wide".parse::<RootMargin>(),
            Err(RootMarginParseError::InvalidValue(1))
        );
        assert_eq!(
            "NaNpx".parse::<RootMargin>(),
            Err(RootMarginParseError::InvalidValue(0))
        );
    }

    #[test]
    fn percent_resolves_per_axis() {
        let root = Rect::new(0.0, 0.0, 200.0, 100.0);
        let m: RootMargin = "10%".parse().unwrap();
        let grown = m.apply(root);
        assert_eq!(grown, Rect::new(-20.0, -10.0, 220.0, 110.0));
    }

    #[test]
    fn fixed_root_ignores_viewport() {
        let fixed = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(ObserveRoot::Bounds(fixed).resolve(viewport()), fixed);
        assert_eq!(ObserveRoot::Viewport.resolve(viewport()), viewport());
    }
}
