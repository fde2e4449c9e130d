// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The site logo mark.

use crate::render::{Element, ElementKind, Node};

/// A filled orange circle in a 100×100 view box, 80 units tall.
pub fn site_logo() -> Node {
    Element::new(ElementKind::Svg)
        .attr("viewBox", "0 0 100 100")
        .attr("height", "80")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .child(
            Element::new(ElementKind::Circle)
                .attr("cx", "50")
                .attr("cy", "50")
                .attr("r", "50")
                .attr("fill", "orange"),
        )
        .into()
}
