// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navbar basics.
//!
//! Build a sticky navbar whose logo is declared last but rendered first.
//!
//! Run:
//! - `cargo run -p waymark_demos --example navbar_basic`

use waymark_layout::logo::site_logo;
use waymark_layout::navbar::{Logo, NavbarItem, NavbarProps, navbar_root};
use waymark_layout::{Element, ElementKind};

fn main() {
    let items: Vec<NavbarItem> = vec![
        Element::new(ElementKind::A)
            .attr("href", "/docs")
            .child("Docs")
            .into(),
        Element::new(ElementKind::A)
            .attr("href", "/blog")
            .child("Blog")
            .into(),
        Logo::new(site_logo()).link_home().into(),
    ];
    let header = navbar_root(
        &NavbarProps::default().sticky().with_class_name("glass-frosted"),
        items,
    );
    println!("{header}");

    let first = header
        .as_element()
        .and_then(|h| h.child_elements().next())
        .map(|e| e.kind);
    assert_eq!(first, Some(ElementKind::A), "logo link should come first");
}
