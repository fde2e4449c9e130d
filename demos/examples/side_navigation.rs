// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side navigation page.
//!
//! Mount a layout with four sections, lay them out one screen apart, and scroll
//! through the page, printing the navigation each time the active section changes.
//!
//! Run:
//! - `cargo run -p waymark_demos --example side_navigation`
//! - `RUST_LOG=debug cargo run -p waymark_demos --example side_navigation` to see crossings.

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use waymark_intersect::Viewport;
use waymark_layout::{
    ContentProps, Element, ElementKind, LayoutTree, NavigationProps, RootProps, SectionProps,
};

const WIDTH: f64 = 800.0;
const SCREEN: f64 = 600.0;
const LOREM: &str = "Lorem ipsum dolor sit amet consectetur adipisicing elit.";

fn section(heading: &str, title: &str) -> SectionProps {
    SectionProps::new(heading)
        .with_class_name("section")
        .child(Element::new(ElementKind::H2).child(title))
        .child(Element::new(ElementKind::P).child(LOREM))
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .try_init();

    let headings = ["Introduction", "Problem", "Solution", "Caveats"];
    let content = ContentProps::new([
        section("Introduction", "Introduction"),
        section("Problem", "Problem"),
        section("Solution", "Proposed Solution"),
        section("Caveats", "Caveats"),
    ]);

    let viewport = Viewport::new(Rect::new(0.0, 0.0, WIDTH, SCREEN));
    let mut tree = LayoutTree::new(&viewport);
    tree.mount(
        RootProps::default().as_main().with_class_name("Main"),
        NavigationProps::default().with_class_name("navigation-internal"),
        content,
    )
    .expect("mounted at the top level");

    for (i, heading) in headings.iter().enumerate() {
        let top = i as f64 * SCREEN;
        tree.place(heading, Rect::new(0.0, top, WIDTH, top + SCREEN));
    }
    viewport.refresh();

    let session = tree.session().expect("tree is mounted").clone();
    let _printer = session.view().subscribe({
        let view = session.view().clone();
        move || match view.get() {
            Some(id) => println!("active: {id}"),
            None => println!("active: none"),
        }
    });

    let page = tree.render().expect("tree is mounted");
    println!("{page}\n");

    // Scroll down in quarter screens, then jump back to the top.
    for step in 1..=12 {
        viewport.scroll_to(Point::new(0.0, f64::from(step) * SCREEN / 4.0));
    }
    viewport.scroll_to(Point::ZERO);

    if let Some(nav) = tree.root().map(|root| root.navigation().render()) {
        println!("\n{nav}");
    }

    tree.unmount();
    println!("observations after unmount: {}", viewport.observation_count());
}
