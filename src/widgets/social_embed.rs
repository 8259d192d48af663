//! Social media grid. Renders placeholder tiles; no media references are read yet.

use crate::render::html::{Markup, element};

pub const TILE_COUNT: usize = 6;

pub fn render() -> Markup {
    let tiles = (1..=TILE_COUNT).map(|n| {
        element("div")
            .class("social-embed__tile")
            .attr("data-tile", &n.to_string())
            .build()
    });

    element("div")
        .class("social-embed")
        .child(
            element("h2")
                .class("social-embed__title")
                .text("Follow us")
                .build(),
        )
        .child(element("div").class("social-embed__grid").children(tiles).build())
        .build()
}
