//! Brand showcase. Static placeholder until brand data is wired to settings.

use crate::render::html::{Markup, element};

pub const PLACEHOLDER_BRANDS: [&str; 6] = [
    "Brand A", "Brand B", "Brand C", "Brand D", "Brand E", "Brand F",
];

pub fn render() -> Markup {
    let items = PLACEHOLDER_BRANDS
        .iter()
        .map(|name| element("li").class("brands__item").text(name).build());

    element("div")
        .class("brands")
        .child(element("h2").class("brands__title").text("Our Brands").build())
        .child(element("ul").class("brands__list").children(items).build())
        .build()
}
