use crate::render::html::{Markup, element};

/// Placeholder player region.
pub fn render() -> Markup {
    element("div")
        .class("video")
        .child(
            element("div")
                .class("video__player")
                .attr("role", "img")
                .attr("aria-label", "Video placeholder")
                .child(element("span").class("video__play").text("Play video").build())
                .build(),
        )
        .build()
}
