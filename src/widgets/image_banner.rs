//! Image banner with optional link and caption.
//!
//! URLs pass through [`safe_url`]; a rejected `image_url` renders the
//! placeholder block and a rejected `link` renders the image unlinked.

use serde::Deserialize;

use crate::render::html::{Markup, element, safe_url};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub image_url: Option<String>,
    pub alt: Option<String>,
    pub link: Option<String>,
    pub caption: Option<String>,
}

pub fn render(settings: &Settings) -> Markup {
    let Some(src) = settings.image_url.as_deref().and_then(safe_url) else {
        return element("div")
            .class("image-banner image-banner--placeholder")
            .text("Banner image")
            .build();
    };

    let img = element("img")
        .class("image-banner__image")
        .attr("src", src)
        .attr("alt", settings.alt.as_deref().unwrap_or(""))
        .build();

    let media = match settings.link.as_deref().and_then(safe_url) {
        Some(href) => element("a")
            .class("image-banner__link")
            .attr("href", href)
            .child(img)
            .build(),
        None => img,
    };

    let mut figure = element("figure").class("image-banner").child(media);
    if let Some(caption) = settings.caption.as_deref().filter(|c| !c.trim().is_empty()) {
        figure = figure.child(
            element("figcaption")
                .class("image-banner__caption")
                .text(caption)
                .build(),
        );
    }
    figure.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_renders_placeholder() {
        let html = render(&Settings::default()).into_string();
        assert!(html.contains("image-banner--placeholder"));
    }

    #[test]
    fn full_banner_links_image_and_captions() {
        let html = render(&Settings {
            image_url: Some("https://cdn.example/banner.jpg".into()),
            alt: Some("Summer \"sale\"".into()),
            link: Some("/collections/summer".into()),
            caption: Some("Up to 50% off".into()),
        })
        .into_string();
        assert!(html.starts_with(r#"<figure class="image-banner"><a class="image-banner__link" href="/collections/summer">"#));
        assert!(html.contains(r#"alt="Summer &quot;sale&quot;""#));
        assert!(html.contains("<figcaption"));
    }

    #[test]
    fn script_urls_are_dropped() {
        let html = render(&Settings {
            image_url: Some("/a.png".into()),
            link: Some("javascript:alert(1)".into()),
            ..Settings::default()
        })
        .into_string();
        assert!(!html.contains("javascript"));
        assert!(!html.contains("<a "));

        let html = render(&Settings {
            image_url: Some("javascript:alert(1)".into()),
            ..Settings::default()
        })
        .into_string();
        assert!(html.contains("image-banner--placeholder"));
    }
}
