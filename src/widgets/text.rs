//! Plain text block: optional heading plus paragraphs split on blank lines.

use serde::Deserialize;

use crate::render::html::{Markup, element};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub heading: Option<String>,
    pub body: Option<String>,
}

pub fn render(settings: &Settings) -> Markup {
    let mut block = element("div").class("text-block");

    if let Some(heading) = settings.heading.as_deref().map(str::trim)
        && !heading.is_empty()
    {
        block = block.child(element("h2").class("text-block__heading").text(heading).build());
    }

    let body = settings.body.as_deref().unwrap_or("");
    let paragraphs = body
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| element("p").class("text-block__body").text(p).build());

    block.children(paragraphs).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_render_empty_block() {
        assert_eq!(
            render(&Settings::default()).as_str(),
            r#"<div class="text-block"></div>"#
        );
    }

    #[test]
    fn splits_paragraphs_and_escapes() {
        let out = render(&Settings {
            heading: Some("Sale <today>".into()),
            body: Some("First & best\n\n\n\nSecond".into()),
        });
        let html = out.as_str();
        assert!(html.contains("Sale &lt;today&gt;"));
        assert!(html.contains(">First &amp; best</p>"));
        assert_eq!(html.matches("<p ").count(), 2);
    }
}
