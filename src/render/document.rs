//! Page shell: wraps rendered sections in document order and reports degraded slots.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::render::html::{Markup, element};
use crate::render::page::PageSummary;
use crate::widgets::RenderedSection;

#[derive(Debug, Clone)]
pub struct DocumentOptions {
    pub title: String,
    /// Emit an empty marker section for degraded slots instead of skipping them.
    pub show_unsupported: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: "Storefront".to_string(),
            show_unsupported: false,
        }
    }
}

/// Log one warning per degraded slot. Returns how many were reported.
pub fn report_degraded(page: &str, sections: &[RenderedSection]) -> usize {
    let mut count = 0;
    for (slot, section) in sections.iter().enumerate() {
        if !section.status.is_degraded() {
            continue;
        }
        count += 1;
        warn!(
            target: "render",
            page,
            slot,
            widget_id = %section.widget_id,
            widget_type = %section.kind,
            status = ?section.status,
            "widget degraded: {}",
            section.detail.as_deref().unwrap_or("no detail")
        );
    }
    count
}

fn section_markup(section: &RenderedSection, opts: &DocumentOptions) -> Option<Markup> {
    if section.status.is_degraded() {
        if !opts.show_unsupported {
            return None;
        }
        return Some(
            element("section")
                .class("widget widget--unsupported")
                .attr("data-widget-id", &section.widget_id)
                .attr("data-widget-type", section.kind.tag())
                .build(),
        );
    }
    Some(
        element("section")
            .class(&format!("widget widget--{}", section.kind.tag()))
            .attr("data-widget-id", &section.widget_id)
            .child(section.html.clone())
            .build(),
    )
}

/// Full HTML document for a page.
pub fn compose_document(page: &str, sections: &[RenderedSection], opts: &DocumentOptions) -> String {
    let body: Markup = sections
        .iter()
        .filter_map(|s| section_markup(s, opts))
        .flat_map(|m| [Markup::text("\n"), m])
        .chain(std::iter::once(Markup::text("\n")))
        .collect();

    let head = element("head")
        .child(element("meta").attr("charset", "utf-8").build())
        .child(element("title").text(&opts.title).build())
        .build();
    let main = element("main")
        .class("page")
        .attr("data-page", page)
        .child(body)
        .build();
    let html = element("html")
        .attr("lang", "en")
        .child(head)
        .child(element("body").child(main).build())
        .build();

    format!("<!DOCTYPE html>\n{html}\n")
}

/// Machine-readable render result (`--format json`).
#[derive(Debug, Clone, Serialize)]
pub struct PageRender<'a> {
    pub page: &'a str,
    pub rendered_at: DateTime<Utc>,
    pub summary: PageSummary,
    pub sections: &'a [RenderedSection],
}

impl<'a> PageRender<'a> {
    pub fn new(page: &'a str, sections: &'a [RenderedSection]) -> Self {
        Self {
            page,
            rendered_at: Utc::now(),
            summary: PageSummary::from_sections(sections),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{WidgetDescriptor, WidgetKind};
    use crate::render::page::render_page;
    use crate::widgets::RenderOptions;
    use serde_json::Value;

    fn sections() -> Vec<RenderedSection> {
        render_page(
            &[
                WidgetDescriptor::new("v1", WidgetKind::Video, Value::Null),
                WidgetDescriptor::new("u1", WidgetKind::Unknown("carousel".into()), Value::Null),
                WidgetDescriptor::new("b1", WidgetKind::Brands, Value::Null),
            ],
            &RenderOptions::default(),
        )
    }

    #[test]
    fn sections_appear_in_document_order() {
        let doc = compose_document("home", &sections(), &DocumentOptions::default());
        assert!(doc.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        let video = doc.find(r#"data-widget-id="v1""#).unwrap();
        let brands = doc.find(r#"data-widget-id="b1""#).unwrap();
        assert!(video < brands);
        assert!(!doc.contains("u1"));
    }

    #[test]
    fn unsupported_marker_is_opt_in() {
        let opts = DocumentOptions {
            show_unsupported: true,
            ..DocumentOptions::default()
        };
        let doc = compose_document("home", &sections(), &opts);
        assert!(doc.contains(
            r#"<section class="widget widget--unsupported" data-widget-id="u1" data-widget-type="carousel"></section>"#
        ));
    }

    #[test]
    fn title_and_page_are_escaped() {
        let opts = DocumentOptions {
            title: "A & B".into(),
            ..DocumentOptions::default()
        };
        let doc = compose_document("home\"", &[], &opts);
        assert!(doc.contains("<title>A &amp; B</title>"));
        assert!(doc.contains(r#"data-page="home&quot;""#));
    }

    #[test]
    fn degraded_slots_are_counted() {
        assert_eq!(report_degraded("home", &sections()), 1);
    }

    #[test]
    fn json_render_carries_summary() {
        let sections = sections();
        let value = serde_json::to_value(PageRender::new("home", &sections)).unwrap();
        assert_eq!(value["summary"]["total"], 3);
        assert_eq!(value["sections"][1]["status"], "unknown_type");
        assert_eq!(value["sections"][0]["type"], "video");
    }
}
