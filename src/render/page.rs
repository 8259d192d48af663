//! Compose an ordered descriptor list into an ordered list of rendered sections.
//!
//! Slot `i` of the output is always the rendering of descriptor `i`. Variants
//! share no state, so the parallel path only needs rayon's order-preserving
//! collect to produce the same result as the sequential one.

use rayon::prelude::*;
use serde::Serialize;

use crate::model::WidgetDescriptor;
use crate::widgets::{RenderOptions, RenderedSection, SlotStatus, render_widget};

pub fn render_page(descriptors: &[WidgetDescriptor], opts: &RenderOptions) -> Vec<RenderedSection> {
    descriptors
        .iter()
        .map(|d| render_widget(d, opts))
        .collect()
}

pub fn render_page_parallel(
    descriptors: &[WidgetDescriptor],
    opts: &RenderOptions,
) -> Vec<RenderedSection> {
    descriptors
        .par_iter()
        .map(|d| render_widget(d, opts))
        .collect()
}

/// Slot counts by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub total: usize,
    pub rendered: usize,
    pub unknown_type: usize,
    pub malformed_settings: usize,
}

impl PageSummary {
    pub fn from_sections(sections: &[RenderedSection]) -> Self {
        sections.iter().fold(
            PageSummary {
                total: sections.len(),
                ..PageSummary::default()
            },
            |mut acc, s| {
                match s.status {
                    SlotStatus::Rendered => acc.rendered += 1,
                    SlotStatus::UnknownType => acc.unknown_type += 1,
                    SlotStatus::MalformedSettings => acc.malformed_settings += 1,
                }
                acc
            },
        )
    }

    pub fn degraded(&self) -> usize {
        self.unknown_type + self.malformed_settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WidgetKind;
    use serde_json::{Value, json};

    #[test]
    fn empty_page_renders_nothing() {
        assert!(render_page(&[], &RenderOptions::default()).is_empty());
        assert!(render_page_parallel(&[], &RenderOptions::default()).is_empty());
    }

    #[test]
    fn summary_counts_each_outcome() {
        let descriptors = vec![
            WidgetDescriptor::new("a", WidgetKind::Video, Value::Null),
            WidgetDescriptor::new("b", WidgetKind::Unknown("x".into()), Value::Null),
            WidgetDescriptor::new("c", WidgetKind::Text, json!({ "body": 1 })),
            WidgetDescriptor::new("d", WidgetKind::Brands, Value::Null),
        ];
        let summary = PageSummary::from_sections(&render_page(&descriptors, &RenderOptions::default()));
        assert_eq!(
            summary,
            PageSummary {
                total: 4,
                rendered: 2,
                unknown_type: 1,
                malformed_settings: 1,
            }
        );
        assert_eq!(summary.degraded(), 2);
    }
}
