//! Widget registry: maps a descriptor's kind to its variant renderer.
//!
//! Every variant is a pure function of its own settings. Dispatch is a single
//! exhaustive match on [`WidgetKind`], so adding a variant means adding a module,
//! an enum arm and a match arm here; existing variants are untouched.

pub mod brands;
pub mod custom_html;
pub mod image_banner;
pub mod social_embed;
pub mod text;
pub mod video;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::{WidgetDescriptor, WidgetKind};
use crate::render::html::Markup;

pub use custom_html::RawHtmlPolicy;

/// Options that influence how individual variants render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub raw_html: RawHtmlPolicy,
}

/// Outcome of rendering one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Rendered,
    UnknownType,
    MalformedSettings,
}

impl SlotStatus {
    pub fn is_degraded(self) -> bool {
        self != SlotStatus::Rendered
    }
}

/// Rendered output for one descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub widget_id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub status: SlotStatus,
    /// Why the slot degraded, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub html: Markup,
}

impl RenderedSection {
    fn rendered(descriptor: &WidgetDescriptor, html: Markup) -> Self {
        Self {
            widget_id: descriptor.id.clone(),
            kind: descriptor.kind.clone(),
            status: SlotStatus::Rendered,
            detail: None,
            html,
        }
    }

    /// Fallback slot: empty markup plus the reason.
    pub fn fallback(descriptor: &WidgetDescriptor, status: SlotStatus, detail: String) -> Self {
        Self {
            widget_id: descriptor.id.clone(),
            kind: descriptor.kind.clone(),
            status,
            detail: Some(detail),
            html: Markup::empty(),
        }
    }
}

/// Read a variant's settings from the descriptor payload.
///
/// `null` means "no settings" and yields the variant defaults. Any other
/// non-object value, or a field with the wrong JSON type, is an error.
pub fn parse_settings<T>(settings: &Value) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    match settings {
        Value::Null => Ok(T::default()),
        Value::Object(_) => serde_json::from_value(settings.clone()),
        other => Err(serde::de::Error::custom(format!(
            "settings must be an object, got {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a single descriptor. Never fails; problems become a fallback slot.
pub fn render_widget(descriptor: &WidgetDescriptor, opts: &RenderOptions) -> RenderedSection {
    let result = match &descriptor.kind {
        WidgetKind::Brands => Ok(brands::render()),
        WidgetKind::SocialEmbed => Ok(social_embed::render()),
        WidgetKind::Video => Ok(video::render()),
        WidgetKind::CustomHtml => parse_settings::<custom_html::Settings>(&descriptor.settings)
            .map(|s| custom_html::render(&s, opts.raw_html)),
        WidgetKind::Text => {
            parse_settings::<text::Settings>(&descriptor.settings).map(|s| text::render(&s))
        }
        WidgetKind::ImageBanner => parse_settings::<image_banner::Settings>(&descriptor.settings)
            .map(|s| image_banner::render(&s)),
        WidgetKind::Unknown(tag) => {
            return RenderedSection::fallback(
                descriptor,
                SlotStatus::UnknownType,
                format!("unknown widget type {tag:?}"),
            );
        }
    };

    match result {
        Ok(html) => RenderedSection::rendered(descriptor, html),
        Err(err) => RenderedSection::fallback(
            descriptor,
            SlotStatus::MalformedSettings,
            format!("invalid {} settings: {err}", descriptor.kind),
        ),
    }
}
