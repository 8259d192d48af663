//! Persisted widget descriptors as they arrive from a content source.
//!
//! Descriptors are authored by the admin editor and fetched read-only. Parsing is
//! lenient: a descriptor never fails to load because of its `type` or `settings`,
//! those problems surface later as a degraded slot when the page is rendered.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Closed set of widget variants the registry knows how to render.
///
/// Tags outside the set are kept as [`WidgetKind::Unknown`] so the slot can
/// degrade instead of failing the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Brands,
    CustomHtml,
    SocialEmbed,
    Video,
    Text,
    ImageBanner,
    Unknown(String),
}

impl WidgetKind {
    /// All renderable variants, in catalogue order.
    pub fn known() -> [WidgetKind; 6] {
        [
            WidgetKind::Brands,
            WidgetKind::CustomHtml,
            WidgetKind::SocialEmbed,
            WidgetKind::Video,
            WidgetKind::Text,
            WidgetKind::ImageBanner,
        ]
    }

    /// Resolve a persisted type tag. Matching ignores case and surrounding whitespace.
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "brands" => WidgetKind::Brands,
            "custom-html" => WidgetKind::CustomHtml,
            "social-embed" => WidgetKind::SocialEmbed,
            "video" => WidgetKind::Video,
            "text" => WidgetKind::Text,
            "image-banner" => WidgetKind::ImageBanner,
            _ => WidgetKind::Unknown(tag.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            WidgetKind::Brands => "brands",
            WidgetKind::CustomHtml => "custom-html",
            WidgetKind::SocialEmbed => "social-embed",
            WidgetKind::Video => "video",
            WidgetKind::Text => "text",
            WidgetKind::ImageBanner => "image-banner",
            WidgetKind::Unknown(tag) => tag.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, WidgetKind::Unknown(_))
    }

    /// One-line description shown by `sfw types`.
    pub fn summary(&self) -> &'static str {
        match self {
            WidgetKind::Brands => "static brand list placeholder",
            WidgetKind::CustomHtml => "raw markup from settings.html (trusted input)",
            WidgetKind::SocialEmbed => "grid of social media placeholder tiles",
            WidgetKind::Video => "video player placeholder",
            WidgetKind::Text => "heading and paragraphs from settings.heading / settings.body",
            WidgetKind::ImageBanner => "image with optional link and caption",
            WidgetKind::Unknown(_) => "unsupported widget type",
        }
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for WidgetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// The unit of page composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    /// Type-specific payload. Kept untyped here; each variant reads it into its
    /// own settings struct at render time.
    pub settings: Value,
    pub order: i64,
}

impl WidgetDescriptor {
    pub fn new(id: impl Into<String>, kind: WidgetKind, settings: Value) -> Self {
        Self {
            id: id.into(),
            kind,
            settings,
            order: 0,
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Build a descriptor from one entry of a page payload.
    ///
    /// Returns `None` only when the entry is not a JSON object. Missing `id`
    /// becomes `widget-<index>`, missing `order` becomes the index and a missing
    /// or non-string `type` becomes an empty unknown tag.
    pub fn from_value(index: usize, value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let id = match obj.get("id") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => format!("widget-{index}"),
        };
        let kind = obj
            .get("type")
            .and_then(|v| v.as_str())
            .map(WidgetKind::from_tag)
            .unwrap_or_else(|| WidgetKind::Unknown(String::new()));
        let settings = obj.get("settings").cloned().unwrap_or(Value::Null);
        let order = obj
            .get("order")
            .and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok())))
            .unwrap_or(index as i64);

        Some(Self {
            id,
            kind,
            settings,
            order,
        })
    }
}
