//! Custom HTML block.
//!
//! This is the only variant that emits unescaped markup. `settings.html` is
//! injected verbatim under [`RawHtmlPolicy::Trusted`]: whoever authors the
//! descriptor is responsible for sanitizing it, this renderer does not. The
//! other policies let a deployment that cannot vouch for its authors escape or
//! drop the payload instead.

use clap::ValueEnum;
use serde::Deserialize;

use crate::render::html::Markup;

/// Markup rendered when `settings.html` is absent or empty.
pub const DEFAULT_PLACEHOLDER: &str =
    r#"<div class="custom-html-placeholder">Custom HTML content goes here</div>"#;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub html: Option<String>,
}

/// How raw markup from `settings.html` crosses into the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RawHtmlPolicy {
    /// Inject verbatim.
    #[default]
    Trusted,
    /// Render the payload as escaped text.
    Escape,
    /// Ignore the payload and render the placeholder.
    Drop,
}

pub fn render(settings: &Settings, policy: RawHtmlPolicy) -> Markup {
    let Some(html) = settings.html.as_deref().filter(|h| !h.is_empty()) else {
        return Markup::trusted(DEFAULT_PLACEHOLDER);
    };
    match policy {
        RawHtmlPolicy::Trusted => Markup::trusted(html),
        RawHtmlPolicy::Escape => Markup::text(html),
        RawHtmlPolicy::Drop => Markup::trusted(DEFAULT_PLACEHOLDER),
    }
}
