//! HTML building blocks shared by all widget variants.
//!
//! [`Markup`] is escaped by construction: text and attribute values go through
//! [`escape_text`], and the builder only emits tags it was given as static
//! strings. The one exception is [`Markup::trusted`], which wraps raw markup
//! without touching it and is reserved for the custom HTML variant.

use serde::Serialize;

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "source", "meta", "link"];

/// A fragment of rendered HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Escaped text node.
    pub fn text(text: &str) -> Self {
        Self(escape_text(text))
    }

    /// Wrap markup verbatim. Crossing this boundary means the caller vouches
    /// for the content; no sanitization happens here.
    pub(crate) fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, other: Markup) {
        self.0.push_str(&other.0);
    }
}

impl std::fmt::Display for Markup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut out = Markup::empty();
        for m in iter {
            out.push(m);
        }
        out
    }
}

/// Escape text for use in element content or a quoted attribute value.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Accept only URLs that cannot execute script when placed in `href`/`src`.
///
/// Allowed: `http(s)://`, protocol-relative `//`, and site-relative paths
/// (`/`, `#`, `?`, `./`). Everything else (including `javascript:` and
/// `data:`) yields `None`.
pub fn safe_url(url: &str) -> Option<&str> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    let allowed = lower.starts_with("https://")
        || lower.starts_with("http://")
        || lower.starts_with('/')
        || lower.starts_with('#')
        || lower.starts_with('?')
        || lower.starts_with("./");
    allowed.then_some(trimmed)
}

/// Start building an element.
pub fn element(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Markup::empty(),
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Markup,
}

impl Element {
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: &'static str, value: &str) -> Self {
        self.attrs.push((name, escape_text(value)));
        self
    }

    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        for c in children {
            self.children.push(c);
        }
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.child(Markup::text(text))
    }

    pub fn build(self) -> Markup {
        let mut out = String::new();
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag) {
            return Markup(out);
        }
        out.push_str(self.children.as_str());
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
        Markup(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_significant_characters() {
        assert_eq!(
            escape_text(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn builder_escapes_attributes_and_text() {
        let m = element("p")
            .class("note")
            .attr("title", "\"quoted\"")
            .text("1 < 2")
            .build();
        assert_eq!(
            m.as_str(),
            r#"<p class="note" title="&quot;quoted&quot;">1 &lt; 2</p>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let m = element("img").attr("src", "/a.png").build();
        assert_eq!(m.as_str(), r#"<img src="/a.png">"#);
    }

    #[test]
    fn safe_url_rejects_script_schemes() {
        assert_eq!(safe_url("https://shop.example/x"), Some("https://shop.example/x"));
        assert_eq!(safe_url(" /sale "), Some("/sale"));
        assert_eq!(safe_url("javascript:alert(1)"), None);
        assert_eq!(safe_url("JaVaScRiPt:alert(1)"), None);
        assert_eq!(safe_url("data:text/html,hi"), None);
        assert_eq!(safe_url(""), None);
    }

    #[test]
    fn markup_collects_in_order() {
        let m: Markup = ["a", "b", "c"].iter().map(|s| Markup::text(s)).collect();
        assert_eq!(m.as_str(), "abc");
    }
}
