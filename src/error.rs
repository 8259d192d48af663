//! Error surfaced to the CLI user as a JSON payload on stderr.

use crate::config::ConfigError;
use crate::sources::SourceError;

pub const EXIT_INTERNAL: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_DEGRADED: i32 = 3;
pub const EXIT_SOURCE: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    pub code: i32,
    pub kind: &'static str,
    pub message: String,
    pub hint: Option<String>,
    pub retryable: bool,
}

impl CliError {
    /// `validate` found slots that would not render.
    pub fn degraded(page: &str, count: usize) -> Self {
        Self {
            code: EXIT_DEGRADED,
            kind: "degraded",
            message: format!("{count} widget(s) on page {page:?} would not render"),
            hint: Some("fix the widget type or settings in the page editor".into()),
            retryable: false,
        }
    }

    /// Envelope printed on stderr when a command fails.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.code,
                "kind": self.kind,
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
            }
        })
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

fn source_hint(err: &SourceError) -> Option<String> {
    let hint = match err {
        SourceError::InvalidSlug(_) => "page slugs use lowercase letters, digits, '-' and '_'",
        SourceError::PageNotFound(_) => "run `sfw pages` to list pages in a file source",
        SourceError::Http(_) | SourceError::Status { .. } => {
            "check source.base_url and that the content service is reachable"
        }
        SourceError::Io { .. } => "check that source.root points at a readable directory",
        SourceError::Json(_) | SourceError::Payload(_) => {
            "the page payload must be a widget array or an object with a \"widgets\" array"
        }
    };
    Some(hint.to_string())
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if let Some(e) = err.downcast_ref::<CliError>() {
            return e.clone();
        }
        if let Some(e) = err.downcast_ref::<SourceError>() {
            return Self {
                code: EXIT_SOURCE,
                kind: "source",
                message,
                hint: source_hint(e),
                retryable: e.is_retryable(),
            };
        }
        if err.downcast_ref::<ConfigError>().is_some() {
            return Self {
                code: EXIT_CONFIG,
                kind: "config",
                message,
                hint: Some("check --config / STOREFRONT_WIDGETS_CONFIG and the [source] section".into()),
                retryable: false,
            };
        }
        Self {
            code: EXIT_INTERNAL,
            kind: "internal",
            message,
            hint: None,
            retryable: false,
        }
    }
}
