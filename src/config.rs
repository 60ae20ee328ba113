//! Configuration types for the render pipeline.
//!
//! All pipeline behaviour is controlled through [`RenderConfig`], built via
//! its [`RenderConfigBuilder`] and handed to [`crate::render::render`] as a
//! plain value. The repository this replaced grew five near-identical render
//! scripts that differed only in where they read their settings; keeping
//! every knob in one validated struct, resolved once at process entry,
//! removes that whole class of drift.

use crate::error::MdPressError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the Markdown comes from.
///
/// Exactly one variant; the classification is fixed the moment the config
/// is built and never re-derived mid-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkdownSource {
    /// Local file, resolved against the current working directory.
    File(PathBuf),
    /// Remote document fetched with a single HTTP GET.
    Url(String),
}

impl MarkdownSource {
    /// Classify a raw CLI/env input string.
    ///
    /// Anything starting with `http://` or `https://` is a URL; everything
    /// else is treated as a local path.
    pub fn from_input(input: &str) -> Self {
        if is_url(input) {
            MarkdownSource::Url(input.to_string())
        } else {
            MarkdownSource::File(PathBuf::from(input))
        }
    }

    /// Human-readable identifier for logs and error reports.
    pub fn describe(&self) -> String {
        match self {
            MarkdownSource::File(p) => p.display().to_string(),
            MarkdownSource::Url(u) => u.clone(),
        }
    }
}

impl std::fmt::Display for MarkdownSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Print-server hand-off settings.
///
/// Present on [`RenderConfig`] only when an endpoint is configured; the
/// orchestrator skips the submit stage entirely when this is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintConfig {
    /// Base URL of the print server; `/print` is appended on submit.
    pub endpoint: String,
    /// Target printer name, forwarded as a form field when set.
    pub printer: Option<String>,
    /// Bearer credential for the `Authorization` header when set.
    pub token: Option<String>,
}

/// PDF page geometry handed to Chrome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    /// Uniform page margin in millimetres. Default: 12.0.
    pub margin_mm: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self { margin_mm: 12.0 }
    }
}

/// Configuration for one pipeline run.
///
/// Built via [`RenderConfig::builder()`].
///
/// # Example
/// ```rust
/// use mdpress::{MarkdownSource, RenderConfig};
///
/// let config = RenderConfig::builder()
///     .source(MarkdownSource::from_input("README.md"))
///     .out_dir("out")
///     .margin_mm(10.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Markdown origin. Default: local `README.md`.
    pub source: MarkdownSource,

    /// Output directory for all artifacts. Created if absent. Default: `out`.
    pub out_dir: PathBuf,

    /// PDF page geometry. Default: A4 semantics with 12 mm margins.
    pub page: PageSetup,

    /// Page-load quiescence timeout in seconds. Default: 60.
    ///
    /// The single hard timeout in the pipeline: it bounds every wait inside
    /// the browser session so a document with a hung subresource cannot
    /// block an unattended run forever.
    pub load_timeout_secs: u64,

    /// Remote-Markdown fetch timeout in seconds. Default: 120.
    pub fetch_timeout_secs: u64,

    /// Print-server hand-off; `None` disables the submit stage.
    pub print: Option<PrintConfig>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            source: MarkdownSource::File(PathBuf::from("README.md")),
            out_dir: PathBuf::from("out"),
            page: PageSetup::default(),
            load_timeout_secs: 60,
            fetch_timeout_secs: 120,
            print: None,
        }
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn source(mut self, source: MarkdownSource) -> Self {
        self.config.source = source;
        self
    }

    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.out_dir = dir.into();
        self
    }

    pub fn margin_mm(mut self, mm: f64) -> Self {
        self.config.page.margin_mm = mm;
        self
    }

    pub fn load_timeout_secs(mut self, secs: u64) -> Self {
        self.config.load_timeout_secs = secs.max(1);
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs.max(1);
        self
    }

    pub fn print(mut self, print: Option<PrintConfig>) -> Self {
        self.config.print = print;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, MdPressError> {
        let c = &self.config;
        if !(0.0..=100.0).contains(&c.page.margin_mm) {
            return Err(MdPressError::InvalidConfig(format!(
                "Margin must be 0–100 mm, got {}",
                c.page.margin_mm
            )));
        }
        if c.out_dir.as_os_str().is_empty() {
            return Err(MdPressError::InvalidConfig(
                "Output directory must not be empty".into(),
            ));
        }
        if let Some(ref print) = c.print {
            if print.endpoint.trim().is_empty() {
                return Err(MdPressError::InvalidConfig(
                    "Print endpoint must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/doc.md"));
        assert!(is_url("http://example.com/doc.md"));
        assert!(!is_url("/tmp/doc.md"));
        assert!(!is_url("doc.md"));
        assert!(!is_url(""));
    }

    #[test]
    fn from_input_classifies() {
        assert_eq!(
            MarkdownSource::from_input("https://example.com/a.md"),
            MarkdownSource::Url("https://example.com/a.md".into())
        );
        assert_eq!(
            MarkdownSource::from_input("docs/a.md"),
            MarkdownSource::File(PathBuf::from("docs/a.md"))
        );
    }

    #[test]
    fn builder_defaults() {
        let c = RenderConfig::builder().build().unwrap();
        assert_eq!(c.out_dir, PathBuf::from("out"));
        assert_eq!(c.page.margin_mm, 12.0);
        assert_eq!(c.load_timeout_secs, 60);
        assert!(c.print.is_none());
    }

    #[test]
    fn builder_rejects_bad_margin() {
        let err = RenderConfig::builder().margin_mm(500.0).build().unwrap_err();
        assert!(err.to_string().contains("Margin"));
    }

    #[test]
    fn builder_rejects_empty_print_endpoint() {
        let err = RenderConfig::builder()
            .print(Some(PrintConfig {
                endpoint: "  ".into(),
                printer: None,
                token: None,
            }))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn timeout_floors_at_one_second() {
        let c = RenderConfig::builder().load_timeout_secs(0).build().unwrap();
        assert_eq!(c.load_timeout_secs, 1);
    }
}
