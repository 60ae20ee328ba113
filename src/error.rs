//! Error types for the mdpress library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`MdPressError`] — **Fatal**: the pipeline cannot produce a PDF
//!   (missing source, browser failure, filesystem trouble). Returned as
//!   `Err(MdPressError)` from [`crate::render::render`] after the
//!   diagnostic capture branch has written `error.txt`.
//!
//! * [`PrintError`] — **Non-fatal**: the optional print-server upload
//!   failed but a perfectly good PDF already exists on disk. Downgraded to
//!   [`crate::output::RenderOutcome::print_warning`] so the run still
//!   counts as a success.
//!
//! The separation lets callers decide their own tolerance: treat a print
//! warning as an error, log it, or retry the upload out-of-band.

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage names, as they appear in `error.txt` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Stage {
    /// Configuration resolution, before any stage has run.
    Init,
    /// Resolving the Markdown source (file read or HTTP GET).
    LoadSource,
    /// Markdown → styled HTML document.
    ComposeHtml,
    /// Headless-Chrome screenshot + PDF generation.
    Render,
    /// Persisting artifacts to the output directory.
    WriteArtifacts,
    /// Optional upload to the print server.
    SubmitPrint,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Init => "INIT",
            Stage::LoadSource => "LOAD_SOURCE",
            Stage::ComposeHtml => "COMPOSE_HTML",
            Stage::Render => "RENDER",
            Stage::WriteArtifacts => "WRITE_ARTIFACTS",
            Stage::SubmitPrint => "SUBMIT_PRINT",
        };
        f.write_str(name)
    }
}

/// All fatal errors returned by the mdpress library.
///
/// Print-submission failures use [`PrintError`] and are attached to the
/// successful result rather than propagated here.
#[derive(Debug, Error)]
pub enum MdPressError {
    // ── Source errors ─────────────────────────────────────────────────────
    /// The Markdown file does not exist. `path` is the absolute path
    /// attempted, so the report is useful even when the input was relative.
    #[error("Markdown file not found: '{path}'\nCheck the path exists (paths are resolved against the working directory).")]
    SourceNotFound { path: PathBuf },

    /// The Markdown file exists but could not be read.
    #[error("Failed to read Markdown file '{path}': {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP URL was syntactically plausible but the GET failed.
    #[error("Failed to fetch '{url}': {reason}\nCheck the URL and your network connection.")]
    FetchFailed { url: String, reason: String },

    /// Remote fetch exceeded the configured timeout.
    #[error("Fetch timed out after {secs}s for '{url}'\nIncrease --fetch-timeout.")]
    FetchTimeout { url: String, secs: u64 },

    /// The server answered, but outside the success range.
    #[error("Server returned {status} for '{url}'")]
    FetchStatus { url: String, status: String },

    // ── Render errors ─────────────────────────────────────────────────────
    /// Chrome could not be located or launched.
    #[error(
        "Failed to launch headless Chrome: {detail}\n\
Install Chrome or Chromium, or point CHROME env var at the binary."
    )]
    BrowserLaunch { detail: String },

    /// The page did not reach quiescence within the load timeout, or
    /// navigation itself failed.
    #[error("Page load failed or timed out: {detail}\nIncrease --timeout for slow-loading documents.")]
    PageLoad { detail: String },

    /// Screenshot capture failed after the page loaded.
    #[error("Screenshot capture failed: {detail}")]
    Screenshot { detail: String },

    /// PDF generation failed after the page loaded.
    #[error("PDF generation failed: {detail}")]
    PdfGeneration { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output directory or write an artifact.
    #[error("Failed to write artifact '{path}': {source}")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MdPressError {
    /// The pipeline stage this error belongs to, for `error.txt` reports.
    pub fn stage(&self) -> Stage {
        match self {
            MdPressError::SourceNotFound { .. }
            | MdPressError::SourceUnreadable { .. }
            | MdPressError::FetchFailed { .. }
            | MdPressError::FetchTimeout { .. }
            | MdPressError::FetchStatus { .. } => Stage::LoadSource,
            MdPressError::BrowserLaunch { .. }
            | MdPressError::PageLoad { .. }
            | MdPressError::Screenshot { .. }
            | MdPressError::PdfGeneration { .. } => Stage::Render,
            MdPressError::ArtifactWrite { .. } => Stage::WriteArtifacts,
            MdPressError::InvalidConfig(_) => Stage::Init,
            // Internal only surfaces from the render task today (join errors).
            MdPressError::Internal(_) => Stage::Render,
        }
    }
}

/// A non-fatal print-submission error.
///
/// Attached to [`crate::output::RenderOutcome`] as a warning when the
/// upload fails; the PDF artifact on disk stays valid either way.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum PrintError {
    /// The print server answered outside the success range.
    #[error("print server responded {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The upload never got a usable response (DNS, connect, TLS, broken pipe).
    #[error("print submission failed: {detail}")]
    Transport { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_not_found_mentions_path() {
        let e = MdPressError::SourceNotFound {
            path: PathBuf::from("/work/docs/README.md"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/work/docs/README.md"), "got: {msg}");
        assert_eq!(e.stage(), Stage::LoadSource);
    }

    #[test]
    fn fetch_status_display() {
        let e = MdPressError::FetchStatus {
            url: "https://example.com/doc.md".into(),
            status: "404 Not Found".into(),
        };
        assert!(e.to_string().contains("404 Not Found"));
        assert_eq!(e.stage(), Stage::LoadSource);
    }

    #[test]
    fn render_errors_map_to_render_stage() {
        let launch = MdPressError::BrowserLaunch {
            detail: "no chrome binary".into(),
        };
        let load = MdPressError::PageLoad {
            detail: "timed out".into(),
        };
        assert_eq!(launch.stage(), Stage::Render);
        assert_eq!(load.stage(), Stage::Render);
    }

    #[test]
    fn stage_display_matches_report_names() {
        assert_eq!(Stage::LoadSource.to_string(), "LOAD_SOURCE");
        assert_eq!(Stage::SubmitPrint.to_string(), "SUBMIT_PRINT");
    }

    #[test]
    fn print_rejected_display() {
        let e = PrintError::Rejected {
            status: 503,
            body: "queue full".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("queue full"));
    }
}
