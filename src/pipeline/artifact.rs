//! Artifact persistence: the writes the rest of the pipeline relies on, and
//! the two files that make a failed run diagnosable — `error.txt` and the
//! fallback placeholder.
//!
//! Writes overwrite unconditionally; outputs are not versioned, and two
//! concurrent runs sharing a directory race last-writer-wins.

use crate::config::MarkdownSource;
use crate::error::MdPressError;
use chrono::{SecondsFormat, Utc};
use std::error::Error as _;
use std::path::Path;
use tracing::{debug, error};

/// Text of the fallback placeholder, written when a run ends with no PDF.
const FALLBACK_TEXT: &str = "Render failed. See error.txt for details.\n";

/// Create the output directory, parents included. Idempotent.
pub async fn ensure_dir(dir: &Path) -> Result<(), MdPressError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| MdPressError::ArtifactWrite {
            path: dir.to_path_buf(),
            source: e,
        })
}

/// Persist a text artifact, overwriting any existing file.
pub async fn write_text(path: &Path, text: &str) -> Result<(), MdPressError> {
    tokio::fs::write(path, text)
        .await
        .map_err(|e| MdPressError::ArtifactWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    debug!("Wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}

/// Write the diagnostic report for a fatal pipeline error.
///
/// Ensures the output directory first — the failure being reported may be
/// that the directory never came into existence. Best-effort by contract:
/// the caller logs a secondary failure but never lets it mask the original
/// error.
pub async fn write_error_report(
    path: &Path,
    source: &MarkdownSource,
    err: &MdPressError,
) -> Result<(), MdPressError> {
    if let Some(dir) = path.parent() {
        ensure_dir(dir).await?;
    }
    let report = format_error_report(source, err, &Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
    write_text(path, &report).await?;
    error!("Wrote error details to {}", path.display());
    Ok(())
}

/// Write the plain-text placeholder proving the run attempted work.
///
/// Invoked by the orchestrator only when no PDF exists at pipeline end, so
/// the output directory is never empty after a failed run.
pub async fn write_fallback(path: &Path) -> Result<(), MdPressError> {
    if let Some(dir) = path.parent() {
        ensure_dir(dir).await?;
    }
    write_text(path, FALLBACK_TEXT).await
}

/// Assemble the report body. Pure, so the exact layout is testable.
///
/// Sections: timestamp, the resolved source, the failing stage, the full
/// error chain (outermost message first, then each underlying cause), and
/// a runtime fingerprint — enough to diagnose a failed run from the output
/// directory alone.
fn format_error_report(source: &MarkdownSource, err: &MdPressError, timestamp: &str) -> String {
    let mut chain = Vec::new();
    chain.push(err.to_string());
    let mut cause = err.source();
    while let Some(c) = cause {
        chain.push(format!("caused by: {}", c));
        cause = c.source();
    }

    format!(
        "TIME: {timestamp}\n\
         SOURCE: {source}\n\
         STAGE: {stage}\n\
         \n\
         ERROR:\n\
         {chain}\n\
         \n\
         ENVIRONMENT:\n\
         {env}\n",
        timestamp = timestamp,
        source = source.describe(),
        stage = err.stage(),
        chain = chain.join("\n"),
        env = environment_fingerprint(),
    )
}

/// Crate version plus host triple facts, the analogue of dumping the
/// runtime's version table into the report.
fn environment_fingerprint() -> String {
    format!(
        "mdpress {}\nos: {} {}\nfamily: {}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
        std::env::consts::FAMILY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn report_contains_all_sections() {
        let source = MarkdownSource::File(PathBuf::from("/work/README.md"));
        let err = MdPressError::SourceNotFound {
            path: PathBuf::from("/work/README.md"),
        };
        let report = format_error_report(&source, &err, "2024-05-01T12:00:00Z");

        assert!(report.starts_with("TIME: 2024-05-01T12:00:00Z\n"));
        assert!(report.contains("SOURCE: /work/README.md"));
        assert!(report.contains("STAGE: LOAD_SOURCE"));
        assert!(report.contains("Markdown file not found"));
        assert!(report.contains("ENVIRONMENT:"));
        assert!(report.contains("mdpress "));
    }

    #[test]
    fn report_walks_the_error_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = MdPressError::SourceUnreadable {
            path: PathBuf::from("/work/doc.md"),
            source: io,
        };
        let report = format_error_report(
            &MarkdownSource::File(PathBuf::from("/work/doc.md")),
            &err,
            "2024-05-01T12:00:00Z",
        );
        assert!(report.contains("caused by: permission denied"), "got:\n{report}");
    }

    #[tokio::test]
    async fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        ensure_dir(&nested).await.unwrap();
        ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn write_text_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rendered.html");
        write_text(&path, "first").await.unwrap();
        write_text(&path, "second").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[tokio::test]
    async fn fallback_names_the_error_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render_failed.txt");
        write_fallback(&path).await.unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("error.txt"));
    }

    #[tokio::test]
    async fn error_report_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never/made/error.txt");
        let source = MarkdownSource::Url("https://example.com/a.md".into());
        let err = MdPressError::FetchStatus {
            url: "https://example.com/a.md".into(),
            status: "500 Internal Server Error".into(),
        };
        write_error_report(&path, &source, &err).await.unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("500 Internal Server Error"));
    }
}
