//! Result types: the artifact map and the run summary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The fixed set of artifact paths for one run.
///
/// Computed once at pipeline start from the output directory and never
/// mutated; every stage writes to these paths, overwriting whatever a
/// previous run left behind (outputs are not versioned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSet {
    /// Composed HTML document, written before the browser starts.
    pub html: PathBuf,
    /// Full-page screenshot.
    pub png: PathBuf,
    /// The primary output.
    pub pdf: PathBuf,
    /// Diagnostic report, written only on fatal failure.
    pub error: PathBuf,
    /// Placeholder proving a run happened when no PDF could be produced.
    pub fallback: PathBuf,
}

impl ArtifactSet {
    /// Map the fixed artifact names into `out_dir`.
    pub fn new(out_dir: &Path) -> Self {
        Self {
            html: out_dir.join("rendered.html"),
            png: out_dir.join("rendered.png"),
            pdf: out_dir.join("rendered.pdf"),
            error: out_dir.join("error.txt"),
            fallback: out_dir.join("render_failed.txt"),
        }
    }
}

/// Wall-clock accounting for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// End-to-end duration, load to final artifact.
    pub total_duration_ms: u64,
    /// Time spent inside the browser session.
    pub render_duration_ms: u64,
}

/// Successful pipeline result.
///
/// A present [`print_warning`](Self::print_warning) means the PDF exists and
/// is valid but the optional print-server hand-off failed; callers decide
/// whether that matters to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOutcome {
    /// Where everything was written.
    pub artifacts: ArtifactSet,
    /// Non-fatal print-submission failure, if the stage ran and failed.
    pub print_warning: Option<String>,
    /// Timing summary.
    pub stats: RenderStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_names_are_fixed() {
        let set = ArtifactSet::new(Path::new("out"));
        assert_eq!(set.html, Path::new("out/rendered.html"));
        assert_eq!(set.png, Path::new("out/rendered.png"));
        assert_eq!(set.pdf, Path::new("out/rendered.pdf"));
        assert_eq!(set.error, Path::new("out/error.txt"));
        assert_eq!(set.fallback, Path::new("out/render_failed.txt"));
    }

    #[test]
    fn outcome_serialises() {
        let outcome = RenderOutcome {
            artifacts: ArtifactSet::new(Path::new("out")),
            print_warning: Some("print server responded 503".into()),
            stats: RenderStats {
                total_duration_ms: 1200,
                render_duration_ms: 900,
            },
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("rendered.pdf"));
        assert!(json.contains("503"));
    }
}
