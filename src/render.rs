//! Pipeline orchestration: the staged run and its failure-capture boundary.
//!
//! Stages run strictly in order — each one's output is the next one's
//! required input — with one linear short-circuit: the first fatal error
//! jumps straight to the capture branch, which writes `error.txt` (and the
//! fallback placeholder when no PDF exists) before the error is returned.
//! A failed run therefore always leaves inspectable evidence in the output
//! directory, whether it died resolving the source or halfway through PDF
//! generation.
//!
//! ```text
//! LOAD_SOURCE -> COMPOSE_HTML -> RENDER -> [SUBMIT_PRINT] -> done
//!      |              |            |             |
//!      +--------------+------------+             |  (print failures stay
//!                on any failure                  |   on the Ok path as a
//!                      v                         v   warning)
//!          error.txt + render_failed.txt     print_warning
//! ```

use crate::config::RenderConfig;
use crate::error::MdPressError;
use crate::output::{ArtifactSet, RenderOutcome, RenderStats};
use crate::pipeline::{artifact, browser, compose, print, source};
use std::time::Instant;
use tracing::{error, info, warn};

/// Run the full pipeline described by `config`.
///
/// # Returns
/// `Ok(RenderOutcome)` when a PDF was produced — even if the optional
/// print submission failed (check [`RenderOutcome::print_warning`]).
///
/// # Errors
/// Returns `Err(MdPressError)` for fatal failures (source, render, or
/// artifact I/O). By the time the error is returned, the capture branch
/// has written `error.txt` and, if no PDF exists, `render_failed.txt`.
pub async fn render(config: &RenderConfig) -> Result<RenderOutcome, MdPressError> {
    let artifacts = ArtifactSet::new(&config.out_dir);

    match run_stages(config, &artifacts).await {
        Ok(outcome) => Ok(outcome),
        Err(err) => {
            capture_failure(config, &artifacts, &err).await;
            Err(err)
        }
    }
}

/// Synchronous wrapper around [`render`].
///
/// Creates a temporary tokio runtime internally.
pub fn render_sync(config: &RenderConfig) -> Result<RenderOutcome, MdPressError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| MdPressError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(render(config))
}

/// The happy path: every stage in order, first failure short-circuits out.
async fn run_stages(
    config: &RenderConfig,
    artifacts: &ArtifactSet,
) -> Result<RenderOutcome, MdPressError> {
    let total_start = Instant::now();
    info!("Starting render: {}", config.source);

    artifact::ensure_dir(&config.out_dir).await?;

    // ── Stage 1: Load source ─────────────────────────────────────────────
    let markdown = source::load(&config.source, config.fetch_timeout_secs).await?;

    // ── Stage 2: Compose HTML ────────────────────────────────────────────
    let document = compose::compose(&markdown);

    // The HTML artifact goes to disk before the browser starts, so a
    // render failure still leaves the composed document for inspection.
    artifact::write_text(&artifacts.html, &document).await?;
    info!("Saved intermediate HTML to {}", artifacts.html.display());

    // ── Stage 3: Render ──────────────────────────────────────────────────
    let render_start = Instant::now();
    browser::render(
        &artifacts.html,
        &artifacts.png,
        &artifacts.pdf,
        &config.page,
        config.load_timeout_secs,
    )
    .await?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    // ── Stage 4: Submit to print server (optional, non-fatal) ────────────
    let print_warning = match config.print {
        None => None,
        Some(ref print_config) => match print::submit(&artifacts.pdf, print_config).await {
            Ok(ack) => {
                info!("Print server accepted the PDF: {} {}", ack.status, ack.body);
                None
            }
            Err(e) => {
                warn!("Print submission failed (PDF kept): {}", e);
                Some(e.to_string())
            }
        },
    };

    let stats = RenderStats {
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        render_duration_ms,
    };
    info!(
        "Render complete in {}ms ({}ms in the browser)",
        stats.total_duration_ms, stats.render_duration_ms
    );

    Ok(RenderOutcome {
        artifacts: artifacts.clone(),
        print_warning,
        stats,
    })
}

/// The capture branch: guarantee diagnosable output for a fatal failure.
///
/// Both writes are best-effort — a capture failure is logged, never allowed
/// to mask the error that brought us here.
async fn capture_failure(config: &RenderConfig, artifacts: &ArtifactSet, err: &MdPressError) {
    error!("Fatal error during render: {}", err);

    if let Err(report_err) =
        artifact::write_error_report(&artifacts.error, &config.source, err).await
    {
        error!("Failed to write error report: {}", report_err);
    }

    if !artifacts.pdf.exists() {
        if let Err(fallback_err) = artifact::write_fallback(&artifacts.fallback).await {
            error!("Failed to write fallback artifact: {}", fallback_err);
        }
    }
}
