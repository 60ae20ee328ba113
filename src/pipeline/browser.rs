//! Browser stage: drive a scoped headless-Chrome session to produce the
//! screenshot and the PDF.
//!
//! ## Why spawn_blocking?
//!
//! The `headless_chrome` crate is a synchronous CDP client: every call
//! blocks on a websocket round-trip to the Chrome process.
//! `tokio::task::spawn_blocking` moves the whole session onto the blocking
//! thread pool so the runtime's worker threads never stall behind a page
//! load.
//!
//! ## Load policy
//!
//! The tab navigates to a `file://` URL of the already-written HTML
//! artifact and waits for Chrome's frame-stopped-loading signal: the
//! subresources the document references have settled, while long-polling
//! or streaming connections opened later are tolerated rather than waited
//! on. Every wait inside the session is bounded by one timeout
//! (`load_timeout_secs`, default 60 s) set via `set_default_timeout`.
//!
//! ## Teardown
//!
//! The `Browser` handle kills its Chrome child process on drop. Since the
//! handle is a local of the blocking function, every exit path — early
//! `?` returns included — releases the session before the error reaches
//! the caller.

use crate::config::PageSetup;
use crate::error::MdPressError;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

const MM_PER_INCH: f64 = 25.4;

/// A4 paper, in the inches Chrome's print endpoint expects.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.7;

/// Render the HTML artifact to a full-page PNG and an A4 PDF.
///
/// Writes each output to its target path as soon as it is produced, so the
/// screenshot survives a failure during PDF generation.
pub async fn render(
    html_path: &Path,
    png_path: &Path,
    pdf_path: &Path,
    page: &PageSetup,
    load_timeout_secs: u64,
) -> Result<(), MdPressError> {
    let html = html_path.to_path_buf();
    let png = png_path.to_path_buf();
    let pdf = pdf_path.to_path_buf();
    let page = *page;

    tokio::task::spawn_blocking(move || render_blocking(&html, &png, &pdf, &page, load_timeout_secs))
        .await
        .map_err(|e| MdPressError::Internal(format!("Render task panicked: {}", e)))?
}

/// Blocking implementation of the browser session.
fn render_blocking(
    html_path: &Path,
    png_path: &Path,
    pdf_path: &Path,
    page: &PageSetup,
    load_timeout_secs: u64,
) -> Result<(), MdPressError> {
    let url = file_url(html_path)?;

    info!("Launching headless Chrome");
    // Sandboxing is off: the pipeline runs in CI containers where the
    // kernel denies Chrome's sandbox setup, and the content is our own.
    let options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(false)
        .build()
        .map_err(|e| MdPressError::BrowserLaunch {
            detail: e.to_string(),
        })?;

    let browser = Browser::new(options).map_err(|e| MdPressError::BrowserLaunch {
        detail: e.to_string(),
    })?;

    let tab = browser.new_tab().map_err(|e| MdPressError::BrowserLaunch {
        detail: e.to_string(),
    })?;
    tab.set_default_timeout(Duration::from_secs(load_timeout_secs));

    debug!("Loading {}", url);
    tab.navigate_to(&url).map_err(|e| MdPressError::PageLoad {
        detail: e.to_string(),
    })?;
    tab.wait_until_navigated()
        .map_err(|e| MdPressError::PageLoad {
            detail: e.to_string(),
        })?;

    // Full-page clip from the body box model; an empty document without a
    // measurable body still gets a viewport-sized screenshot.
    let clip = tab
        .wait_for_element("body")
        .and_then(|body| body.get_box_model())
        .map(|model| model.margin_viewport())
        .map_err(|e| warn!("Falling back to viewport screenshot: {}", e))
        .ok();

    let png_bytes = tab
        .capture_screenshot(CaptureScreenshotFormatOption::Png, None, clip, true)
        .map_err(|e| MdPressError::Screenshot {
            detail: e.to_string(),
        })?;
    std::fs::write(png_path, &png_bytes).map_err(|e| MdPressError::ArtifactWrite {
        path: png_path.to_path_buf(),
        source: e,
    })?;
    info!("Saved screenshot to {}", png_path.display());

    let margin_in = mm_to_inches(page.margin_mm);
    let pdf_bytes = tab
        .print_to_pdf(Some(PrintToPdfOptions {
            print_background: Some(true),
            paper_width: Some(A4_WIDTH_IN),
            paper_height: Some(A4_HEIGHT_IN),
            margin_top: Some(margin_in),
            margin_bottom: Some(margin_in),
            margin_left: Some(margin_in),
            margin_right: Some(margin_in),
            ..Default::default()
        }))
        .map_err(|e| MdPressError::PdfGeneration {
            detail: e.to_string(),
        })?;
    std::fs::write(pdf_path, &pdf_bytes).map_err(|e| MdPressError::ArtifactWrite {
        path: pdf_path.to_path_buf(),
        source: e,
    })?;
    info!("Saved PDF to {}", pdf_path.display());

    Ok(())
    // browser drops here; the Chrome child process is killed either way
}

/// Absolute `file://` URL for the HTML artifact.
fn file_url(path: &Path) -> Result<String, MdPressError> {
    let abs: PathBuf = std::fs::canonicalize(path).map_err(|e| MdPressError::ArtifactWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(format!("file://{}", abs.display()))
}

/// Chrome's print endpoint takes inches; the config speaks millimetres.
fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_margin_is_about_half_an_inch() {
        let inches = mm_to_inches(12.0);
        assert!((inches - 0.4724).abs() < 0.001, "got {inches}");
    }

    #[test]
    fn zero_margin_maps_to_zero() {
        assert_eq!(mm_to_inches(0.0), 0.0);
    }

    #[test]
    fn file_url_is_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<html></html>").unwrap();

        let url = file_url(&path).unwrap();
        assert!(url.starts_with("file:///"), "got {url}");
        assert!(url.ends_with("page.html"));
    }

    #[test]
    fn file_url_fails_for_missing_file() {
        assert!(file_url(Path::new("no/such/page.html")).is_err());
    }
}
