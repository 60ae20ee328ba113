//! Source resolution: turn the configured path or URL into Markdown text.
//!
//! One attempt, no retries — retry policy belongs to whatever invokes the
//! pipeline (CI re-runs, cron). Local paths are resolved against the
//! working directory and reported as absolute paths on failure, because
//! "file not found: README.md" from a workflow runner is useless without
//! knowing where the runner was standing.

use crate::config::MarkdownSource;
use crate::error::MdPressError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolve the source to Markdown text.
///
/// `fetch_timeout_secs` bounds the HTTP GET for URL sources; file reads
/// have no timeout.
pub async fn load(source: &MarkdownSource, fetch_timeout_secs: u64) -> Result<String, MdPressError> {
    match source {
        MarkdownSource::File(path) => read_local(path).await,
        MarkdownSource::Url(url) => fetch_remote(url, fetch_timeout_secs).await,
    }
}

/// Read a local Markdown file, resolving relative paths against the CWD.
async fn read_local(path: &Path) -> Result<String, MdPressError> {
    let abs = absolutise(path);

    if !abs.exists() {
        return Err(MdPressError::SourceNotFound { path: abs });
    }

    let text = tokio::fs::read_to_string(&abs)
        .await
        .map_err(|e| MdPressError::SourceUnreadable {
            path: abs.clone(),
            source: e,
        })?;

    debug!("Loaded {} bytes of Markdown from {}", text.len(), abs.display());
    Ok(text)
}

/// Fetch a remote Markdown document with a single GET.
async fn fetch_remote(url: &str, timeout_secs: u64) -> Result<String, MdPressError> {
    info!("Fetching Markdown from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| MdPressError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            MdPressError::FetchTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            MdPressError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MdPressError::FetchStatus {
            url: url.to_string(),
            status: status.to_string(),
        });
    }

    let text = response.text().await.map_err(|e| MdPressError::FetchFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    debug!("Fetched {} bytes of Markdown", text.len());
    Ok(text)
}

/// Resolve a possibly-relative path against the current working directory.
///
/// Falls back to the path as given if the CWD itself is unreadable; the
/// subsequent open will fail with a path that is at least recognisable.
fn absolutise(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
