//! Print submission: hand the finished PDF to a remote print server.
//!
//! This stage exists only when an endpoint is configured, and its failures
//! are non-fatal by design — a rejected upload never invalidates the PDF
//! already sitting in the output directory. The orchestrator downgrades
//! [`PrintError`] to a warning on the successful result.

use crate::config::PrintConfig;
use crate::error::PrintError;
use std::path::Path;
use tracing::{debug, info};

/// What the print server said.
#[derive(Debug, Clone)]
pub struct PrintAck {
    pub status: u16,
    pub body: String,
}

/// Upload the PDF as a multipart form.
///
/// Form layout matches the print server's contract: a `file` part carrying
/// the PDF, an optional `printer` text field, and a bearer `Authorization`
/// header when a token is configured. No explicit timeout — callers may
/// wrap the pipeline in an external deadline.
pub async fn submit(pdf_path: &Path, config: &PrintConfig) -> Result<PrintAck, PrintError> {
    let endpoint = print_endpoint(&config.endpoint);
    info!("Submitting {} to {}", pdf_path.display(), endpoint);

    let bytes = tokio::fs::read(pdf_path)
        .await
        .map_err(|e| PrintError::Transport {
            detail: format!("failed to read PDF for upload: {}", e),
        })?;

    let file_name = pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rendered.pdf".to_string());

    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("application/pdf")
        .map_err(|e| PrintError::Transport {
            detail: e.to_string(),
        })?;

    let mut form = reqwest::multipart::Form::new().part("file", part);
    if let Some(ref printer) = config.printer {
        form = form.text("printer", printer.clone());
    }

    let mut request = reqwest::Client::new().post(&endpoint).multipart(form);
    if let Some(ref token) = config.token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(|e| PrintError::Transport {
        detail: e.to_string(),
    })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    debug!("Print server answered {}", status);

    if !status.is_success() {
        return Err(PrintError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    Ok(PrintAck {
        status: status.as_u16(),
        body,
    })
}

/// Normalise the configured base URL into the upload endpoint.
fn print_endpoint(base: &str) -> String {
    format!("{}/print", base.trim_end_matches('/'))
}
