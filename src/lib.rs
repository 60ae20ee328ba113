//! # mdpress
//!
//! Render Markdown documents to print-ready PDF through headless Chrome.
//!
//! ## Why this crate?
//!
//! Turning a README or report into a decent-looking PDF usually means
//! stitching a Markdown parser to a browser by hand — and when that script
//! fails at 3 a.m. in CI, the output directory is empty and there is
//! nothing to debug with. mdpress treats diagnosability as the core
//! feature: every stage writes its evidence as it goes, and a failed run
//! always leaves a human-readable error report behind.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown (file or URL)
//!  │
//!  ├─ 1. Source    resolve local file or fetch over HTTP
//!  ├─ 2. Compose   pulldown-cmark → styled HTML document
//!  ├─ 3. Artifact  rendered.html hits disk before the browser starts
//!  ├─ 4. Render    headless Chrome → rendered.png, then rendered.pdf
//!  ├─ 5. Print     optional multipart upload to a print server
//!  └─ on failure   error.txt + render_failed.txt, always
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdpress::{render, MarkdownSource, RenderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RenderConfig::builder()
//!         .source(MarkdownSource::from_input("README.md"))
//!         .out_dir("out")
//!         .build()?;
//!     let outcome = render(&config).await?;
//!     println!("PDF at {}", outcome.artifacts.pdf.display());
//!     if let Some(warning) = outcome.print_warning {
//!         eprintln!("print warning: {warning}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mdpress` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! mdpress = { version = "0.4", default-features = false }
//! ```
//!
//! A Chrome or Chromium binary must be installed; the browser session is
//! scoped to one run and torn down unconditionally, success or failure.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{MarkdownSource, PageSetup, PrintConfig, RenderConfig, RenderConfigBuilder};
pub use error::{MdPressError, PrintError, Stage};
pub use output::{ArtifactSet, RenderOutcome, RenderStats};
pub use render::{render, render_sync};
