//! CLI binary for mdpress.
//!
//! A thin shim over the library crate that maps CLI flags and environment
//! variables to `RenderConfig` and turns the pipeline result into an exit
//! code: 0 when a PDF was produced (print warnings included), 1 otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use mdpress::{render, MarkdownSource, PrintConfig, RenderConfig};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render the repository README to out/rendered.pdf
  mdpress

  # Render a specific file into a custom directory
  mdpress docs/handbook.md -o build/pdf

  # Render a remote document
  mdpress https://raw.githubusercontent.com/user/repo/main/README.md

  # Render and hand the PDF to a print server
  mdpress report.md --print-server https://print.internal --printer office-laser

  # Machine-readable result
  mdpress report.md --json

ENVIRONMENT VARIABLES:
  MD_PATH             Markdown file path (same as the positional argument)
  MD_URL              Markdown URL, used when no path is given
  OUT_DIR             Output directory (default: out)
  PDF_MARGIN_MM       Uniform PDF margin in millimetres (default: 12)
  RENDER_TIMEOUT      Page-load timeout in seconds (default: 60)
  FETCH_TIMEOUT       Remote-fetch timeout in seconds (default: 120)
  PRINT_SERVER_URL    Enables the print stage when set
  PRINTER_NAME        Target printer, forwarded to the print server
  PRINT_SERVER_TOKEN  Bearer credential for the print server

OUTPUT (under OUT_DIR):
  rendered.html       Composed document, written before Chrome starts
  rendered.png        Full-page screenshot
  rendered.pdf        The primary output
  error.txt           Written on fatal failure: stage, error chain, fingerprint
  render_failed.txt   Placeholder written when no PDF could be produced

A failed run always leaves error.txt behind — diagnose from the output
directory instead of re-running with extra logging.
"#;

/// Render Markdown documents to print-ready PDF via headless Chrome.
#[derive(Parser, Debug)]
#[command(
    name = "mdpress",
    version,
    about = "Render Markdown documents to print-ready PDF via headless Chrome",
    long_about = "Render a Markdown document (local file or URL) to a styled A4 PDF through \
headless Chrome, keeping debug artifacts (HTML, screenshot, error report) so a failed run is \
diagnosable from its output directory alone. Optionally submits the PDF to a print server.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file path or HTTP/HTTPS URL. Default: README.md.
    #[arg(env = "MD_PATH")]
    input: Option<String>,

    /// Markdown URL, used when no positional input is given.
    #[arg(long, env = "MD_URL")]
    url: Option<String>,

    /// Output directory for all artifacts.
    #[arg(short, long, env = "OUT_DIR", default_value = "out")]
    out_dir: PathBuf,

    /// Uniform PDF page margin in millimetres.
    #[arg(long, env = "PDF_MARGIN_MM", default_value_t = 12.0)]
    margin: f64,

    /// Page-load quiescence timeout in seconds.
    #[arg(long, env = "RENDER_TIMEOUT", default_value_t = 60)]
    timeout: u64,

    /// Remote Markdown fetch timeout in seconds.
    #[arg(long, env = "FETCH_TIMEOUT", default_value_t = 120)]
    fetch_timeout: u64,

    /// Print-server base URL; enables the submit stage.
    #[arg(long, env = "PRINT_SERVER_URL")]
    print_server: Option<String>,

    /// Printer name forwarded to the print server.
    #[arg(long, env = "PRINTER_NAME")]
    printer: Option<String>,

    /// Bearer token for the print server.
    #[arg(long, env = "PRINT_SERVER_TOKEN", hide_env_values = true)]
    print_token: Option<String>,

    /// Print the outcome as JSON instead of a summary.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    // All ambient reads happen here, once; the pipeline itself only ever
    // sees the resolved value.
    let config = build_config(&cli).context("Invalid configuration")?;

    // ── Run pipeline ─────────────────────────────────────────────────────
    match render(&config).await {
        Ok(outcome) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&outcome).context("Failed to serialise outcome")?
                );
            } else if !cli.quiet {
                eprintln!(
                    "{} {}  {}",
                    green("✔"),
                    bold(&outcome.artifacts.pdf.display().to_string()),
                    dim(&format!(
                        "{}ms ({}ms in the browser)",
                        outcome.stats.total_duration_ms, outcome.stats.render_duration_ms
                    )),
                );
            }
            if let Some(ref warning) = outcome.print_warning {
                eprintln!("{} print submission failed: {}", cyan("⚠"), warning);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {}", red("✘"), err);
            eprintln!(
                "   diagnostics: {}",
                dim(&config.out_dir.join("error.txt").display().to_string())
            );
            std::process::exit(1);
        }
    }
}

/// Map CLI args to `RenderConfig`.
fn build_config(cli: &Cli) -> Result<RenderConfig> {
    // Positional path wins over MD_URL; with neither, fall back to README.md.
    let input = cli
        .input
        .clone()
        .or_else(|| cli.url.clone())
        .unwrap_or_else(|| "README.md".to_string());

    let print = cli.print_server.as_ref().map(|endpoint| PrintConfig {
        endpoint: endpoint.clone(),
        printer: cli.printer.clone(),
        token: cli.print_token.clone(),
    });

    let config = RenderConfig::builder()
        .source(MarkdownSource::from_input(&input))
        .out_dir(cli.out_dir.clone())
        .margin_mm(cli.margin)
        .load_timeout_secs(cli.timeout)
        .fetch_timeout_secs(cli.fetch_timeout)
        .print(print)
        .build()?;

    Ok(config)
}
