//! CLI binary for pdf2img.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, drives the event stream into a progress bar, and
//! writes the resulting image or archive to disk.

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2img::{
    convert_stream, inspect, ConversionConfig, ConversionEvent, ConversionOutput, ImageFormat,
};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
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

// ── Progress bar styles ──────────────────────────────────────────────────────

/// Spinner-only style used while the document is being opened, before the
/// page count is known.
fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"])
}

/// Full bar style, switched to once `Started` reports the selection size.
fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:.bold}  \
         [{bar:42.green/238}] {pos:>3}/{len} pages  \
         ⏱ {elapsed_precise}  ETA {eta_precise}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▉▊▋▌▍▎▏  ")
    .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"])
}

fn activate_bar(bar: &ProgressBar, total: usize) {
    bar.set_length(total as u64);
    bar.set_style(bar_style());
    bar.set_prefix("Converting");
    bar.reset_eta();
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every page at 300 DPI (ZIP archive in the current directory)
  pdf2img document.pdf

  # One selected page produces a single PNG, no archive
  pdf2img --pages 3 document.pdf

  # Printer-style ranges, JPEG output
  pdf2img --pages "1, 3-5, 12" --format jpeg scan.pdf

  # Low-resolution thumbnails into a directory
  pdf2img --dpi 72 --pages 1 deck.pdf -o thumbs/

  # Inspect PDF metadata without converting
  pdf2img --inspect-only document.pdf

  # Machine-readable run report
  pdf2img --json document.pdf -o out/

DPI PRESETS:
  72    screen preview   (1x page size)
  150   comfortable read (~2x page size)
  300   print quality    (default, ~4x page size)

PAGE SELECTION:
  Page numbers are 1-based. Tokens are comma-separated; each token is a
  single page ("3") or an inclusive range ("3-5"). Malformed tokens and
  out-of-range pages are skipped, reversed ranges are normalised, and an
  empty expression selects every page.

ENVIRONMENT VARIABLES:
  PDF2IMG_DPI         Default rendering DPI
  PDF2IMG_FORMAT      Default output format (png, jpeg)
  PDF2IMG_PAGES       Default page selection
  PDF2IMG_OUTPUT_DIR  Default output directory
  PDFIUM_LIB_PATH     Directory containing the pdfium shared library

SETUP:
  pdf2img renders through the pdfium native library, loaded at runtime.
  Download a build for your platform from
  https://github.com/bblanchon/pdfium-binaries and either install it
  system-wide or point PDFIUM_LIB_PATH at its directory.
"#;

/// Convert PDF pages to PNG or JPEG images.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2img",
    version,
    about = "Convert PDF pages to PNG or JPEG images",
    long_about = "Convert PDF documents to page images at a chosen resolution. \
One selected page produces a single image file; several produce a flat ZIP \
archive with one image per page.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    input: PathBuf,

    /// Directory to write the image or archive into.
    #[arg(short, long, env = "PDF2IMG_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Page selection: "3", "1-5", or "1, 3-5, 12". Empty selects all pages.
    #[arg(long, env = "PDF2IMG_PAGES", default_value = "")]
    pages: String,

    /// Rendering resolution in dots per inch.
    #[arg(long, env = "PDF2IMG_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(1..))]
    dpi: u32,

    /// Output image format.
    #[arg(long, env = "PDF2IMG_FORMAT", value_enum, default_value = "png")]
    format: FormatArg,

    /// Print PDF metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Print a JSON run report instead of human-readable output.
    #[arg(long, env = "PDF2IMG_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "PDF2IMG_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2IMG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2IMG_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Png,
    Jpeg,
}

impl From<FormatArg> for ImageFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Jpeg => ImageFormat::Jpeg,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };
    // In verbose mode we always want all logs regardless of progress.
    let filter = if cli.verbose { "debug" } else { filter };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input).await.context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialise metadata")?
            );
        } else {
            println!("File:         {}", cli.input.display());
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("Size:         {}", format_bytes(meta.size_bytes));
            println!("PDF Version:  {}", meta.pdf_version);
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let config = ConversionConfig::builder()
        .dpi(cli.dpi)
        .format(cli.format.into())
        .page_range(cli.pages.as_str())
        .build()
        .context("Invalid configuration")?;

    // ── Run conversion, driving the event stream ─────────────────────────
    let bar = if show_progress {
        let b = ProgressBar::new(0); // length set once Started arrives
        b.set_style(spinner_style());
        b.set_prefix("Preparing");
        b.set_message("Opening PDF…");
        b.enable_steady_tick(Duration::from_millis(80));
        Some(b)
    } else {
        None
    };

    let mut stream = match convert_stream(&cli.input, &config).await {
        Ok(s) => s,
        Err(e) => {
            if let Some(b) = &bar {
                b.finish_and_clear();
            }
            return Err(anyhow::Error::new(e).context("Conversion failed"));
        }
    };

    let mut final_output: Option<ConversionOutput> = None;
    let mut page_start = Instant::now();

    while let Some(item) = stream.next().await {
        let event = match item {
            Ok(ev) => ev,
            Err(e) => {
                if let Some(b) = &bar {
                    b.finish_and_clear();
                }
                return Err(anyhow::Error::new(e).context("Conversion failed"));
            }
        };

        match event {
            ConversionEvent::Started {
                total_pages,
                selection,
            } => {
                if let Some(b) = &bar {
                    activate_bar(b, selection.len());
                    b.println(format!(
                        "{} {}",
                        cyan("◆"),
                        bold(&format!(
                            "Converting {} of {} pages…",
                            selection.len(),
                            total_pages
                        ))
                    ));
                }
            }
            ConversionEvent::RenderingPage { page_number, .. } => {
                page_start = Instant::now();
                if let Some(b) = &bar {
                    b.set_message(format!("page {page_number}"));
                }
            }
            ConversionEvent::PageFinished {
                page_number,
                completed,
                total,
                ..
            } => {
                if let Some(b) = &bar {
                    b.println(format!(
                        "  {} Page {:>4}  {:>3}/{:<3}  {}",
                        green("✓"),
                        page_number,
                        completed,
                        total,
                        dim(&format!("{:.1}s", page_start.elapsed().as_secs_f64())),
                    ));
                    b.inc(1);
                }
            }
            ConversionEvent::BuildingArchive { entry_count } => {
                if let Some(b) = &bar {
                    b.set_message(format!("packaging {entry_count} images…"));
                }
            }
            ConversionEvent::Finished(output) => {
                final_output = Some(*output);
            }
        }
    }

    if let Some(b) = &bar {
        b.finish_and_clear();
    }

    let output = final_output.context("Conversion ended unexpectedly")?;

    // ── Write the artifact ───────────────────────────────────────────────
    let written = output
        .artifact
        .save_to_dir(&cli.output_dir)
        .await
        .with_context(|| format!("Failed to write output to {}", cli.output_dir.display()))?;

    // ── Summary ──────────────────────────────────────────────────────────
    if cli.json {
        let report = serde_json::json!({
            "output_path": written,
            "file_name": output.artifact.file_name(),
            "archive": output.artifact.is_archive(),
            "images": output.artifact.entry_count(),
            "stats": output.stats,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{} {} pages  {}ms  →  {}",
            green("✔"),
            bold(&output.stats.selected_pages.to_string()),
            output.stats.total_duration_ms,
            bold(&written.display().to_string()),
        );
        eprintln!(
            "   {} render  /  {} encode  /  {} written",
            dim(&format!("{}ms", output.stats.render_duration_ms)),
            dim(&format!("{}ms", output.stats.encode_duration_ms)),
            dim(&format_bytes(output.stats.output_bytes)),
        );
    }

    Ok(())
}

/// Human-readable byte count for summaries ("1.4 MiB").
fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    let b = bytes as f64;
    if b >= MIB {
        format!("{:.1} MiB", b / MIB)
    } else if b >= KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{bytes} B")
    }
}
