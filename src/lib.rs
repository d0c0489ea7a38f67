//! # pdf2img
//!
//! Convert PDF documents to page images (PNG or JPEG), one image per page.
//!
//! ## Why this crate?
//!
//! Plenty of tools extract text from PDFs; fewer turn each page into a
//! faithful raster image at a chosen resolution. This crate rasterises pages
//! via pdfium at an exact DPI, encodes them as PNG or JPEG, and packages the
//! result: a single image when one page was selected, a flat ZIP archive
//! otherwise. Page ranges use the familiar printer-dialog syntax
//! (`"1, 3-5"`), and every run reports progress through a paced event
//! stream.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input    type and size gates, base-name derivation
//!  ├─ 2. Render   rasterise pages via pdfium (CPU-bound, spawn_blocking)
//!  ├─ 3. Encode   pixel surface → PNG or JPEG bytes
//!  ├─ 4. Package  deterministic file names, single image or ZIP archive
//!  └─ 5. Output   artifact + run stats, progress events along the way
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2img::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .dpi(150)
//!         .page_range("1, 3-5")
//!         .build()?;
//!     let output = convert("document.pdf", &config).await?;
//!     output.artifact.save_to_dir("out").await?;
//!     eprintln!(
//!         "{} pages in {}ms",
//!         output.stats.selected_pages, output.stats.total_duration_ms
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2img` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdf2img = { version = "0.1", default-features = false }
//! ```
//!
//! ## Runtime Requirement
//!
//! Rendering loads the native pdfium library at runtime. Point
//! `PDFIUM_LIB_PATH` at the directory containing `libpdfium.so` /
//! `libpdfium.dylib` / `pdfium.dll`, or install pdfium where the system
//! loader finds it.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod selection;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, ImageFormat, JPEG_QUALITY};
pub use convert::{convert, convert_bytes, convert_sync, convert_to_file, inspect};
pub use error::Pdf2ImgError;
pub use output::{ConversionArtifact, ConversionOutput, ConversionStats, DocumentMetadata};
pub use pipeline::input::MAX_INPUT_BYTES;
pub use progress::ConversionEvent;
pub use selection::PageSelection;
pub use stream::{convert_stream, convert_stream_bytes, ConversionStream};
