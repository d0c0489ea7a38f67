//! Eager (whole-run) conversion entry points.
//!
//! ## Why eager vs. streaming?
//!
//! This module provides the simpler API: wait for the whole run, then return
//! the finished artifact. Internally each function drives the same pipeline
//! as [`crate::stream::convert_stream`] and drains its events, so eager and
//! streaming runs behave identically page for page. Use the streaming API
//! when you want progress reporting or mid-run cancellation.

use crate::config::ConversionConfig;
use crate::error::Pdf2ImgError;
use crate::output::{ConversionOutput, ConversionStats, DocumentMetadata};
use crate::pipeline::{input, render};
use crate::progress::ConversionEvent;
use crate::stream::{convert_stream, convert_stream_bytes, ConversionStream};
use futures::StreamExt;
use std::path::{Path, PathBuf};

/// Convert a PDF file to images.
///
/// This is the primary entry point for the library. It returns once the run
/// is complete: a single image for one selected page, a ZIP archive for
/// several.
///
/// # Arguments
/// * `path` — Local path to a PDF file
/// * `config` — Conversion configuration
///
/// # Errors
/// - File not found / permission denied
/// - Not a PDF, or larger than the input ceiling
/// - Password-protected or unreadable document
/// - Page range that selects no pages
pub async fn convert(
    path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2ImgError> {
    let stream = convert_stream(path, config).await?;
    drain(stream).await
}

/// Convert in-memory PDF bytes to images.
///
/// This is the recommended API when the document comes from an upload, a
/// database, or a network buffer rather than a file on disk. `source_name`
/// names the input in error messages and gives output files their base name.
///
/// # Example
/// ```rust,no_run
/// use pdf2img::{convert_bytes, ConversionConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes: Vec<u8> = std::fs::read("document.pdf")?;
/// let config = ConversionConfig::default();
/// let output = convert_bytes(bytes, "document.pdf", &config).await?;
/// println!("{} ({} bytes)", output.artifact.file_name(), output.stats.output_bytes);
/// # Ok(())
/// # }
/// ```
pub async fn convert_bytes(
    bytes: Vec<u8>,
    source_name: &str,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2ImgError> {
    let stream = convert_stream_bytes(bytes, source_name, config).await?;
    drain(stream).await
}

/// Convert a PDF and write the artifact into `output_dir`.
///
/// The directory is created if missing. The write is atomic (temp file,
/// then rename) to prevent partial files. Returns the path of the written
/// file alongside the run statistics.
pub async fn convert_to_file(
    path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<(PathBuf, ConversionStats), Pdf2ImgError> {
    let output = convert(path, config).await?;
    let written = output.artifact.save_to_dir(output_dir).await?;
    Ok((written, output.stats))
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2ImgError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2ImgError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(path, config))
}

/// Read document metadata without rendering any page.
///
/// The input still goes through the usual gates (type check, size ceiling),
/// and a password-protected document fails here the same way a conversion
/// would.
pub async fn inspect(path: impl AsRef<Path>) -> Result<DocumentMetadata, Pdf2ImgError> {
    let source = input::resolve_file(path).await?;
    render::read_metadata(source).await
}

/// Consume a stream to completion and return its final output.
async fn drain(mut stream: ConversionStream) -> Result<ConversionOutput, Pdf2ImgError> {
    while let Some(item) = stream.next().await {
        match item? {
            ConversionEvent::Finished(output) => return Ok(*output),
            _ => {}
        }
    }
    Err(Pdf2ImgError::Internal(
        "Conversion stream ended without a result".to_string(),
    ))
}
