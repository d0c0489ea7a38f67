//! Streaming conversion API: observe a run as it progresses.
//!
//! ## Why stream?
//!
//! Rendering a long document takes a while. The streaming API yields
//! [`ConversionEvent`]s as the run advances, so callers can drive progress
//! bars or log page completions instead of waiting silently for the eager
//! [`crate::convert::convert`] to return.
//!
//! The stream is also the cancellation handle. Events travel through a
//! bounded channel of capacity 1: the pipeline pauses until each event is
//! consumed, and dropping the stream stops the run between pages without
//! producing any output file.

use crate::config::ConversionConfig;
use crate::error::Pdf2ImgError;
use crate::pipeline::input::SourceDocument;
use crate::pipeline::{batch, input, render};
use crate::progress::ConversionEvent;
use crate::selection::PageSelection;
use std::path::Path;
use std::pin::Pin;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;
use tracing::info;

/// A boxed stream of conversion events.
pub type ConversionStream =
    Pin<Box<dyn Stream<Item = Result<ConversionEvent, Pdf2ImgError>> + Send>>;

/// Convert a PDF file to images, streaming progress events.
///
/// Events arrive in a fixed order: `Started`, then one `RenderingPage` /
/// `PageFinished` pair per selected page in ascending page order, then
/// `BuildingArchive` for multi-page runs, and finally `Finished` carrying
/// the output. Errors during the run arrive as an `Err` item and end the
/// stream.
///
/// # Returns
/// - `Ok(ConversionStream)` — the event stream
/// - `Err(Pdf2ImgError)` — fatal error detected before rendering began
///   (missing file, not a PDF, oversized input, password, empty selection)
pub async fn convert_stream(
    path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStream, Pdf2ImgError> {
    let source = input::resolve_file(path).await?;
    stream_from_source(source, config).await
}

/// Convert in-memory PDF bytes to images, streaming progress events.
///
/// `source_name` names the input in error messages and output file names;
/// a trailing `.pdf` is stripped when deriving the base name.
pub async fn convert_stream_bytes(
    bytes: Vec<u8>,
    source_name: &str,
    config: &ConversionConfig,
) -> Result<ConversionStream, Pdf2ImgError> {
    let source = input::resolve_bytes(bytes, source_name)?;
    stream_from_source(source, config).await
}

async fn stream_from_source(
    source: SourceDocument,
    config: &ConversionConfig,
) -> Result<ConversionStream, Pdf2ImgError> {
    info!("Starting streaming conversion: {}", source.name);

    // ── Probe the document ───────────────────────────────────────────────
    // Opens and drops the document once, so password and corruption errors
    // surface here as a plain `Err` instead of a mid-stream item.
    let (source, total_pages) = render::probe_page_count(source).await?;

    // ── Resolve the page selection ───────────────────────────────────────
    let selection = PageSelection::parse(&config.page_range, total_pages);
    if selection.is_empty() {
        return Err(Pdf2ImgError::EmptySelection {
            expression: config.page_range.clone(),
            total_pages,
        });
    }

    // ── Launch the batch ─────────────────────────────────────────────────
    let (tx, rx) = mpsc::channel(1);
    let config = config.clone();
    tokio::task::spawn_blocking(move || {
        batch::run_batch(source, selection, total_pages, config, tx);
    });

    Ok(Box::pin(ReceiverStream::new(rx)))
}
