//! The per-run batch loop: render, encode, name, and collect each selected
//! page, then decide packaging.
//!
//! The whole loop runs on one blocking thread. Pages are processed strictly
//! sequentially in ascending page order; each iteration's pixel surface is
//! dropped before the next render, and encoded bytes accumulate in one
//! reused scratch buffer, so peak memory stays around a single page's pixels
//! plus the (much smaller) encoded outputs.
//!
//! Progress events go through a bounded channel of capacity 1. Sending
//! blocks until the consumer has taken the previous event, which paces the
//! batch against its consumer. When the consumer drops the stream the send
//! fails, the loop stops between pages, and every collected entry is dropped
//! with this stack frame: a cancelled run can never leave a partial archive
//! behind.
//!
//! Single-page runs hold their one encoded page aside instead of opening an
//! archive; the decision between image and archive is made after the loop,
//! from the selection size alone.

use crate::config::ConversionConfig;
use crate::error::Pdf2ImgError;
use crate::output::{ConversionArtifact, ConversionOutput, ConversionStats};
use crate::pipeline::input::SourceDocument;
use crate::pipeline::{encode, package, render};
use crate::progress::ConversionEvent;
use crate::selection::PageSelection;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::info;

/// Channel through which the batch reports progress and its terminal result.
pub(crate) type EventSender = mpsc::Sender<Result<ConversionEvent, Pdf2ImgError>>;

/// Run a full conversion batch, reporting through `tx`.
///
/// Invoked inside `spawn_blocking`. The terminal item is either
/// [`ConversionEvent::Finished`] or an `Err`; a cancelled run (receiver
/// dropped) sends nothing further.
pub(crate) fn run_batch(
    source: SourceDocument,
    selection: PageSelection,
    total_pages: u16,
    config: ConversionConfig,
    tx: EventSender,
) {
    match convert_pages(&source, &selection, total_pages, &config, &tx) {
        Ok(output) => {
            let _ = tx.blocking_send(Ok(ConversionEvent::Finished(Box::new(output))));
        }
        Err(Pdf2ImgError::Cancelled) => {
            info!("Conversion cancelled; discarding partial output");
        }
        Err(e) => {
            let _ = tx.blocking_send(Err(e));
        }
    }
}

fn convert_pages(
    source: &SourceDocument,
    selection: &PageSelection,
    total_pages: u16,
    config: &ConversionConfig,
    tx: &EventSender,
) -> Result<ConversionOutput, Pdf2ImgError> {
    let run_start = Instant::now();
    let scale = config.render_scale();
    let total = selection.len();

    info!(
        "Converting {} of {} pages at {} DPI ({:?})",
        total, total_pages, config.dpi, config.format
    );

    emit(
        tx,
        ConversionEvent::Started {
            total_pages,
            selection: selection.clone(),
        },
    )?;

    let pdfium = render::bind_pdfium()?;
    let document = render::open_document(&pdfium, source)?;

    let mut encode_buf: Vec<u8> = Vec::new();
    let mut single_image: Option<(String, Vec<u8>)> = None;
    let mut entries: Vec<(String, Vec<u8>)> = Vec::new();
    let mut render_duration_ms = 0u64;
    let mut encode_duration_ms = 0u64;
    let mut completed = 0usize;

    for page_number in selection.iter() {
        emit(
            tx,
            ConversionEvent::RenderingPage {
                page_number,
                completed,
                total,
            },
        )?;

        let render_start = Instant::now();
        let image = render::render_page(&document, page_number, scale)?;
        render_duration_ms += render_start.elapsed().as_millis() as u64;

        let encode_start = Instant::now();
        encode::encode_page(&image, config.format, &mut encode_buf).map_err(|e| {
            Pdf2ImgError::EncodeFailed {
                page: page_number,
                source: e,
            }
        })?;
        encode_duration_ms += encode_start.elapsed().as_millis() as u64;

        let file_name = package::page_file_name(&source.base_name, page_number, config.format);

        if selection.is_single() {
            single_image = Some((file_name, encode_buf.clone()));
        } else {
            entries.push((file_name, encode_buf.clone()));
        }

        completed += 1;
        emit(tx, ConversionEvent::page_finished(page_number, completed, total))?;
    }

    // Rendering is done; release the document before packaging.
    drop(document);

    let mut archive_duration_ms = 0u64;
    let artifact = if let Some((file_name, bytes)) = single_image {
        ConversionArtifact::Image { file_name, bytes }
    } else {
        emit(
            tx,
            ConversionEvent::BuildingArchive {
                entry_count: entries.len(),
            },
        )?;

        let archive_start = Instant::now();
        let bytes = package::build_archive(&entries)?;
        archive_duration_ms = archive_start.elapsed().as_millis() as u64;

        let entry_names = entries.into_iter().map(|(name, _)| name).collect();
        ConversionArtifact::Archive {
            file_name: package::archive_file_name(&source.base_name),
            bytes,
            entry_names,
        }
    };

    let stats = ConversionStats {
        total_pages,
        selected_pages: total,
        total_duration_ms: run_start.elapsed().as_millis() as u64,
        render_duration_ms,
        encode_duration_ms,
        archive_duration_ms,
        output_bytes: artifact.bytes().len() as u64,
    };

    info!(
        "Conversion complete: {} pages into {} ({} bytes, {}ms total)",
        total,
        artifact.file_name(),
        stats.output_bytes,
        stats.total_duration_ms
    );

    Ok(ConversionOutput { artifact, stats })
}

/// Send one event, pausing until the consumer takes it.
///
/// A failed send means the receiver is gone; the run maps that to
/// [`Pdf2ImgError::Cancelled`] and unwinds without producing output.
fn emit(tx: &EventSender, event: ConversionEvent) -> Result<(), Pdf2ImgError> {
    tx.blocking_send(Ok(event))
        .map_err(|_| Pdf2ImgError::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_reports_cancelled_once_receiver_is_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let err = emit(&tx, ConversionEvent::BuildingArchive { entry_count: 2 }).unwrap_err();
        assert!(matches!(err, Pdf2ImgError::Cancelled));
    }
}
