//! PDF rasterisation: open documents and render pages to `DynamicImage`
//! via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async contexts.
//! `tokio::task::spawn_blocking` moves the work onto a dedicated thread pool
//! thread designed for blocking operations, preventing the Tokio worker
//! threads from stalling during CPU-heavy rendering. The whole batch loop
//! runs on one blocking thread; only the thin probe/metadata entry points
//! here wrap themselves.
//!
//! ## Page dimensions
//!
//! PDF pages are measured in points, 72 per inch. A page is rendered at
//! `dpi / 72` scale, so the target pixel size is the page's intrinsic point
//! size times that scale, rounded, never below one pixel. The page decides
//! its own output size; callers only choose the DPI.

use crate::error::Pdf2ImgError;
use crate::output::DocumentMetadata;
use crate::pipeline::input::{SourceData, SourceDocument};
use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::debug;

/// Bind to the pdfium shared library.
///
/// `PDFIUM_LIB_PATH` points at an explicit copy; otherwise the system
/// library path is searched. Binding happens once per run, on the blocking
/// thread that uses it.
pub(crate) fn bind_pdfium() -> Result<Pdfium, Pdf2ImgError> {
    if let Ok(lib_path) = std::env::var("PDFIUM_LIB_PATH") {
        return Pdfium::bind_to_library(&lib_path)
            .map(Pdfium::new)
            .map_err(|e| {
                Pdf2ImgError::PdfiumBindingFailed(format!(
                    "PDFIUM_LIB_PATH='{lib_path}': {e:?}"
                ))
            });
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| Pdf2ImgError::PdfiumBindingFailed(format!("{e:?}")))
}

/// Open the source document, distinguishing password protection from
/// generic corruption.
pub(crate) fn open_document<'a>(
    pdfium: &'a Pdfium,
    source: &'a SourceDocument,
) -> Result<PdfDocument<'a>, Pdf2ImgError> {
    let result = match &source.data {
        SourceData::File(path) => pdfium.load_pdf_from_file(path, None),
        SourceData::Memory(bytes) => pdfium.load_pdf_from_byte_slice(bytes, None),
    };

    result.map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            Pdf2ImgError::PasswordProtected {
                name: source.name.clone(),
            }
        } else {
            Pdf2ImgError::CorruptDocument {
                name: source.name.clone(),
                detail: err_str,
            }
        }
    })
}

/// Render one page at the given scale.
///
/// `page_number` is 1-based; pdfium indexes from 0 and the adapter converts.
/// Each call produces a fresh pixel surface that fully replaces whatever the
/// previous page produced; nothing is composited across calls.
pub(crate) fn render_page(
    document: &PdfDocument<'_>,
    page_number: u16,
    scale: f32,
) -> Result<DynamicImage, Pdf2ImgError> {
    let page = document
        .pages()
        .get(page_number - 1)
        .map_err(|e| Pdf2ImgError::RenderFailed {
            page: page_number,
            detail: format!("{:?}", e),
        })?;

    let target_w = target_dimension(page.width().value, scale);
    let target_h = target_dimension(page.height().value, scale);

    let render_config = PdfRenderConfig::new()
        .set_target_width(target_w)
        .set_target_height(target_h);

    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| Pdf2ImgError::RenderFailed {
            page: page_number,
            detail: format!("{:?}", e),
        })?;

    let image = bitmap.as_image();
    debug!(
        "Rendered page {} → {}x{} px (scale {:.4})",
        page_number,
        image.width(),
        image.height(),
        scale
    );

    Ok(image)
}

/// Intrinsic point size × scale, rounded to a pixel count, floor 1.
fn target_dimension(points: f32, scale: f32) -> i32 {
    ((points * scale).round() as i32).max(1)
}

/// Open the document once to learn its page count, then hand the source
/// back for the render run.
///
/// Every run opens fresh, so a failed open (wrong password, corrupt file)
/// leaves no document state behind for a later run to pick up stale.
pub(crate) async fn probe_page_count(
    source: SourceDocument,
) -> Result<(SourceDocument, u16), Pdf2ImgError> {
    tokio::task::spawn_blocking(move || {
        let pdfium = bind_pdfium()?;
        let document = open_document(&pdfium, &source)?;
        let page_count = document.pages().len() as u16;
        drop(document);
        Ok((source, page_count))
    })
    .await
    .map_err(|e| Pdf2ImgError::Internal(format!("Probe task panicked: {}", e)))?
}

/// Extract document metadata without rendering any page.
pub(crate) async fn read_metadata(
    source: SourceDocument,
) -> Result<DocumentMetadata, Pdf2ImgError> {
    tokio::task::spawn_blocking(move || {
        let pdfium = bind_pdfium()?;
        let document = open_document(&pdfium, &source)?;

        let metadata = document.metadata();
        let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
            metadata.get(tag).and_then(|t| {
                let v = t.value().to_string();
                if v.is_empty() {
                    None
                } else {
                    Some(v)
                }
            })
        };

        Ok(DocumentMetadata {
            page_count: document.pages().len() as u16,
            size_bytes: source.size_bytes,
            title: get_meta(PdfDocumentMetadataTagType::Title),
            author: get_meta(PdfDocumentMetadataTagType::Author),
            subject: get_meta(PdfDocumentMetadataTagType::Subject),
            creator: get_meta(PdfDocumentMetadataTagType::Creator),
            producer: get_meta(PdfDocumentMetadataTagType::Producer),
            pdf_version: format!("{:?}", document.version()),
        })
    })
    .await
    .map_err(|e| Pdf2ImgError::Internal(format!("Metadata task panicked: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_dimension_rounds_points_times_scale() {
        // US Letter is 612×792 pt; at 72 DPI (scale 1.0) pixels equal points.
        assert_eq!(target_dimension(612.0, 1.0), 612);
        assert_eq!(target_dimension(792.0, 1.0), 792);

        // 150 DPI → scale 150/72.
        assert_eq!(target_dimension(612.0, 150.0 / 72.0), 1275);

        // 300 DPI → scale 300/72 ≈ 4.1667.
        assert_eq!(target_dimension(612.0, 300.0 / 72.0), 2550);
    }

    #[test]
    fn target_dimension_never_below_one_pixel() {
        assert_eq!(target_dimension(0.1, 1.0), 1);
        assert_eq!(target_dimension(0.0, 5.0), 1);
    }
}
