//! Error types for the pdf2img library.
//!
//! One enum covers the whole pipeline, ordered by when a failure can occur:
//!
//! * **Input errors** — raised before any PDF parsing (missing file, wrong
//!   magic bytes, size ceiling). Nothing has been loaded yet.
//! * **Document errors** — raised when the document is opened (password
//!   protection vs. generic corruption are distinct so callers can show a
//!   distinct message).
//! * **Selection errors** — raised after the page range resolves to nothing,
//!   before any rendering starts.
//! * **Run errors** — raised mid-batch (render, encode, archive, write).
//!   Partial in-memory output is discarded; no file is written.
//!
//! All failures are terminal for the current run. Retrying means calling the
//! conversion again.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2img library.
#[derive(Debug, Error)]
pub enum Pdf2ImgError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input exists and was read, but is not a PDF.
    #[error("Input '{name}' is not a valid PDF.\nFirst bytes: {magic:?} (expected %PDF)")]
    InvalidInputType { name: String, magic: [u8; 4] },

    /// The input exceeds the size ceiling. Rejected before any parsing.
    #[error(
        "Input '{name}' is {size_bytes} bytes, above the {limit_bytes} byte limit.\n\
Split the document or reduce it below 50 MB."
    )]
    InputTooLarge {
        name: String,
        size_bytes: u64,
        limit_bytes: u64,
    },

    // ── Document errors ───────────────────────────────────────────────────
    /// PDF requires a password. The pipeline never supplies one.
    #[error("PDF '{name}' is password-protected.\nDecrypt it first, e.g.: qpdf --decrypt in.pdf out.pdf")]
    PasswordProtected { name: String },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{name}' is corrupt or unreadable: {detail}")]
    CorruptDocument { name: String, detail: String },

    // ── Selection errors ──────────────────────────────────────────────────
    /// The page-range expression resolved to zero pages.
    #[error(
        "Page range '{expression}' selects no pages (document has {total_pages}).\n\
Use e.g. \"1,3-5\" or leave empty for all pages."
    )]
    EmptySelection {
        expression: String,
        total_pages: u16,
    },

    // ── Run errors ────────────────────────────────────────────────────────
    /// pdfium returned an error while rendering a specific page.
    #[error("Rendering failed for page {page}: {detail}")]
    RenderFailed { page: u16, detail: String },

    /// PNG/JPEG encoding of a rendered page failed.
    #[error("Image encoding failed for page {page}: {source}")]
    EncodeFailed {
        page: u16,
        #[source]
        source: image::ImageError,
    },

    /// Writing an entry into the ZIP archive failed.
    #[error("Failed to build ZIP archive: {0}")]
    ArchiveFailed(#[from] zip::result::ZipError),

    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The caller dropped the event stream mid-run; the batch stopped
    /// between pages and no partial archive was produced.
    #[error("Conversion cancelled before completion")]
    Cancelled,

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
pdf2img needs the pdfium shared library at runtime.\n\
  • Install libpdfium where the system linker finds it, or\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_type_display_shows_magic() {
        let e = Pdf2ImgError::InvalidInputType {
            name: "report.pdf".into(),
            magic: *b"PK\x03\x04",
        };
        let msg = e.to_string();
        assert!(msg.contains("report.pdf"), "got: {msg}");
        assert!(msg.contains("%PDF"), "got: {msg}");
    }

    #[test]
    fn input_too_large_display_shows_both_sizes() {
        let e = Pdf2ImgError::InputTooLarge {
            name: "big.pdf".into(),
            size_bytes: 52_428_801,
            limit_bytes: 52_428_800,
        };
        let msg = e.to_string();
        assert!(msg.contains("52428801"), "got: {msg}");
        assert!(msg.contains("52428800"), "got: {msg}");
    }

    #[test]
    fn empty_selection_display() {
        let e = Pdf2ImgError::EmptySelection {
            expression: "40-50".into(),
            total_pages: 12,
        };
        let msg = e.to_string();
        assert!(msg.contains("40-50"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn password_protected_display_names_file() {
        let e = Pdf2ImgError::PasswordProtected {
            name: "secret.pdf".into(),
        };
        assert!(e.to_string().contains("secret.pdf"));
        assert!(e.to_string().contains("password"));
    }

    #[test]
    fn render_failed_display() {
        let e = Pdf2ImgError::RenderFailed {
            page: 7,
            detail: "bitmap allocation failed".into(),
        };
        assert!(e.to_string().contains("page 7"));
        assert!(e.to_string().contains("bitmap allocation failed"));
    }
}
