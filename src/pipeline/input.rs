//! Input validation: reject non-PDF and oversized input before any parsing.
//!
//! Two gates run before pdfium ever sees the bytes:
//!
//! * **Size ceiling** — anything above [`MAX_INPUT_BYTES`] is rejected
//!   outright. For file input the check reads filesystem metadata only, so
//!   an oversized file is refused without loading its content.
//! * **Magic bytes** — the first four bytes must be `%PDF`. A wrong
//!   extension with a valid header converts fine; a right extension with a
//!   wrong header is rejected with the offending bytes in the message.

use crate::error::Pdf2ImgError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Input size ceiling: 50 MB, checked before any parse attempt.
pub const MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Where the document bytes live for the duration of a run.
#[derive(Debug)]
pub enum SourceData {
    /// Input stays on disk; pdfium reads it from the path.
    File(PathBuf),
    /// Input was handed over in memory; pdfium reads the slice.
    Memory(Vec<u8>),
}

/// A validated input document plus the naming info derived from it.
#[derive(Debug)]
pub struct SourceDocument {
    /// Validated bytes or path.
    pub data: SourceData,
    /// Display name for error messages (path or caller-supplied name).
    pub name: String,
    /// Source name with its extension stripped; seeds every output name.
    pub base_name: String,
    /// Input size in bytes.
    pub size_bytes: u64,
}

/// Validate a file on disk and wrap it as a [`SourceDocument`].
pub async fn resolve_file(path: impl AsRef<Path>) -> Result<SourceDocument, Pdf2ImgError> {
    let path = path.as_ref().to_path_buf();

    let metadata = tokio::fs::metadata(&path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => Pdf2ImgError::PermissionDenied { path: path.clone() },
        _ => Pdf2ImgError::FileNotFound { path: path.clone() },
    })?;

    if !metadata.is_file() {
        return Err(Pdf2ImgError::FileNotFound { path });
    }

    let name = path.display().to_string();

    // Size gate first: an oversized file is refused on metadata alone,
    // without reading a single content byte.
    if metadata.len() > MAX_INPUT_BYTES {
        return Err(Pdf2ImgError::InputTooLarge {
            name,
            size_bytes: metadata.len(),
            limit_bytes: MAX_INPUT_BYTES,
        });
    }

    let mut magic = [0u8; 4];
    match std::fs::File::open(&path) {
        Ok(mut f) => {
            if f.read_exact(&mut magic).is_err() || &magic != PDF_MAGIC {
                return Err(Pdf2ImgError::InvalidInputType { name, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2ImgError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(Pdf2ImgError::FileNotFound { path });
        }
    }

    let base_name = base_name_of(&path);
    debug!("Resolved input file: {} ({} bytes)", name, metadata.len());

    Ok(SourceDocument {
        data: SourceData::File(path),
        name,
        base_name,
        size_bytes: metadata.len(),
    })
}

/// Validate in-memory PDF bytes and wrap them as a [`SourceDocument`].
///
/// `source_name` supplies the display name and, extension stripped, the base
/// name for output files.
pub fn resolve_bytes(bytes: Vec<u8>, source_name: &str) -> Result<SourceDocument, Pdf2ImgError> {
    let name = source_name.to_string();

    if bytes.len() as u64 > MAX_INPUT_BYTES {
        return Err(Pdf2ImgError::InputTooLarge {
            name,
            size_bytes: bytes.len() as u64,
            limit_bytes: MAX_INPUT_BYTES,
        });
    }

    let mut magic = [0u8; 4];
    let head = bytes.get(..4);
    match head {
        Some(head) if head == PDF_MAGIC => {}
        _ => {
            if let Some(head) = head {
                magic.copy_from_slice(head);
            }
            return Err(Pdf2ImgError::InvalidInputType { name, magic });
        }
    }

    let base_name = base_name_of(Path::new(source_name));
    let size_bytes = bytes.len() as u64;
    debug!("Resolved in-memory input: {} ({} bytes)", name, size_bytes);

    Ok(SourceDocument {
        data: SourceData::Memory(bytes),
        name,
        base_name,
        size_bytes,
    })
}

/// Source name with its extension stripped.
fn base_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
