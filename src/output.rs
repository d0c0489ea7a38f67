//! Output types: the conversion artifact, run statistics, and document
//! metadata.
//!
//! A run produces exactly one [`ConversionArtifact`]: a single image when one
//! page was selected, a ZIP archive otherwise. The artifact owns its encoded
//! bytes and its suggested file name; writing it to disk is the caller's
//! choice via [`ConversionArtifact::save_to_dir`] (atomic: temp file, then
//! rename).

use crate::error::Pdf2ImgError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The deliverable of a conversion run.
///
/// Which variant is produced depends solely on how many pages the selection
/// resolved to: exactly one page yields `Image`, anything more yields
/// `Archive`.
pub enum ConversionArtifact {
    /// A single encoded page, named `{base}_pg{NNN}.{png|jpg}`.
    Image {
        file_name: String,
        bytes: Vec<u8>,
    },
    /// A ZIP archive named `{base}_converted.zip` holding one entry per
    /// selected page, in ascending page order, flat namespace.
    Archive {
        file_name: String,
        bytes: Vec<u8>,
        /// Entry names in archive order.
        entry_names: Vec<String>,
    },
}

impl ConversionArtifact {
    /// Suggested file name for the artifact.
    pub fn file_name(&self) -> &str {
        match self {
            ConversionArtifact::Image { file_name, .. } => file_name,
            ConversionArtifact::Archive { file_name, .. } => file_name,
        }
    }

    /// The artifact's encoded bytes (image data or finalized ZIP).
    pub fn bytes(&self) -> &[u8] {
        match self {
            ConversionArtifact::Image { bytes, .. } => bytes,
            ConversionArtifact::Archive { bytes, .. } => bytes,
        }
    }

    /// True when the artifact is a ZIP archive.
    pub fn is_archive(&self) -> bool {
        matches!(self, ConversionArtifact::Archive { .. })
    }

    /// Number of page images the artifact carries.
    pub fn entry_count(&self) -> usize {
        match self {
            ConversionArtifact::Image { .. } => 1,
            ConversionArtifact::Archive { entry_names, .. } => entry_names.len(),
        }
    }

    /// Write the artifact into `dir` under its suggested file name.
    ///
    /// The directory is created if missing. The write is atomic: bytes go to
    /// `{name}.tmp` first and are renamed into place, so a crash mid-write
    /// cannot leave a truncated artifact under the final name.
    pub async fn save_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, Pdf2ImgError> {
        let dir = dir.as_ref();
        let final_path = dir.join(self.file_name());

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Pdf2ImgError::OutputWriteFailed {
                path: final_path.clone(),
                source: e,
            })?;

        let tmp_path = dir.join(format!("{}.tmp", self.file_name()));
        tokio::fs::write(&tmp_path, self.bytes())
            .await
            .map_err(|e| Pdf2ImgError::OutputWriteFailed {
                path: final_path.clone(),
                source: e,
            })?;

        tokio::fs::rename(&tmp_path, &final_path)
            .await
            .map_err(|e| Pdf2ImgError::OutputWriteFailed {
                path: final_path.clone(),
                source: e,
            })?;

        Ok(final_path)
    }
}

impl fmt::Debug for ConversionArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionArtifact::Image { file_name, bytes } => f
                .debug_struct("Image")
                .field("file_name", file_name)
                .field("bytes", &bytes.len())
                .finish(),
            ConversionArtifact::Archive {
                file_name,
                bytes,
                entry_names,
            } => f
                .debug_struct("Archive")
                .field("file_name", file_name)
                .field("bytes", &bytes.len())
                .field("entries", &entry_names.len())
                .finish(),
        }
    }
}

/// Result of a complete conversion run.
#[derive(Debug)]
pub struct ConversionOutput {
    /// The produced image or archive.
    pub artifact: ConversionArtifact,
    /// Timing and size statistics for the run.
    pub stats: ConversionStats,
}

/// Statistics about a conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Total pages in the source document.
    pub total_pages: u16,
    /// Pages the range expression resolved to (= pages rendered).
    pub selected_pages: usize,
    /// Wall-clock duration of the whole run in milliseconds.
    pub total_duration_ms: u64,
    /// Time spent rasterising pages.
    pub render_duration_ms: u64,
    /// Time spent encoding pixel buffers to PNG/JPEG.
    pub encode_duration_ms: u64,
    /// Time spent assembling the ZIP archive. Zero for single-image runs.
    pub archive_duration_ms: u64,
    /// Size of the final artifact in bytes.
    pub output_bytes: u64,
}

/// Document metadata, extracted without rendering any page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Number of pages in the document.
    pub page_count: u16,
    /// Size of the input in bytes.
    pub size_bytes: u64,
    /// Document title, if set.
    pub title: Option<String>,
    /// Document author, if set.
    pub author: Option<String>,
    /// Document subject, if set.
    pub subject: Option<String>,
    /// Creating application, if set.
    pub creator: Option<String>,
    /// Producing application, if set.
    pub producer: Option<String>,
    /// PDF format version, e.g. "Pdf17".
    pub pdf_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_artifact() -> ConversionArtifact {
        ConversionArtifact::Image {
            file_name: "doc_pg001.png".into(),
            bytes: vec![1, 2, 3],
        }
    }

    fn archive_artifact() -> ConversionArtifact {
        ConversionArtifact::Archive {
            file_name: "doc_converted.zip".into(),
            bytes: vec![4, 5],
            entry_names: vec!["doc_pg001.png".into(), "doc_pg003.png".into()],
        }
    }

    #[test]
    fn artifact_accessors() {
        let img = image_artifact();
        assert_eq!(img.file_name(), "doc_pg001.png");
        assert_eq!(img.bytes(), &[1, 2, 3]);
        assert!(!img.is_archive());
        assert_eq!(img.entry_count(), 1);

        let zip = archive_artifact();
        assert_eq!(zip.file_name(), "doc_converted.zip");
        assert!(zip.is_archive());
        assert_eq!(zip.entry_count(), 2);
    }

    #[test]
    fn artifact_debug_reports_sizes_not_bytes() {
        let dbg = format!("{:?}", archive_artifact());
        assert!(dbg.contains("doc_converted.zip"));
        assert!(dbg.contains("entries"));
        assert!(!dbg.contains("[4, 5]"), "raw bytes leaked into Debug: {dbg}");
    }

    #[tokio::test]
    async fn save_to_dir_writes_atomically() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifact = image_artifact();

        let path = artifact
            .save_to_dir(dir.path())
            .await
            .expect("save should succeed");

        assert_eq!(path, dir.path().join("doc_pg001.png"));
        assert_eq!(std::fs::read(&path).expect("read back"), vec![1, 2, 3]);
        assert!(
            !dir.path().join("doc_pg001.png.tmp").exists(),
            "temp file must be renamed away"
        );
    }

    #[tokio::test]
    async fn save_to_dir_creates_missing_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("out").join("images");

        let path = image_artifact()
            .save_to_dir(&nested)
            .await
            .expect("save should create the directory");

        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }
}
