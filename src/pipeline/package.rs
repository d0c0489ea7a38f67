//! Output packaging: deterministic file names and ZIP assembly.
//!
//! Names are a pure function of the source base name, the page number, and
//! the encoding, so re-running a conversion always produces the same files.
//! The archive is flat: entries sit at the root in the order they were
//! produced, which is ascending page order.

use crate::config::ImageFormat;
use crate::error::Pdf2ImgError;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Output name for one page: `{base}_pg{NNN}.{ext}`.
///
/// Page numbers are zero-padded to three digits; wider numbers keep all
/// their digits.
pub fn page_file_name(base_name: &str, page_number: u16, format: ImageFormat) -> String {
    format!("{}_pg{:03}.{}", base_name, page_number, format.extension())
}

/// Output name for a multi-page run's archive: `{base}_converted.zip`.
pub fn archive_file_name(base_name: &str) -> String {
    format!("{}_converted.zip", base_name)
}

/// Assemble entries into a deflate-compressed ZIP, in the given order.
///
/// Entry names are taken as-is. Page numbers are unique within a selection
/// so names cannot collide; if a caller ever passes duplicates anyway, both
/// entries are appended and extractors resolve the later one.
pub fn build_archive(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, Pdf2ImgError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in entries {
        writer.start_file(name.as_str(), options)?;
        writer
            .write_all(bytes)
            .map_err(zip::result::ZipError::Io)?;
    }

    let cursor = writer.finish()?;
    let bytes = cursor.into_inner();
    debug!("Built archive: {} entries, {} bytes", entries.len(), bytes.len());

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    #[test]
    fn page_names_are_zero_padded() {
        assert_eq!(page_file_name("report", 1, ImageFormat::Png), "report_pg001.png");
        assert_eq!(page_file_name("report", 42, ImageFormat::Png), "report_pg042.png");
        assert_eq!(page_file_name("scan", 7, ImageFormat::Jpeg), "scan_pg007.jpg");
    }

    #[test]
    fn page_numbers_wider_than_three_digits_keep_all_digits() {
        assert_eq!(page_file_name("big", 1234, ImageFormat::Png), "big_pg1234.png");
    }

    #[test]
    fn archive_name_appends_converted_suffix() {
        assert_eq!(archive_file_name("report"), "report_converted.zip");
        assert_eq!(archive_file_name("Quarterly Report"), "Quarterly Report_converted.zip");
    }

    #[test]
    fn archive_preserves_entry_order_and_content() {
        let entries = vec![
            ("doc_pg001.png".to_string(), vec![1u8, 2, 3]),
            ("doc_pg003.png".to_string(), vec![4u8, 5]),
            ("doc_pg007.png".to_string(), vec![6u8]),
        ];

        let bytes = build_archive(&entries).expect("archive should build");
        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");

        assert_eq!(archive.len(), 3);
        for (i, (name, content)) in entries.iter().enumerate() {
            let mut entry = archive.by_index(i).expect("entry present");
            assert_eq!(entry.name(), name, "entry {i} out of order");

            let mut read_back = Vec::new();
            std::io::Read::read_to_end(&mut entry, &mut read_back).expect("read entry");
            assert_eq!(&read_back, content);
        }
    }

    #[test]
    fn archive_entries_sit_at_the_root() {
        let entries = vec![("doc_pg001.png".to_string(), vec![0u8; 16])];
        let bytes = build_archive(&entries).expect("archive should build");
        let archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");

        for name in archive.file_names() {
            assert!(!name.contains('/'), "expected flat namespace, got {name}");
        }
    }
}
