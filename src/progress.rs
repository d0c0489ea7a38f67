//! Progress events emitted while a conversion runs.
//!
//! [`crate::stream::convert_stream`] yields these in a fixed order:
//! one [`ConversionEvent::Started`], then for each selected page a
//! [`ConversionEvent::RenderingPage`] / [`ConversionEvent::PageFinished`]
//! pair in ascending page order, then [`ConversionEvent::BuildingArchive`]
//! when the run produces an archive, and finally exactly one
//! [`ConversionEvent::Finished`] carrying the output.
//!
//! The stream is paced: the pipeline pauses after each event until the
//! consumer has taken it, so a slow consumer is never more than one page
//! behind and dropping the stream stops the run between pages.

use crate::output::ConversionOutput;
use crate::selection::PageSelection;

/// A single progress event from a running conversion.
#[derive(Debug)]
pub enum ConversionEvent {
    /// The document is open and the selection is resolved; rendering is
    /// about to begin.
    Started {
        /// Total pages in the document.
        total_pages: u16,
        /// The resolved page selection for this run.
        selection: PageSelection,
    },

    /// A page render is starting.
    RenderingPage {
        /// 1-based page number being rendered.
        page_number: u16,
        /// Pages finished before this one.
        completed: usize,
        /// Total pages selected for this run.
        total: usize,
    },

    /// A page has been rendered and encoded.
    PageFinished {
        /// 1-based page number that finished.
        page_number: u16,
        /// Pages finished so far, this one included.
        completed: usize,
        /// Total pages selected for this run.
        total: usize,
        /// `completed / total` as a whole percentage, rounded half-up.
        percent: u8,
    },

    /// All pages are encoded; the ZIP archive is being assembled.
    /// Not emitted for single-page runs.
    BuildingArchive {
        /// Number of entries the archive will contain.
        entry_count: usize,
    },

    /// The run completed. Always the final event of a successful stream.
    Finished(Box<ConversionOutput>),
}

impl ConversionEvent {
    /// Build a [`ConversionEvent::PageFinished`] with the percentage
    /// computed from the counts. `total` is at least 1 here: an empty
    /// selection is rejected before any page event exists.
    pub(crate) fn page_finished(page_number: u16, completed: usize, total: usize) -> Self {
        let percent = ((completed as f64 / total as f64) * 100.0).round() as u8;
        ConversionEvent::PageFinished {
            page_number,
            completed,
            total,
            percent,
        }
    }
}
