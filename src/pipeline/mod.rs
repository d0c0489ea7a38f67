//! Pipeline stages for PDF-to-image conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch rendering backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ encode ──▶ package
//! (validate) (pdfium)  (png/jpeg) (name + zip)
//! ```
//!
//! 1. [`input`]   — validate magic bytes and size ceiling before any parsing
//! 2. [`render`]  — open the document and rasterise pages; runs in
//!    `spawn_blocking` because pdfium is not async-safe
//! 3. [`encode`]  — encode each rendered page to PNG or JPEG bytes
//! 4. [`package`] — deterministic file naming and ZIP assembly
//!
//! [`batch`] drives the per-page loop across stages 2–4 and emits progress
//! events along the way.

pub mod batch;
pub mod encode;
pub mod input;
pub mod package;
pub mod render;
