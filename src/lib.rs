//! Quillpack - build word-processing documents in memory and save them as
//! DOCX or ODT packages.
//!
//! A [`Document`](document::Document) holds sections with their headers,
//! footers and content elements. Styles are registered once per document or
//! given inline, media is deduplicated per relationship scope, and a
//! [`DocumentWriter`](writer::DocumentWriter) turns the model into a ZIP
//! package.
//!
//! # Features
//!
//! - **Style registry**: named font, paragraph, table, heading and link styles
//! - **Media registry**: content-addressed images, OLE objects and hyperlinks
//!   with stable relationship ids
//! - **Document model**: paragraphs, runs, links, images, tables, lists,
//!   footnotes, headings and tables of contents
//! - **Writers**: WordprocessingML (`Word2007`) and OpenDocument Text (`ODText`)
//! - **Staged saves**: a failed save never leaves a partial file behind
//!
//! # Example
//!
//! ```rust
//! use quillpack::document::{Document, ElementContainer};
//! use quillpack::style::FontStyle;
//!
//! let mut doc = Document::new();
//! doc.add_font_style("Strong", FontStyle::new().bold(true), None)?;
//! let section = doc.add_section(None)?;
//! section.add_title("Report", 1)?;
//! section.add_text("Quarterly numbers", "Strong", None)?;
//!
//! let dir = tempfile::tempdir()?;
//! doc.save(dir.path().join("report.docx"), "Word2007")?;
//! doc.save(dir.path().join("report.odt"), "ODText")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Error type, settings, metadata and shared helpers
pub mod common;

/// Document tree and builder API
pub mod document;

/// Images, embedded objects and hyperlinks with their relationship ids
pub mod media;

/// Style definitions and the per-document registry
pub mod style;

/// Format factory, archive sink and staged saving
pub mod writer;

/// WordprocessingML (.docx) output
#[cfg(feature = "ooxml")]
pub mod ooxml;

/// OpenDocument Text (.odt) output
#[cfg(feature = "odf")]
pub mod odf;

// Re-export commonly used types for convenience
pub use common::{Error, Result, Settings};
pub use document::{Document, ElementContainer};
pub use writer::{DocumentWriter, create_writer};
