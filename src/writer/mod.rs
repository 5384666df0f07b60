//! Package writers.
//!
//! A writer turns a [`Document`] into a ZIP package. Each format implements
//! [`DocumentWriter::write_parts`], emitting every part into an
//! [`ArchiveSink`]; assembling in memory, saving to a path and saving to a
//! stream are shared.
//!
//! # Example
//!
//! ```rust
//! use quillpack::document::{Document, ElementContainer};
//! use quillpack::writer::create_writer;
//!
//! let mut doc = Document::new();
//! doc.add_section(None)?.add_text("Hello", None, None)?;
//! let writer = create_writer(Some(&doc), "Word2007")?;
//! let bytes = writer.assemble()?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), quillpack::Error>(())
//! ```

mod save;
mod sink;

pub use sink::{ArchiveSink, ZipSink};

use crate::common::{Error, Result};
use crate::document::Document;
use std::fmt;
use std::io::{Cursor, Write};
use std::path::Path;

/// Output formats known to the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// WordprocessingML package (`.docx`)
    Word2007,
    /// OpenDocument Text package (`.odt`)
    ODText,
}

impl OutputFormat {
    /// Parse a format name or extension, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "word2007" | "docx" => Ok(OutputFormat::Word2007),
            "odtext" | "odt" => Ok(OutputFormat::ODText),
            _ => Err(Error::UnsupportedFormat(name.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Word2007 => "docx",
            OutputFormat::ODText => "odt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Word2007 => f.write_str("Word2007"),
            OutputFormat::ODText => f.write_str("ODText"),
        }
    }
}

/// A format-specific package writer.
pub trait DocumentWriter {
    fn format(&self) -> OutputFormat;

    /// The document to write, if one is attached.
    fn document(&self) -> Option<&Document>;

    /// Emit every part of the package into `sink`.
    fn write_parts(&self, document: &Document, sink: &mut dyn ArchiveSink) -> Result<()>;

    /// Build the package in memory.
    fn assemble(&self) -> Result<Vec<u8>> {
        let document = self.document().ok_or(Error::NoDocumentAssigned)?;
        let mut sink = ZipSink::new(Cursor::new(Vec::new()), document.settings().compression);
        self.write_parts(document, &mut sink)?;
        Ok(sink.into_inner()?.into_inner())
    }

    /// Save to `path`. The destination only appears once the package is
    /// complete.
    fn save(&self, path: &Path) -> Result<()> {
        save::save_to_path(self, path)
    }

    /// Write the package to a stream.
    fn save_to_writer(&self, out: &mut dyn Write) -> Result<()> {
        save::save_to_stream(self, out)
    }
}

/// Create the writer for a format name (`Word2007`/`docx`, `ODText`/`odt`).
pub fn create_writer<'a>(document: Option<&'a Document>, name: &str) -> Result<Box<dyn DocumentWriter + 'a>> {
    match OutputFormat::from_name(name)? {
        #[cfg(feature = "ooxml")]
        OutputFormat::Word2007 => Ok(Box::new(crate::ooxml::docx::Word2007::with_document(document))),
        #[cfg(feature = "odf")]
        OutputFormat::ODText => Ok(Box::new(crate::odf::odt::ODText::with_document(document))),
        #[allow(unreachable_patterns)]
        other => {
            let _ = document;
            Err(Error::UnsupportedFormat(format!("{} (feature disabled)", other)))
        },
    }
}
