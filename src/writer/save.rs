//! Staged saving.
//!
//! The archive is written into a temporary file and only moved into place
//! once it is complete. On any failure the temporary file is removed and the
//! destination is left as it was.
use super::DocumentWriter;
use super::sink::{ArchiveSink, ZipSink};
use crate::common::{Compression, Error, Result};
use log::debug;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

fn staging_file(dir: &Path) -> Result<NamedTempFile> {
    Ok(Builder::new().prefix(".quillpack-").suffix(".tmp").tempfile_in(dir)?)
}

/// Write the whole package into `file` through the sink built by `make_sink`.
/// The sink, and with it the archive handle, is dropped before returning.
fn write_staged<'f, W, F>(writer: &W, file: &'f File, make_sink: F) -> Result<()>
where
    W: DocumentWriter + ?Sized,
    F: FnOnce(&'f File, Compression) -> Box<dyn ArchiveSink + 'f>,
{
    let document = writer.document().ok_or(Error::NoDocumentAssigned)?;
    let mut sink = make_sink(file, document.settings().compression);
    writer.write_parts(document, sink.as_mut())?;
    sink.finish()
}

pub(crate) fn save_to_path<W: DocumentWriter + ?Sized>(writer: &W, path: &Path) -> Result<()> {
    save_to_path_with(writer, path, |file, compression| Box::new(ZipSink::new(file, compression)))
}

/// Save to `path`, staging next to it so the final rename stays on one
/// filesystem.
pub(crate) fn save_to_path_with<W, F>(writer: &W, path: &Path, make_sink: F) -> Result<()>
where
    W: DocumentWriter + ?Sized,
    F: for<'f> FnOnce(&'f File, Compression) -> Box<dyn ArchiveSink + 'f>,
{
    if writer.document().is_none() {
        return Err(Error::NoDocumentAssigned);
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = staging_file(dir)?;
    debug!("staging package in {}", staged.path().display());
    write_staged(writer, staged.as_file(), make_sink)?;
    staged.persist(path)?;
    Ok(())
}

/// Save to a stream, staging in the configured temporary directory.
pub(crate) fn save_to_stream<W: DocumentWriter + ?Sized>(writer: &W, out: &mut dyn Write) -> Result<()> {
    let document = writer.document().ok_or(Error::NoDocumentAssigned)?;
    let dir = document.settings().staging_dir();
    let mut staged = staging_file(&dir)?;
    debug!("staging package in {}", staged.path().display());
    write_staged(writer, staged.as_file(), |file, compression| {
        Box::new(ZipSink::new(file, compression))
    })?;
    let file = staged.as_file_mut();
    file.rewind()?;
    std::io::copy(file, out)?;
    out.flush()?;
    Ok(())
}
