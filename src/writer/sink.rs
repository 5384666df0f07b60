//! Archive sinks the package writers emit their entries into.
use crate::common::{Compression, Error, Result};
use std::io::{Seek, Write};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Destination of package entries.
pub trait ArchiveSink {
    /// Add an entry with the sink's configured compression.
    fn add_entry(&mut self, name: &str, data: &[u8]) -> Result<()>;

    /// Add an entry without compression.
    fn add_stored_entry(&mut self, name: &str, data: &[u8]) -> Result<()>;

    /// Write the archive trailer. No entries may be added afterwards.
    fn finish(&mut self) -> Result<()>;
}

/// [`ArchiveSink`] writing a ZIP container.
pub struct ZipSink<W: Write + Seek> {
    zip: Option<ZipWriter<W>>,
    finished: Option<W>,
    compression: Compression,
}

impl<W: Write + Seek> ZipSink<W> {
    pub fn new(writer: W, compression: Compression) -> Self {
        Self {
            zip: Some(ZipWriter::new(writer)),
            finished: None,
            compression,
        }
    }

    fn write(&mut self, name: &str, data: &[u8], method: CompressionMethod) -> Result<()> {
        let zip = self
            .zip
            .as_mut()
            .ok_or_else(|| Error::Zip(format!("archive already finished, cannot add {}", name)))?;
        let options = SimpleFileOptions::default().compression_method(method);
        zip.start_file(name, options)?;
        zip.write_all(data)?;
        Ok(())
    }

    /// Finish the archive and hand back the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.finish()?;
        self.finished
            .take()
            .ok_or_else(|| Error::Zip("archive writer already taken".to_string()))
    }
}

impl<W: Write + Seek> ArchiveSink for ZipSink<W> {
    fn add_entry(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let method = match self.compression {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        };
        self.write(name, data, method)
    }

    fn add_stored_entry(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.write(name, data, CompressionMethod::Stored)
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(zip) = self.zip.take() {
            self.finished = Some(zip.finish()?);
        }
        Ok(())
    }
}
