//! ODF package writing.
//!
//! The `mimetype` entry goes first and uncompressed; every file added
//! afterwards is recorded for `META-INF/manifest.xml`, written by
//! [`PackageWriter::finish`].

use crate::common::Result;
use crate::common::xml::escape_xml;
use crate::odf::constants::{MANIFESTNS, ODF_MANIFEST, OFFICE_VERSION};
use crate::writer::ArchiveSink;
use std::fmt::Write as FmtWrite;

/// Entry in the ODF manifest
#[derive(Debug, Clone)]
struct ManifestEntry {
    full_path: String,
    media_type: String,
}

pub(crate) struct PackageWriter<'s> {
    sink: &'s mut dyn ArchiveSink,
    manifest_entries: Vec<ManifestEntry>,
}

impl<'s> PackageWriter<'s> {
    /// Start a package of `mimetype`, writing the `mimetype` entry.
    pub fn new(sink: &'s mut dyn ArchiveSink, mimetype: &str) -> Result<Self> {
        sink.add_stored_entry("mimetype", mimetype.as_bytes())?;
        Ok(Self {
            sink,
            manifest_entries: vec![ManifestEntry {
                full_path: "/".to_string(),
                media_type: mimetype.to_string(),
            }],
        })
    }

    /// Add a file with the media type guessed from its extension.
    pub fn add_file(&mut self, path: &str, content: &[u8]) -> Result<()> {
        self.add_file_with_media_type(path, content, Self::guess_media_type(path))
    }

    pub fn add_file_with_media_type(&mut self, path: &str, content: &[u8], media_type: &str) -> Result<()> {
        self.sink.add_entry(path, content)?;
        self.manifest_entries.push(ManifestEntry {
            full_path: path.to_string(),
            media_type: media_type.to_string(),
        });
        Ok(())
    }

    fn guess_media_type(path: &str) -> &'static str {
        let extension = path.rsplit('.').next().unwrap_or_default();
        match extension {
            "xml" => "text/xml",
            _ => crate::media::mime_type(extension).unwrap_or("application/octet-stream"),
        }
    }

    fn generate_manifest(&self) -> String {
        let mut manifest = String::with_capacity(256 + self.manifest_entries.len() * 96);
        let _ = write!(
            manifest,
            r#"<?xml version="1.0" encoding="UTF-8"?><manifest:manifest xmlns:manifest="{}" manifest:version="{}">"#,
            MANIFESTNS, OFFICE_VERSION
        );
        for entry in &self.manifest_entries {
            let _ = write!(
                manifest,
                r#"<manifest:file-entry manifest:full-path="{}" manifest:media-type="{}""#,
                escape_xml(&entry.full_path),
                escape_xml(&entry.media_type)
            );
            if entry.full_path == "/" {
                let _ = write!(manifest, r#" manifest:version="{}""#, OFFICE_VERSION);
            }
            manifest.push_str("/>");
        }
        manifest.push_str("</manifest:manifest>");
        manifest
    }

    /// Write the manifest. The sink itself is finished by the caller.
    pub fn finish(self) -> Result<()> {
        let manifest = self.generate_manifest();
        self.sink.add_entry(ODF_MANIFEST, manifest.as_bytes())
    }
}
