//! WordprocessingML (`.docx`) package writer.
//!
//! [`Word2007`] turns a [`Document`] into the parts of a Word 2007+ package.
//! The model is planned first (media re-verified, part relationship ids
//! assigned), then every part is generated from the plan and emitted into
//! the archive sink together with the media payloads.
//!
//! # Example
//!
//! ```rust
//! use quillpack::document::{Document, ElementContainer};
//! use quillpack::ooxml::docx::Word2007;
//! use quillpack::writer::DocumentWriter;
//!
//! let mut doc = Document::new();
//! doc.add_section(None)?.add_text("Hello", None, None)?;
//! let bytes = Word2007::with_document(Some(&doc)).assemble()?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), quillpack::Error>(())
//! ```

mod body;
mod content;
mod drawing;
mod parts;
mod plan;
mod props;
mod style;
mod table;

use self::body::BodyWriter;
use self::plan::PartPlan;
use crate::common::Result;
use crate::document::Document;
use crate::media::MediaScope;
use crate::writer::{ArchiveSink, DocumentWriter, OutputFormat};
use log::debug;

const NUMBERING_XML: &str = include_str!("templates/numbering.xml");
const SETTINGS_XML: &str = include_str!("templates/settings.xml");
const SETTINGS_COMPAT_XML: &str = include_str!("templates/settings_compat.xml");
const THEME_XML: &str = include_str!("templates/theme1.xml");
const WEB_SETTINGS_XML: &str = include_str!("templates/webSettings.xml");
const FONT_TABLE_XML: &str = include_str!("templates/fontTable.xml");

/// Writer for the `Word2007` format.
#[derive(Debug, Default, Clone, Copy)]
pub struct Word2007<'a> {
    document: Option<&'a Document>,
}

impl<'a> Word2007<'a> {
    pub fn new() -> Self {
        Self { document: None }
    }

    pub fn with_document(document: Option<&'a Document>) -> Self {
        Self { document }
    }

    pub fn set_document(&mut self, document: &'a Document) -> &mut Self {
        self.document = Some(document);
        self
    }
}

/// `_rels` companion of a part living in `word/`.
fn rels_name(part_name: &str) -> String {
    format!("word/_rels/{}.rels", part_name)
}

impl DocumentWriter for Word2007<'_> {
    fn format(&self) -> OutputFormat {
        OutputFormat::Word2007
    }

    fn document(&self) -> Option<&Document> {
        self.document
    }

    fn write_parts(&self, document: &Document, sink: &mut dyn ArchiveSink) -> Result<()> {
        let plan = PartPlan::build(document)?;
        let settings = document.settings();
        let styles = document.styles();
        let titles = document.titles();

        {
            let media = document.media();
            sink.add_entry("[Content_Types].xml", parts::content_types_xml(&media, &plan).as_bytes())?;
            sink.add_entry("_rels/.rels", parts::root_rels_xml().as_bytes())?;
            sink.add_entry("docProps/app.xml", parts::app_xml(document.properties()).as_bytes())?;
            sink.add_entry("docProps/core.xml", parts::core_xml(document.properties()).as_bytes())?;
            sink.add_entry(
                "word/_rels/document.xml.rels",
                parts::document_rels_xml(&media, &plan).as_bytes(),
            )?;
            for planned in &plan.parts {
                if let Some(rels) = parts::scope_rels_xml(&media, planned.part.scope()) {
                    sink.add_entry(&rels_name(&planned.part.part_name()), rels.as_bytes())?;
                }
            }
            if plan.footnotes_rid.is_some()
                && let Some(rels) = parts::scope_rels_xml(&media, MediaScope::Footnotes)
            {
                sink.add_entry(&rels_name("footnotes.xml"), rels.as_bytes())?;
            }
        }

        let mut body = BodyWriter::new(&styles, &titles, settings.strict_style_names);
        let xml = content::document_xml(&mut body, document, &plan)?;
        sink.add_entry("word/document.xml", xml.as_bytes())?;

        for planned in &plan.parts {
            let mut body = BodyWriter::new(&styles, &titles, settings.strict_style_names);
            let xml = content::header_footer_xml(&mut body, planned.part)?;
            sink.add_entry(&format!("word/{}", planned.part.part_name()), xml.as_bytes())?;
        }
        if plan.footnotes_rid.is_some() {
            let mut body = BodyWriter::new(&styles, &titles, settings.strict_style_names);
            let xml = content::footnotes_xml(&mut body, &plan)?;
            sink.add_entry("word/footnotes.xml", xml.as_bytes())?;
        }

        let styles_xml = style::styles_xml(&styles, settings, plan.footnotes_rid.is_some());
        sink.add_entry("word/styles.xml", styles_xml.as_bytes())?;
        sink.add_entry("word/numbering.xml", NUMBERING_XML.as_bytes())?;
        let settings_xml = if settings.compatibility {
            SETTINGS_COMPAT_XML
        } else {
            SETTINGS_XML
        };
        sink.add_entry("word/settings.xml", settings_xml.as_bytes())?;
        sink.add_entry("word/theme/theme1.xml", THEME_XML.as_bytes())?;
        sink.add_entry("word/webSettings.xml", WEB_SETTINGS_XML.as_bytes())?;
        sink.add_entry("word/fontTable.xml", FONT_TABLE_XML.as_bytes())?;

        let media = document.media();
        let provider = document.context().provider();
        for entry in media.payload_entries() {
            let Some(source) = entry.source() else {
                continue;
            };
            let data = source.read(provider)?;
            debug!("packaging {} ({} bytes)", entry.target(), data.len());
            sink.add_entry(&format!("word/{}", entry.target()), &data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Settings;
    use crate::document::ElementContainer;
    use crate::media::MediaSource;
    use crate::style::{FontStyle, ImageStyle};
    use image::{ImageFormat, RgbaImage};
    use quick_xml::Reader;
    use quick_xml::events::Event;
    use std::collections::HashSet;
    use std::io::{Cursor, Read};

    fn unpack(bytes: Vec<u8>) -> zip::ZipArchive<Cursor<Vec<u8>>> {
        zip::ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    fn read_entry(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut content = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
        content
    }

    fn assert_well_formed(name: &str, xml: &str) {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => panic!("{} is not well-formed: {}", name, e),
            }
        }
    }

    /// Every `Id` declared in a relationship part.
    fn relationship_ids(xml: &str) -> HashSet<String> {
        xml.split("Id=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(str::to_string)
            .collect()
    }

    fn referenced_ids(xml: &str) -> Vec<String> {
        let mut ids = Vec::new();
        for marker in ["r:id=\"", "r:embed=\""] {
            for rest in xml.split(marker).skip(1) {
                if let Some(id) = rest.split('"').next() {
                    ids.push(id.to_string());
                }
            }
        }
        ids
    }

    fn dot() -> MediaSource {
        MediaSource::generated("dot.png", RgbaImage::new(2, 2), ImageFormat::Png)
    }

    fn sample() -> Document {
        let mut doc = Document::with_settings(Settings::new().with_default_font("Calibri", 11.0));
        doc.add_font_style("Emphasis", FontStyle::new().italic(true), None).unwrap();
        doc.add_title_style(1, FontStyle::new().size(16.0).bold(true), None).unwrap();
        let section = doc.add_section(None).unwrap();
        section.add_toc(None).unwrap();
        section.add_title("Overview", 1).unwrap();
        section.add_text("Plain & simple", "Emphasis", None).unwrap();
        section.add_image(dot(), ImageStyle::new().size(20, 20)).unwrap();
        section.add_image(dot(), ImageStyle::new().size(40, 40)).unwrap();
        section.add_link("https://example.com/a?b=1&c=2", "Example", None, None).unwrap();
        section
            .add_object(MediaSource::bytes("budget.xlsx", vec![0u8; 16]), None)
            .unwrap();
        section.add_footnote(None).unwrap().add_text("A note", None, None).unwrap();
        let header = section.add_header();
        header.add_text("Header", None, None).unwrap();
        header.add_image(dot(), None).unwrap();
        section.add_footer().add_preserve_text("Page {PAGE}", None, None).unwrap();
        doc
    }

    #[test]
    fn test_package_layout() {
        let doc = sample();
        let mut archive = unpack(Word2007::with_document(Some(&doc)).assemble().unwrap());
        let names: HashSet<String> = archive.file_names().map(str::to_string).collect();
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "word/_rels/document.xml.rels",
            "word/_rels/header1.xml.rels",
            "word/document.xml",
            "word/header1.xml",
            "word/footer1.xml",
            "word/footnotes.xml",
            "word/styles.xml",
            "word/numbering.xml",
            "word/settings.xml",
            "word/theme/theme1.xml",
            "word/webSettings.xml",
            "word/fontTable.xml",
            "word/media/section_image1.png",
            "word/media/header1_image1.png",
            "word/embeddings/section_oleObject1.bin",
        ] {
            assert!(names.contains(expected), "missing {}", expected);
        }
        assert!(!names.contains("word/_rels/footer1.xml.rels"));

        for name in names.iter().filter(|n| n.ends_with(".xml") || n.ends_with(".rels")) {
            let xml = read_entry(&mut archive, name);
            assert_well_formed(name, &xml);
        }
    }

    #[test]
    fn test_duplicate_image_is_packaged_once() {
        let doc = sample();
        let mut archive = unpack(Word2007::with_document(Some(&doc)).assemble().unwrap());
        let images = archive
            .file_names()
            .filter(|n| n.starts_with("word/media/section_"))
            .count();
        // The object icon lives next to the picture
        assert_eq!(images, 2);
        let rels = read_entry(&mut archive, "word/_rels/document.xml.rels");
        assert_eq!(rels.matches("media/section_image1.png").count(), 1);
    }

    #[test]
    fn test_relationship_ids_resolve() {
        let doc = sample();
        let mut archive = unpack(Word2007::with_document(Some(&doc)).assemble().unwrap());
        for (part, rels) in [
            ("word/document.xml", "word/_rels/document.xml.rels"),
            ("word/header1.xml", "word/_rels/header1.xml.rels"),
        ] {
            let declared = relationship_ids(&read_entry(&mut archive, rels));
            for id in referenced_ids(&read_entry(&mut archive, part)) {
                assert!(declared.contains(&id), "{} references undeclared {}", part, id);
            }
        }

        let rels = read_entry(&mut archive, "word/_rels/document.xml.rels");
        for target in rels
            .split("Target=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .filter(|t| !t.starts_with("http"))
        {
            let path = format!("word/{}", target);
            assert!(archive.by_name(&path).is_ok(), "dangling target {}", path);
        }
    }

    #[test]
    fn test_content_types_and_settings() {
        let doc = sample();
        let mut archive = unpack(Word2007::with_document(Some(&doc)).assemble().unwrap());
        let types = read_entry(&mut archive, "[Content_Types].xml");
        assert!(types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(types.contains(r#"<Default Extension="bin" ContentType="application/vnd.openxmlformats-officedocument.oleObject"/>"#));
        assert!(types.contains(r#"<Override PartName="/word/footer1.xml""#));

        let settings = read_entry(&mut archive, "word/settings.xml");
        assert!(settings.contains(r#"w:val="12""#));
        let styles = read_entry(&mut archive, "word/styles.xml");
        assert!(styles.contains(r#"w:ascii="Calibri""#));
        assert!(styles.contains(r#"w:styleId="FootnoteReference""#));
    }

    #[test]
    fn test_minimal_document() {
        let mut doc = Document::with_settings(Settings::new().with_compatibility(false));
        doc.add_section(None).unwrap();
        let mut writer = Word2007::new();
        writer.set_document(&doc);
        let mut archive = unpack(writer.assemble().unwrap());
        let body = read_entry(&mut archive, "word/document.xml");
        assert!(body.contains("<w:body><w:p/><w:sectPr>"));
        assert!(archive.by_name("word/footnotes.xml").is_err());
        let settings = read_entry(&mut archive, "word/settings.xml");
        assert!(settings.contains(r#"w:val="15""#));
    }
}
