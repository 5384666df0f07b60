//! OpenDocument Text (`.odt`) package writer.
//!
//! [`ODText`] writes the same document model as the WordprocessingML
//! writer. Inline styles become automatic styles, named styles go to
//! `styles.xml`, and every section gets a master page carrying its page
//! layout, header and footer. Embedded OLE objects have no counterpart and
//! are skipped with a warning.
//!
//! # Example
//!
//! ```rust
//! use quillpack::document::{Document, ElementContainer};
//! use quillpack::odf::odt::ODText;
//! use quillpack::writer::DocumentWriter;
//!
//! let mut doc = Document::new();
//! doc.add_section(None)?.add_text("Hello", None, None)?;
//! let bytes = ODText::with_document(Some(&doc)).assemble()?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), quillpack::Error>(())
//! ```

mod content;
mod meta;
mod package;
mod styles;

use self::content::OdtBody;
use self::package::PackageWriter;
use self::styles::{Family, STANDARD_STYLE, cm, write_common_styles};
use crate::common::Result;
use crate::document::{Document, ElementContainer, HeaderFooter, HeaderFooterKind, HeaderFooterType, Section};
use crate::media::MediaKind;
use crate::odf::constants::{
    DOCUMENT_NAMESPACES, ODF_CONTENT, ODF_META, ODF_PICTURES, ODF_SETTINGS, ODF_STYLES, ODF_TEXT, OFFICE_VERSION,
};
use crate::style::StyleRegistry;
use crate::writer::{ArchiveSink, DocumentWriter, OutputFormat};
use log::{debug, warn};
use std::collections::HashSet;
use std::fmt::Write as FmtWrite;

const SETTINGS_XML: &str = include_str!("templates/settings.xml");

/// Writer for the `ODText` format.
#[derive(Debug, Default, Clone, Copy)]
pub struct ODText<'a> {
    document: Option<&'a Document>,
}

impl<'a> ODText<'a> {
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

/// Root element start tag with the namespaces shared by content and styles.
fn open_root(xml: &mut String, element: &str) {
    let _ = write!(xml, r#"<?xml version="1.0" encoding="UTF-8"?><office:{}"#, element);
    for (prefix, uri) in DOCUMENT_NAMESPACES {
        let _ = write!(xml, r#" xmlns:{}="{}""#, prefix, uri);
    }
    let _ = write!(xml, r#" office:version="{}">"#, OFFICE_VERSION);
}

fn master_page_name(section: &Section) -> String {
    if section.number() == 1 {
        STANDARD_STYLE.to_string()
    } else {
        format!("Section{}", section.number())
    }
}

fn content_xml(document: &Document, styles: &StyleRegistry) -> Result<String> {
    let titles = document.titles();
    let mut body = OdtBody::new(styles, &titles, document.settings().strict_style_names, "");
    let mut text = String::with_capacity(4096);
    for (index, section) in document.sections().iter().enumerate() {
        let numbering = section.style.page_numbering_start;
        if index > 0 || numbering.is_some() {
            let mut properties = String::new();
            if let Some(start) = numbering {
                let _ = write!(
                    properties,
                    r#"<style:paragraph-properties style:page-number="{}"/>"#,
                    start
                );
            }
            let attributes = format!(
                r#" style:parent-style-name="{}" style:master-page-name="{}""#,
                STANDARD_STYLE,
                master_page_name(section)
            );
            let style = body.auto.add(Family::Paragraph, attributes, properties);
            let _ = write!(text, r#"<text:p text:style-name="{}"/>"#, style);
        }
        body.write_blocks(&mut text, section.elements())?;
    }
    if document.sections().is_empty() {
        text.push_str("<text:p/>");
    }

    let mut xml = String::with_capacity(text.len() + 2048);
    open_root(&mut xml, "document-content");
    xml.push_str("<office:automatic-styles>");
    body.auto.write(&mut xml);
    xml.push_str("</office:automatic-styles><office:body><office:text>");
    xml.push_str(&text);
    xml.push_str("</office:text></office:body></office:document-content>");
    Ok(xml)
}

fn write_page_layout(xml: &mut String, section: &Section) {
    let style = &section.style;
    let _ = write!(
        xml,
        r#"<style:page-layout style:name="pm{}"><style:page-layout-properties fo:page-width="{}" fo:page-height="{}" style:print-orientation="{}" fo:margin-top="{}" fo:margin-bottom="{}" fo:margin-left="{}" fo:margin-right="{}""#,
        section.number(),
        cm(style.page_width()),
        cm(style.page_height()),
        style.page_orientation().as_str(),
        cm(style.margin_top),
        cm(style.margin_bottom),
        cm(style.margin_left + style.gutter),
        cm(style.margin_right)
    );
    if style.cols_num > 1 {
        let _ = write!(
            xml,
            r#"><style:columns fo:column-count="{}" fo:column-gap="{}"/></style:page-layout-properties>"#,
            style.cols_num,
            cm(style.cols_space)
        );
    } else {
        xml.push_str("/>");
    }
    let _ = write!(
        xml,
        concat!(
            r#"<style:header-style><style:header-footer-properties fo:min-height="0cm" fo:margin-bottom="{}"/></style:header-style>"#,
            r#"<style:footer-style><style:header-footer-properties fo:min-height="0cm" fo:margin-top="{}"/></style:footer-style>"#,
            r#"</style:page-layout>"#
        ),
        cm(style.header_height),
        cm(style.footer_height)
    );
}

/// Element of a master page holding a header or footer, `None` for parts
/// OpenDocument master pages cannot express.
fn master_element(part: &HeaderFooter) -> Option<&'static str> {
    match (part.kind(), part.header_type()) {
        (HeaderFooterKind::Header, HeaderFooterType::Default) => Some("style:header"),
        (HeaderFooterKind::Header, HeaderFooterType::Even) => Some("style:header-left"),
        (HeaderFooterKind::Footer, HeaderFooterType::Default) => Some("style:footer"),
        (HeaderFooterKind::Footer, HeaderFooterType::Even) => Some("style:footer-left"),
        (_, HeaderFooterType::First) => None,
    }
}

fn styles_xml(document: &Document, styles: &StyleRegistry) -> Result<String> {
    let titles = document.titles();
    let mut body = OdtBody::new(styles, &titles, document.settings().strict_style_names, "M");
    let mut masters = String::new();
    let mut layouts = String::new();
    for section in document.sections() {
        write_page_layout(&mut layouts, section);
        let _ = write!(
            masters,
            r#"<style:master-page style:name="{}" style:page-layout-name="pm{}">"#,
            master_page_name(section),
            section.number()
        );
        // Left pages follow the default ones
        let mut parts: Vec<&HeaderFooter> = section.headers_and_footers().collect();
        parts.sort_by_key(|part| (part.kind() == HeaderFooterKind::Footer, part.header_type() == HeaderFooterType::Even));
        for part in parts {
            let Some(element) = master_element(part) else {
                warn!(
                    "first-page {} of section {} has no OpenDocument master page counterpart, skipping it",
                    part.kind().as_str(),
                    section.number()
                );
                continue;
            };
            let _ = write!(masters, "<{}>", element);
            body.write_blocks(&mut masters, part.elements())?;
            let _ = write!(masters, "</{}>", element);
        }
        masters.push_str("</style:master-page>");
    }
    if document.sections().is_empty() {
        layouts.push_str(r#"<style:page-layout style:name="pm1"/>"#);
        let _ = write!(
            masters,
            r#"<style:master-page style:name="{}" style:page-layout-name="pm1"/>"#,
            STANDARD_STYLE
        );
    }

    let mut xml = String::with_capacity(8192);
    open_root(&mut xml, "document-styles");
    write_common_styles(&mut xml, styles, document.settings());
    xml.push_str("<office:automatic-styles>");
    xml.push_str(&layouts);
    body.auto.write(&mut xml);
    xml.push_str("</office:automatic-styles><office:master-styles>");
    xml.push_str(&masters);
    xml.push_str("</office:master-styles></office:document-styles>");
    Ok(xml)
}

impl DocumentWriter for ODText<'_> {
    fn format(&self) -> OutputFormat {
        OutputFormat::ODText
    }

    fn document(&self) -> Option<&Document> {
        self.document
    }

    fn write_parts(&self, document: &Document, sink: &mut dyn ArchiveSink) -> Result<()> {
        let styles = document.styles();
        let content = content_xml(document, &styles)?;
        let styles_part = styles_xml(document, &styles)?;
        drop(styles);

        let mut package = PackageWriter::new(sink, ODF_TEXT)?;
        package.add_file(ODF_CONTENT, content.as_bytes())?;
        package.add_file(ODF_STYLES, styles_part.as_bytes())?;
        package.add_file(ODF_META, meta::meta_xml(document.properties()).as_bytes())?;
        package.add_file(ODF_SETTINGS, SETTINGS_XML.as_bytes())?;

        let media = document.media();
        let provider = document.context().provider();
        let mut packaged = HashSet::new();
        for entry in media.payload_entries() {
            if entry.kind() != MediaKind::Image {
                continue;
            }
            let Some(source) = entry.source() else {
                continue;
            };
            let file_name = entry.target().rsplit('/').next().unwrap_or(entry.target());
            if !packaged.insert(file_name.to_string()) {
                continue;
            }
            let data = source.read(provider)?;
            let path = format!("{}/{}", ODF_PICTURES, file_name);
            debug!("packaging {} ({} bytes)", path, data.len());
            package.add_file(&path, &data)?;
        }
        package.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaSource;
    use crate::style::{FontStyle, ImageStyle, SectionStyle};
    use image::{ImageFormat, RgbaImage};
    use quick_xml::Reader;
    use quick_xml::events::Event;
    use std::io::{Cursor, Read};

    fn unpack(bytes: Vec<u8>) -> zip::ZipArchive<Cursor<Vec<u8>>> {
        zip::ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    fn read_entry(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut content = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
        content
    }

    fn assert_well_formed(xml: &str) {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => panic!("malformed XML: {e}"),
            }
        }
    }

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.properties_mut().title = Some("Sample".to_string());
        doc.add_font_style("Strong", FontStyle::new().bold(true), None).unwrap();
        let section = doc.add_section(None).unwrap();
        section.add_title("Intro", 1).unwrap();
        section.add_text("Hello", "Strong", None).unwrap();
        let dot = MediaSource::generated("dot.png", RgbaImage::new(2, 2), ImageFormat::Png);
        section.add_image(dot, ImageStyle::new()).unwrap();
        section.add_header().add_text("Header", None, None).unwrap();
        section.add_footer().first_page();
        let section = doc.add_section(SectionStyle::new().columns(2, 720)).unwrap();
        section.add_text("Second", None, None).unwrap();
        doc
    }

    #[test]
    fn test_package_layout() {
        let doc = sample();
        let bytes = ODText::with_document(Some(&doc)).assemble().unwrap();
        let mut archive = unpack(bytes);
        assert_eq!(archive.by_index(0).unwrap().name(), "mimetype");
        for name in [ODF_CONTENT, ODF_STYLES, ODF_META, ODF_SETTINGS, "META-INF/manifest.xml"] {
            assert_well_formed(&read_entry(&mut archive, name));
        }
        let manifest = read_entry(&mut archive, "META-INF/manifest.xml");
        assert!(manifest.contains(r#"manifest:full-path="Pictures/section_image1.png" manifest:media-type="image/png""#));
        assert!(archive.by_name("Pictures/section_image1.png").is_ok());
    }

    #[test]
    fn test_sections_get_master_pages() {
        let doc = sample();
        let bytes = ODText::with_document(Some(&doc)).assemble().unwrap();
        let mut archive = unpack(bytes);
        let content = read_entry(&mut archive, ODF_CONTENT);
        assert!(content.contains(r#"style:master-page-name="Section2""#));
        assert!(content.contains(r#"<text:span text:style-name="Strong">Hello</text:span>"#));
        assert!(content.contains(r#"xlink:href="Pictures/section_image1.png""#));

        let styles = read_entry(&mut archive, ODF_STYLES);
        assert!(styles.contains(r#"<style:master-page style:name="Standard" style:page-layout-name="pm1"><style:header><text:p>Header</text:p></style:header></style:master-page>"#));
        assert!(styles.contains(r#"<style:master-page style:name="Section2" style:page-layout-name="pm2">"#));
        assert!(styles.contains(r#"<style:columns fo:column-count="2" fo:column-gap="1.27cm"/>"#));
        assert!(!styles.contains("style:footer>"));
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        let bytes = ODText::with_document(Some(&doc)).assemble().unwrap();
        let mut archive = unpack(bytes);
        let content = read_entry(&mut archive, ODF_CONTENT);
        assert!(content.contains("<office:text><text:p/></office:text>"));
        assert_well_formed(&read_entry(&mut archive, ODF_STYLES));
    }

    #[test]
    fn test_settings_are_static() {
        let doc = sample();
        let bytes = ODText::with_document(Some(&doc)).assemble().unwrap();
        let mut archive = unpack(bytes);
        assert_eq!(read_entry(&mut archive, ODF_SETTINGS), SETTINGS_XML);
        let meta = read_entry(&mut archive, ODF_META);
        assert!(meta.contains("<dc:title>Sample</dc:title>"));
    }
}
