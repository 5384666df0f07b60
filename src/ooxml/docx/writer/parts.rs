//! Package-level parts: content types, relationship tables and document
//! properties.
use super::plan::PartPlan;
use crate::common::Metadata;
use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::media::{MediaEntry, MediaKind, MediaRegistry, MediaScope, mime_type};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{ContentTypes, Relationships};
use std::fmt::Write as FmtWrite;

/// Fixed entries of `word/_rels/document.xml.rels`, ids 1 to 6.
const DOCUMENT_PARTS: [(&str, &str); 6] = [
    (rt::STYLES, "styles.xml"),
    (rt::NUMBERING, "numbering.xml"),
    (rt::SETTINGS, "settings.xml"),
    (rt::THEME, "theme/theme1.xml"),
    (rt::WEB_SETTINGS, "webSettings.xml"),
    (rt::FONT_TABLE, "fontTable.xml"),
];

/// `[Content_Types].xml`.
pub(crate) fn content_types_xml(media: &MediaRegistry, plan: &PartPlan<'_>) -> String {
    let mut types = ContentTypes::new();
    for extension in media.extensions() {
        let content_type = match extension.as_str() {
            "bin" => Some(ct::OFC_OLE_OBJECT),
            other => mime_type(other),
        };
        if let Some(content_type) = content_type {
            types.add_default(extension, content_type);
        }
    }
    types
        .add_override("/docProps/app.xml", ct::OFC_EXTENDED_PROPERTIES)
        .add_override("/docProps/core.xml", ct::OPC_CORE_PROPERTIES)
        .add_override("/word/document.xml", ct::WML_DOCUMENT_MAIN)
        .add_override("/word/styles.xml", ct::WML_STYLES)
        .add_override("/word/numbering.xml", ct::WML_NUMBERING)
        .add_override("/word/settings.xml", ct::WML_SETTINGS)
        .add_override("/word/theme/theme1.xml", ct::OFC_THEME)
        .add_override("/word/webSettings.xml", ct::WML_WEB_SETTINGS)
        .add_override("/word/fontTable.xml", ct::WML_FONT_TABLE);
    for planned in &plan.parts {
        let content_type = match planned.part.scope() {
            MediaScope::Header(_) => ct::WML_HEADER,
            _ => ct::WML_FOOTER,
        };
        types.add_override(&format!("/word/{}", planned.part.part_name()), content_type);
    }
    if plan.footnotes_rid.is_some() {
        types.add_override("/word/footnotes.xml", ct::WML_FOOTNOTES);
    }
    types.to_xml()
}

/// `_rels/.rels`.
pub(crate) fn root_rels_xml() -> String {
    let mut rels = Relationships::new();
    rels.add(1, rt::EXTENDED_PROPERTIES, "docProps/app.xml")
        .add(2, rt::CORE_PROPERTIES, "docProps/core.xml")
        .add(3, rt::OFFICE_DOCUMENT, "word/document.xml");
    rels.to_xml()
}

fn add_media(rels: &mut Relationships, entries: &[MediaEntry]) {
    for entry in entries {
        match entry.kind() {
            MediaKind::Image => rels.add(entry.relationship_id(), rt::IMAGE, entry.target()),
            MediaKind::Embedding => rels.add(entry.relationship_id(), rt::OLE_OBJECT, entry.target()),
            MediaKind::Hyperlink => rels.add_external(entry.relationship_id(), rt::HYPERLINK, entry.target()),
        };
    }
}

/// `word/_rels/document.xml.rels`.
pub(crate) fn document_rels_xml(media: &MediaRegistry, plan: &PartPlan<'_>) -> String {
    let mut rels = Relationships::new();
    for (i, (reltype, target)) in DOCUMENT_PARTS.iter().enumerate() {
        rels.add(i as u32 + 1, *reltype, *target);
    }
    add_media(&mut rels, media.entries(MediaScope::Section));
    for planned in &plan.parts {
        let reltype = match planned.part.scope() {
            MediaScope::Header(_) => rt::HEADER,
            _ => rt::FOOTER,
        };
        rels.add(planned.relationship_id, reltype, planned.part.part_name());
    }
    if let Some(rid) = plan.footnotes_rid {
        rels.add(rid, rt::FOOTNOTES, "footnotes.xml");
    }
    rels.to_xml()
}

/// Relationship table of a header, footer or footnotes part; `None` when the
/// part references nothing.
pub(crate) fn scope_rels_xml(media: &MediaRegistry, scope: MediaScope) -> Option<String> {
    let entries = media.entries(scope);
    if entries.is_empty() {
        return None;
    }
    let mut rels = Relationships::new();
    add_media(&mut rels, entries);
    Some(rels.to_xml())
}

fn push_element(xml: &mut String, tag: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = write!(xml, "<{0}>{1}</{0}>", tag, escape_xml(value));
    }
}

/// `docProps/core.xml`.
pub(crate) fn core_xml(properties: &Metadata) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    push_element(&mut xml, "dc:title", properties.title.as_deref());
    push_element(&mut xml, "dc:subject", properties.subject.as_deref());
    push_element(&mut xml, "dc:creator", properties.creator.as_deref());
    push_element(&mut xml, "cp:keywords", properties.keywords.as_deref());
    push_element(&mut xml, "dc:description", properties.description.as_deref());
    push_element(&mut xml, "cp:lastModifiedBy", properties.last_modified_by.as_deref());
    push_element(&mut xml, "cp:category", properties.category.as_deref());
    let _ = write!(
        xml,
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
        properties.created_w3c(),
        properties.modified_w3c()
    );
    xml.push_str("</cp:coreProperties>");
    xml
}

/// `docProps/app.xml`.
pub(crate) fn app_xml(properties: &Metadata) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
    ));
    let _ = write!(xml, "<Application>{}</Application>", env!("CARGO_PKG_NAME"));
    push_element(&mut xml, "Company", properties.company.as_deref());
    push_element(&mut xml, "Manager", properties.manager.as_deref());
    xml.push_str("</Properties>");
    xml
}
