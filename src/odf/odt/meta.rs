//! `meta.xml`: document properties.
use crate::common::Metadata;
use crate::common::xml::escape_xml;
use crate::odf::constants::{DCNS, METANS, OFFICE_VERSION, OFFICENS};
use std::fmt::Write as FmtWrite;

fn push_element(xml: &mut String, tag: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = write!(xml, "<{0}>{1}</{0}>", tag, escape_xml(value));
    }
}

pub(crate) fn meta_xml(properties: &Metadata) -> String {
    let mut meta = String::with_capacity(1024);
    let _ = write!(
        meta,
        r#"<?xml version="1.0" encoding="UTF-8"?><office:document-meta xmlns:office="{}" xmlns:dc="{}" xmlns:meta="{}" office:version="{}"><office:meta>"#,
        OFFICENS, DCNS, METANS, OFFICE_VERSION
    );
    let _ = write!(
        meta,
        "<meta:generator>{}/{}</meta:generator>",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    push_element(&mut meta, "dc:title", properties.title.as_deref());
    push_element(&mut meta, "dc:subject", properties.subject.as_deref());
    push_element(&mut meta, "dc:description", properties.description.as_deref());
    push_element(&mut meta, "meta:initial-creator", properties.creator.as_deref());
    let modified_by = properties.last_modified_by.as_deref().or(properties.creator.as_deref());
    push_element(&mut meta, "dc:creator", modified_by);
    if let Some(keywords) = &properties.keywords {
        for keyword in keywords.split([',', ';']).map(str::trim).filter(|k| !k.is_empty()) {
            push_element(&mut meta, "meta:keyword", Some(keyword));
        }
    }
    let _ = write!(
        meta,
        "<meta:creation-date>{}</meta:creation-date><dc:date>{}</dc:date>",
        properties.created_w3c(),
        properties.modified_w3c()
    );
    for (name, value) in [
        ("Category", &properties.category),
        ("Company", &properties.company),
        ("Manager", &properties.manager),
    ] {
        if let Some(value) = value {
            let _ = write!(
                meta,
                r#"<meta:user-defined meta:name="{}">{}</meta:user-defined>"#,
                name,
                escape_xml(value)
            );
        }
    }
    meta.push_str("</office:meta></office:document-meta>");
    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_fields() {
        let mut properties = Metadata::default();
        properties.title = Some("Report".to_string());
        properties.creator = Some("Sam".to_string());
        properties.keywords = Some("alpha, beta".to_string());
        properties.company = Some("R&D".to_string());
        let xml = meta_xml(&properties);
        assert!(xml.contains("<dc:title>Report</dc:title>"));
        assert!(xml.contains("<meta:initial-creator>Sam</meta:initial-creator><dc:creator>Sam</dc:creator>"));
        assert!(xml.contains("<meta:keyword>alpha</meta:keyword><meta:keyword>beta</meta:keyword>"));
        assert!(xml.contains(r#"<meta:user-defined meta:name="Company">R&amp;D</meta:user-defined>"#));
        assert!(xml.contains("<meta:creation-date>"));
    }
}
