//! Builder for the `[Content_Types].xml` part.
//!
//! Manages Default elements (by extension) and Override elements (by part
//! name). Both keep insertion order and ignore repeated keys.
use super::constants::{content_type as ct, namespace};
use crate::common::xml::{XML_DECLARATION, escape_xml};
use std::fmt::Write as FmtWrite;

#[derive(Debug, Clone)]
pub struct ContentTypes {
    defaults: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypes {
    /// Create with the standard `rels` and `xml` defaults.
    pub fn new() -> Self {
        Self {
            defaults: vec![
                ("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string()),
                ("xml".to_string(), ct::XML.to_string()),
            ],
            overrides: Vec::new(),
        }
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) -> &mut Self {
        if !self.defaults.iter().any(|(ext, _)| ext == extension) {
            self.defaults
                .push((extension.to_string(), content_type.to_string()));
        }
        self
    }

    /// Add an override; `part_name` is absolute, e.g. `/word/document.xml`.
    pub fn add_override(&mut self, part_name: &str, content_type: &str) -> &mut Self {
        if !self.overrides.iter().any(|(name, _)| name == part_name) {
            self.overrides
                .push((part_name.to_string(), content_type.to_string()));
        }
        self
    }

    pub fn has_default(&self, extension: &str) -> bool {
        self.defaults.iter().any(|(ext, _)| ext == extension)
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(512 + 128 * (self.defaults.len() + self.overrides.len()));
        xml.push_str(XML_DECLARATION);
        let _ = write!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES);
        for (extension, content_type) in &self.defaults {
            let _ = write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(extension),
                escape_xml(content_type)
            );
        }
        for (part_name, content_type) in &self.overrides {
            let _ = write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(part_name),
                escape_xml(content_type)
            );
        }
        xml.push_str("</Types>");
        xml
    }
}
