//! Relationship tables (`*.rels` parts).
use super::constants::namespace;
use crate::common::xml::{XML_DECLARATION, escape_xml};
use std::fmt::Write as FmtWrite;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Numeric part of the `rId`
    pub id: u32,
    pub reltype: &'static str,
    /// Part path relative to the source part, or a URL when external
    pub target: String,
    pub is_external: bool,
}

impl Relationship {
    #[inline]
    pub fn r_id(&self) -> String {
        format!("rId{}", self.id)
    }
}

/// The relationships of one source part, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: u32, reltype: &'static str, target: impl Into<String>) -> &mut Self {
        self.rels.push(Relationship {
            id,
            reltype,
            target: target.into(),
            is_external: false,
        });
        self
    }

    pub fn add_external(&mut self, id: u32, reltype: &'static str, target: impl Into<String>) -> &mut Self {
        self.rels.push(Relationship {
            id,
            reltype,
            target: target.into(),
            is_external: true,
        });
        self
    }

    pub fn get(&self, id: u32) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize to a `.rels` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);
        xml.push_str(XML_DECLARATION);
        let _ = write!(xml, r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS);
        for rel in &self.rels {
            let _ = write!(
                xml,
                r#"<Relationship Id="rId{}" Type="{}" Target="{}""#,
                rel.id,
                rel.reltype,
                escape_xml(&rel.target)
            );
            if rel.is_external {
                xml.push_str(r#" TargetMode="External""#);
            }
            xml.push_str("/>");
        }
        xml.push_str("</Relationships>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    #[test]
    fn test_rels_xml() {
        let mut rels = Relationships::new();
        rels.add(1, rt::STYLES, "styles.xml")
            .add_external(7, rt::HYPERLINK, "https://example.com/?a=1&b=2");
        let xml = rels.to_xml();
        assert!(xml.contains(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#));
        assert!(xml.contains(r#"Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>"#));
        assert_eq!(rels.get(7).map(|r| r.r_id()), Some("rId7".to_string()));
        assert_eq!(rels.len(), 2);
    }
}
