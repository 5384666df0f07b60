//! Story parts: `document.xml`, headers, footers and `footnotes.xml`.
use super::body::BodyWriter;
use super::plan::PartPlan;
use crate::common::Result;
use crate::common::xml::XML_DECLARATION;
use crate::document::{Document, ElementContainer, HeaderFooter, HeaderFooterKind, HeaderFooterType, Section};
use crate::ooxml::opc::constants::namespace as ns;
use std::fmt::Write as FmtWrite;

/// Namespace declarations of every story part root.
fn write_namespaces(xml: &mut String) {
    let _ = write!(
        xml,
        r#" xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:a="{}" xmlns:pic="{}" xmlns:v="{}" xmlns:o="{}" xmlns:w10="{}""#,
        ns::WML_MAIN,
        ns::OFC_RELATIONSHIPS,
        ns::DML_WORDPROCESSING_DRAWING,
        ns::DML_MAIN,
        ns::DML_PICTURE,
        ns::VML,
        ns::VML_OFFICE,
        ns::VML_WORD
    );
}

/// Write the `w:sectPr` of a section.
fn write_section_props(xml: &mut String, section: &Section, plan: &PartPlan<'_>) {
    let style = &section.style;
    xml.push_str("<w:sectPr>");
    let mut title_page = false;
    for part in section.headers_and_footers() {
        let Some(rid) = plan.part_rid(part.scope()) else {
            continue;
        };
        let element = match part.kind() {
            HeaderFooterKind::Header => "headerReference",
            HeaderFooterKind::Footer => "footerReference",
        };
        title_page |= part.header_type() == HeaderFooterType::First;
        let _ = write!(
            xml,
            r#"<w:{} w:type="{}" r:id="rId{}"/>"#,
            element,
            part.header_type().as_ooxml(),
            rid
        );
    }
    if let Some(break_type) = style.break_type {
        let _ = write!(xml, r#"<w:type w:val="{}"/>"#, break_type.as_ooxml());
    }
    let _ = write!(
        xml,
        r#"<w:pgSz w:w="{}" w:h="{}" w:orient="{}"/>"#,
        style.page_width(),
        style.page_height(),
        style.page_orientation().as_str()
    );
    let _ = write!(
        xml,
        r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="{}" w:footer="{}" w:gutter="{}"/>"#,
        style.margin_top,
        style.margin_right,
        style.margin_bottom,
        style.margin_left,
        style.header_height,
        style.footer_height,
        style.gutter
    );
    if let Some(start) = style.page_numbering_start {
        let _ = write!(xml, r#"<w:pgNumType w:start="{}"/>"#, start);
    }
    let _ = write!(
        xml,
        r#"<w:cols w:num="{}" w:space="{}"/>"#,
        style.cols_num, style.cols_space
    );
    if title_page {
        xml.push_str("<w:titlePg/>");
    }
    xml.push_str("</w:sectPr>");
}

/// `word/document.xml`.
pub(crate) fn document_xml<'d>(
    body: &mut BodyWriter<'d>,
    document: &'d Document,
    plan: &PartPlan<'_>,
) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    xml.push_str("<w:document");
    write_namespaces(&mut xml);
    xml.push_str("><w:body>");

    let sections = document.sections();
    for (i, section) in sections.iter().enumerate() {
        body.write_blocks(&mut xml, section.elements())?;
        if i + 1 < sections.len() {
            xml.push_str("<w:p><w:pPr>");
            write_section_props(&mut xml, section, plan);
            xml.push_str("</w:pPr></w:p>");
        } else {
            write_section_props(&mut xml, section, plan);
        }
    }
    xml.push_str("</w:body></w:document>");
    Ok(xml)
}

/// `word/headerN.xml` or `word/footerN.xml`.
pub(crate) fn header_footer_xml<'d>(body: &mut BodyWriter<'d>, part: &'d HeaderFooter) -> Result<String> {
    let root = match part.kind() {
        HeaderFooterKind::Header => "w:hdr",
        HeaderFooterKind::Footer => "w:ftr",
    };
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    let _ = write!(xml, "<{}", root);
    write_namespaces(&mut xml);
    xml.push('>');
    body.write_blocks(&mut xml, part.elements())?;
    let _ = write!(xml, "</{}>", root);
    Ok(xml)
}

/// `word/footnotes.xml` with the separator notes every consumer expects.
pub(crate) fn footnotes_xml<'d>(body: &mut BodyWriter<'d>, plan: &PartPlan<'d>) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str("<w:footnotes");
    write_namespaces(&mut xml);
    xml.push('>');
    xml.push_str(concat!(
        r#"<w:footnote w:type="separator" w:id="-1"><w:p><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr>"#,
        r#"<w:r><w:separator/></w:r></w:p></w:footnote>"#,
        r#"<w:footnote w:type="continuationSeparator" w:id="0"><w:p><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr>"#,
        r#"<w:r><w:continuationSeparator/></w:r></w:p></w:footnote>"#
    ));
    for &footnote in &plan.footnotes {
        body.write_footnote(&mut xml, footnote)?;
    }
    xml.push_str("</w:footnotes>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Orientation, SectionStyle};

    #[test]
    fn test_section_breaks() {
        let mut doc = Document::new();
        doc.add_section(None).unwrap().add_text("one", None, None).unwrap();
        let second = doc
            .add_section(SectionStyle::new().orientation(Orientation::Landscape))
            .unwrap();
        second.add_text("two", None, None).unwrap();
        second.add_header().first_page().add_text("h", None, None).unwrap();

        let plan = PartPlan::build(&doc).unwrap();
        let styles = doc.styles();
        let titles = doc.titles();
        let mut body = BodyWriter::new(&styles, &titles, false);
        let xml = document_xml(&mut body, &doc, &plan).unwrap();

        assert_eq!(xml.matches("<w:sectPr>").count(), 2);
        assert!(xml.contains(r#"<w:pPr><w:sectPr><w:pgSz w:w="11906" w:h="16838" w:orient="portrait"/>"#));
        assert!(xml.contains(r#"<w:headerReference w:type="first" r:id="rId7"/>"#));
        assert!(xml.contains(r#"<w:pgSz w:w="16838" w:h="11906" w:orient="landscape"/>"#));
        assert!(xml.ends_with("<w:titlePg/></w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_footnotes_part() {
        let mut doc = Document::new();
        doc.add_section(None)
            .unwrap()
            .add_footnote(None)
            .unwrap()
            .add_text("Source", None, None)
            .unwrap();
        let plan = PartPlan::build(&doc).unwrap();
        let styles = doc.styles();
        let titles = doc.titles();
        let mut body = BodyWriter::new(&styles, &titles, false);
        let xml = footnotes_xml(&mut body, &plan).unwrap();
        assert!(xml.contains(r#"<w:footnote w:id="1"><w:p><w:pPr><w:pStyle w:val="FootnoteText"/></w:pPr>"#));
        assert!(xml.contains("<w:footnoteRef/>"));
        assert!(xml.contains(">Source</w:t>"));
    }
}
