//! The style sheet part (`word/styles.xml`).
//!
//! Named styles are written in registration order after the built-in
//! styles every document references. A registered style whose id collides
//! with a built-in replaces it.
use super::body::{FOOTNOTE_REFERENCE_STYLE, FOOTNOTE_TEXT_STYLE};
use super::props::{write_font_props, write_style_paragraph_props};
use super::table::{write_borders, write_shading, write_table_props};
use crate::common::unit::pt_to_half_points;
use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::common::Settings;
use crate::ooxml::opc::constants::namespace as ns;
use crate::style::{FontStyle, NamedStyle, ParagraphStyle, StyleRegistry, TableStyle, style_id};
use std::collections::HashSet;
use std::fmt::Write as FmtWrite;

/// Kind of a `w:style` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StyleType {
    Paragraph,
    Character,
    Table,
}

impl StyleType {
    fn to_xml(self) -> &'static str {
        match self {
            StyleType::Paragraph => "paragraph",
            StyleType::Character => "character",
            StyleType::Table => "table",
        }
    }
}

fn open_style(xml: &mut String, style_type: StyleType, id: &str, name: &str, based_on: Option<&str>) {
    let _ = write!(
        xml,
        r#"<w:style w:type="{}" w:styleId="{}"><w:name w:val="{}"/>"#,
        style_type.to_xml(),
        escape_xml(id),
        escape_xml(name)
    );
    if let Some(based_on) = based_on {
        let _ = write!(xml, r#"<w:basedOn w:val="{}"/>"#, based_on);
    }
}

fn write_run_block(xml: &mut String, font: Option<&FontStyle>) {
    if let Some(font) = font.filter(|f| f.has_properties()) {
        xml.push_str("<w:rPr>");
        write_font_props(xml, font);
        xml.push_str("</w:rPr>");
    }
}

fn write_named_style(xml: &mut String, name: &str, style: &NamedStyle) {
    let id = style_id(name);
    match style {
        NamedStyle::Font { font, paragraph: None } | NamedStyle::Link(font) => {
            open_style(xml, StyleType::Character, &id, name, Some("DefaultParagraphFont"));
            write_run_block(xml, Some(font));
        },
        NamedStyle::Font {
            font,
            paragraph: Some(paragraph),
        } => {
            open_style(xml, StyleType::Paragraph, &id, name, Some("Normal"));
            xml.push_str("<w:qFormat/>");
            write_style_paragraph_props(xml, Some(paragraph), None);
            write_run_block(xml, Some(font));
        },
        NamedStyle::Paragraph(paragraph) => {
            open_style(xml, StyleType::Paragraph, &id, name, Some("Normal"));
            xml.push_str("<w:qFormat/>");
            write_style_paragraph_props(xml, Some(paragraph), None);
        },
        NamedStyle::Title {
            depth,
            font,
            paragraph,
        } => {
            open_style(
                xml,
                StyleType::Paragraph,
                &id,
                &format!("heading {}", depth),
                Some("Normal"),
            );
            xml.push_str(r#"<w:next w:val="Normal"/><w:qFormat/>"#);
            write_style_paragraph_props(xml, paragraph.as_ref(), Some(depth - 1));
            write_run_block(xml, Some(font));
        },
        NamedStyle::Table { table, first_row } => {
            open_style(xml, StyleType::Table, &id, name, Some("TableNormal"));
            xml.push_str("<w:tblPr>");
            write_table_props(xml, table);
            xml.push_str("</w:tblPr>");
            if let Some(first_row) = first_row {
                write_first_row(xml, first_row);
            }
        },
    }
    xml.push_str("</w:style>");
}

fn write_first_row(xml: &mut String, first_row: &TableStyle) {
    xml.push_str(r#"<w:tblStylePr w:type="firstRow"><w:tblPr/><w:tcPr>"#);
    write_borders(xml, "tcBorders", &first_row.borders);
    write_shading(xml, first_row.bg_color.as_deref());
    xml.push_str("</w:tcPr></w:tblStylePr>");
}

fn write_builtins(xml: &mut String, taken: &HashSet<String>, with_footnotes: bool) {
    if !taken.contains("Normal") {
        xml.push_str(concat!(
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#,
            r#"<w:name w:val="Normal"/><w:qFormat/></w:style>"#
        ));
    }
    if !taken.contains("DefaultParagraphFont") {
        xml.push_str(concat!(
            r#"<w:style w:type="character" w:default="1" w:styleId="DefaultParagraphFont">"#,
            r#"<w:name w:val="Default Paragraph Font"/><w:uiPriority w:val="1"/><w:semiHidden/></w:style>"#
        ));
    }
    if !taken.contains("TableNormal") {
        xml.push_str(concat!(
            r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal">"#,
            r#"<w:name w:val="Normal Table"/><w:uiPriority w:val="99"/><w:semiHidden/>"#,
            r#"<w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar>"#,
            r#"<w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/>"#,
            r#"<w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/>"#,
            r#"</w:tblCellMar></w:tblPr></w:style>"#
        ));
    }
    if !with_footnotes {
        return;
    }
    if !taken.contains(FOOTNOTE_TEXT_STYLE) {
        open_style(xml, StyleType::Paragraph, FOOTNOTE_TEXT_STYLE, "footnote text", Some("Normal"));
        let paragraph = ParagraphStyle::new().space_after(0);
        write_style_paragraph_props(xml, Some(&paragraph), None);
        write_run_block(xml, Some(&FontStyle::new().size(10.0)));
        xml.push_str("</w:style>");
    }
    if !taken.contains(FOOTNOTE_REFERENCE_STYLE) {
        open_style(
            xml,
            StyleType::Character,
            FOOTNOTE_REFERENCE_STYLE,
            "footnote reference",
            Some("DefaultParagraphFont"),
        );
        write_run_block(xml, Some(&FontStyle::new().superscript(true)));
        xml.push_str("</w:style>");
    }
}

/// Generate `word/styles.xml`.
pub(crate) fn styles_xml(styles: &StyleRegistry, settings: &Settings, with_footnotes: bool) -> String {
    let mut xml = String::with_capacity(4096 + styles.len() * 256);
    xml.push_str(XML_DECLARATION);
    let _ = write!(xml, r#"<w:styles xmlns:w="{}" xmlns:r="{}">"#, ns::WML_MAIN, ns::OFC_RELATIONSHIPS);

    let font = escape_xml(&settings.default_font_name);
    let _ = write!(
        xml,
        concat!(
            r#"<w:docDefaults><w:rPrDefault><w:rPr>"#,
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:eastAsia="{0}" w:cs="{0}"/>"#,
            r#"<w:sz w:val="{1}"/><w:szCs w:val="{1}"/>"#,
            r#"</w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults>"#
        ),
        font,
        pt_to_half_points(settings.default_font_size)
    );

    let taken: HashSet<String> = styles.iter().map(|(name, _)| style_id(name)).collect();
    write_builtins(&mut xml, &taken, with_footnotes);
    for (name, style) in styles.iter() {
        write_named_style(&mut xml, name, style);
    }
    xml.push_str("</w:styles>");
    xml
}
