//! Run (`w:rPr`) and paragraph (`w:pPr`) property markup.
use crate::common::xml::escape_xml;
use crate::style::{Alignment, FontStyle, NamedStyle, ParagraphStyle, Resolved, Underline, style_id};
use std::fmt::Write as FmtWrite;

/// Write the children of a `w:rPr` for a font, in schema order.
pub(crate) fn write_font_props(xml: &mut String, font: &FontStyle) {
    if let Some(name) = font.font_name() {
        let name = escape_xml(name);
        let _ = write!(
            xml,
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:eastAsia="{0}" w:cs="{0}"/>"#,
            name
        );
    }
    if font.is_bold() {
        xml.push_str("<w:b/><w:bCs/>");
    }
    if font.is_italic() {
        xml.push_str("<w:i/><w:iCs/>");
    }
    if font.is_strikethrough() {
        xml.push_str("<w:strike/>");
    }
    if let Some(color) = font.text_color() {
        let _ = write!(xml, r#"<w:color w:val="{}"/>"#, escape_xml(color));
    }
    if let Some(size) = font.half_points() {
        let _ = write!(xml, r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#, size);
    }
    if let Some(highlight) = font.highlight() {
        let _ = write!(xml, r#"<w:highlight w:val="{}"/>"#, escape_xml(highlight));
    }
    if font.underline_style() != Underline::None {
        let _ = write!(xml, r#"<w:u w:val="{}"/>"#, font.underline_style().as_ooxml());
    }
    if font.is_superscript() {
        xml.push_str(r#"<w:vertAlign w:val="superscript"/>"#);
    } else if font.is_subscript() {
        xml.push_str(r#"<w:vertAlign w:val="subscript"/>"#);
    }
}

/// Whether a named style is referenced from runs (`w:rStyle`) rather than
/// from paragraphs.
fn is_character_style(style: &NamedStyle) -> bool {
    matches!(style, NamedStyle::Link(_)) || matches!(style, NamedStyle::Font { paragraph: None, .. })
}

/// Write the `w:rPr` of a run. Nothing is written for the default font.
pub(crate) fn write_run_props(xml: &mut String, font: &Resolved<'_, FontStyle>) {
    match font {
        Resolved::Named { name, style } if is_character_style(style) => {
            let _ = write!(xml, r#"<w:rPr><w:rStyle w:val="{}"/></w:rPr>"#, escape_xml(&style_id(name)));
        },
        Resolved::PassThroughName(name) => {
            let _ = write!(xml, r#"<w:rPr><w:rStyle w:val="{}"/></w:rPr>"#, escape_xml(&style_id(name)));
        },
        Resolved::Inline(font) if font.has_properties() => {
            xml.push_str("<w:rPr>");
            write_font_props(xml, font);
            xml.push_str("</w:rPr>");
        },
        _ => {},
    }
}

/// Everything that can end up in a paragraph's `w:pPr`.
#[derive(Debug, Default, Clone)]
pub(crate) struct ParagraphProps<'a> {
    pub style_id: Option<String>,
    pub inline: Option<&'a ParagraphStyle>,
    /// `(ilvl, numId)`
    pub numbering: Option<(u32, u32)>,
    /// Right-aligned dotted tab stop
    pub tab: Option<u32>,
    pub indent: Option<u32>,
    pub outline_level: Option<u32>,
    pub align: Option<Alignment>,
}

impl<'a> ParagraphProps<'a> {
    /// Properties from a paragraph reference. A font style registered with
    /// paragraph properties names the paragraph when the paragraph itself
    /// carries no style.
    pub fn resolve(paragraph: &Resolved<'a, ParagraphStyle>, font: &Resolved<'a, FontStyle>) -> Self {
        let mut props = Self::default();
        match paragraph {
            Resolved::Named { name, .. } | Resolved::PassThroughName(name) => {
                props.style_id = Some(style_id(name));
            },
            Resolved::Inline(inline) => props.inline = Some(*inline),
            Resolved::Default => {
                if let Resolved::Named { name, style } = font {
                    if style.is_paragraph_type() {
                        props.style_id = Some(style_id(name));
                    }
                }
            },
        }
        props
    }

    pub fn styled(style_id: impl Into<String>) -> Self {
        Self {
            style_id: Some(style_id.into()),
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.style_id.is_none()
            && self.inline.is_none_or(|p| !p.has_properties())
            && self.numbering.is_none()
            && self.tab.is_none()
            && self.indent.is_none()
            && self.outline_level.is_none()
            && self.align.is_none()
    }

    /// Write `w:pPr`, or nothing when no property is set.
    pub fn write(&self, xml: &mut String) {
        if self.is_empty() {
            return;
        }
        xml.push_str("<w:pPr>");
        if let Some(id) = &self.style_id {
            let _ = write!(xml, r#"<w:pStyle w:val="{}"/>"#, escape_xml(id));
        }
        if let Some(inline) = self.inline {
            write_flow_props(xml, inline);
        }
        if let Some((level, num_id)) = self.numbering {
            let _ = write!(
                xml,
                r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
                level, num_id
            );
        }
        if let Some(pos) = self.tab {
            let _ = write!(xml, r#"<w:tabs><w:tab w:val="right" w:leader="dot" w:pos="{}"/></w:tabs>"#, pos);
        }
        if let Some(inline) = self.inline {
            write_spacing(xml, inline);
        }
        let indent = self.indent.or(self.inline.and_then(ParagraphStyle::indentation));
        let hanging = self.inline.and_then(ParagraphStyle::hanging_indent);
        write_indent(xml, indent, hanging);
        if let Some(align) = self.align.or(self.inline.and_then(ParagraphStyle::alignment)) {
            let _ = write!(xml, r#"<w:jc w:val="{}"/>"#, align.as_ooxml());
        }
        if let Some(level) = self.outline_level {
            let _ = write!(xml, r#"<w:outlineLvl w:val="{}"/>"#, level);
        }
        xml.push_str("</w:pPr>");
    }
}

/// Pagination flags, which precede numbering in `w:pPr`.
fn write_flow_props(xml: &mut String, paragraph: &ParagraphStyle) {
    if paragraph.is_keep_next() {
        xml.push_str("<w:keepNext/>");
    }
    if paragraph.is_keep_lines() {
        xml.push_str("<w:keepLines/>");
    }
    if paragraph.is_page_break_before() {
        xml.push_str("<w:pageBreakBefore/>");
    }
    match paragraph.widow_control_flag() {
        Some(true) => xml.push_str("<w:widowControl/>"),
        Some(false) => xml.push_str(r#"<w:widowControl w:val="0"/>"#),
        None => {},
    }
}

fn write_spacing(xml: &mut String, paragraph: &ParagraphStyle) {
    if paragraph.before().is_none() && paragraph.after().is_none() && paragraph.spacing().is_none() {
        return;
    }
    xml.push_str("<w:spacing");
    if let Some(before) = paragraph.before() {
        let _ = write!(xml, r#" w:before="{}""#, before);
    }
    if let Some(after) = paragraph.after() {
        let _ = write!(xml, r#" w:after="{}""#, after);
    }
    if let Some(line) = paragraph.spacing() {
        let _ = write!(xml, r#" w:line="{}" w:lineRule="auto""#, line);
    }
    xml.push_str("/>");
}

fn write_indent(xml: &mut String, left: Option<u32>, hanging: Option<u32>) {
    if left.is_none() && hanging.is_none() {
        return;
    }
    xml.push_str("<w:ind");
    if let Some(left) = left {
        let _ = write!(xml, r#" w:left="{}""#, left);
    }
    if let Some(hanging) = hanging {
        let _ = write!(xml, r#" w:hanging="{}""#, hanging);
    }
    xml.push_str("/>");
}

/// Paragraph properties of a named style, for the style sheet.
pub(crate) fn write_style_paragraph_props(xml: &mut String, paragraph: Option<&ParagraphStyle>, outline: Option<u32>) {
    let props = ParagraphProps {
        inline: paragraph,
        outline_level: outline,
        ..ParagraphProps::default()
    };
    props.write(xml);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_props_order() {
        let font = FontStyle::new()
            .name("Arial")
            .size(12.0)
            .bold(true)
            .color("ff0000")
            .underline(Underline::Single)
            .superscript(true);
        let mut xml = String::new();
        write_font_props(&mut xml, &font);
        assert_eq!(
            xml,
            r#"<w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:eastAsia="Arial" w:cs="Arial"/><w:b/><w:bCs/><w:color w:val="FF0000"/><w:sz w:val="24"/><w:szCs w:val="24"/><w:u w:val="single"/><w:vertAlign w:val="superscript"/>"#
        );
    }

    #[test]
    fn test_default_font_writes_nothing() {
        let mut xml = String::new();
        write_run_props(&mut xml, &Resolved::Default);
        write_run_props(&mut xml, &Resolved::Inline(&FontStyle::new()));
        assert!(xml.is_empty());
    }

    #[test]
    fn test_pass_through_name() {
        let mut xml = String::new();
        write_run_props(&mut xml, &Resolved::PassThroughName("My Style"));
        assert_eq!(xml, r#"<w:rPr><w:rStyle w:val="MyStyle"/></w:rPr>"#);
    }

    #[test]
    fn test_paragraph_props() {
        let paragraph = ParagraphStyle::new()
            .align(Alignment::Center)
            .space_before(120)
            .indent(720)
            .keep_next(true)
            .line_height(1.5)
            .unwrap();
        let props = ParagraphProps {
            inline: Some(&paragraph),
            numbering: Some((1, 3)),
            ..ParagraphProps::default()
        };
        let mut xml = String::new();
        props.write(&mut xml);
        assert_eq!(
            xml,
            r#"<w:pPr><w:keepNext/><w:numPr><w:ilvl w:val="1"/><w:numId w:val="3"/></w:numPr><w:spacing w:before="120" w:line="360" w:lineRule="auto"/><w:ind w:left="720"/><w:jc w:val="center"/></w:pPr>"#
        );
    }

    #[test]
    fn test_empty_paragraph_props() {
        let mut xml = String::new();
        ParagraphProps::default().write(&mut xml);
        assert!(xml.is_empty());
    }

    #[test]
    fn test_linked_font_style_names_paragraph() {
        let style = NamedStyle::Font {
            font: FontStyle::new().bold(true),
            paragraph: Some(ParagraphStyle::new()),
        };
        let font = Resolved::Named { name: "Lead In", style: &style };
        let props = ParagraphProps::resolve(&Resolved::Default, &font);
        assert_eq!(props.style_id.as_deref(), Some("LeadIn"));

        let mut xml = String::new();
        write_run_props(&mut xml, &font);
        assert!(xml.is_empty());
    }
}
