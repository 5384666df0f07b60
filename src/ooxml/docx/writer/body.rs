//! Body markup: paragraphs, runs, fields and the table of contents.
//!
//! Elements are written either as blocks (sections, headers, footers, table
//! cells) or inline inside the paragraph of a text run or footnote. An
//! element kind that cannot appear in the current context is an internal
//! error; the document model never places one there.
use super::drawing::{write_image_run, write_object_run};
use super::props::{ParagraphProps, write_run_props};
use crate::common::xml::{escape_text, escape_xml};
use crate::common::{Error, Result};
use crate::document::{
    Element, ElementContainer, Footnote, Link, PreserveText, TableOfContents, TextSegment, Title, TitleEntry,
};
use crate::style::{FontStyle, ParagraphStyle, Resolved, StyleRef, StyleRegistry, style_id, title_key};
use log::warn;
use std::fmt::Write as FmtWrite;

/// Style id of the run style used for footnote reference marks.
pub(crate) const FOOTNOTE_REFERENCE_STYLE: &str = "FootnoteReference";
/// Style id of the paragraph style of footnote text.
pub(crate) const FOOTNOTE_TEXT_STYLE: &str = "FootnoteText";

/// Writes the content of one part.
pub(crate) struct BodyWriter<'d> {
    pub(super) styles: &'d StyleRegistry,
    pub(super) titles: &'d [TitleEntry],
    pub(super) strict: bool,
    drawing_ids: u32,
}

pub(crate) fn write_text_run(xml: &mut String, font: &Resolved<'_, FontStyle>, text: &str) {
    xml.push_str("<w:r>");
    write_run_props(xml, font);
    let _ = write!(xml, r#"<w:t xml:space="preserve">{}</w:t></w:r>"#, escape_text(text));
}

fn write_field_char(xml: &mut String, font: &Resolved<'_, FontStyle>, kind: &str) {
    xml.push_str("<w:r>");
    write_run_props(xml, font);
    let _ = write!(xml, r#"<w:fldChar w:fldCharType="{}"/></w:r>"#, kind);
}

fn write_instruction(xml: &mut String, font: &Resolved<'_, FontStyle>, instruction: &str) {
    xml.push_str("<w:r>");
    write_run_props(xml, font);
    let _ = write!(
        xml,
        r#"<w:instrText xml:space="preserve">{}</w:instrText></w:r>"#,
        escape_text(instruction)
    );
}

fn not_inline(element: &Element) -> Error {
    Error::Inconsistent(format!("{} cannot be written inside a paragraph", element.kind().name()))
}

impl<'d> BodyWriter<'d> {
    pub fn new(styles: &'d StyleRegistry, titles: &'d [TitleEntry], strict: bool) -> Self {
        Self {
            styles,
            titles,
            strict,
            drawing_ids: 0,
        }
    }

    /// Next `wp:docPr` / shape id.
    fn next_drawing_id(&mut self) -> u32 {
        self.drawing_ids += 1;
        self.drawing_ids
    }

    pub(super) fn font(&self, font: &'d StyleRef<FontStyle>) -> Result<Resolved<'d, FontStyle>> {
        Ok(self.styles.resolve_font(font, self.strict)?)
    }

    pub(super) fn paragraph(
        &self,
        paragraph: &'d StyleRef<ParagraphStyle>,
        font: &Resolved<'d, FontStyle>,
    ) -> Result<ParagraphProps<'d>> {
        let resolved = self.styles.resolve_paragraph(paragraph, self.strict)?;
        Ok(ParagraphProps::resolve(&resolved, font))
    }

    /// Write block content. An empty list still yields one paragraph, which
    /// every container part requires.
    pub fn write_blocks(&mut self, xml: &mut String, elements: &'d [Element]) -> Result<()> {
        if elements.is_empty() {
            xml.push_str("<w:p/>");
            return Ok(());
        }
        for element in elements {
            self.write_block(xml, element)?;
        }
        if matches!(elements.last(), Some(Element::Table(_))) {
            xml.push_str("<w:p/>");
        }
        Ok(())
    }

    fn write_block(&mut self, xml: &mut String, element: &'d Element) -> Result<()> {
        match element {
            Element::Text(text) => {
                let font = self.font(&text.font)?;
                xml.push_str("<w:p>");
                self.paragraph(&text.paragraph, &font)?.write(xml);
                write_text_run(xml, &font, &text.text);
                xml.push_str("</w:p>");
            },
            Element::TextRun(run) => {
                xml.push_str("<w:p>");
                self.paragraph(&run.paragraph, &Resolved::Default)?.write(xml);
                for child in run.elements() {
                    self.write_inline(xml, child)?;
                }
                xml.push_str("</w:p>");
            },
            Element::Link(link) => {
                let font = self.font(&link.font)?;
                xml.push_str("<w:p>");
                self.paragraph(&link.paragraph, &font)?.write(xml);
                write_link(xml, link, &font);
                xml.push_str("</w:p>");
            },
            Element::Image(image) => {
                xml.push_str("<w:p>");
                if let Some(align) = image.style.align {
                    let props = ParagraphProps {
                        align: Some(align),
                        ..ParagraphProps::default()
                    };
                    props.write(xml);
                }
                let id = self.next_drawing_id();
                write_image_run(xml, image, id);
                xml.push_str("</w:p>");
            },
            Element::Object(object) => {
                xml.push_str("<w:p>");
                if let Some(align) = object.style.align {
                    let props = ParagraphProps {
                        align: Some(align),
                        ..ParagraphProps::default()
                    };
                    props.write(xml);
                }
                let id = self.next_drawing_id();
                write_object_run(xml, object, id);
                xml.push_str("</w:p>");
            },
            Element::TextBreak(text_break) => {
                let font = self.font(&text_break.font)?;
                let props = self.paragraph(&text_break.paragraph, &font)?;
                for _ in 0..text_break.count {
                    xml.push_str("<w:p>");
                    props.write(xml);
                    xml.push_str("</w:p>");
                }
            },
            Element::PageBreak => xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#),
            Element::Title(title) => self.write_title(xml, title),
            Element::Table(table) => self.write_table(xml, table)?,
            Element::ListItem(item) => {
                let font = self.font(&item.font)?;
                let mut props = self.paragraph(&item.paragraph, &font)?;
                props.numbering = Some((item.depth, item.list_type.num_id()));
                xml.push_str("<w:p>");
                props.write(xml);
                write_text_run(xml, &font, &item.text);
                xml.push_str("</w:p>");
            },
            Element::Footnote(footnote) => {
                xml.push_str("<w:p>");
                write_footnote_reference(xml, footnote);
                xml.push_str("</w:p>");
            },
            Element::TableOfContents(toc) => self.write_toc(xml, toc)?,
            Element::PreserveText(text) => self.write_preserve_text(xml, text)?,
        }
        Ok(())
    }

    /// Write an element inside an open `w:p`.
    pub fn write_inline(&mut self, xml: &mut String, element: &'d Element) -> Result<()> {
        match element {
            Element::Text(text) => {
                let font = self.font(&text.font)?;
                write_text_run(xml, &font, &text.text);
            },
            Element::Link(link) => {
                let font = self.font(&link.font)?;
                write_link(xml, link, &font);
            },
            Element::Image(image) => {
                let id = self.next_drawing_id();
                write_image_run(xml, image, id);
            },
            Element::Object(object) => {
                let id = self.next_drawing_id();
                write_object_run(xml, object, id);
            },
            Element::TextBreak(text_break) => {
                for _ in 0..text_break.count {
                    xml.push_str("<w:r><w:br/></w:r>");
                }
            },
            Element::Footnote(footnote) => write_footnote_reference(xml, footnote),
            Element::TextRun(_)
            | Element::PageBreak
            | Element::Title(_)
            | Element::Table(_)
            | Element::ListItem(_)
            | Element::TableOfContents(_)
            | Element::PreserveText(_) => return Err(not_inline(element)),
        }
        Ok(())
    }

    fn write_title(&mut self, xml: &mut String, title: &Title) {
        let key = title_key(title.depth);
        let mut props = ParagraphProps::default();
        if self.styles.contains(&key) {
            props.style_id = Some(style_id(&key));
        } else {
            props.outline_level = Some(title.depth - 1);
        }
        xml.push_str("<w:p>");
        props.write(xml);
        let _ = write!(
            xml,
            r#"<w:bookmarkStart w:id="{}" w:name="{}"/>"#,
            title.bookmark_id(),
            title.anchor()
        );
        write_text_run(xml, &Resolved::Default, &title.text);
        let _ = write!(xml, r#"<w:bookmarkEnd w:id="{}"/></w:p>"#, title.bookmark_id());
    }

    fn write_toc(&mut self, xml: &mut String, toc: &'d TableOfContents) -> Result<()> {
        let font = self.font(&toc.font)?;
        let instruction = format!(r#"TOC \o "{}-{}" \h \z \u"#, toc.min_depth, toc.max_depth);
        let entries: Vec<&TitleEntry> = self.titles.iter().filter(|t| toc.includes(t.depth)).collect();

        if entries.is_empty() {
            xml.push_str("<w:p>");
            write_field_char(xml, &font, "begin");
            write_instruction(xml, &font, &instruction);
            write_field_char(xml, &font, "separate");
            xml.push_str("</w:p>");
        }
        for (i, entry) in entries.iter().enumerate() {
            let indent = toc.indent * (entry.depth - 1);
            let props = ParagraphProps {
                tab: Some(toc.tab_pos),
                indent: (indent > 0).then_some(indent),
                ..ParagraphProps::default()
            };
            xml.push_str("<w:p>");
            props.write(xml);
            if i == 0 {
                write_field_char(xml, &font, "begin");
                write_instruction(xml, &font, &instruction);
                write_field_char(xml, &font, "separate");
            }
            let anchor = entry.anchor();
            let _ = write!(xml, r#"<w:hyperlink w:anchor="{}" w:history="1">"#, anchor);
            write_text_run(xml, &font, &entry.text);
            xml.push_str("<w:r>");
            write_run_props(xml, &font);
            xml.push_str("<w:tab/></w:r>");
            write_field_char(xml, &font, "begin");
            write_instruction(xml, &font, &format!(" PAGEREF {} \\h ", anchor));
            write_field_char(xml, &font, "end");
            xml.push_str("</w:hyperlink></w:p>");
        }
        xml.push_str("<w:p>");
        write_field_char(xml, &font, "end");
        xml.push_str("</w:p>");
        Ok(())
    }

    fn write_preserve_text(&mut self, xml: &mut String, text: &'d PreserveText) -> Result<()> {
        let font = self.font(&text.font)?;
        xml.push_str("<w:p>");
        self.paragraph(&text.paragraph, &font)?.write(xml);
        for segment in text.segments() {
            match segment {
                TextSegment::Literal(literal) => write_text_run(xml, &font, &literal),
                TextSegment::Field(field) => {
                    write_field_char(xml, &font, "begin");
                    write_instruction(xml, &font, &format!(" {} ", field));
                    write_field_char(xml, &font, "separate");
                    write_text_run(xml, &font, "1");
                    write_field_char(xml, &font, "end");
                },
            }
        }
        xml.push_str("</w:p>");
        Ok(())
    }

    /// Write the body of one footnote as a `w:footnote` element.
    pub fn write_footnote(&mut self, xml: &mut String, footnote: &'d Footnote) -> Result<()> {
        let resolved = self.styles.resolve_paragraph(&footnote.paragraph, self.strict)?;
        let mut props = ParagraphProps::resolve(&resolved, &Resolved::Default);
        if props.style_id.is_none() && props.inline.is_none() {
            props.style_id = Some(FOOTNOTE_TEXT_STYLE.to_string());
        }
        let _ = write!(xml, r#"<w:footnote w:id="{}"><w:p>"#, footnote.id());
        props.write(xml);
        let _ = write!(
            xml,
            r#"<w:r><w:rPr><w:rStyle w:val="{}"/></w:rPr><w:footnoteRef/></w:r><w:r><w:t xml:space="preserve"> </w:t></w:r>"#,
            FOOTNOTE_REFERENCE_STYLE
        );
        for child in footnote.elements() {
            self.write_inline(xml, child)?;
        }
        xml.push_str("</w:p></w:footnote>");
        Ok(())
    }
}

fn write_link(xml: &mut String, link: &Link, font: &Resolved<'_, FontStyle>) {
    match (link.relationship_id(), link.anchor()) {
        (Some(rid), _) => {
            let _ = write!(xml, r#"<w:hyperlink r:id="rId{}" w:history="1">"#, rid);
        },
        (None, Some(anchor)) => {
            let _ = write!(
                xml,
                r#"<w:hyperlink w:anchor="{}" w:history="1">"#,
                escape_xml(anchor)
            );
        },
        (None, None) => {
            warn!("link to {} has no relationship, writing plain text", link.target);
            write_text_run(xml, font, &link.text);
            return;
        },
    }
    write_text_run(xml, font, &link.text);
    xml.push_str("</w:hyperlink>");
}

fn write_footnote_reference(xml: &mut String, footnote: &Footnote) {
    let _ = write!(
        xml,
        r#"<w:r><w:rPr><w:rStyle w:val="{}"/></w:rPr><w:footnoteReference w:id="{}"/></w:r>"#,
        FOOTNOTE_REFERENCE_STYLE,
        footnote.id()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::style::{StyleValues, Underline};

    fn render(doc: &Document) -> String {
        let styles = doc.styles();
        let titles = doc.titles();
        let mut writer = BodyWriter::new(&styles, &titles, false);
        let mut xml = String::new();
        writer.write_blocks(&mut xml, doc.sections()[0].elements()).unwrap();
        xml
    }

    #[test]
    fn test_text_paragraph() {
        let mut doc = Document::new();
        doc.add_section(None)
            .unwrap()
            .add_text("a < b", FontStyle::new().underline(Underline::Single), None)
            .unwrap();
        assert_eq!(
            render(&doc),
            r#"<w:p><w:r><w:rPr><w:u w:val="single"/></w:rPr><w:t xml:space="preserve">a &lt; b</w:t></w:r></w:p>"#
        );
    }

    #[test]
    fn test_empty_container_gets_paragraph() {
        let mut doc = Document::new();
        doc.add_section(None).unwrap();
        assert_eq!(render(&doc), "<w:p/>");
    }

    #[test]
    fn test_title_uses_registered_heading_style() {
        let mut doc = Document::new();
        doc.add_title_style(1, FontStyle::new().bold(true), None).unwrap();
        let section = doc.add_section(None).unwrap();
        section.add_title("Intro", 1).unwrap();
        section.add_title("Details", 2).unwrap();
        let xml = render(&doc);
        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(xml.contains(r#"<w:bookmarkStart w:id="0" w:name="_Toc252634154"/>"#));
        assert!(xml.contains(r#"<w:outlineLvl w:val="1"/>"#));
        assert!(xml.contains(r#"<w:bookmarkEnd w:id="1"/>"#));
    }

    #[test]
    fn test_links() {
        let mut doc = Document::new();
        let section = doc.add_section(None).unwrap();
        section.add_link("https://example.com", "", None, None).unwrap();
        section.add_link("#_Toc252634154", "Intro", None, None).unwrap();
        let xml = render(&doc);
        assert!(xml.contains(r#"<w:hyperlink r:id="rId7" w:history="1">"#));
        assert!(xml.contains(r#">https://example.com</w:t>"#));
        assert!(xml.contains(r#"<w:hyperlink w:anchor="_Toc252634154" w:history="1">"#));
    }

    #[test]
    fn test_list_item_numbering() {
        let mut doc = Document::new();
        doc.add_section(None)
            .unwrap()
            .add_list_item("one", 1, crate::document::ListType::Number, None, None)
            .unwrap();
        assert!(render(&doc).contains(r#"<w:numPr><w:ilvl w:val="1"/><w:numId w:val="7"/></w:numPr>"#));
    }

    #[test]
    fn test_text_run_and_footnote_reference() {
        let mut doc = Document::new();
        let run = doc.add_section(None).unwrap().add_text_run(None).unwrap();
        run.add_text("See", None, None).unwrap();
        run.add_text_break(1, None, None).unwrap();
        run.add_footnote(None).unwrap().add_text("note", None, None).unwrap();
        let xml = render(&doc);
        assert!(xml.starts_with("<w:p><w:r>"));
        assert!(xml.contains("<w:r><w:br/></w:r>"));
        assert!(xml.contains(r#"<w:footnoteReference w:id="1"/>"#));
        assert_eq!(xml.matches("<w:p>").count(), 1);
    }

    #[test]
    fn test_toc_lists_titles() {
        let mut doc = Document::new();
        let section = doc.add_section(None).unwrap();
        section.add_toc(None).unwrap();
        section.add_title("One", 1).unwrap();
        section.add_title("Two", 2).unwrap();
        let xml = render(&doc);
        assert!(xml.contains(r#"TOC \o &quot;1-9&quot; \h \z \u"#));
        assert!(xml.contains(r#"<w:hyperlink w:anchor="_Toc252634155" w:history="1">"#));
        assert!(xml.contains(r#"<w:ind w:left="200"/>"#));
        assert!(xml.contains(r#"<w:tab w:val="right" w:leader="dot" w:pos="9062"/>"#));
        assert_eq!(xml.matches(r#"w:fldCharType="begin""#).count(), 3);
        assert_eq!(xml.matches(r#"w:fldCharType="end""#).count(), 3);
    }

    #[test]
    fn test_preserve_text_fields() {
        let mut doc = Document::new();
        doc.add_section(None).unwrap().add_footer().add_preserve_text("Page {PAGE}", None, None).unwrap();
        let styles = doc.styles();
        let titles = doc.titles();
        let mut writer = BodyWriter::new(&styles, &titles, false);
        let mut xml = String::new();
        let footer = doc.sections()[0].footer().unwrap();
        writer.write_blocks(&mut xml, footer.elements()).unwrap();
        assert!(xml.contains(r#">Page </w:t>"#));
        assert!(xml.contains(r#"<w:instrText xml:space="preserve"> PAGE </w:instrText>"#));
    }

    #[test]
    fn test_strict_style_names() {
        let mut doc = Document::new();
        doc.add_section(None).unwrap().add_text("x", "Missing", None).unwrap();
        let styles = doc.styles();
        let titles = doc.titles();
        let mut writer = BodyWriter::new(&styles, &titles, true);
        let mut xml = String::new();
        assert!(matches!(
            writer.write_blocks(&mut xml, doc.sections()[0].elements()),
            Err(Error::Style(_))
        ));
    }

    #[test]
    fn test_inline_paragraph_style_map() {
        let mut doc = Document::new();
        doc.add_section(None)
            .unwrap()
            .add_text("x", None, StyleValues::new().set("align", "right"))
            .unwrap();
        assert!(render(&doc).contains(r#"<w:jc w:val="right"/>"#));
    }
}
