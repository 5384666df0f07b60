//! Body markup of an OpenDocument text.
//!
//! The same writer produces the `office:text` of `content.xml` and the
//! header and footer content of the master pages in `styles.xml`. Inline
//! styles become automatic styles collected in [`AutoStyles`], which the
//! caller writes into the part afterwards.

use super::styles::{
    AutoStyles, FOOTNOTE_STYLE, Family, border, cm, list_style_name, paragraph_properties, text_properties,
};
use crate::common::unit::{format_decimal, px_to_cm_96};
use crate::common::xml::escape_xml;
use crate::common::{Error, Result};
use crate::document::{
    Cell, Element, ElementContainer, Footnote, Image, Link, ListItem, PreserveText, Table, TableOfContents, TextSegment,
    Title, TitleEntry,
};
use crate::style::{
    Alignment, CellStyle, FontStyle, NamedStyle, ParagraphStyle, Resolved, StyleRef, StyleRegistry, TableStyle,
    VMerge, Wrapping, style_id, title_key,
};
use log::{debug, warn};
use std::fmt::Write as FmtWrite;

/// Escape text content, mapping tabs, line feeds and runs of spaces to
/// their ODF elements.
pub(crate) fn push_text(xml: &mut String, text: &str) {
    let mut spaces = 0usize;
    let mut at_start = true;
    for ch in text.chars() {
        if ch == ' ' {
            spaces += 1;
            continue;
        }
        flush_spaces(xml, &mut spaces, at_start);
        at_start = false;
        match ch {
            '\t' => xml.push_str("<text:tab/>"),
            '\n' => xml.push_str("<text:line-break/>"),
            '\r' => {},
            '&' => xml.push_str("&amp;"),
            '<' => xml.push_str("&lt;"),
            '>' => xml.push_str("&gt;"),
            _ => xml.push(ch),
        }
    }
    flush_spaces(xml, &mut spaces, at_start);
}

fn flush_spaces(xml: &mut String, spaces: &mut usize, at_start: bool) {
    let count = std::mem::take(spaces);
    if count == 0 {
        return;
    }
    let collapsed = if at_start {
        count
    } else {
        xml.push(' ');
        count - 1
    };
    match collapsed {
        0 => {},
        1 => xml.push_str("<text:s/>"),
        n => {
            let _ = write!(xml, r#"<text:s text:c="{}"/>"#, n);
        },
    }
}

fn open_paragraph(xml: &mut String, style: Option<&str>) {
    match style {
        Some(style) => {
            let _ = write!(xml, r#"<text:p text:style-name="{}">"#, escape_xml(style));
        },
        None => xml.push_str("<text:p>"),
    }
}

fn write_span(xml: &mut String, style: Option<&str>, text: &str) {
    match style {
        Some(style) => {
            let _ = write!(xml, r#"<text:span text:style-name="{}">"#, escape_xml(style));
            push_text(xml, text);
            xml.push_str("</text:span>");
        },
        None => push_text(xml, text),
    }
}

fn not_inline(element: &Element) -> Error {
    Error::Inconsistent(format!("{} cannot be written inside a paragraph", element.kind().name()))
}

fn horizontal_pos(align: Option<Alignment>) -> &'static str {
    match align {
        Some(Alignment::Center) => "center",
        Some(Alignment::Right) => "right",
        _ => "left",
    }
}

/// Writes the content of one part.
pub(crate) struct OdtBody<'d> {
    styles: &'d StyleRegistry,
    titles: &'d [TitleEntry],
    strict: bool,
    prefix: &'static str,
    pub(crate) auto: AutoStyles,
    frames: u32,
    tables: u32,
    /// List types already started in this part
    lists: Vec<u32>,
}

impl<'d> OdtBody<'d> {
    /// `prefix` keeps automatic style and frame names of different parts
    /// apart.
    pub fn new(styles: &'d StyleRegistry, titles: &'d [TitleEntry], strict: bool, prefix: &'static str) -> Self {
        Self {
            styles,
            titles,
            strict,
            prefix,
            auto: AutoStyles::new(prefix),
            frames: 0,
            tables: 0,
            lists: Vec::new(),
        }
    }

    fn font(&self, font: &'d StyleRef<FontStyle>) -> Result<Resolved<'d, FontStyle>> {
        Ok(self.styles.resolve_font(font, self.strict)?)
    }

    /// Paragraph style name for a paragraph and the font of its text.
    fn paragraph_style(
        &mut self,
        paragraph: &'d StyleRef<ParagraphStyle>,
        font: &Resolved<'d, FontStyle>,
    ) -> Result<Option<String>> {
        let style = match self.styles.resolve_paragraph(paragraph, self.strict)? {
            Resolved::Named { name, .. } => Some(style_id(name)),
            Resolved::Inline(paragraph) if paragraph.has_properties() => {
                Some(self.auto.paragraph(paragraph_properties(paragraph)))
            },
            Resolved::PassThroughName(name) => {
                debug!("paragraph style {} is not registered, dropping it", name);
                None
            },
            Resolved::Inline(_) | Resolved::Default => match font {
                Resolved::Named { name, style } if style.is_paragraph_type() => Some(style_id(name)),
                _ => None,
            },
        };
        Ok(style)
    }

    /// Span style name for a font, `None` when text needs no span.
    fn span_style(&mut self, font: &Resolved<'d, FontStyle>) -> Option<String> {
        match font {
            Resolved::Named { name, style } if !style.is_paragraph_type() => Some(style_id(name)),
            Resolved::Inline(font) if font.has_properties() => {
                Some(self.auto.add(Family::Text, String::new(), text_properties(font)))
            },
            _ => None,
        }
    }

    /// Write block content. An empty list still yields one paragraph.
    pub fn write_blocks(&mut self, xml: &mut String, elements: &'d [Element]) -> Result<()> {
        if elements.is_empty() {
            xml.push_str("<text:p/>");
            return Ok(());
        }
        let mut i = 0;
        while i < elements.len() {
            if let Element::ListItem(first) = &elements[i] {
                let items: Vec<&'d ListItem> = elements[i..]
                    .iter()
                    .map_while(|element| match element {
                        Element::ListItem(item) if item.list_type == first.list_type => Some(item),
                        _ => None,
                    })
                    .collect();
                i += items.len();
                self.write_list(xml, &items)?;
                continue;
            }
            self.write_block(xml, &elements[i])?;
            i += 1;
        }
        Ok(())
    }

    fn write_block(&mut self, xml: &mut String, element: &'d Element) -> Result<()> {
        match element {
            Element::Text(text) => {
                let font = self.font(&text.font)?;
                let style = self.paragraph_style(&text.paragraph, &font)?;
                let span = self.span_style(&font);
                open_paragraph(xml, style.as_deref());
                write_span(xml, span.as_deref(), &text.text);
                xml.push_str("</text:p>");
            },
            Element::TextRun(run) => {
                let style = self.paragraph_style(&run.paragraph, &Resolved::Default)?;
                open_paragraph(xml, style.as_deref());
                for child in run.elements() {
                    self.write_inline(xml, child)?;
                }
                xml.push_str("</text:p>");
            },
            Element::Link(link) => {
                let font = self.font(&link.font)?;
                let style = self.paragraph_style(&link.paragraph, &font)?;
                open_paragraph(xml, style.as_deref());
                self.write_link(xml, link, &font);
                xml.push_str("</text:p>");
            },
            Element::Image(image) => {
                let style = image
                    .style
                    .align
                    .filter(|_| image.style.wrapping.is_inline())
                    .map(|align| {
                        self.auto.paragraph(format!(
                            r#"<style:paragraph-properties fo:text-align="{}"/>"#,
                            align.as_odf()
                        ))
                    });
                open_paragraph(xml, style.as_deref());
                self.write_image(xml, image);
                xml.push_str("</text:p>");
            },
            Element::Object(object) => {
                warn!("embedded object {} is not supported in OpenDocument, skipping it", object.source().locator());
            },
            Element::TextBreak(text_break) => {
                let font = self.font(&text_break.font)?;
                let style = self.paragraph_style(&text_break.paragraph, &font)?;
                for _ in 0..text_break.count {
                    match &style {
                        Some(style) => {
                            let _ = write!(xml, r#"<text:p text:style-name="{}"/>"#, escape_xml(style));
                        },
                        None => xml.push_str("<text:p/>"),
                    }
                }
            },
            Element::PageBreak => {
                let style = self
                    .auto
                    .paragraph(r#"<style:paragraph-properties fo:break-before="page"/>"#.to_string());
                let _ = write!(xml, r#"<text:p text:style-name="{}"/>"#, style);
            },
            Element::Title(title) => self.write_title(xml, title),
            Element::Table(table) => self.write_table(xml, table)?,
            Element::ListItem(item) => self.write_list(xml, &[item])?,
            Element::Footnote(footnote) => {
                xml.push_str("<text:p>");
                self.write_footnote(xml, footnote)?;
                xml.push_str("</text:p>");
            },
            Element::TableOfContents(toc) => self.write_toc(xml, toc)?,
            Element::PreserveText(text) => self.write_preserve_text(xml, text)?,
        }
        Ok(())
    }

    /// Write an element inside an open `text:p`.
    pub fn write_inline(&mut self, xml: &mut String, element: &'d Element) -> Result<()> {
        match element {
            Element::Text(text) => {
                let font = self.font(&text.font)?;
                let span = self.span_style(&font);
                write_span(xml, span.as_deref(), &text.text);
            },
            Element::Link(link) => {
                let font = self.font(&link.font)?;
                self.write_link(xml, link, &font);
            },
            Element::Image(image) => self.write_image(xml, image),
            Element::Object(object) => {
                warn!("embedded object {} is not supported in OpenDocument, skipping it", object.source().locator());
            },
            Element::TextBreak(text_break) => {
                for _ in 0..text_break.count {
                    xml.push_str("<text:line-break/>");
                }
            },
            Element::Footnote(footnote) => self.write_footnote(xml, footnote)?,
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

    fn write_link(&mut self, xml: &mut String, link: &Link, font: &Resolved<'d, FontStyle>) {
        let span = self.span_style(font);
        let _ = write!(
            xml,
            r#"<text:a xlink:type="simple" xlink:href="{}">"#,
            escape_xml(&link.target)
        );
        write_span(xml, span.as_deref(), &link.text);
        xml.push_str("</text:a>");
    }

    fn write_image(&mut self, xml: &mut String, image: &Image) {
        self.frames += 1;
        let (width, height) = image.extent();
        let style = &image.style;
        let (anchor, properties) = if style.wrapping.is_inline() {
            (
                "as-char",
                r#"<style:graphic-properties style:vertical-pos="top" style:vertical-rel="baseline"/>"#.to_string(),
            )
        } else {
            let mut properties = format!(
                r#"<style:graphic-properties style:wrap="{}" style:horizontal-pos="{}" style:horizontal-rel="paragraph" style:vertical-pos="top" style:vertical-rel="paragraph""#,
                style.wrapping.as_odf(),
                horizontal_pos(style.align)
            );
            if style.wrapping == Wrapping::Behind {
                properties.push_str(r#" style:run-through="background""#);
            }
            properties.push_str("/>");
            ("char", properties)
        };
        let frame_style = self.auto.add(Family::Graphic, String::new(), properties);
        let _ = write!(
            xml,
            r#"<draw:frame draw:style-name="{}" draw:name="{}Image{}" text:anchor-type="{}" svg:width="{}cm" svg:height="{}cm""#,
            frame_style,
            self.prefix,
            self.frames,
            anchor,
            format_decimal(px_to_cm_96(width)),
            format_decimal(px_to_cm_96(height))
        );
        if !style.wrapping.is_inline() {
            if let Some(left) = style.margin_left {
                let _ = write!(xml, r#" svg:x="{}cm""#, format_decimal(left as f64 * 2.54 / 96.0));
            }
            if let Some(top) = style.margin_top {
                let _ = write!(xml, r#" svg:y="{}cm""#, format_decimal(top as f64 * 2.54 / 96.0));
            }
        }
        let _ = write!(
            xml,
            r#" draw:z-index="{}"><draw:image xlink:href="Pictures/{}" xlink:type="simple" xlink:show="embed" xlink:actuate="onLoad"/></draw:frame>"#,
            self.frames - 1,
            escape_xml(image.file_name())
        );
    }

    fn write_title(&mut self, xml: &mut String, title: &Title) {
        let key = title_key(title.depth);
        if self.styles.contains(&key) {
            let _ = write!(
                xml,
                r#"<text:h text:style-name="{}" text:outline-level="{}">"#,
                style_id(&key),
                title.depth
            );
        } else {
            let _ = write!(xml, r#"<text:h text:outline-level="{}">"#, title.depth);
        }
        let _ = write!(xml, r#"<text:bookmark text:name="{}"/>"#, title.anchor());
        push_text(xml, &title.text);
        xml.push_str("</text:h>");
    }

    /// Write consecutive list items of one list type as a single
    /// `text:list`, nesting by depth.
    fn write_list(&mut self, xml: &mut String, items: &[&'d ListItem]) -> Result<()> {
        let Some(first) = items.first() else {
            return Ok(());
        };
        let num_id = first.list_type.num_id();
        let _ = write!(
            xml,
            r#"<text:list text:style-name="{}""#,
            list_style_name(first.list_type)
        );
        if first.list_type.is_numbered() && self.lists.contains(&num_id) {
            xml.push_str(r#" text:continue-numbering="true""#);
        }
        xml.push('>');
        self.lists.push(num_id);

        let mut open: Option<u32> = None;
        for item in items {
            let depth = item.depth;
            match open {
                None => {
                    for _ in 0..depth {
                        xml.push_str("<text:list-item><text:list>");
                    }
                },
                Some(current) if depth > current => {
                    xml.push_str("<text:list>");
                    for _ in current + 1..depth {
                        xml.push_str("<text:list-item><text:list>");
                    }
                },
                Some(current) => {
                    for _ in depth..current {
                        xml.push_str("</text:list-item></text:list>");
                    }
                    xml.push_str("</text:list-item>");
                },
            }
            xml.push_str("<text:list-item>");
            let font = self.font(&item.font)?;
            let style = self.paragraph_style(&item.paragraph, &font)?;
            let span = self.span_style(&font);
            open_paragraph(xml, style.as_deref());
            write_span(xml, span.as_deref(), &item.text);
            xml.push_str("</text:p>");
            open = Some(depth);
        }
        for _ in 0..open.unwrap_or(0) {
            xml.push_str("</text:list-item></text:list>");
        }
        xml.push_str("</text:list-item></text:list>");
        Ok(())
    }

    fn write_footnote(&mut self, xml: &mut String, footnote: &'d Footnote) -> Result<()> {
        let style = match self.paragraph_style(&footnote.paragraph, &Resolved::Default)? {
            Some(style) => style,
            None => FOOTNOTE_STYLE.to_string(),
        };
        let _ = write!(
            xml,
            r#"<text:note text:id="ftn{0}" text:note-class="footnote"><text:note-citation>{0}</text:note-citation><text:note-body>"#,
            footnote.id()
        );
        open_paragraph(xml, Some(&style));
        for child in footnote.elements() {
            self.write_inline(xml, child)?;
        }
        xml.push_str("</text:p></text:note-body></text:note>");
        Ok(())
    }

    fn write_toc(&mut self, xml: &mut String, toc: &'d TableOfContents) -> Result<()> {
        let font = self.font(&toc.font)?;
        let span = self.span_style(&font);
        let _ = write!(
            xml,
            r#"<text:table-of-content text:name="TableOfContents{}" text:protected="true"><text:table-of-content-source text:outline-level="{}" text:use-index-marks="false">"#,
            self.prefix,
            toc.max_depth
        );
        for level in 1..=toc.max_depth {
            let _ = write!(
                xml,
                concat!(
                    r#"<text:table-of-content-entry-template text:outline-level="{}">"#,
                    r#"<text:index-entry-link-start/><text:index-entry-text/>"#,
                    r#"<text:index-entry-tab-stop style:type="right" style:leader-char="."/>"#,
                    r#"<text:index-entry-page-number/><text:index-entry-link-end/>"#,
                    r#"</text:table-of-content-entry-template>"#
                ),
                level
            );
        }
        xml.push_str("</text:table-of-content-source><text:index-body>");
        let mut written = false;
        for entry in self.titles.iter().filter(|t| toc.includes(t.depth)) {
            let mut properties = format!(
                r#"<style:paragraph-properties fo:margin-left="{}"><style:tab-stops>"#,
                cm(toc.indent * (entry.depth - 1))
            );
            let _ = write!(
                properties,
                r#"<style:tab-stop style:position="{}" style:type="right" style:leader-style="dotted" style:leader-text="."/>"#,
                cm(toc.tab_pos)
            );
            properties.push_str("</style:tab-stops></style:paragraph-properties>");
            let style = self.auto.paragraph(properties);
            let _ = write!(
                xml,
                r##"<text:p text:style-name="{}"><text:a xlink:type="simple" xlink:href="#{}">"##,
                style,
                entry.anchor()
            );
            write_span(xml, span.as_deref(), &entry.text);
            xml.push_str("<text:tab/>1</text:a></text:p>");
            written = true;
        }
        if !written {
            xml.push_str("<text:p/>");
        }
        xml.push_str("</text:index-body></text:table-of-content>");
        Ok(())
    }

    fn write_preserve_text(&mut self, xml: &mut String, text: &'d PreserveText) -> Result<()> {
        let font = self.font(&text.font)?;
        let style = self.paragraph_style(&text.paragraph, &font)?;
        let span = self.span_style(&font);
        open_paragraph(xml, style.as_deref());
        if let Some(span) = &span {
            let _ = write!(xml, r#"<text:span text:style-name="{}">"#, escape_xml(span));
        }
        for segment in text.segments() {
            match segment {
                TextSegment::Literal(literal) => push_text(xml, &literal),
                TextSegment::Field(field) => match field.as_str() {
                    "PAGE" => xml.push_str(r#"<text:page-number text:select-page="current">1</text:page-number>"#),
                    "NUMPAGES" => xml.push_str("<text:page-count>1</text:page-count>"),
                    "DATE" => xml.push_str("<text:date/>"),
                    "TIME" => xml.push_str("<text:time/>"),
                    other => {
                        debug!("field {} has no OpenDocument equivalent, writing it as text", other);
                        push_text(xml, &format!("{{{}}}", other));
                    },
                },
            }
        }
        if span.is_some() {
            xml.push_str("</text:span>");
        }
        xml.push_str("</text:p>");
        Ok(())
    }

    fn table_styles(&self, table: &'d Table) -> Result<(Option<&'d TableStyle>, Option<&'d TableStyle>)> {
        let styles = match self.styles.resolve_table(&table.style, self.strict)? {
            Resolved::Named {
                style: NamedStyle::Table { table: own, first_row },
                ..
            } => (Some(own), first_row.as_ref()),
            Resolved::Inline(style) => (Some(style), None),
            Resolved::Named { name, .. } | Resolved::PassThroughName(name) => {
                warn!("{} is not a table style, writing the table unstyled", name);
                (None, None)
            },
            Resolved::Default => (None, None),
        };
        Ok(styles)
    }

    fn cell_style(&mut self, table: Option<&TableStyle>, cell: &CellStyle) -> Option<String> {
        let mut attrs = String::new();
        if let Some(table) = table {
            for (name, margin) in [
                ("top", table.cell_margin_top),
                ("left", table.cell_margin_left),
                ("bottom", table.cell_margin_bottom),
                ("right", table.cell_margin_right),
            ] {
                if let Some(margin) = margin {
                    let _ = write!(attrs, r#" fo:padding-{}="{}""#, name, cm(margin));
                }
            }
        }
        let sides = [
            ("top", &cell.borders.top, table.map(|t| &t.borders.top)),
            ("left", &cell.borders.left, table.map(|t| &t.borders.left)),
            ("bottom", &cell.borders.bottom, table.map(|t| &t.borders.bottom)),
            ("right", &cell.borders.right, table.map(|t| &t.borders.right)),
        ];
        for (name, own, inherited) in sides {
            let side = if own.is_set() {
                Some(own)
            } else {
                inherited.filter(|side| side.is_set())
            };
            if let Some(side) = side {
                let _ = write!(attrs, r#" fo:border-{}="{}""#, name, border(side));
            }
        }
        let background = cell
            .bg_color
            .as_deref()
            .or_else(|| table.and_then(|t| t.bg_color.as_deref()));
        if let Some(color) = background {
            let _ = write!(attrs, r##" fo:background-color="#{}""##, escape_xml(color));
        }
        if let Some(valign) = cell.valign {
            let _ = write!(attrs, r#" style:vertical-align="{}""#, valign.as_odf());
        }
        if attrs.is_empty() {
            return None;
        }
        let properties = format!("<style:table-cell-properties{}/>", attrs);
        Some(self.auto.add(Family::TableCell, String::new(), properties))
    }

    fn write_table(&mut self, xml: &mut String, table: &'d Table) -> Result<()> {
        self.tables += 1;
        let (style, first_row) = self.table_styles(table)?;
        let grid = table.grid();
        let total: u32 = grid.iter().sum();
        let width = table.width.unwrap_or(total);
        let table_style = self.auto.add(
            Family::Table,
            String::new(),
            format!(
                r#"<style:table-properties style:width="{}" table:align="margins"/>"#,
                cm(width)
            ),
        );
        let _ = write!(
            xml,
            r#"<table:table table:name="{}Table{}" table:style-name="{}">"#,
            self.prefix, self.tables, table_style
        );
        for column in &grid {
            let column_style = self.auto.add(
                Family::TableColumn,
                String::new(),
                format!(r#"<style:table-column-properties style:column-width="{}"/>"#, cm(*column)),
            );
            let _ = write!(xml, r#"<table:table-column table:style-name="{}"/>"#, column_style);
        }

        let header_rows = table.rows().iter().take_while(|row| row.style.tbl_header).count();
        for (index, row) in table.rows().iter().enumerate() {
            if index == 0 && header_rows > 0 {
                xml.push_str("<table:table-header-rows>");
            }
            let mut row_props = String::new();
            if let Some(height) = row.style.height {
                let attribute = if row.style.exact_height { "style:row-height" } else { "style:min-row-height" };
                let _ = write!(row_props, r#" {}="{}""#, attribute, cm(height));
            }
            if row.style.cant_split {
                row_props.push_str(r#" fo:keep-together="always""#);
            }
            if row_props.is_empty() {
                xml.push_str("<table:table-row>");
            } else {
                let row_style = self.auto.add(
                    Family::TableRow,
                    String::new(),
                    format!("<style:table-row-properties{}/>", row_props),
                );
                let _ = write!(xml, r#"<table:table-row table:style-name="{}">"#, row_style);
            }

            let row_table_style = if index == 0 { first_row.or(style) } else { style };
            for cell in row.cells() {
                let span = cell.style.grid_span.unwrap_or(1).max(1);
                if cell.style.v_merge == Some(VMerge::Continue) {
                    for _ in 0..span {
                        xml.push_str("<table:covered-table-cell/>");
                    }
                    continue;
                }
                xml.push_str("<table:table-cell");
                if let Some(cell_style) = self.cell_style(row_table_style, &cell.style) {
                    let _ = write!(xml, r#" table:style-name="{}""#, cell_style);
                }
                if span > 1 {
                    let _ = write!(xml, r#" table:number-columns-spanned="{}""#, span);
                }
                if cell.style.v_merge == Some(VMerge::Restart) {
                    let rows = merged_rows(table, index, column_of(row.cells(), cell));
                    if rows > 1 {
                        let _ = write!(xml, r#" table:number-rows-spanned="{}""#, rows);
                    }
                }
                xml.push_str(r#" office:value-type="string">"#);
                self.write_blocks(xml, cell.elements())?;
                xml.push_str("</table:table-cell>");
                for _ in 1..span {
                    xml.push_str("<table:covered-table-cell/>");
                }
            }
            xml.push_str("</table:table-row>");
            if index + 1 == header_rows {
                xml.push_str("</table:table-header-rows>");
            }
        }
        xml.push_str("</table:table>");
        Ok(())
    }
}

/// Grid column a cell starts at.
fn column_of(cells: &[Cell], target: &Cell) -> u32 {
    cells
        .iter()
        .take_while(|cell| !std::ptr::eq(*cell, target))
        .map(|cell| cell.style.grid_span.unwrap_or(1).max(1))
        .sum()
}

/// Rows covered by a vertical merge starting at `row` in grid column
/// `column`, the starting row included.
fn merged_rows(table: &Table, row: usize, column: u32) -> u32 {
    let mut count = 1;
    for next in &table.rows()[row + 1..] {
        let mut start = 0;
        let continues = next.cells().iter().any(|cell| {
            let at = start;
            start += cell.style.grid_span.unwrap_or(1).max(1);
            at == column && cell.style.v_merge == Some(VMerge::Continue)
        });
        if !continues {
            break;
        }
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, ListType};
    use crate::style::Underline;

    fn render(doc: &Document) -> (String, AutoStyles) {
        let styles = doc.styles();
        let titles = doc.titles();
        let mut body = OdtBody::new(&styles, &titles, false, "");
        let mut xml = String::new();
        body.write_blocks(&mut xml, doc.sections()[0].elements()).unwrap();
        (xml, body.auto)
    }

    #[test]
    fn test_push_text_spaces() {
        let mut xml = String::new();
        push_text(&mut xml, "  a   b\tc\nd & e");
        assert_eq!(
            xml,
            r#"<text:s text:c="2"/>a <text:s text:c="2"/>b<text:tab/>c<text:line-break/>d &amp; e"#
        );
    }

    #[test]
    fn test_inline_font_becomes_span() {
        let mut doc = Document::new();
        doc.add_section(None)
            .unwrap()
            .add_text("hello", FontStyle::new().underline(Underline::Single), None)
            .unwrap();
        let (xml, auto) = render(&doc);
        assert_eq!(xml, r#"<text:p><text:span text:style-name="T1">hello</text:span></text:p>"#);
        let mut styles = String::new();
        auto.write(&mut styles);
        assert!(styles.contains(r#"style:text-underline-style="solid""#));
    }

    #[test]
    fn test_nested_list() {
        let mut doc = Document::new();
        let section = doc.add_section(None).unwrap();
        section.add_list_item("one", 0, ListType::Number, None, None).unwrap();
        section.add_list_item("one.a", 1, ListType::Number, None, None).unwrap();
        section.add_list_item("two", 0, ListType::Number, None, None).unwrap();
        section.add_text("break", None, None).unwrap();
        section.add_list_item("three", 0, ListType::Number, None, None).unwrap();
        let (xml, _) = render(&doc);
        assert!(xml.starts_with(concat!(
            r#"<text:list text:style-name="L7"><text:list-item><text:p>one</text:p>"#,
            r#"<text:list><text:list-item><text:p>one.a</text:p></text:list-item></text:list>"#,
            r#"</text:list-item><text:list-item><text:p>two</text:p></text:list-item></text:list>"#
        )));
        assert!(xml.contains(r#"<text:list text:style-name="L7" text:continue-numbering="true">"#));
    }

    #[test]
    fn test_title_bookmark() {
        let mut doc = Document::new();
        doc.add_title_style(1, FontStyle::new().bold(true), None).unwrap();
        let section = doc.add_section(None).unwrap();
        section.add_title("Intro", 1).unwrap();
        section.add_title("Details", 2).unwrap();
        let (xml, _) = render(&doc);
        assert!(xml.contains(
            r#"<text:h text:style-name="Heading1" text:outline-level="1"><text:bookmark text:name="_Toc252634154"/>Intro</text:h>"#
        ));
        assert!(xml.contains(r#"<text:h text:outline-level="2"><text:bookmark text:name="_Toc252634155"/>"#));
    }

    #[test]
    fn test_toc_and_fields() {
        let mut doc = Document::new();
        let section = doc.add_section(None).unwrap();
        section.add_toc(None).unwrap();
        section.add_title("Intro", 1).unwrap();
        section
            .add_footer()
            .add_preserve_text("Page {PAGE} of {NUMPAGES}", None, None)
            .unwrap();
        let (xml, _) = render(&doc);
        assert!(xml.contains(r##"<text:a xlink:type="simple" xlink:href="#_Toc252634154">Intro<text:tab/>1</text:a>"##));

        let styles = doc.styles();
        let titles = doc.titles();
        let mut body = OdtBody::new(&styles, &titles, false, "M");
        let mut xml = String::new();
        let footer = doc.sections()[0].footer().unwrap();
        body.write_blocks(&mut xml, footer.elements()).unwrap();
        assert!(xml.contains(
            r#"<text:p>Page <text:page-number text:select-page="current">1</text:page-number> of <text:page-count>1</text:page-count></text:p>"#
        ));
    }

    #[test]
    fn test_footnote_inline() {
        let mut doc = Document::new();
        let section = doc.add_section(None).unwrap();
        let run = section.add_text_run(None).unwrap();
        run.add_text("See", None, None).unwrap();
        run.add_footnote(None).unwrap().add_text("note", None, None).unwrap();
        let (xml, _) = render(&doc);
        assert!(xml.contains(r#"<text:note text:id="ftn1" text:note-class="footnote"><text:note-citation>1</text:note-citation>"#));
        assert!(xml.contains(r#"<text:p text:style-name="Footnote">note</text:p>"#));
    }

    #[test]
    fn test_table_merges() {
        let mut doc = Document::new();
        let table = doc
            .add_section(None)
            .unwrap()
            .add_table(TableStyle::new().border(8, "000000").cell_margin(80))
            .unwrap();
        let row = table.add_row(None, None).unwrap();
        row.add_cell(Some(2000), CellStyle::new().grid_span(2)).unwrap();
        row.add_cell(Some(2000), CellStyle::new().v_merge(VMerge::Restart)).unwrap();
        let row = table.add_row(None, None).unwrap();
        row.add_cell(Some(2000), None).unwrap();
        row.add_cell(Some(2000), None).unwrap();
        row.add_cell(Some(2000), CellStyle::new().v_merge(VMerge::Continue)).unwrap();
        let (xml, auto) = render(&doc);
        assert!(xml.contains(r#"table:number-columns-spanned="2""#));
        assert!(xml.contains(r#"table:number-rows-spanned="2""#));
        assert_eq!(xml.matches("<table:covered-table-cell/>").count(), 2);
        assert_eq!(xml.matches("<table:table-column ").count(), 3);
        let mut styles = String::new();
        auto.write(&mut styles);
        assert!(styles.contains(r##"fo:border-top="1pt solid #000000""##));
        assert!(styles.contains(r#"fo:padding-left="0.141cm""#));
    }
}
