//! Table markup (`w:tbl`).
use super::body::BodyWriter;
use crate::common::Result;
use crate::common::xml::escape_xml;
use crate::document::{ElementContainer, Table};
use crate::style::{Borders, CellStyle, Resolved, RowStyle, TableStyle, style_id};
use std::fmt::Write as FmtWrite;

/// Write `w:tblBorders` / `w:tcBorders` children for the sides that are set.
pub(crate) fn write_borders(xml: &mut String, element: &str, borders: &Borders) {
    if !borders.is_set() {
        return;
    }
    let _ = write!(xml, "<w:{}>", element);
    for (name, side) in borders.sides() {
        if !side.is_set() {
            continue;
        }
        let _ = write!(
            xml,
            r#"<w:{} w:val="single" w:sz="{}" w:space="0" w:color="{}"/>"#,
            name,
            side.size.unwrap_or(4),
            escape_xml(side.color.as_deref().unwrap_or("000000"))
        );
    }
    let _ = write!(xml, "</w:{}>", element);
}

pub(crate) fn write_shading(xml: &mut String, color: Option<&str>) {
    if let Some(color) = color {
        let _ = write!(
            xml,
            r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
            escape_xml(color)
        );
    }
}

/// Table-level properties shared by `w:tblPr` in the body and in the style
/// sheet.
pub(crate) fn write_table_props(xml: &mut String, table: &TableStyle) {
    write_borders(xml, "tblBorders", &table.borders);
    write_shading(xml, table.bg_color.as_deref());
    if table.has_cell_margins() {
        xml.push_str("<w:tblCellMar>");
        for (name, margin) in [
            ("top", table.cell_margin_top),
            ("left", table.cell_margin_left),
            ("bottom", table.cell_margin_bottom),
            ("right", table.cell_margin_right),
        ] {
            if let Some(margin) = margin {
                let _ = write!(xml, r#"<w:{} w:w="{}" w:type="dxa"/>"#, name, margin);
            }
        }
        xml.push_str("</w:tblCellMar>");
    }
}

fn write_row_props(xml: &mut String, row: &RowStyle) {
    if !row.has_properties() {
        return;
    }
    xml.push_str("<w:trPr>");
    if row.cant_split {
        xml.push_str("<w:cantSplit/>");
    }
    if let Some(height) = row.height {
        let rule = if row.exact_height { "exact" } else { "atLeast" };
        let _ = write!(xml, r#"<w:trHeight w:val="{}" w:hRule="{}"/>"#, height, rule);
    }
    if row.tbl_header {
        xml.push_str("<w:tblHeader/>");
    }
    xml.push_str("</w:trPr>");
}

fn write_cell_props(xml: &mut String, width: Option<u32>, cell: &CellStyle) {
    xml.push_str("<w:tcPr>");
    match width {
        Some(width) => {
            let _ = write!(xml, r#"<w:tcW w:w="{}" w:type="dxa"/>"#, width);
        },
        None => xml.push_str(r#"<w:tcW w:w="0" w:type="auto"/>"#),
    }
    if let Some(span) = cell.grid_span.filter(|span| *span > 1) {
        let _ = write!(xml, r#"<w:gridSpan w:val="{}"/>"#, span);
    }
    if let Some(merge) = cell.v_merge {
        let _ = write!(xml, r#"<w:vMerge w:val="{}"/>"#, merge.as_ooxml());
    }
    write_borders(xml, "tcBorders", &cell.borders);
    write_shading(xml, cell.bg_color.as_deref());
    if let Some(direction) = cell.text_direction {
        let _ = write!(xml, r#"<w:textDirection w:val="{}"/>"#, direction.as_ooxml());
    }
    if let Some(valign) = cell.valign {
        let _ = write!(xml, r#"<w:vAlign w:val="{}"/>"#, valign.as_ooxml());
    }
    xml.push_str("</w:tcPr>");
}

impl<'d> BodyWriter<'d> {
    pub(super) fn write_table(&mut self, xml: &mut String, table: &'d Table) -> Result<()> {
        xml.push_str("<w:tbl><w:tblPr>");
        match self.styles.resolve_table(&table.style, self.strict)? {
            Resolved::Named { name, .. } | Resolved::PassThroughName(name) => {
                let _ = write!(xml, r#"<w:tblStyle w:val="{}"/>"#, escape_xml(&style_id(name)));
                write_table_width(xml, table.width);
            },
            Resolved::Inline(style) => {
                write_table_width(xml, table.width);
                write_table_props(xml, style);
            },
            Resolved::Default => write_table_width(xml, table.width),
        }
        xml.push_str("</w:tblPr><w:tblGrid>");
        for width in table.grid() {
            let _ = write!(xml, r#"<w:gridCol w:w="{}"/>"#, width);
        }
        xml.push_str("</w:tblGrid>");

        for row in table.rows() {
            xml.push_str("<w:tr>");
            write_row_props(xml, &row.style);
            for cell in row.cells() {
                xml.push_str("<w:tc>");
                write_cell_props(xml, cell.width, &cell.style);
                self.write_blocks(xml, cell.elements())?;
                xml.push_str("</w:tc>");
            }
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl>");
        Ok(())
    }
}

fn write_table_width(xml: &mut String, width: Option<u32>) {
    match width {
        Some(width) => {
            let _ = write!(xml, r#"<w:tblW w:w="{}" w:type="dxa"/>"#, width);
        },
        None => xml.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#),
    }
}
