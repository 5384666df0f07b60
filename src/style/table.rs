//! Table, row and cell styles.
use super::error::{Result, StyleError};
use super::values::{StyleValue, normalize_key};
use super::{StyleDefinition, StyleKind};

/// One border line. Size is in eighths of a point, as `w:sz` expects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BorderSide {
    pub size: Option<u32>,
    pub color: Option<String>,
}

impl BorderSide {
    pub fn new(size: u32, color: impl Into<String>) -> Self {
        Self {
            size: Some(size),
            color: Some(color.into()),
        }
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.size.is_some() || self.color.is_some()
    }
}

/// Borders of a table or a cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Borders {
    pub top: BorderSide,
    pub left: BorderSide,
    pub bottom: BorderSide,
    pub right: BorderSide,
    pub inside_h: BorderSide,
    pub inside_v: BorderSide,
}

impl Borders {
    /// Sides in the order WordprocessingML requires, with their element names.
    pub fn sides(&self) -> [(&'static str, &BorderSide); 6] {
        [
            ("top", &self.top),
            ("left", &self.left),
            ("bottom", &self.bottom),
            ("right", &self.right),
            ("insideH", &self.inside_h),
            ("insideV", &self.inside_v),
        ]
    }

    pub fn is_set(&self) -> bool {
        self.sides().iter().any(|(_, side)| side.is_set())
    }

    fn set_all_sizes(&mut self, size: u32) {
        for side in self.sides_mut() {
            side.size = Some(size);
        }
    }

    fn set_all_colors(&mut self, color: &str) {
        for side in self.sides_mut() {
            side.color = Some(color.to_string());
        }
    }

    fn sides_mut(&mut self) -> [&mut BorderSide; 6] {
        [
            &mut self.top,
            &mut self.left,
            &mut self.bottom,
            &mut self.right,
            &mut self.inside_h,
            &mut self.inside_v,
        ]
    }

    /// Handle `border*` keys. Returns `Ok(false)` if the key is not a border key.
    fn apply(&mut self, normalized: &str, key: &str, value: &StyleValue) -> Result<bool> {
        let Some(rest) = normalized.strip_prefix("border") else {
            return Ok(false);
        };
        match rest {
            "size" => self.set_all_sizes(value.to_u32(key)?),
            "color" => self.set_all_colors(&value.to_color(key)?),
            _ => {
                let (side, prop) = if let Some(side) = rest.strip_suffix("size") {
                    (side, "size")
                } else if let Some(side) = rest.strip_suffix("color") {
                    (side, "color")
                } else {
                    return Ok(false);
                };
                let target = match side {
                    "top" => &mut self.top,
                    "left" => &mut self.left,
                    "bottom" => &mut self.bottom,
                    "right" => &mut self.right,
                    "insideh" => &mut self.inside_h,
                    "insidev" => &mut self.inside_v,
                    _ => return Ok(false),
                };
                if prop == "size" {
                    target.size = Some(value.to_u32(key)?);
                } else {
                    target.color = Some(value.to_color(key)?);
                }
            },
        }
        Ok(true)
    }
}

/// Table-level formatting.
///
/// A named table style may carry a separate first-row variant, see
/// [`StyleRegistry::register_table`](super::StyleRegistry::register_table).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableStyle {
    /// Cell margins in twips: top, left, right, bottom
    pub cell_margin_top: Option<u32>,
    pub cell_margin_left: Option<u32>,
    pub cell_margin_right: Option<u32>,
    pub cell_margin_bottom: Option<u32>,
    /// Background fill as RGB hex
    pub bg_color: Option<String>,
    pub borders: Borders,
}

impl TableStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same margin on all four sides.
    pub fn cell_margin(mut self, twips: u32) -> Self {
        self.cell_margin_top = Some(twips);
        self.cell_margin_left = Some(twips);
        self.cell_margin_right = Some(twips);
        self.cell_margin_bottom = Some(twips);
        self
    }

    pub fn bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    /// Same border on every side, including the inner grid lines.
    pub fn border(mut self, size: u32, color: impl Into<String>) -> Self {
        let color = color.into();
        self.borders.set_all_sizes(size);
        self.borders.set_all_colors(&color);
        self
    }

    pub fn has_cell_margins(&self) -> bool {
        self.cell_margin_top.is_some()
            || self.cell_margin_left.is_some()
            || self.cell_margin_right.is_some()
            || self.cell_margin_bottom.is_some()
    }
}

impl StyleDefinition for TableStyle {
    const KIND: StyleKind = StyleKind::Table;

    fn set_value(&mut self, key: &str, value: &StyleValue) -> Result<()> {
        let normalized = normalize_key(key);
        if self.borders.apply(&normalized, key, value)? {
            return Ok(());
        }
        match normalized.as_str() {
            "cellmargin" => {
                let twips = value.to_u32(key)?;
                self.cell_margin_top = Some(twips);
                self.cell_margin_left = Some(twips);
                self.cell_margin_right = Some(twips);
                self.cell_margin_bottom = Some(twips);
            },
            "cellmargintop" => self.cell_margin_top = Some(value.to_u32(key)?),
            "cellmarginleft" => self.cell_margin_left = Some(value.to_u32(key)?),
            "cellmarginright" => self.cell_margin_right = Some(value.to_u32(key)?),
            "cellmarginbottom" => self.cell_margin_bottom = Some(value.to_u32(key)?),
            "bgcolor" => self.bg_color = Some(value.to_color(key)?),
            _ => return Err(StyleError::unknown_key(Self::KIND, key)),
        }
        Ok(())
    }
}

/// Vertical alignment of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }

    pub fn as_odf(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// Text flow direction inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LrTb,
    TbRl,
    BtLr,
}

impl TextDirection {
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::LrTb => "lrTb",
            Self::TbRl => "tbRl",
            Self::BtLr => "btLr",
        }
    }
}

/// Vertical merge state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMerge {
    Restart,
    Continue,
}

impl VMerge {
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Continue => "continue",
        }
    }
}

/// Cell formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub valign: Option<VerticalAlign>,
    pub text_direction: Option<TextDirection>,
    pub bg_color: Option<String>,
    pub grid_span: Option<u32>,
    pub v_merge: Option<VMerge>,
    pub borders: Borders,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = Some(valign);
        self
    }

    pub fn bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    pub fn grid_span(mut self, span: u32) -> Self {
        self.grid_span = Some(span);
        self
    }

    pub fn v_merge(mut self, merge: VMerge) -> Self {
        self.v_merge = Some(merge);
        self
    }

    pub fn has_properties(&self) -> bool {
        *self != Self::default()
    }
}

impl StyleDefinition for CellStyle {
    const KIND: StyleKind = StyleKind::Cell;

    fn set_value(&mut self, key: &str, value: &StyleValue) -> Result<()> {
        let normalized = normalize_key(key);
        if self.borders.apply(&normalized, key, value)? {
            return Ok(());
        }
        match normalized.as_str() {
            "valign" => {
                self.valign = Some(match value.to_text().to_ascii_lowercase().as_str() {
                    "top" => VerticalAlign::Top,
                    "center" | "middle" => VerticalAlign::Center,
                    "bottom" => VerticalAlign::Bottom,
                    _ => return Err(StyleError::invalid(key, value, "unknown vertical alignment")),
                })
            },
            "textdirection" => {
                self.text_direction = Some(match value.to_text().to_ascii_lowercase().as_str() {
                    "lrtb" => TextDirection::LrTb,
                    "tbrl" => TextDirection::TbRl,
                    "btlr" => TextDirection::BtLr,
                    _ => return Err(StyleError::invalid(key, value, "unknown text direction")),
                })
            },
            "bgcolor" => self.bg_color = Some(value.to_color(key)?),
            "gridspan" => {
                let span = value.to_u32(key)?;
                if span == 0 {
                    return Err(StyleError::invalid(key, value, "grid span must be at least 1"));
                }
                self.grid_span = Some(span);
            },
            "vmerge" => {
                self.v_merge = Some(match value.to_text().to_ascii_lowercase().as_str() {
                    "restart" => VMerge::Restart,
                    "continue" => VMerge::Continue,
                    _ => return Err(StyleError::invalid(key, value, "expected restart or continue")),
                })
            },
            _ => return Err(StyleError::unknown_key(Self::KIND, key)),
        }
        Ok(())
    }
}

/// Row formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowStyle {
    /// Height in twips
    pub height: Option<u32>,
    /// Height is exact rather than a minimum
    pub exact_height: bool,
    /// Repeat the row as header on every page
    pub tbl_header: bool,
    pub cant_split: bool,
}

impl RowStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(mut self, twips: u32) -> Self {
        self.height = Some(twips);
        self
    }

    pub fn header(mut self, header: bool) -> Self {
        self.tbl_header = header;
        self
    }

    pub fn has_properties(&self) -> bool {
        *self != Self::default()
    }
}

impl StyleDefinition for RowStyle {
    const KIND: StyleKind = StyleKind::Row;

    fn set_value(&mut self, key: &str, value: &StyleValue) -> Result<()> {
        match normalize_key(key).as_str() {
            "height" => self.height = Some(value.to_u32(key)?),
            "exactheight" => self.exact_height = value.to_bool(key)?,
            "tblheader" => self.tbl_header = value.to_bool(key)?,
            "cantsplit" => self.cant_split = value.to_bool(key)?,
            _ => return Err(StyleError::unknown_key(Self::KIND, key)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleValues;

    #[test]
    fn test_table_border_keys() {
        let table = TableStyle::from_values(
            &StyleValues::new()
                .set("borderSize", 6)
                .set("borderColor", "006699")
                .set("borderInsideHColor", "FF0000")
                .set("cellMargin", 80),
        )
        .unwrap();
        assert_eq!(table.borders.top.size, Some(6));
        assert_eq!(table.borders.inside_v.color.as_deref(), Some("006699"));
        assert_eq!(table.borders.inside_h.color.as_deref(), Some("FF0000"));
        assert_eq!(table.cell_margin_bottom, Some(80));
    }

    #[test]
    fn test_table_unknown_key() {
        let err = TableStyle::from_values(&StyleValues::new().set("borderDiagonalSize", 4)).unwrap_err();
        assert!(matches!(err, StyleError::UnknownStyleKey { kind: StyleKind::Table, .. }));
    }

    #[test]
    fn test_cell_keys() {
        let cell = CellStyle::from_values(
            &StyleValues::new()
                .set("valign", "center")
                .set("textDirection", "btLr")
                .set("gridSpan", 2)
                .set("vMerge", "restart")
                .set("bgColor", "ffffcc"),
        )
        .unwrap();
        assert_eq!(cell.valign, Some(VerticalAlign::Center));
        assert_eq!(cell.text_direction, Some(TextDirection::BtLr));
        assert_eq!(cell.grid_span, Some(2));
        assert_eq!(cell.v_merge, Some(VMerge::Restart));
        assert_eq!(cell.bg_color.as_deref(), Some("FFFFCC"));
        assert!(CellStyle::from_values(&StyleValues::new().set("gridSpan", 0)).is_err());
    }

    #[test]
    fn test_row_keys() {
        let row = RowStyle::from_values(
            &StyleValues::new().set("height", 400).set("tblHeader", true).set("cantSplit", "1"),
        )
        .unwrap();
        assert_eq!(row.height, Some(400));
        assert!(row.tbl_header);
        assert!(row.cant_split);
        assert!(!row.exact_height);
    }
}
