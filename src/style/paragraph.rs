//! Paragraph styles.
//!
//! Spacing and indentation are stored in twips. Values coming from a flat
//! style map use the conventions of that map: `indent` and `hanging` count
//! half-inch steps, `spacing` is relative to single line spacing, and
//! `line-height` is a multiple of a single line.
use super::error::{Result, StyleError};
use super::values::{StyleValue, normalize_key};
use super::{StyleDefinition, StyleKind};
use crate::common::unit::{INDENT_STEP_TWIPS, LINE_HEIGHT_TWIPS};

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Value of `w:jc/@w:val`.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
        }
    }

    /// Value of `fo:text-align`.
    pub fn as_odf(&self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "center",
            Self::Right => "end",
            Self::Justify => "justify",
        }
    }

    pub(crate) fn parse(key: &str, value: &StyleValue) -> Result<Self> {
        match value.to_text().trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Ok(Self::Left),
            "center" | "centre" => Ok(Self::Center),
            "right" | "end" => Ok(Self::Right),
            "both" | "justify" | "justified" => Ok(Self::Justify),
            _ => Err(StyleError::invalid(key, value, "unknown alignment")),
        }
    }
}

/// Paragraph formatting.
///
/// # Examples
///
/// ```rust
/// use quillpack::style::{ParagraphStyle, StyleDefinition, StyleValues};
///
/// let para = ParagraphStyle::from_values(&StyleValues::new().set("line-height", 2.0)).unwrap();
/// assert_eq!(para.spacing(), Some(480));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphStyle {
    align: Option<Alignment>,
    /// Space before in twips
    space_before: Option<u32>,
    /// Space after in twips
    space_after: Option<u32>,
    /// Line spacing in twips (240 = single)
    spacing: Option<u32>,
    line_height: Option<f64>,
    /// Left indentation in twips
    indent: Option<u32>,
    /// Hanging indentation in twips
    hanging: Option<u32>,
    keep_next: bool,
    keep_lines: bool,
    widow_control: Option<bool>,
    page_break_before: bool,
}

impl ParagraphStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    /// Space before in twips.
    pub fn space_before(mut self, twips: u32) -> Self {
        self.space_before = Some(twips);
        self
    }

    /// Space after in twips.
    pub fn space_after(mut self, twips: u32) -> Self {
        self.space_after = Some(twips);
        self
    }

    /// Left indentation in twips.
    pub fn indent(mut self, twips: u32) -> Self {
        self.indent = Some(twips);
        self
    }

    /// Hanging indentation in twips.
    pub fn hanging(mut self, twips: u32) -> Self {
        self.hanging = Some(twips);
        self
    }

    pub fn keep_next(mut self, keep: bool) -> Self {
        self.keep_next = keep;
        self
    }

    pub fn keep_lines(mut self, keep: bool) -> Self {
        self.keep_lines = keep;
        self
    }

    pub fn widow_control(mut self, enabled: bool) -> Self {
        self.widow_control = Some(enabled);
        self
    }

    pub fn page_break_before(mut self, enabled: bool) -> Self {
        self.page_break_before = enabled;
        self
    }

    /// Set the raw line spacing in twips.
    pub fn set_spacing(&mut self, twips: u32) {
        self.spacing = Some(twips);
    }

    /// Set the line height as a multiple of single spacing.
    ///
    /// Zero, negative and non-finite values are rejected.
    pub fn set_line_height(&mut self, line_height: f64) -> Result<()> {
        if !line_height.is_finite() || line_height <= 0.0 {
            return Err(StyleError::invalid(
                "line-height",
                line_height,
                "line height must be a positive number",
            ));
        }
        self.line_height = Some(line_height);
        self.spacing = Some((line_height * LINE_HEIGHT_TWIPS).round() as u32);
        Ok(())
    }

    /// Builder form of [`set_line_height`](Self::set_line_height).
    pub fn line_height(mut self, line_height: f64) -> Result<Self> {
        self.set_line_height(line_height)?;
        Ok(self)
    }

    #[inline]
    pub fn alignment(&self) -> Option<Alignment> {
        self.align
    }

    #[inline]
    pub fn before(&self) -> Option<u32> {
        self.space_before
    }

    #[inline]
    pub fn after(&self) -> Option<u32> {
        self.space_after
    }

    /// Line spacing in twips.
    #[inline]
    pub fn spacing(&self) -> Option<u32> {
        self.spacing
    }

    #[inline]
    pub fn line_height_multiple(&self) -> Option<f64> {
        self.line_height
    }

    #[inline]
    pub fn indentation(&self) -> Option<u32> {
        self.indent
    }

    #[inline]
    pub fn hanging_indent(&self) -> Option<u32> {
        self.hanging
    }

    #[inline]
    pub fn is_keep_next(&self) -> bool {
        self.keep_next
    }

    #[inline]
    pub fn is_keep_lines(&self) -> bool {
        self.keep_lines
    }

    #[inline]
    pub fn widow_control_flag(&self) -> Option<bool> {
        self.widow_control
    }

    #[inline]
    pub fn is_page_break_before(&self) -> bool {
        self.page_break_before
    }

    pub fn has_properties(&self) -> bool {
        *self != Self::default()
    }
}

/// Parse a line height. One trailing `x` or `pt` suffix is accepted and a
/// decimal comma reads as a point, so `"1.5x"` and `"2,0"` both parse.
fn parse_line_height(key: &str, value: &StyleValue) -> Result<f64> {
    match value {
        StyleValue::Num(n) => Ok(*n),
        StyleValue::Str(s) => {
            let trimmed = s.trim();
            let number = trimmed
                .strip_suffix("pt")
                .or_else(|| trimmed.strip_suffix('x'))
                .unwrap_or(trimmed)
                .trim_end();
            if number.is_empty() {
                return Err(StyleError::invalid(key, s, "line height is missing"));
            }
            number
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| StyleError::invalid(key, s, "line height must be a valid number"))
        },
        StyleValue::Bool(b) => Err(StyleError::invalid(key, b, "line height must be a valid number")),
    }
}

impl StyleDefinition for ParagraphStyle {
    const KIND: StyleKind = StyleKind::Paragraph;

    fn set_value(&mut self, key: &str, value: &StyleValue) -> Result<()> {
        match normalize_key(key).as_str() {
            "align" | "alignment" => self.align = Some(Alignment::parse(key, value)?),
            "spacebefore" => self.space_before = Some(value.to_u32(key)?),
            "spaceafter" => self.space_after = Some(value.to_u32(key)?),
            "spacing" => {
                let relative = value.to_f64(key)?;
                let twips = relative + LINE_HEIGHT_TWIPS;
                if twips < 0.0 {
                    return Err(StyleError::invalid(key, value, "spacing below zero"));
                }
                self.spacing = Some(twips.round() as u32);
            },
            "lineheight" => {
                let line_height = parse_line_height(key, value)?;
                if !line_height.is_finite() || line_height <= 0.0 {
                    return Err(StyleError::invalid(
                        key,
                        value,
                        "line height must be a positive number",
                    ));
                }
                self.set_line_height(line_height)?;
            },
            "indent" => {
                let steps = value.to_f64(key)?;
                self.indent = Some((steps * INDENT_STEP_TWIPS).round().max(0.0) as u32);
            },
            "hanging" => {
                let steps = value.to_f64(key)?;
                self.hanging = Some((steps * INDENT_STEP_TWIPS).round().max(0.0) as u32);
            },
            "keepnext" => self.keep_next = value.to_bool(key)?,
            "keeplines" => self.keep_lines = value.to_bool(key)?,
            "widowcontrol" => self.widow_control = Some(value.to_bool(key)?),
            "pagebreakbefore" => self.page_break_before = value.to_bool(key)?,
            _ => return Err(StyleError::unknown_key(Self::KIND, key)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleValues;

    fn para(values: StyleValues) -> Result<ParagraphStyle> {
        ParagraphStyle::from_values(&values)
    }

    #[test]
    fn test_line_height_conversion() {
        assert_eq!(para(StyleValues::new().set("line-height", 2.0)).unwrap().spacing(), Some(480));
        assert_eq!(para(StyleValues::new().set("line-height", 1.0)).unwrap().spacing(), Some(240));
        assert_eq!(para(StyleValues::new().set("lineHeight", "1.5")).unwrap().spacing(), Some(360));
    }

    #[test]
    fn test_line_height_rejects_bad_values() {
        for bad in [
            StyleValue::from(0),
            StyleValue::from("abc"),
            StyleValue::from(""),
            StyleValue::from(-1.0),
            StyleValue::from("-2"),
            StyleValue::from("1a2"),
            StyleValue::from("abc1"),
            StyleValue::from("x"),
        ] {
            let err = para(StyleValues::new().set("line-height", bad)).unwrap_err();
            assert!(matches!(err, StyleError::InvalidStyleValue { .. }));
        }
        assert!(ParagraphStyle::new().line_height(0.0).is_err());
    }

    #[test]
    fn test_line_height_suffixes() {
        for (text, twips) in [("1.5x", 360), ("2,0", 480), (" 2pt ", 480), ("1.25", 300)] {
            let style = para(StyleValues::new().set("line-height", text)).unwrap();
            assert_eq!(style.spacing(), Some(twips), "{text}");
        }
    }

    #[test]
    fn test_map_unit_conventions() {
        let style = para(
            StyleValues::new()
                .set("indent", 1)
                .set("hanging", 0.5)
                .set("spacing", 120)
                .set("spaceAfter", 200),
        )
        .unwrap();
        assert_eq!(style.indentation(), Some(720));
        assert_eq!(style.hanging_indent(), Some(360));
        assert_eq!(style.spacing(), Some(360));
        assert_eq!(style.after(), Some(200));
    }

    #[test]
    fn test_alignment_values() {
        let style = para(StyleValues::new().set("align", "justify")).unwrap();
        assert_eq!(style.alignment(), Some(Alignment::Justify));
        assert_eq!(Alignment::Justify.as_ooxml(), "both");
        assert!(para(StyleValues::new().set("align", "diagonal")).is_err());
    }

    #[test]
    fn test_unknown_key() {
        let err = para(StyleValues::new().set("tabsize", 4)).unwrap_err();
        assert!(matches!(err, StyleError::UnknownStyleKey { .. }));
    }
}
