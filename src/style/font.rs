//! Character (font) styles.
use super::error::{Result, StyleError};
use super::values::{StyleValue, normalize_key};
use super::{StyleDefinition, StyleKind};
use crate::common::unit::{half_points_to_pt, pt_to_half_points};

/// Underline styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Underline {
    #[default]
    None,
    Single,
    Double,
    Dotted,
    Dash,
    Wave,
    Words,
}

impl Underline {
    /// Value of `w:u/@w:val`.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Double => "double",
            Self::Dotted => "dotted",
            Self::Dash => "dash",
            Self::Wave => "wave",
            Self::Words => "words",
        }
    }

    /// Value of `style:text-underline-style`.
    pub fn as_odf(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single | Self::Double | Self::Words => "solid",
            Self::Dotted => "dotted",
            Self::Dash => "dash",
            Self::Wave => "wave",
        }
    }

    fn parse(key: &str, value: &StyleValue) -> Result<Self> {
        if let StyleValue::Bool(b) = value {
            return Ok(if *b { Self::Single } else { Self::None });
        }
        match value.to_text().trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "dotted" => Ok(Self::Dotted),
            "dash" => Ok(Self::Dash),
            "wave" => Ok(Self::Wave),
            "words" => Ok(Self::Words),
            _ => Err(StyleError::invalid(key, value, "unknown underline style")),
        }
    }
}

/// Character formatting.
///
/// The size is kept in half-points, the unit WordprocessingML stores; the
/// accessors speak in points.
///
/// # Examples
///
/// ```rust
/// use quillpack::style::FontStyle;
///
/// let font = FontStyle::new().name("Calibri").size(12.0).bold(true);
/// assert_eq!(font.size_pt(), Some(12.0));
/// assert_eq!(font.half_points(), Some(24));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontStyle {
    name: Option<String>,
    /// Size in half-points
    size: Option<u32>,
    bold: bool,
    italic: bool,
    underline: Underline,
    strikethrough: bool,
    superscript: bool,
    subscript: bool,
    /// RGB hex color
    color: Option<String>,
    /// Highlight color name (e.g. "yellow")
    fg_color: Option<String>,
}

impl FontStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the size in points.
    pub fn size(mut self, points: f64) -> Self {
        self.set_size(points);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn underline(mut self, underline: Underline) -> Self {
        self.underline = underline;
        self
    }

    pub fn strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    /// Superscript and subscript are exclusive; setting one clears the other.
    pub fn superscript(mut self, superscript: bool) -> Self {
        self.superscript = superscript;
        if superscript {
            self.subscript = false;
        }
        self
    }

    pub fn subscript(mut self, subscript: bool) -> Self {
        self.subscript = subscript;
        if subscript {
            self.superscript = false;
        }
        self
    }

    /// Set the text color as RGB hex (e.g. "FF0000").
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into().trim_start_matches('#').to_ascii_uppercase());
        self
    }

    /// Set the highlight color name (e.g. "yellow").
    pub fn fg_color(mut self, color: impl Into<String>) -> Self {
        self.fg_color = Some(color.into());
        self
    }

    /// Set the size in points; stored as half-points.
    pub fn set_size(&mut self, points: f64) {
        self.size = Some(pt_to_half_points(points));
    }

    #[inline]
    pub fn font_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Size in points.
    #[inline]
    pub fn size_pt(&self) -> Option<f64> {
        self.size.map(half_points_to_pt)
    }

    /// Size in half-points, as stored.
    #[inline]
    pub fn half_points(&self) -> Option<u32> {
        self.size
    }

    #[inline]
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    #[inline]
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    #[inline]
    pub fn underline_style(&self) -> Underline {
        self.underline
    }

    #[inline]
    pub fn is_strikethrough(&self) -> bool {
        self.strikethrough
    }

    #[inline]
    pub fn is_superscript(&self) -> bool {
        self.superscript
    }

    #[inline]
    pub fn is_subscript(&self) -> bool {
        self.subscript
    }

    #[inline]
    pub fn text_color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    #[inline]
    pub fn highlight(&self) -> Option<&str> {
        self.fg_color.as_deref()
    }

    /// Whether any property differs from the defaults.
    pub fn has_properties(&self) -> bool {
        *self != Self::default()
    }
}

impl StyleDefinition for FontStyle {
    const KIND: StyleKind = StyleKind::Font;

    fn set_value(&mut self, key: &str, value: &StyleValue) -> Result<()> {
        match normalize_key(key).as_str() {
            "name" => self.name = Some(value.to_text()),
            "size" => {
                let points = value.to_f64(key)?;
                if points <= 0.0 {
                    return Err(StyleError::invalid(key, value, "size must be positive"));
                }
                self.set_size(points);
            },
            "bold" => self.bold = value.to_bool(key)?,
            "italic" => self.italic = value.to_bool(key)?,
            "underline" => self.underline = Underline::parse(key, value)?,
            "strikethrough" => self.strikethrough = value.to_bool(key)?,
            "superscript" => {
                let on = value.to_bool(key)?;
                self.superscript = on;
                if on {
                    self.subscript = false;
                }
            },
            "subscript" => {
                let on = value.to_bool(key)?;
                self.subscript = on;
                if on {
                    self.superscript = false;
                }
            },
            "color" => self.color = Some(value.to_color(key)?),
            "fgcolor" | "highlight" => self.fg_color = Some(value.to_text()),
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
    fn test_size_is_stored_doubled() {
        let font = FontStyle::from_values(&StyleValues::new().set("size", 12)).unwrap();
        assert_eq!(font.half_points(), Some(24));
        assert_eq!(font.size_pt(), Some(12.0));
    }

    #[test]
    fn test_keys_from_map() {
        let values = StyleValues::new()
            .set("name", "Tahoma")
            .set("bold", true)
            .set("_italic", "1")
            .set("underline", "dash")
            .set("color", "#1b2232")
            .set("fgColor", "yellow");
        let font = FontStyle::from_values(&values).unwrap();
        assert_eq!(font.font_name(), Some("Tahoma"));
        assert!(font.is_bold());
        assert!(font.is_italic());
        assert_eq!(font.underline_style(), Underline::Dash);
        assert_eq!(font.text_color(), Some("1B2232"));
        assert_eq!(font.highlight(), Some("yellow"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = FontStyle::from_values(&StyleValues::new().set("blink", true)).unwrap_err();
        assert!(matches!(err, StyleError::UnknownStyleKey { kind: StyleKind::Font, .. }));
    }

    #[test]
    fn test_super_and_subscript_exclusive() {
        let font = FontStyle::new().superscript(true).subscript(true);
        assert!(font.is_subscript());
        assert!(!font.is_superscript());
    }

    #[test]
    fn test_invalid_size() {
        assert!(FontStyle::from_values(&StyleValues::new().set("size", 0)).is_err());
        assert!(FontStyle::from_values(&StyleValues::new().set("size", "large")).is_err());
    }
}
