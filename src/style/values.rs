//! Flat key/value style maps.
//!
//! Inline styles arrive as ordered `key → value` pairs. Each style type
//! consumes them through a closed `match` over normalized keys, so a typo in a
//! key is reported instead of silently ignored.
use super::error::{Result, StyleError};
use std::fmt;

/// A single style value as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl StyleValue {
    /// Interpret the value as a number.
    pub fn to_f64(&self, key: &str) -> Result<f64> {
        match self {
            StyleValue::Num(n) if n.is_finite() => Ok(*n),
            StyleValue::Num(n) => Err(StyleError::invalid(key, n, "number is not finite")),
            StyleValue::Str(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| StyleError::invalid(key, s, "expected a number")),
            StyleValue::Bool(b) => Err(StyleError::invalid(key, b, "expected a number")),
        }
    }

    /// Interpret the value as a non-negative whole number.
    pub fn to_u32(&self, key: &str) -> Result<u32> {
        let n = self.to_f64(key)?;
        if n < 0.0 || n > u32::MAX as f64 {
            return Err(StyleError::invalid(key, n, "expected a non-negative number"));
        }
        Ok(n.round() as u32)
    }

    /// Interpret the value as a signed whole number.
    pub fn to_i32(&self, key: &str) -> Result<i32> {
        let n = self.to_f64(key)?;
        if n < i32::MIN as f64 || n > i32::MAX as f64 {
            return Err(StyleError::invalid(key, n, "number out of range"));
        }
        Ok(n.round() as i32)
    }

    /// Interpret the value as a flag.
    pub fn to_bool(&self, key: &str) -> Result<bool> {
        match self {
            StyleValue::Bool(b) => Ok(*b),
            StyleValue::Num(n) => Ok(*n != 0.0),
            StyleValue::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" | "" => Ok(false),
                _ => Err(StyleError::invalid(key, s, "expected a boolean")),
            },
        }
    }

    /// Interpret the value as text.
    pub fn to_text(&self) -> String {
        match self {
            StyleValue::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Interpret the value as an RGB hex color, without a leading `#`.
    pub fn to_color(&self, key: &str) -> Result<String> {
        let text = self.to_text();
        let color = text.trim().trim_start_matches('#');
        if color.eq_ignore_ascii_case("auto") {
            return Ok("auto".to_string());
        }
        if color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(color.to_ascii_uppercase())
        } else {
            Err(StyleError::invalid(key, text, "expected a 6-digit hex color"))
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Str(s) => f.write_str(s),
            StyleValue::Num(n) => write!(f, "{}", n),
            StyleValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Str(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Str(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Num(value)
    }
}

impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        StyleValue::Num(value as f64)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Num(value as f64)
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        StyleValue::Num(value as f64)
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

/// Ordered collection of inline style values.
///
/// # Examples
///
/// ```rust
/// use quillpack::style::StyleValues;
///
/// let values = StyleValues::new()
///     .set("bold", true)
///     .set("size", 12)
///     .set("color", "FF0000");
/// assert_eq!(values.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleValues {
    entries: Vec<(String, StyleValue)>,
}

impl StyleValues {
    /// Create an empty value map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, builder style.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a value. Later values for the same key override earlier ones when applied.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Iterate over the values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Normalize a style key: a leading underscore is dropped, `-` and `_` are
/// removed and the rest is lower-cased, so `space_before`, `spaceBefore` and
/// `_spaceBefore` all select the same property.
pub(crate) fn normalize_key(key: &str) -> String {
    key.trim()
        .trim_start_matches('_')
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
