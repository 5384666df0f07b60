//! Style definitions and the per-document style registry.
//!
//! Styles come in three flavours when attached to an element:
//!
//! - **named**: registered once in the [`StyleRegistry`] and referenced by name
//! - **inline**: owned by a single element, parsed from a flat key/value map
//!   or built directly with the typed builders
//! - **default**: nothing set, the document defaults apply
//!
//! Flat maps go through a closed dispatch on [`StyleDefinition::set_value`],
//! one `match` per style type, so unknown keys fail with
//! [`StyleError::UnknownStyleKey`] at the call that set them.
//!
//! # Examples
//!
//! ```rust
//! use quillpack::style::{FontStyle, Registration, StyleRegistry};
//!
//! let mut registry = StyleRegistry::new();
//! let font = FontStyle::new().bold(true).size(16.0);
//! assert_eq!(registry.register_font("Emphasis", font, None), Registration::Added);
//! assert_eq!(
//!     registry.register_font("Emphasis", FontStyle::new(), None),
//!     Registration::AlreadyExists
//! );
//! ```

mod error;
mod font;
mod image;
mod paragraph;
mod registry;
mod section;
mod table;
mod values;

pub use error::{Result, StyleError};
pub use font::{FontStyle, Underline};
pub use image::{ImageStyle, Wrapping};
pub use paragraph::{Alignment, ParagraphStyle};
pub use registry::{NamedStyle, Registration, Resolved, StyleRegistry, style_id, title_key};
pub use section::{BreakType, Orientation, SectionStyle};
pub use table::{BorderSide, Borders, CellStyle, RowStyle, TableStyle, TextDirection, VMerge, VerticalAlign};
pub use values::{StyleValue, StyleValues};

pub(crate) use values::normalize_key;

use std::fmt;

/// The kind of a style, used in error reports and for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Font,
    Paragraph,
    Table,
    Cell,
    Row,
    Image,
    Section,
}

impl StyleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::Font => "font",
            StyleKind::Paragraph => "paragraph",
            StyleKind::Table => "table",
            StyleKind::Cell => "cell",
            StyleKind::Row => "row",
            StyleKind::Image => "image",
            StyleKind::Section => "section",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A style type that can be populated from a flat key/value map.
pub trait StyleDefinition: Sized + Default {
    /// Kind reported in errors.
    const KIND: StyleKind;

    /// Apply one key/value pair.
    fn set_value(&mut self, key: &str, value: &StyleValue) -> Result<()>;

    /// Build a style from a whole map, applying keys in order.
    fn from_values(values: &StyleValues) -> Result<Self> {
        let mut style = Self::default();
        for (key, value) in values.iter() {
            style.set_value(key, value)?;
        }
        Ok(style)
    }
}

/// A style reference held by an element after construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StyleRef<T> {
    /// No style; document defaults apply
    #[default]
    Default,
    /// Reference to a registered style
    Named(String),
    /// Style owned by the element
    Inline(T),
}

impl<T> StyleRef<T> {
    #[inline]
    pub fn is_default(&self) -> bool {
        matches!(self, StyleRef::Default)
    }

    /// The inline style, if any.
    pub fn inline(&self) -> Option<&T> {
        match self {
            StyleRef::Inline(style) => Some(style),
            _ => None,
        }
    }

    /// The referenced name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            StyleRef::Named(name) => Some(name),
            _ => None,
        }
    }
}

/// A style as supplied to a builder call.
///
/// Converted into a [`StyleRef`] when the element is constructed. Inline maps
/// are parsed at that moment, so invalid values are reported right away.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StyleSpec<T> {
    #[default]
    None,
    Name(String),
    Inline(StyleValues),
    Resolved(T),
}

impl<T: StyleDefinition> StyleSpec<T> {
    /// Parse into the reference stored on an element.
    pub fn into_ref(self) -> Result<StyleRef<T>> {
        Ok(match self {
            StyleSpec::None => StyleRef::Default,
            StyleSpec::Name(name) if name.trim().is_empty() => StyleRef::Default,
            StyleSpec::Name(name) => StyleRef::Named(name),
            StyleSpec::Inline(values) if values.is_empty() => StyleRef::Default,
            StyleSpec::Inline(values) => StyleRef::Inline(T::from_values(&values)?),
            StyleSpec::Resolved(style) => StyleRef::Inline(style),
        })
    }
}

impl<T> From<&str> for StyleSpec<T> {
    fn from(name: &str) -> Self {
        StyleSpec::Name(name.to_string())
    }
}

impl<T> From<String> for StyleSpec<T> {
    fn from(name: String) -> Self {
        StyleSpec::Name(name)
    }
}

impl<T> From<&String> for StyleSpec<T> {
    fn from(name: &String) -> Self {
        StyleSpec::Name(name.clone())
    }
}

impl<T> From<StyleValues> for StyleSpec<T> {
    fn from(values: StyleValues) -> Self {
        StyleSpec::Inline(values)
    }
}

impl<T> From<Option<T>> for StyleSpec<T> {
    fn from(style: Option<T>) -> Self {
        match style {
            Some(style) => StyleSpec::Resolved(style),
            None => StyleSpec::None,
        }
    }
}

macro_rules! impl_resolved_spec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StyleSpec<$ty> {
                fn from(style: $ty) -> Self {
                    StyleSpec::Resolved(style)
                }
            }
        )*
    };
}

impl_resolved_spec!(FontStyle, ParagraphStyle, TableStyle, CellStyle, RowStyle, ImageStyle, SectionStyle);
