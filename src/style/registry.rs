//! The per-document registry of named styles.
//!
//! A name is registered once; later registrations under the same name are
//! ignored and reported as [`Registration::AlreadyExists`]. Iteration follows
//! registration order, which is also the order of the generated style sheet.
use super::error::{Result, StyleError};
use super::font::FontStyle;
use super::paragraph::ParagraphStyle;
use super::table::TableStyle;
use super::StyleRef;
use log::{debug, warn};
use std::collections::HashMap;

/// A registered style.
#[derive(Debug, Clone, PartialEq)]
pub enum NamedStyle {
    /// Character style, optionally carrying paragraph properties
    Font {
        font: FontStyle,
        paragraph: Option<ParagraphStyle>,
    },
    Paragraph(ParagraphStyle),
    /// Table style with an optional first-row variant
    Table {
        table: TableStyle,
        first_row: Option<TableStyle>,
    },
    /// Heading style for one outline level
    Title {
        depth: u32,
        font: FontStyle,
        paragraph: Option<ParagraphStyle>,
    },
    /// Character style applied to hyperlinks
    Link(FontStyle),
}

impl NamedStyle {
    /// Font part, if the style has one.
    pub fn font(&self) -> Option<&FontStyle> {
        match self {
            NamedStyle::Font { font, .. } | NamedStyle::Title { font, .. } | NamedStyle::Link(font) => {
                Some(font)
            },
            _ => None,
        }
    }

    /// Paragraph part, if the style has one.
    pub fn paragraph(&self) -> Option<&ParagraphStyle> {
        match self {
            NamedStyle::Paragraph(paragraph) => Some(paragraph),
            NamedStyle::Font { paragraph, .. } | NamedStyle::Title { paragraph, .. } => paragraph.as_ref(),
            _ => None,
        }
    }

    /// Whether the style sheet declares this style with `w:type="paragraph"`.
    pub fn is_paragraph_type(&self) -> bool {
        match self {
            NamedStyle::Paragraph(_) | NamedStyle::Title { .. } => true,
            NamedStyle::Font { paragraph, .. } => paragraph.is_some(),
            _ => false,
        }
    }
}

/// Outcome of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// A style with this name existed; the registry is unchanged
    AlreadyExists,
}

/// Result of resolving a [`StyleRef`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a, T> {
    /// A registered style
    Named { name: &'a str, style: &'a NamedStyle },
    /// The element's own style
    Inline(&'a T),
    /// An unregistered name emitted verbatim
    PassThroughName(&'a str),
    /// No style
    Default,
}

impl<'a, T> Resolved<'a, T> {
    /// Name to reference from markup, if the style is referenced by name.
    pub fn reference_name(&self) -> Option<&'a str> {
        match self {
            Resolved::Named { name, .. } | Resolved::PassThroughName(name) => Some(*name),
            _ => None,
        }
    }
}

/// Key a heading style is registered under.
pub fn title_key(depth: u32) -> String {
    format!("Heading_{}", depth)
}

/// Identifier used for a style name inside the packages: underscores and
/// whitespace are removed, so `Heading_1` becomes `Heading1`.
pub fn style_id(name: &str) -> String {
    name.chars().filter(|c| *c != '_' && !c.is_whitespace()).collect()
}

/// Named styles of one document.
#[derive(Debug, Default, Clone)]
pub struct StyleRegistry {
    entries: Vec<(String, NamedStyle)>,
    index: HashMap<String, usize>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, name: String, style: NamedStyle) -> Registration {
        if self.index.contains_key(&name) {
            debug!("style '{}' already registered, keeping the first definition", name);
            return Registration::AlreadyExists;
        }
        debug!("registering style '{}'", name);
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, style));
        Registration::Added
    }

    pub fn register_font(
        &mut self,
        name: impl Into<String>,
        font: FontStyle,
        paragraph: Option<ParagraphStyle>,
    ) -> Registration {
        self.insert(name.into(), NamedStyle::Font { font, paragraph })
    }

    pub fn register_paragraph(&mut self, name: impl Into<String>, paragraph: ParagraphStyle) -> Registration {
        self.insert(name.into(), NamedStyle::Paragraph(paragraph))
    }

    pub fn register_table(
        &mut self,
        name: impl Into<String>,
        table: TableStyle,
        first_row: Option<TableStyle>,
    ) -> Registration {
        self.insert(name.into(), NamedStyle::Table { table, first_row })
    }

    /// Register the heading style for `depth`, stored under `Heading_<depth>`.
    pub fn register_title(
        &mut self,
        depth: u32,
        font: FontStyle,
        paragraph: Option<ParagraphStyle>,
    ) -> Registration {
        self.insert(title_key(depth), NamedStyle::Title { depth, font, paragraph })
    }

    pub fn register_link(&mut self, name: impl Into<String>, font: FontStyle) -> Registration {
        self.insert(name.into(), NamedStyle::Link(font))
    }

    pub fn get(&self, name: &str) -> Option<&NamedStyle> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Heading style for `depth`, if registered.
    pub fn title(&self, depth: u32) -> Option<&NamedStyle> {
        self.get(&title_key(depth))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Named styles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamedStyle)> {
        self.entries.iter().map(|(name, style)| (name.as_str(), style))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a style reference.
    ///
    /// Unregistered names fail with [`StyleError::UnknownStyleName`] when
    /// `strict` is set; otherwise they pass through and the consuming
    /// application falls back to its defaults.
    pub fn resolve<'a, T>(&'a self, style: &'a StyleRef<T>, strict: bool) -> Result<Resolved<'a, T>> {
        match style {
            StyleRef::Default => Ok(Resolved::Default),
            StyleRef::Inline(inline) => Ok(Resolved::Inline(inline)),
            StyleRef::Named(name) => match self.index.get(name.as_str()) {
                Some(&i) => Ok(Resolved::Named {
                    name: &self.entries[i].0,
                    style: &self.entries[i].1,
                }),
                None if strict => Err(StyleError::UnknownStyleName(name.clone())),
                None => {
                    warn!("style '{}' is not registered, passing the name through", name);
                    Ok(Resolved::PassThroughName(name))
                },
            },
        }
    }

    pub fn resolve_font<'a>(&'a self, style: &'a StyleRef<FontStyle>, strict: bool) -> Result<Resolved<'a, FontStyle>> {
        self.resolve(style, strict)
    }

    pub fn resolve_paragraph<'a>(
        &'a self,
        style: &'a StyleRef<ParagraphStyle>,
        strict: bool,
    ) -> Result<Resolved<'a, ParagraphStyle>> {
        self.resolve(style, strict)
    }

    pub fn resolve_table<'a>(
        &'a self,
        style: &'a StyleRef<TableStyle>,
        strict: bool,
    ) -> Result<Resolved<'a, TableStyle>> {
        self.resolve(style, strict)
    }
}
