//! Document model.
//!
//! A [`Document`] owns ordered [`Section`]s; a section owns its elements,
//! at most one header and at most one footer. Everything a builder call
//! needs (style registry, media registry, title bookmarks, footnote and
//! header/footer numbering) lives in the document's [`BuildContext`], shared
//! with every container through a cheap handle. Media are registered the
//! moment an element is added, so the ids stored on the element are final.
//!
//! # Architecture
//!
//! - `Document`: sections, properties, settings and named styles
//! - `Section`, `HeaderFooter`, `Cell`, `TextRun`, `Footnote`: containers,
//!   all built through the [`ElementContainer`] trait
//! - `Element`: closed enum of everything that can be placed
//!
//! # Example
//!
//! ```rust
//! use quillpack::document::{Document, ElementContainer};
//! use quillpack::style::FontStyle;
//!
//! let mut doc = Document::new();
//! doc.add_font_style("Strong", FontStyle::new().bold(true), None)?;
//! let section = doc.add_section(None)?;
//! section.add_title("Introduction", 1)?;
//! section.add_text("Hello", "Strong", None)?;
//! section.add_header().add_preserve_text("Page {PAGE} of {NUMPAGES}", None, None)?;
//! assert_eq!(doc.sections().len(), 1);
//! # Ok::<(), quillpack::Error>(())
//! ```
mod container;
mod context;
mod element;
mod image;
mod run;
mod section;
mod table;

pub use container::{Container, ContainerKind, ElementContainer};
pub use context::{BuildContext, TOC_ANCHOR_BASE, TitleEntry, TitleRegistry};
pub use element::{
    Element, ElementKind, Link, ListItem, ListType, PreserveText, TableOfContents, Text, TextBreak, TextSegment,
    Title,
};
pub use image::{Image, Object, OleApplication};
pub use run::{Footnote, TextRun};
pub use section::{Footer, Header, HeaderFooter, HeaderFooterKind, HeaderFooterType, Section};
pub use table::{Cell, Row, Table};

use crate::common::{Metadata, Result, Settings};
use crate::media::{ContentProvider, ImageInspector, MediaEntry, MediaRegistry};
use crate::style::{
    FontStyle, ParagraphStyle, Registration, SectionStyle, StyleDefinition, StyleError, StyleRegistry, StyleSpec,
    TableStyle,
};
use log::info;
use parking_lot::{MutexGuard, RwLockReadGuard};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Turn a style argument into a style definition. Names are rejected: a
/// named style is defined from a typed style or a value map, never from
/// another name.
fn definition<T: StyleDefinition>(spec: StyleSpec<T>) -> Result<T> {
    Ok(match spec {
        StyleSpec::None => T::default(),
        StyleSpec::Inline(values) => T::from_values(&values)?,
        StyleSpec::Resolved(style) => style,
        StyleSpec::Name(name) => {
            return Err(StyleError::invalid("style", name, "a style definition is required").into());
        },
    })
}

fn optional_definition<T: StyleDefinition>(spec: StyleSpec<T>) -> Result<Option<T>> {
    match spec {
        StyleSpec::None => Ok(None),
        other => definition(other).map(Some),
    }
}

/// A word-processing document under construction.
#[derive(Debug)]
pub struct Document {
    ctx: BuildContext,
    sections: Vec<Section>,
    properties: Metadata,
    settings: Settings,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document reading media from the filesystem.
    pub fn new() -> Self {
        Self::with_context(BuildContext::default(), Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::with_context(BuildContext::default(), settings)
    }

    /// Create a document with custom media collaborators.
    pub fn with_collaborators(
        settings: Settings,
        provider: Arc<dyn ContentProvider>,
        inspector: Arc<dyn ImageInspector>,
    ) -> Self {
        Self::with_context(BuildContext::new(provider, inspector), settings)
    }

    fn with_context(ctx: BuildContext, settings: Settings) -> Self {
        ctx.set_strict_style_names(settings.strict_style_names);
        Self {
            ctx,
            sections: Vec::new(),
            properties: Metadata::default(),
            settings,
        }
    }

    /// Append a section.
    pub fn add_section(&mut self, style: impl Into<StyleSpec<SectionStyle>>) -> Result<&mut Section> {
        let style = definition(style.into())?;
        self.sync_settings();
        self.sections.push(Section::new(self.ctx.clone(), style));
        let index = self.sections.len() - 1;
        Ok(&mut self.sections[index])
    }

    #[inline]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[inline]
    pub fn sections_mut(&mut self) -> &mut [Section] {
        self.sync_settings();
        &mut self.sections
    }

    /// Elements only see the settings through the shared context.
    fn sync_settings(&self) {
        self.ctx.set_strict_style_names(self.settings.strict_style_names);
    }

    /// Document properties written to `docProps/core.xml` / `meta.xml`.
    #[inline]
    pub fn properties(&self) -> &Metadata {
        &self.properties
    }

    #[inline]
    pub fn properties_mut(&mut self) -> &mut Metadata {
        &mut self.properties
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    #[inline]
    pub fn context(&self) -> &BuildContext {
        &self.ctx
    }

    /// Register a character style, optionally with paragraph properties.
    pub fn add_font_style(
        &mut self,
        name: impl Into<String>,
        font: impl Into<StyleSpec<FontStyle>>,
        paragraph: impl Into<StyleSpec<ParagraphStyle>>,
    ) -> Result<Registration> {
        let font = definition(font.into())?;
        let paragraph = optional_definition(paragraph.into())?;
        Ok(self.ctx.styles_mut().register_font(name, font, paragraph))
    }

    pub fn add_paragraph_style(
        &mut self,
        name: impl Into<String>,
        paragraph: impl Into<StyleSpec<ParagraphStyle>>,
    ) -> Result<Registration> {
        let paragraph = definition(paragraph.into())?;
        Ok(self.ctx.styles_mut().register_paragraph(name, paragraph))
    }

    /// Register a table style with an optional first-row variant.
    pub fn add_table_style(
        &mut self,
        name: impl Into<String>,
        table: impl Into<StyleSpec<TableStyle>>,
        first_row: impl Into<StyleSpec<TableStyle>>,
    ) -> Result<Registration> {
        let table = definition(table.into())?;
        let first_row = optional_definition(first_row.into())?;
        Ok(self.ctx.styles_mut().register_table(name, table, first_row))
    }

    /// Register the heading style of `depth`.
    pub fn add_title_style(
        &mut self,
        depth: u32,
        font: impl Into<StyleSpec<FontStyle>>,
        paragraph: impl Into<StyleSpec<ParagraphStyle>>,
    ) -> Result<Registration> {
        let font = definition(font.into())?;
        let paragraph = optional_definition(paragraph.into())?;
        Ok(self.ctx.styles_mut().register_title(depth, font, paragraph))
    }

    pub fn add_link_style(
        &mut self,
        name: impl Into<String>,
        font: impl Into<StyleSpec<FontStyle>>,
    ) -> Result<Registration> {
        let font = definition(font.into())?;
        Ok(self.ctx.styles_mut().register_link(name, font))
    }

    pub fn styles(&self) -> RwLockReadGuard<'_, StyleRegistry> {
        self.ctx.styles()
    }

    pub fn media(&self) -> MutexGuard<'_, MediaRegistry> {
        self.ctx.media()
    }

    /// Titles in document order.
    pub fn titles(&self) -> Vec<TitleEntry> {
        self.ctx.titles().titles().to_vec()
    }

    pub fn section_media_elements(&self) -> Vec<MediaEntry> {
        self.ctx.media().section_media_elements().to_vec()
    }

    pub fn header_media_elements(&self, header: u32) -> Vec<MediaEntry> {
        self.ctx.media().header_media_elements(header).to_vec()
    }

    pub fn footer_media_elements(&self, footer: u32) -> Vec<MediaEntry> {
        self.ctx.media().footer_media_elements(footer).to_vec()
    }

    /// Save to `path` in the named format (`Word2007`, `ODText`, or their
    /// extensions).
    pub fn save(&self, path: impl AsRef<Path>, format: &str) -> Result<()> {
        let path = path.as_ref();
        let writer = crate::writer::create_writer(Some(self), format)?;
        writer.save(path)?;
        info!("saved {} document to {}", writer.format(), path.display());
        Ok(())
    }

    /// Write the package to a stream in the named format.
    pub fn save_to_writer(&self, out: &mut dyn Write, format: &str) -> Result<()> {
        let writer = crate::writer::create_writer(Some(self), format)?;
        writer.save_to_writer(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use crate::style::StyleValues;

    #[test]
    fn test_style_registration_first_wins() {
        let mut doc = Document::new();
        assert_eq!(
            doc.add_paragraph_style("Body", StyleValues::new().set("line-height", 2.0)).unwrap(),
            Registration::Added
        );
        assert_eq!(
            doc.add_paragraph_style("Body", StyleValues::new().set("line-height", 1.0)).unwrap(),
            Registration::AlreadyExists
        );
        let styles = doc.styles();
        assert_eq!(styles.get("Body").unwrap().paragraph().unwrap().spacing(), Some(480));
    }

    #[test]
    fn test_style_definition_rejects_names() {
        let mut doc = Document::new();
        assert!(matches!(doc.add_font_style("Alias", "Strong", None), Err(Error::Style(_))));
        assert!(doc.styles().is_empty());
    }

    #[test]
    fn test_title_style_key() {
        let mut doc = Document::new();
        doc.add_title_style(2, FontStyle::new().size(14.0), None).unwrap();
        assert!(doc.styles().get("Heading_2").is_some());
    }

    #[test]
    fn test_sections_share_registries() {
        let mut doc = Document::new();
        doc.add_section(None).unwrap().add_link("https://a.example", "", None, None).unwrap();
        doc.add_section(StyleValues::new().set("orientation", "landscape"))
            .unwrap()
            .add_link("https://a.example", "", None, None)
            .unwrap();
        assert_eq!(doc.section_media_elements().len(), 1);
        assert!(doc.sections()[1].style.is_landscape());
    }

    #[test]
    fn test_documents_do_not_share_state() {
        let mut a = Document::new();
        let mut b = Document::new();
        a.add_section(None).unwrap().add_title("A", 1).unwrap();
        let title = b.add_section(None).unwrap().add_title("B", 1).unwrap();
        assert_eq!(title.bookmark_id(), 0);
    }

    #[test]
    fn test_unknown_format() {
        let doc = Document::new();
        let dir = tempfile::tempdir().unwrap();
        let err = doc.save(dir.path().join("out.pdf"), "PDF").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
