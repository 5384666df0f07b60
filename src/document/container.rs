//! Element containers and the builder methods they share.
use super::context::BuildContext;
use super::element::{
    Element, ElementKind, Link, ListItem, ListType, PreserveText, TableOfContents, Text, TextBreak, Title,
};
use super::image::{Image, Object};
use super::run::{Footnote, TextRun};
use super::table::Table;
use crate::common::{Error, Result};
use crate::media::{MediaScope, MediaSource};
use crate::style::{FontStyle, ImageStyle, ParagraphStyle, StyleSpec, TableStyle};
use log::debug;

/// What a container is, which decides the elements it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Section,
    Header,
    Footer,
    Cell,
    TextRun,
    Footnote,
}

impl ContainerKind {
    pub fn name(&self) -> &'static str {
        match self {
            ContainerKind::Section => "section",
            ContainerKind::Header => "header",
            ContainerKind::Footer => "footer",
            ContainerKind::Cell => "table cell",
            ContainerKind::TextRun => "text run",
            ContainerKind::Footnote => "footnote",
        }
    }

    /// Whether `element` may be placed here.
    pub fn allows(&self, element: ElementKind) -> bool {
        use ElementKind as E;
        match self {
            ContainerKind::Section => !matches!(element, E::PreserveText),
            ContainerKind::Header | ContainerKind::Footer => matches!(
                element,
                E::Text | E::TextRun | E::Link | E::Image | E::TextBreak | E::Table | E::ListItem | E::PreserveText
            ),
            ContainerKind::Cell => matches!(
                element,
                E::Text
                    | E::TextRun
                    | E::Link
                    | E::Image
                    | E::Object
                    | E::TextBreak
                    | E::ListItem
                    | E::Footnote
                    | E::PreserveText
            ),
            ContainerKind::TextRun => {
                matches!(element, E::Text | E::Link | E::Image | E::Object | E::TextBreak | E::Footnote)
            },
            ContainerKind::Footnote => {
                matches!(element, E::Text | E::Link | E::Image | E::Object | E::TextBreak)
            },
        }
    }
}

/// Ordered elements plus the context needed to register their resources.
///
/// `root` is the story the container is nested in. Elements placed inside a
/// header or footer, however deep, must also be accepted by that header or
/// footer.
#[derive(Debug, Clone)]
pub struct Container {
    kind: ContainerKind,
    root: ContainerKind,
    scope: MediaScope,
    elements: Vec<Element>,
    ctx: BuildContext,
}

macro_rules! pushed {
    ($elements:expr, $variant:ident) => {
        match $elements.last_mut() {
            Some(Element::$variant(inner)) => inner,
            _ => unreachable!(concat!("last element is a ", stringify!($variant))),
        }
    };
}

impl Container {
    pub(crate) fn new(kind: ContainerKind, scope: MediaScope, ctx: BuildContext) -> Self {
        Self::nested(kind, kind, scope, ctx)
    }

    pub(crate) fn nested(kind: ContainerKind, root: ContainerKind, scope: MediaScope, ctx: BuildContext) -> Self {
        Self {
            kind,
            root,
            scope,
            elements: Vec::new(),
            ctx,
        }
    }

    #[inline]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Outermost container this one is nested in, or its own kind.
    #[inline]
    pub fn root(&self) -> ContainerKind {
        self.root
    }

    /// Relationship table media of this container is registered in.
    #[inline]
    pub fn scope(&self) -> MediaScope {
        self.scope
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[inline]
    pub(crate) fn context(&self) -> &BuildContext {
        &self.ctx
    }

    fn check(&self, element: ElementKind) -> Result<()> {
        let refused_by = if !self.kind.allows(element) {
            Some(self.kind)
        } else if matches!(self.root, ContainerKind::Header | ContainerKind::Footer) && !self.root.allows(element) {
            Some(self.root)
        } else {
            None
        };
        match refused_by {
            None => Ok(()),
            Some(kind) => Err(Error::ElementNotAllowed {
                element: element.name(),
                container: kind.name(),
            }),
        }
    }

    fn push_text(
        &mut self,
        text: String,
        font: StyleSpec<FontStyle>,
        paragraph: StyleSpec<ParagraphStyle>,
    ) -> Result<&mut Text> {
        self.check(ElementKind::Text)?;
        self.elements.push(Element::Text(Text {
            text,
            font: font.into_ref()?,
            paragraph: paragraph.into_ref()?,
        }));
        Ok(pushed!(self.elements, Text))
    }

    fn push_text_run(&mut self, paragraph: StyleSpec<ParagraphStyle>) -> Result<&mut TextRun> {
        self.check(ElementKind::TextRun)?;
        let run = TextRun::new(self.scope, self.root, self.ctx.clone(), paragraph.into_ref()?);
        self.elements.push(Element::TextRun(run));
        Ok(pushed!(self.elements, TextRun))
    }

    fn push_link(
        &mut self,
        target: String,
        text: String,
        font: StyleSpec<FontStyle>,
        paragraph: StyleSpec<ParagraphStyle>,
    ) -> Result<&mut Link> {
        self.check(ElementKind::Link)?;
        let font = font.into_ref()?;
        let paragraph = paragraph.into_ref()?;
        let relationship_id = if target.starts_with('#') {
            None
        } else {
            Some(self.ctx.media().register_hyperlink(self.scope, &target)?)
        };
        let text = if text.is_empty() { target.clone() } else { text };
        self.elements.push(Element::Link(Link {
            target,
            text,
            font,
            paragraph,
            relationship_id,
        }));
        Ok(pushed!(self.elements, Link))
    }

    fn push_image(&mut self, source: MediaSource, style: StyleSpec<ImageStyle>) -> Result<&mut Image> {
        self.check(ElementKind::Image)?;
        let style = self.ctx.owned_style(style.into_ref()?, "image")?;
        let image = Image::build(&self.ctx, self.scope, source, style)?;
        self.elements.push(Element::Image(image));
        Ok(pushed!(self.elements, Image))
    }

    fn push_object(&mut self, source: MediaSource, style: StyleSpec<ImageStyle>) -> Result<&mut Object> {
        self.check(ElementKind::Object)?;
        let style = self.ctx.owned_style(style.into_ref()?, "object")?;
        let object = Object::build(&self.ctx, self.scope, source, style)?;
        self.elements.push(Element::Object(object));
        Ok(pushed!(self.elements, Object))
    }

    fn push_text_break(
        &mut self,
        count: u32,
        font: StyleSpec<FontStyle>,
        paragraph: StyleSpec<ParagraphStyle>,
    ) -> Result<()> {
        self.check(ElementKind::TextBreak)?;
        self.elements.push(Element::TextBreak(TextBreak {
            count: count.max(1),
            font: font.into_ref()?,
            paragraph: paragraph.into_ref()?,
        }));
        Ok(())
    }

    fn push_page_break(&mut self) -> Result<()> {
        self.check(ElementKind::PageBreak)?;
        self.elements.push(Element::PageBreak);
        Ok(())
    }

    fn push_title(&mut self, text: String, depth: u32) -> Result<&mut Title> {
        self.check(ElementKind::Title)?;
        let depth = depth.clamp(1, 9);
        let bookmark_id = self.ctx.titles().add(&text, depth);
        debug!("title '{}' at depth {} gets bookmark {}", text, depth, bookmark_id);
        self.elements.push(Element::Title(Title {
            text,
            depth,
            bookmark_id,
        }));
        Ok(pushed!(self.elements, Title))
    }

    fn push_table(&mut self, style: StyleSpec<TableStyle>) -> Result<&mut Table> {
        self.check(ElementKind::Table)?;
        let table = Table::new(self.scope, self.root, self.ctx.clone(), style.into_ref()?);
        self.elements.push(Element::Table(table));
        Ok(pushed!(self.elements, Table))
    }

    fn push_list_item(
        &mut self,
        text: String,
        depth: u32,
        list_type: ListType,
        font: StyleSpec<FontStyle>,
        paragraph: StyleSpec<ParagraphStyle>,
    ) -> Result<&mut ListItem> {
        self.check(ElementKind::ListItem)?;
        self.elements.push(Element::ListItem(ListItem {
            text,
            depth: depth.min(8),
            list_type,
            font: font.into_ref()?,
            paragraph: paragraph.into_ref()?,
        }));
        Ok(pushed!(self.elements, ListItem))
    }

    fn push_footnote(&mut self, paragraph: StyleSpec<ParagraphStyle>) -> Result<&mut Footnote> {
        self.check(ElementKind::Footnote)?;
        let paragraph = paragraph.into_ref()?;
        let id = self.ctx.next_footnote_id();
        let footnote = Footnote::new(id, self.ctx.clone(), paragraph);
        self.elements.push(Element::Footnote(footnote));
        Ok(pushed!(self.elements, Footnote))
    }

    fn push_toc(&mut self, font: StyleSpec<FontStyle>) -> Result<&mut TableOfContents> {
        self.check(ElementKind::TableOfContents)?;
        self.elements
            .push(Element::TableOfContents(TableOfContents::new(font.into_ref()?)));
        Ok(pushed!(self.elements, TableOfContents))
    }

    fn push_preserve_text(
        &mut self,
        text: String,
        font: StyleSpec<FontStyle>,
        paragraph: StyleSpec<ParagraphStyle>,
    ) -> Result<&mut PreserveText> {
        self.check(ElementKind::PreserveText)?;
        self.elements.push(Element::PreserveText(PreserveText {
            text,
            font: font.into_ref()?,
            paragraph: paragraph.into_ref()?,
        }));
        Ok(pushed!(self.elements, PreserveText))
    }
}

/// Builder methods shared by sections, headers, footers, cells, text runs
/// and footnotes. Placing an element kind a container does not accept fails
/// with [`Error::ElementNotAllowed`] and leaves the container unchanged.
///
/// Style arguments accept a registered name (`"Strong"`), a typed style
/// (`FontStyle::new().bold(true)`), a flat [`StyleValues`](crate::style::StyleValues)
/// map or `None`.
pub trait ElementContainer {
    fn container(&self) -> &Container;

    fn container_mut(&mut self) -> &mut Container;

    fn elements(&self) -> &[Element] {
        self.container().elements()
    }

    fn add_text(
        &mut self,
        text: impl Into<String>,
        font: impl Into<StyleSpec<FontStyle>>,
        paragraph: impl Into<StyleSpec<ParagraphStyle>>,
    ) -> Result<&mut Text> {
        self.container_mut()
            .push_text(text.into(), font.into(), paragraph.into())
    }

    fn add_text_run(&mut self, paragraph: impl Into<StyleSpec<ParagraphStyle>>) -> Result<&mut TextRun> {
        self.container_mut().push_text_run(paragraph.into())
    }

    /// Add a hyperlink. An empty `text` displays the target.
    fn add_link(
        &mut self,
        target: impl Into<String>,
        text: impl Into<String>,
        font: impl Into<StyleSpec<FontStyle>>,
        paragraph: impl Into<StyleSpec<ParagraphStyle>>,
    ) -> Result<&mut Link> {
        self.container_mut()
            .push_link(target.into(), text.into(), font.into(), paragraph.into())
    }

    fn add_image(
        &mut self,
        source: impl Into<MediaSource>,
        style: impl Into<StyleSpec<ImageStyle>>,
    ) -> Result<&mut Image> {
        self.container_mut().push_image(source.into(), style.into())
    }

    fn add_object(
        &mut self,
        source: impl Into<MediaSource>,
        style: impl Into<StyleSpec<ImageStyle>>,
    ) -> Result<&mut Object> {
        self.container_mut().push_object(source.into(), style.into())
    }

    fn add_text_break(
        &mut self,
        count: u32,
        font: impl Into<StyleSpec<FontStyle>>,
        paragraph: impl Into<StyleSpec<ParagraphStyle>>,
    ) -> Result<()> {
        self.container_mut()
            .push_text_break(count, font.into(), paragraph.into())
    }

    fn add_page_break(&mut self) -> Result<()> {
        self.container_mut().push_page_break()
    }

    /// Add a heading. `depth` is clamped to 1..=9.
    fn add_title(&mut self, text: impl Into<String>, depth: u32) -> Result<&mut Title> {
        self.container_mut().push_title(text.into(), depth)
    }

    fn add_table(&mut self, style: impl Into<StyleSpec<TableStyle>>) -> Result<&mut Table> {
        self.container_mut().push_table(style.into())
    }

    /// Add a list paragraph. `depth` is 0-based and clamped to 0..=8.
    fn add_list_item(
        &mut self,
        text: impl Into<String>,
        depth: u32,
        list_type: ListType,
        font: impl Into<StyleSpec<FontStyle>>,
        paragraph: impl Into<StyleSpec<ParagraphStyle>>,
    ) -> Result<&mut ListItem> {
        self.container_mut()
            .push_list_item(text.into(), depth, list_type, font.into(), paragraph.into())
    }

    fn add_footnote(&mut self, paragraph: impl Into<StyleSpec<ParagraphStyle>>) -> Result<&mut Footnote> {
        self.container_mut().push_footnote(paragraph.into())
    }

    fn add_toc(&mut self, font: impl Into<StyleSpec<FontStyle>>) -> Result<&mut TableOfContents> {
        self.container_mut().push_toc(font.into())
    }

    /// Add text with `{PAGE}` / `{NUMPAGES}` field placeholders.
    fn add_preserve_text(
        &mut self,
        text: impl Into<String>,
        font: impl Into<StyleSpec<FontStyle>>,
        paragraph: impl Into<StyleSpec<ParagraphStyle>>,
    ) -> Result<&mut PreserveText> {
        self.container_mut()
            .push_preserve_text(text.into(), font.into(), paragraph.into())
    }
}
