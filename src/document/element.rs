//! Content elements.
use super::image::{Image, Object};
use super::run::{Footnote, TextRun};
use super::table::Table;
use crate::style::{FontStyle, ParagraphStyle, StyleRef};

/// Discriminant of [`Element`], used for placement checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Text,
    TextRun,
    Link,
    Image,
    Object,
    TextBreak,
    PageBreak,
    Title,
    Table,
    ListItem,
    Footnote,
    TableOfContents,
    PreserveText,
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::TextRun => "text run",
            ElementKind::Link => "link",
            ElementKind::Image => "image",
            ElementKind::Object => "object",
            ElementKind::TextBreak => "text break",
            ElementKind::PageBreak => "page break",
            ElementKind::Title => "title",
            ElementKind::Table => "table",
            ElementKind::ListItem => "list item",
            ElementKind::Footnote => "footnote",
            ElementKind::TableOfContents => "table of contents",
            ElementKind::PreserveText => "preserved text",
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone)]
pub enum Element {
    Text(Text),
    TextRun(TextRun),
    Link(Link),
    Image(Image),
    Object(Object),
    TextBreak(TextBreak),
    PageBreak,
    Title(Title),
    Table(Table),
    ListItem(ListItem),
    Footnote(Footnote),
    TableOfContents(TableOfContents),
    PreserveText(PreserveText),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text(_) => ElementKind::Text,
            Element::TextRun(_) => ElementKind::TextRun,
            Element::Link(_) => ElementKind::Link,
            Element::Image(_) => ElementKind::Image,
            Element::Object(_) => ElementKind::Object,
            Element::TextBreak(_) => ElementKind::TextBreak,
            Element::PageBreak => ElementKind::PageBreak,
            Element::Title(_) => ElementKind::Title,
            Element::Table(_) => ElementKind::Table,
            Element::ListItem(_) => ElementKind::ListItem,
            Element::Footnote(_) => ElementKind::Footnote,
            Element::TableOfContents(_) => ElementKind::TableOfContents,
            Element::PreserveText(_) => ElementKind::PreserveText,
        }
    }
}

/// A paragraph (or a run, inside a text run) of plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
    pub font: StyleRef<FontStyle>,
    pub paragraph: StyleRef<ParagraphStyle>,
}

/// A hyperlink. Targets starting with `#` point at a bookmark inside the
/// document and get no relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub target: String,
    pub text: String,
    pub font: StyleRef<FontStyle>,
    pub paragraph: StyleRef<ParagraphStyle>,
    pub(crate) relationship_id: Option<u32>,
}

impl Link {
    /// Relationship id of an external link.
    #[inline]
    pub fn relationship_id(&self) -> Option<u32> {
        self.relationship_id
    }

    /// Bookmark name of an internal link.
    pub fn anchor(&self) -> Option<&str> {
        self.target.strip_prefix('#')
    }
}

/// One or more empty lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBreak {
    pub count: u32,
    pub font: StyleRef<FontStyle>,
    pub paragraph: StyleRef<ParagraphStyle>,
}

/// A heading with a bookmark for the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub text: String,
    pub depth: u32,
    pub(crate) bookmark_id: u32,
}

impl Title {
    /// 0-based, document-wide bookmark id.
    #[inline]
    pub fn bookmark_id(&self) -> u32 {
        self.bookmark_id
    }

    /// Bookmark name, `_Toc<252634154 + bookmark id>`.
    pub fn anchor(&self) -> String {
        super::context::anchor_for(self.bookmark_id)
    }
}

/// Predefined numbering definitions. The discriminant is the `w:numId`
/// defined in the bundled numbering part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum ListType {
    SquareFilled = 1,
    #[default]
    BulletFilled = 3,
    BulletEmpty = 5,
    Number = 7,
    NumberNested = 8,
    AlphaNum = 9,
}

impl ListType {
    #[inline]
    pub fn num_id(&self) -> u32 {
        *self as u32
    }

    pub fn is_numbered(&self) -> bool {
        matches!(self, ListType::Number | ListType::NumberNested | ListType::AlphaNum)
    }
}

/// A list paragraph at a given nesting depth (0-based).
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub text: String,
    pub depth: u32,
    pub list_type: ListType,
    pub font: StyleRef<FontStyle>,
    pub paragraph: StyleRef<ParagraphStyle>,
}

/// Table of contents built from the document's titles.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOfContents {
    pub font: StyleRef<FontStyle>,
    /// Shallowest title depth listed
    pub min_depth: u32,
    /// Deepest title depth listed
    pub max_depth: u32,
    /// Indentation per level in twips
    pub indent: u32,
    /// Right tab position in twips
    pub tab_pos: u32,
}

impl TableOfContents {
    pub(crate) fn new(font: StyleRef<FontStyle>) -> Self {
        Self {
            font,
            min_depth: 1,
            max_depth: 9,
            indent: 200,
            tab_pos: 9062,
        }
    }

    /// Restrict the listed title depths.
    pub fn set_depth_range(&mut self, min: u32, max: u32) -> &mut Self {
        self.min_depth = min.max(1);
        self.max_depth = max.max(self.min_depth);
        self
    }

    #[inline]
    pub fn includes(&self, depth: u32) -> bool {
        (self.min_depth..=self.max_depth).contains(&depth)
    }
}

/// A piece of text in a preserved field template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSegment {
    Literal(String),
    /// A field such as `PAGE` or `NUMPAGES`
    Field(String),
}

/// Text with `{FIELD}` placeholders, e.g. `"Page {PAGE} of {NUMPAGES}"`.
#[derive(Debug, Clone, PartialEq)]
pub struct PreserveText {
    pub text: String,
    pub font: StyleRef<FontStyle>,
    pub paragraph: StyleRef<ParagraphStyle>,
}

impl PreserveText {
    /// Split the text into literals and fields. An unclosed brace is literal.
    pub fn segments(&self) -> Vec<TextSegment> {
        let mut segments = Vec::new();
        let mut rest = self.text.as_str();
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            if open > 0 {
                segments.push(TextSegment::Literal(rest[..open].to_string()));
            }
            let field = rest[open + 1..open + close].trim();
            if field.is_empty() {
                segments.push(TextSegment::Literal("{}".to_string()));
            } else {
                segments.push(TextSegment::Field(field.to_ascii_uppercase()));
            }
            rest = &rest[open + close + 1..];
        }
        if !rest.is_empty() {
            segments.push(TextSegment::Literal(rest.to_string()));
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preserve(text: &str) -> PreserveText {
        PreserveText {
            text: text.to_string(),
            font: StyleRef::Default,
            paragraph: StyleRef::Default,
        }
    }

    #[test]
    fn test_preserve_text_segments() {
        assert_eq!(
            preserve("Page {PAGE} of {numpages}").segments(),
            vec![
                TextSegment::Literal("Page ".into()),
                TextSegment::Field("PAGE".into()),
                TextSegment::Literal(" of ".into()),
                TextSegment::Field("NUMPAGES".into()),
            ]
        );
        assert_eq!(
            preserve("open { brace").segments(),
            vec![TextSegment::Literal("open { brace".into())]
        );
    }

    #[test]
    fn test_list_type_num_ids() {
        assert_eq!(ListType::BulletFilled.num_id(), 3);
        assert_eq!(ListType::AlphaNum.num_id(), 9);
        assert!(ListType::Number.is_numbered());
    }

    #[test]
    fn test_toc_depth_range() {
        let mut toc = TableOfContents::new(StyleRef::Default);
        toc.set_depth_range(2, 3);
        assert!(!toc.includes(1));
        assert!(toc.includes(3));
    }

    #[test]
    fn test_internal_link_anchor() {
        let link = Link {
            target: "#_Toc252634154".into(),
            text: "Intro".into(),
            font: StyleRef::Default,
            paragraph: StyleRef::Default,
            relationship_id: None,
        };
        assert_eq!(link.anchor(), Some("_Toc252634154"));
    }
}
