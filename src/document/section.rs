//! Sections with their headers and footers.
use super::container::{Container, ContainerKind, ElementContainer};
use super::context::BuildContext;
use crate::media::MediaScope;
use crate::style::SectionStyle;

/// Whether a header or footer part is a header or a footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFooterKind {
    Header,
    Footer,
}

impl HeaderFooterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderFooterKind::Header => "header",
            HeaderFooterKind::Footer => "footer",
        }
    }
}

/// Pages a header or footer applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderFooterType {
    #[default]
    Default,
    First,
    Even,
}

impl HeaderFooterType {
    /// Value of `w:headerReference/@w:type`.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            HeaderFooterType::Default => "default",
            HeaderFooterType::First => "first",
            HeaderFooterType::Even => "even",
        }
    }
}

/// A header or a footer.
///
/// Each instance gets a document-wide sequence number per kind when it is
/// created; the number names its part (`header1.xml`, `footer2.xml`) and its
/// media scope.
#[derive(Debug, Clone)]
pub struct HeaderFooter {
    kind: HeaderFooterKind,
    number: u32,
    hf_type: HeaderFooterType,
    container: Container,
}

/// A section header.
pub type Header = HeaderFooter;
/// A section footer.
pub type Footer = HeaderFooter;

impl HeaderFooter {
    pub(crate) fn new(kind: HeaderFooterKind, ctx: BuildContext) -> Self {
        let (number, scope, container_kind) = match kind {
            HeaderFooterKind::Header => {
                let n = ctx.next_header();
                (n, MediaScope::Header(n), ContainerKind::Header)
            },
            HeaderFooterKind::Footer => {
                let n = ctx.next_footer();
                (n, MediaScope::Footer(n), ContainerKind::Footer)
            },
        };
        Self {
            kind,
            number,
            hf_type: HeaderFooterType::Default,
            container: Container::new(container_kind, scope, ctx),
        }
    }

    #[inline]
    pub fn kind(&self) -> HeaderFooterKind {
        self.kind
    }

    /// 1-based sequence number within its kind.
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[inline]
    pub fn header_type(&self) -> HeaderFooterType {
        self.hf_type
    }

    /// Apply to all pages.
    pub fn reset_type(&mut self) -> &mut Self {
        self.hf_type = HeaderFooterType::Default;
        self
    }

    /// Apply to the first page only.
    pub fn first_page(&mut self) -> &mut Self {
        self.hf_type = HeaderFooterType::First;
        self
    }

    /// Apply to even pages.
    pub fn even_page(&mut self) -> &mut Self {
        self.hf_type = HeaderFooterType::Even;
        self
    }

    /// Part name relative to `word/`, e.g. `header1.xml`.
    pub fn part_name(&self) -> String {
        format!("{}{}.xml", self.kind.as_str(), self.number)
    }

    #[inline]
    pub fn scope(&self) -> MediaScope {
        self.container.scope()
    }
}

impl ElementContainer for HeaderFooter {
    fn container(&self) -> &Container {
        &self.container
    }

    fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }
}

/// A run of pages sharing page setup, header and footer.
#[derive(Debug, Clone)]
pub struct Section {
    number: u32,
    pub style: SectionStyle,
    header: Option<HeaderFooter>,
    footer: Option<HeaderFooter>,
    container: Container,
}

impl Section {
    pub(crate) fn new(ctx: BuildContext, style: SectionStyle) -> Self {
        let number = ctx.next_section();
        Self {
            number,
            style,
            header: None,
            footer: None,
            container: Container::new(ContainerKind::Section, MediaScope::Section, ctx),
        }
    }

    /// 1-based position in the document.
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The section header, created on first call.
    pub fn add_header(&mut self) -> &mut Header {
        let ctx = self.container.context().clone();
        self.header
            .get_or_insert_with(|| HeaderFooter::new(HeaderFooterKind::Header, ctx))
    }

    /// The section footer, created on first call.
    pub fn add_footer(&mut self) -> &mut Footer {
        let ctx = self.container.context().clone();
        self.footer
            .get_or_insert_with(|| HeaderFooter::new(HeaderFooterKind::Footer, ctx))
    }

    #[inline]
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    #[inline]
    pub fn footer(&self) -> Option<&Footer> {
        self.footer.as_ref()
    }

    /// Header then footer, whichever exist.
    pub fn headers_and_footers(&self) -> impl Iterator<Item = &HeaderFooter> {
        self.header.iter().chain(self.footer.iter())
    }
}

impl ElementContainer for Section {
    fn container(&self) -> &Container {
        &self.container
    }

    fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    #[test]
    fn test_header_type_transitions() {
        let ctx = BuildContext::default();
        let mut section = Section::new(ctx, SectionStyle::default());
        let header = section.add_header();
        assert_eq!(header.header_type(), HeaderFooterType::Default);
        header.first_page();
        assert_eq!(header.header_type(), HeaderFooterType::First);
        header.even_page();
        assert_eq!(header.header_type(), HeaderFooterType::Even);
        header.reset_type();
        assert_eq!(header.header_type(), HeaderFooterType::Default);
    }

    #[test]
    fn test_header_is_created_once() {
        let ctx = BuildContext::default();
        let mut section = Section::new(ctx, SectionStyle::default());
        section.add_header().add_text("Top", None, None).unwrap();
        section.add_header().first_page();
        let header = section.header().unwrap();
        assert_eq!(header.number(), 1);
        assert_eq!(header.elements().len(), 1);
        assert_eq!(header.header_type(), HeaderFooterType::First);
        assert_eq!(header.part_name(), "header1.xml");
    }

    #[test]
    fn test_numbering_spans_sections() {
        let ctx = BuildContext::default();
        let mut first = Section::new(ctx.clone(), SectionStyle::default());
        let mut second = Section::new(ctx, SectionStyle::default());
        assert_eq!(first.add_footer().number(), 1);
        assert_eq!(second.add_footer().number(), 2);
        assert_eq!(second.add_header().number(), 1);
        assert_eq!(second.footer().unwrap().scope(), MediaScope::Footer(2));
        assert_eq!(second.number(), 2);
    }

    #[test]
    fn test_header_rejects_page_break() {
        let ctx = BuildContext::default();
        let mut section = Section::new(ctx, SectionStyle::default());
        assert!(matches!(
            section.add_header().add_page_break(),
            Err(Error::ElementNotAllowed { element: "page break", container: "header" })
        ));
    }
}
