//! Text runs and footnotes: containers written as a single paragraph.
use super::container::{Container, ContainerKind, ElementContainer};
use super::context::BuildContext;
use crate::media::MediaScope;
use crate::style::{ParagraphStyle, StyleRef};

/// A paragraph built from several differently formatted pieces.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub paragraph: StyleRef<ParagraphStyle>,
    container: Container,
}

impl TextRun {
    pub(crate) fn new(
        scope: MediaScope,
        root: ContainerKind,
        ctx: BuildContext,
        paragraph: StyleRef<ParagraphStyle>,
    ) -> Self {
        Self {
            paragraph,
            container: Container::nested(ContainerKind::TextRun, root, scope, ctx),
        }
    }
}

impl ElementContainer for TextRun {
    fn container(&self) -> &Container {
        &self.container
    }

    fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }
}

/// A footnote. The reference mark is written where the footnote was added;
/// the content goes to the footnotes part.
#[derive(Debug, Clone)]
pub struct Footnote {
    id: u32,
    pub paragraph: StyleRef<ParagraphStyle>,
    container: Container,
}

impl Footnote {
    pub(crate) fn new(id: u32, ctx: BuildContext, paragraph: StyleRef<ParagraphStyle>) -> Self {
        Self {
            id,
            paragraph,
            container: Container::new(ContainerKind::Footnote, MediaScope::Footnotes, ctx),
        }
    }

    /// Document-wide footnote id, starting at 1.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl ElementContainer for Footnote {
    fn container(&self) -> &Container {
        &self.container
    }

    fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }
}
