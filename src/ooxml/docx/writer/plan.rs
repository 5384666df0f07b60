//! Part planning for a WordprocessingML package.
//!
//! Before any markup is produced the whole model is walked once. Every media
//! reference is registered again (registration is idempotent, so the
//! registry hands back the ids the element already carries) and any
//! disagreement aborts the save. The walk also collects the footnotes, and
//! the plan assigns the document-level relationship ids of header, footer
//! and footnotes parts, which follow the media of the main document.
use crate::common::{Error, Result};
use crate::document::{Document, Element, ElementContainer, Footnote, HeaderFooter, Image, Object};
use crate::media::{MediaRegistry, MediaScope, SECTION_BASE_OFFSET};
use log::debug;

/// A header or footer part and its relationship id in `document.xml.rels`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlannedPart<'d> {
    pub part: &'d HeaderFooter,
    pub relationship_id: u32,
}

#[derive(Debug)]
pub(crate) struct PartPlan<'d> {
    pub parts: Vec<PlannedPart<'d>>,
    /// Footnotes sorted by id
    pub footnotes: Vec<&'d Footnote>,
    pub footnotes_rid: Option<u32>,
}

impl<'d> PartPlan<'d> {
    pub fn build(document: &'d Document) -> Result<Self> {
        let mut media = document.media();
        let mut footnotes = Vec::new();
        for section in document.sections() {
            verify(&mut media, section.container().scope(), section.elements(), &mut footnotes)?;
            for part in section.headers_and_footers() {
                verify(&mut media, part.scope(), part.elements(), &mut footnotes)?;
            }
        }
        footnotes.sort_by_key(|f: &&Footnote| f.id());

        let mut next = SECTION_BASE_OFFSET + media.count(MediaScope::Section) as u32;
        let mut parts = Vec::new();
        for section in document.sections() {
            for part in section.headers_and_footers() {
                parts.push(PlannedPart {
                    part,
                    relationship_id: next,
                });
                next += 1;
            }
        }
        let footnotes_rid = (!footnotes.is_empty()).then_some(next);
        debug!(
            "planned {} header/footer parts and {} footnotes",
            parts.len(),
            footnotes.len()
        );
        Ok(Self {
            parts,
            footnotes,
            footnotes_rid,
        })
    }

    /// Relationship id of the header or footer part owning `scope`.
    pub fn part_rid(&self, scope: MediaScope) -> Option<u32> {
        self.parts
            .iter()
            .find(|planned| planned.part.scope() == scope)
            .map(|planned| planned.relationship_id)
    }
}

fn mismatch(what: &str, locator: String, stored: u32, registered: u32) -> Error {
    Error::Inconsistent(format!(
        "{} {} carries rId{} but the registry holds rId{}",
        what, locator, stored, registered
    ))
}

fn verify_image(media: &mut MediaRegistry, image: &Image) -> Result<()> {
    let registered = media.register_image(image.scope(), image.source())?;
    if registered.relationship_id != image.relationship_id() || registered.target != image.target() {
        return Err(mismatch(
            "image",
            image.source().locator(),
            image.relationship_id(),
            registered.relationship_id,
        ));
    }
    Ok(())
}

fn verify_object(media: &mut MediaRegistry, object: &Object) -> Result<()> {
    verify_image(media, object.icon())?;
    let (registered, object_id) = media.register_embedding(object.icon().scope(), object.source())?;
    if registered.relationship_id != object.relationship_id() {
        return Err(mismatch(
            "object",
            object.source().locator(),
            object.relationship_id(),
            registered.relationship_id,
        ));
    }
    if object_id != object.object_id() {
        return Err(Error::Inconsistent(format!(
            "object {} carries ObjectID {} but the registry holds {}",
            object.source().locator(),
            object.object_id(),
            object_id
        )));
    }
    Ok(())
}

fn verify<'d>(
    media: &mut MediaRegistry,
    scope: MediaScope,
    elements: &'d [Element],
    footnotes: &mut Vec<&'d Footnote>,
) -> Result<()> {
    for element in elements {
        match element {
            Element::Image(image) => verify_image(media, image)?,
            Element::Object(object) => verify_object(media, object)?,
            Element::Link(link) => {
                if let Some(stored) = link.relationship_id() {
                    let registered = media.register_hyperlink(scope, &link.target)?;
                    if registered != stored {
                        return Err(mismatch("hyperlink", link.target.clone(), stored, registered));
                    }
                }
            },
            Element::TextRun(run) => verify(media, scope, run.elements(), footnotes)?,
            Element::Footnote(footnote) => {
                footnotes.push(footnote);
                verify(media, MediaScope::Footnotes, footnote.elements(), footnotes)?;
            },
            Element::Table(table) => {
                for row in table.rows() {
                    for cell in row.cells() {
                        verify(media, scope, cell.elements(), footnotes)?;
                    }
                }
            },
            Element::Text(_)
            | Element::TextBreak(_)
            | Element::PageBreak
            | Element::Title(_)
            | Element::ListItem(_)
            | Element::TableOfContents(_)
            | Element::PreserveText(_) => {},
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_ids_follow_section_media() {
        let mut doc = Document::new();
        let section = doc.add_section(None).unwrap();
        section.add_link("https://a.example", "a", None, None).unwrap();
        section.add_link("https://b.example", "b", None, None).unwrap();
        section.add_header().add_text("h", None, None).unwrap();
        section.add_footer().add_text("f", None, None).unwrap();
        section.add_footnote(None).unwrap().add_text("note", None, None).unwrap();
        let second = doc.add_section(None).unwrap();
        second.add_footer().add_text("f2", None, None).unwrap();

        let plan = PartPlan::build(&doc).unwrap();
        let ids: Vec<u32> = plan.parts.iter().map(|p| p.relationship_id).collect();
        assert_eq!(ids, vec![9, 10, 11]);
        assert_eq!(plan.part_rid(MediaScope::Footer(2)), Some(11));
        assert_eq!(plan.footnotes_rid, Some(12));
        assert_eq!(plan.footnotes.len(), 1);
    }

    #[test]
    fn test_no_footnotes_no_part() {
        let mut doc = Document::new();
        doc.add_section(None).unwrap().add_text("x", None, None).unwrap();
        let plan = PartPlan::build(&doc).unwrap();
        assert!(plan.parts.is_empty());
        assert_eq!(plan.footnotes_rid, None);
    }

    #[test]
    fn test_nested_footnotes_are_collected_in_id_order() {
        let mut doc = Document::new();
        let section = doc.add_section(None).unwrap();
        let run = section.add_text_run(None).unwrap();
        run.add_footnote(None).unwrap();
        let table = section.add_table(None).unwrap();
        table
            .add_row(None, None)
            .unwrap()
            .add_cell(None, None)
            .unwrap()
            .add_footnote(None)
            .unwrap();
        let plan = PartPlan::build(&doc).unwrap();
        let ids: Vec<u32> = plan.footnotes.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
