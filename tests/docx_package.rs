mod common;

use common::{assert_well_formed, attribute_values, names, open, open_file, read, relationships, write_png};
use quillpack::document::{Document, ElementContainer, HeaderFooterType, ListType};
use quillpack::media::MediaSource;
use quillpack::style::{FontStyle, ImageStyle, ParagraphStyle, TableStyle};
use quillpack::writer::create_writer;
use quillpack::{Error, Settings};

const STRUCTURAL_PARTS: [&str; 12] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "docProps/app.xml",
    "docProps/core.xml",
    "word/_rels/document.xml.rels",
    "word/document.xml",
    "word/styles.xml",
    "word/numbering.xml",
    "word/settings.xml",
    "word/theme/theme1.xml",
    "word/webSettings.xml",
    "word/fontTable.xml",
];

fn assemble(doc: &Document) -> common::Archive {
    open(create_writer(Some(doc), "Word2007").unwrap().assemble().unwrap())
}

#[test]
fn minimal_document_has_only_structural_parts() {
    let mut doc = Document::new();
    doc.add_section(None).unwrap().add_text("Hello", None, None).unwrap();
    let mut archive = assemble(&doc);

    let mut entries = names(&archive);
    entries.sort();
    let mut expected: Vec<String> = STRUCTURAL_PARTS.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(entries, expected);

    let rels = read(&mut archive, "word/_rels/document.xml.rels");
    assert_eq!(relationships(&rels).len(), 6);
    for name in STRUCTURAL_PARTS {
        assert_well_formed(name, &read(&mut archive, name));
    }
}

#[test]
fn one_image_adds_one_relationship_type_and_payload() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_png(dir.path(), "A.png", 4, 3);

    let mut plain = Document::new();
    plain.add_section(None).unwrap().add_text("Hello", None, None).unwrap();
    let mut before = assemble(&plain);

    let mut doc = Document::new();
    let section = doc.add_section(None).unwrap();
    section.add_text("Hello", None, None).unwrap();
    section.add_image(MediaSource::file(&png), ImageStyle::new()).unwrap();
    let mut after = assemble(&doc);

    assert_eq!(after.len(), before.len() + 1);
    assert!(after.by_name("word/media/section_image1.png").is_ok());

    let rels_before = relationships(&read(&mut before, "word/_rels/document.xml.rels"));
    let rels_after = relationships(&read(&mut after, "word/_rels/document.xml.rels"));
    assert_eq!(rels_after.len(), rels_before.len() + 1);
    assert_eq!(rels_after["rId7"], ("media/section_image1.png".to_string(), false));

    let types_before = read(&mut before, "[Content_Types].xml");
    let types_after = read(&mut after, "[Content_Types].xml");
    assert_eq!(
        types_after.matches("<Default ").count(),
        types_before.matches("<Default ").count() + 1
    );
    assert!(types_after.contains(r#"Extension="png" ContentType="image/png""#));
}

#[test]
fn duplicate_image_is_registered_once() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_png(dir.path(), "A.png", 2, 2);

    let mut doc = Document::new();
    let section = doc.add_section(None).unwrap();
    let first = section.add_image(MediaSource::file(&png), None).unwrap().relationship_id();
    let second = section.add_image(MediaSource::file(&png), None).unwrap().relationship_id();
    assert_eq!(first, second);
    assert_eq!(doc.section_media_elements().len(), 1);

    let mut archive = assemble(&doc);
    let document = read(&mut archive, "word/document.xml");
    assert_eq!(attribute_values(&document, "r:embed"), vec!["rId7", "rId7"]);
}

#[test]
fn header_footer_type_transitions() {
    let mut doc = Document::new();
    let section = doc.add_section(None).unwrap();
    let header = section.add_header();
    assert_eq!(header.header_type(), HeaderFooterType::Default);
    header.first_page();
    assert_eq!(header.header_type(), HeaderFooterType::First);
    header.reset_type();
    assert_eq!(header.header_type(), HeaderFooterType::Default);
}

/// A document touching every element kind and every relationship scope.
fn rich_document(dir: &std::path::Path) -> Document {
    let png = write_png(dir, "logo.png", 8, 8);
    let sheet = dir.join("data.xlsx");
    std::fs::write(&sheet, b"not really a workbook").unwrap();

    let mut doc = Document::with_settings(Settings::new().with_default_font("Calibri", 11.0));
    doc.add_title_style(1, FontStyle::new().size(16.0).bold(true), None).unwrap();
    doc.add_paragraph_style("Quote", ParagraphStyle::new().indent(720)).unwrap();
    doc.add_table_style("Grid", TableStyle::new().border(4, "000000"), TableStyle::new().bg_color("DDDDDD"))
        .unwrap();

    let section = doc.add_section(None).unwrap();
    section.add_toc(None).unwrap();
    section.add_title("Overview", 1).unwrap();
    section.add_text("Quoted", None, "Quote").unwrap();
    section.add_link("https://example.com/a", "external", None, None).unwrap();
    section.add_link("#_Toc252634154", "back to overview", None, None).unwrap();
    section.add_image(MediaSource::file(&png), ImageStyle::new().size(32, 32)).unwrap();
    section.add_object(MediaSource::file(&sheet), None).unwrap();
    section.add_list_item("first", 0, ListType::Number, None, None).unwrap();
    section.add_list_item("nested", 1, ListType::Number, None, None).unwrap();
    section.add_page_break().unwrap();

    let run = section.add_text_run(None).unwrap();
    run.add_text("See note", None, None).unwrap();
    run.add_footnote(None)
        .unwrap()
        .add_link("https://example.com/note", "source", None, None)
        .unwrap();

    let table = section.add_table("Grid").unwrap();
    let row = table.add_row(None, None).unwrap();
    row.add_cell(Some(3000), None).unwrap().add_text("A1", None, None).unwrap();
    row.add_cell(Some(3000), None)
        .unwrap()
        .add_image(MediaSource::file(&png), None)
        .unwrap();

    section.add_header().add_image(MediaSource::file(&png), None).unwrap();
    section
        .add_footer()
        .add_preserve_text("Page {PAGE} of {NUMPAGES}", None, None)
        .unwrap();

    let second = doc.add_section(None).unwrap();
    second.add_text("Second section", None, None).unwrap();
    second.add_footer().add_text("Second footer", None, None).unwrap();
    doc
}

#[test]
fn every_relationship_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let doc = rich_document(dir.path());
    let path = dir.path().join("rich.docx");
    doc.save(&path, "docx").unwrap();
    let mut archive = open_file(&path);
    let entries = names(&archive);

    let parts: Vec<String> = entries
        .iter()
        .filter(|name| name.starts_with("word/") && name.ends_with(".xml") && !name.contains("_rels"))
        .cloned()
        .collect();
    for part in parts {
        let xml = read(&mut archive, &part);
        assert_well_formed(&part, &xml);
        let file_name = part.trim_start_matches("word/");
        let rels_name = format!("word/_rels/{}.rels", file_name);
        let table = if entries.contains(&rels_name) {
            relationships(&read(&mut archive, &rels_name))
        } else {
            Default::default()
        };
        for attribute in ["r:id", "r:embed"] {
            for id in attribute_values(&xml, attribute) {
                assert!(table.contains_key(&id), "{part} references {id} missing from {rels_name}");
            }
        }
        for (id, (target, external)) in &table {
            if !external {
                let full = format!("word/{}", target);
                assert!(entries.contains(&full), "{rels_name} {id} points at missing {full}");
            }
        }
    }

    let types = read(&mut archive, "[Content_Types].xml");
    assert!(types.contains(r#"Extension="bin""#));
    assert!(types.contains(r#"PartName="/word/footnotes.xml""#));
    assert!(types.contains(r#"PartName="/word/footer2.xml""#));
}

#[test]
fn unknown_format_fails() {
    let doc = Document::new();
    assert!(matches!(create_writer(Some(&doc), "Rtf"), Err(Error::UnsupportedFormat(_))));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    assert!(matches!(doc.save(&path, "pdf"), Err(Error::UnsupportedFormat(_))));
    assert!(!path.exists());
}

#[test]
fn writer_without_document_fails_before_io() {
    let writer = create_writer(None, "Word2007").unwrap();
    assert!(matches!(writer.assemble(), Err(Error::NoDocumentAssigned)));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("none.docx");
    assert!(matches!(writer.save(&path), Err(Error::NoDocumentAssigned)));
    assert!(!path.exists());
}

#[test]
fn failed_save_leaves_destination_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_png(dir.path(), "gone.png", 2, 2);
    let mut doc = Document::new();
    doc.add_section(None)
        .unwrap()
        .add_image(MediaSource::file(&png), None)
        .unwrap();
    std::fs::remove_file(&png).unwrap();

    let path = dir.path().join("report.docx");
    std::fs::write(&path, b"previous").unwrap();
    assert!(matches!(doc.save(&path, "Word2007"), Err(Error::Media(_))));
    assert_eq!(std::fs::read(&path).unwrap(), b"previous");

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("report.docx")]);

    let missing = dir.path().join("no-such-dir").join("out.docx");
    assert!(matches!(doc.save(&missing, "Word2007"), Err(Error::PackagingIo(_))));
    assert!(!missing.exists());
}

#[test]
fn save_to_stream_matches_format() {
    let mut doc = Document::new();
    doc.add_section(None).unwrap().add_text("streamed", None, None).unwrap();
    let mut out = Vec::new();
    doc.save_to_writer(&mut out, "Word2007").unwrap();
    let mut archive = open(out);
    assert!(read(&mut archive, "word/document.xml").contains(">streamed</w:t>"));
}
