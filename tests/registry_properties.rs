use image::{ImageFormat, Rgba, RgbaImage};
use proptest::prelude::*;
use quillpack::document::{Document, ElementContainer};
use quillpack::media::{MediaScope, MediaSource, SECTION_BASE_OFFSET};
use quillpack::style::{FontStyle, NamedStyle, ParagraphStyle, Registration, StyleValues};

fn pixel(seed: u8) -> MediaSource {
    let mut image = RgbaImage::new(1, 1);
    image.put_pixel(0, 0, Rgba([seed, 0, 0, 255]));
    MediaSource::generated(format!("p{seed}.png"), image, ImageFormat::Png)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Distinct sources get consecutive ids from the scope's base offset,
    /// repeats get the id of their first registration.
    #[test]
    fn section_ids_are_monotonic(picks in proptest::collection::vec(0u8..12, 1..30)) {
        let mut doc = Document::new();
        let section = doc.add_section(None).unwrap();
        let mut first_seen: Vec<u8> = Vec::new();
        for seed in &picks {
            let rid = section.add_image(pixel(*seed), None).unwrap().relationship_id();
            let position = match first_seen.iter().position(|s| s == seed) {
                Some(position) => position,
                None => {
                    first_seen.push(*seed);
                    first_seen.len() - 1
                },
            };
            prop_assert_eq!(rid, SECTION_BASE_OFFSET + position as u32);
        }
        prop_assert_eq!(doc.section_media_elements().len(), first_seen.len());
        prop_assert_eq!(doc.media().count(MediaScope::Section), first_seen.len());
    }

    /// The first body registered under a name is the one that resolves.
    #[test]
    fn first_registration_wins(sizes in proptest::collection::vec(6u32..72, 2..6)) {
        let mut doc = Document::new();
        for (i, size) in sizes.iter().enumerate() {
            let outcome = doc.add_font_style("Body", FontStyle::new().size(*size as f64), None).unwrap();
            let expected = if i == 0 { Registration::Added } else { Registration::AlreadyExists };
            prop_assert_eq!(outcome, expected);
        }
        let styles = doc.styles();
        match styles.get("Body") {
            Some(NamedStyle::Font { font, .. }) => prop_assert_eq!(font.size_pt(), Some(sizes[0] as f64)),
            other => prop_assert!(false, "unexpected entry {:?}", other),
        }
    }

    /// Line heights are stored as twips of line spacing, 240 per single line.
    #[test]
    fn line_height_maps_to_spacing(tenths in 1u32..50) {
        let multiple = tenths as f64 / 10.0;
        let paragraph = ParagraphStyle::new().line_height(multiple).unwrap();
        prop_assert_eq!(paragraph.spacing(), Some((multiple * 240.0).round() as u32));
    }
}

#[test]
fn unit_round_trips() {
    let double = ParagraphStyle::new().line_height(2.0).unwrap();
    assert_eq!(double.spacing(), Some(480));
    let single = ParagraphStyle::new().line_height(1.0).unwrap();
    assert_eq!(single.spacing(), Some(240));

    let font = FontStyle::new().size(12.0);
    assert_eq!(font.half_points(), Some(24));
    assert_eq!(font.size_pt(), Some(12.0));
}

#[test]
fn invalid_and_unknown_style_values_fail() {
    assert!(ParagraphStyle::new().line_height(0.0).is_err());

    let mut doc = Document::new();
    let section = doc.add_section(None).unwrap();
    let unknown = StyleValues::new().set("sparkle", true);
    assert!(section.add_text("x", unknown, None).is_err());
    let bad = StyleValues::new().set("lineHeight", "tall");
    assert!(section.add_text("x", None, bad).is_err());
}
