//! DrawingML pictures and VML-hosted OLE objects.
use crate::common::unit::{EMUS_PER_PIXEL, px_to_emu_96};
use crate::common::xml::escape_xml;
use crate::document::{Image, Object};
use crate::style::Wrapping;
use std::fmt::Write as FmtWrite;

/// Base of `relativeHeight` for floating pictures.
const RELATIVE_HEIGHT_BASE: u32 = 251_658_240;

/// Twips per pixel at 96 DPI.
const TWIPS_PER_PIXEL: u32 = 15;

fn write_graphic(xml: &mut String, image: &Image, cx: i64, cy: i64) {
    let _ = write!(
        xml,
        concat!(
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="0" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="rId{rid}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic>"#
        ),
        name = escape_xml(image.file_name()),
        rid = image.relationship_id(),
        cx = cx,
        cy = cy,
    );
}

fn write_wrap(xml: &mut String, wrapping: Wrapping) {
    match wrapping {
        Wrapping::Square => xml.push_str(r#"<wp:wrapSquare wrapText="bothSides"/>"#),
        Wrapping::Tight => xml.push_str(concat!(
            r#"<wp:wrapTight wrapText="bothSides"><wp:wrapPolygon edited="0">"#,
            r#"<wp:start x="0" y="0"/><wp:lineTo x="0" y="21600"/><wp:lineTo x="21600" y="21600"/>"#,
            r#"<wp:lineTo x="21600" y="0"/><wp:lineTo x="0" y="0"/></wp:wrapPolygon></wp:wrapTight>"#
        )),
        Wrapping::Behind | Wrapping::InFront | Wrapping::Inline => xml.push_str("<wp:wrapNone/>"),
    }
}

/// Write a picture run. `doc_pr_id` must be unique within the part.
pub(crate) fn write_image_run(xml: &mut String, image: &Image, doc_pr_id: u32) {
    let (width, height) = image.extent();
    let (cx, cy) = (px_to_emu_96(width), px_to_emu_96(height));
    let wrapping = image.style.wrapping;

    xml.push_str("<w:r><w:drawing>");
    if wrapping.is_inline() {
        let _ = write!(
            xml,
            concat!(
                r#"<wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/>"#,
                r#"<wp:effectExtent l="0" t="0" r="0" b="0"/><wp:docPr id="{id}" name="Picture {id}"/>"#,
                r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#
            ),
            cx = cx,
            cy = cy,
            id = doc_pr_id,
        );
        write_graphic(xml, image, cx, cy);
        xml.push_str("</wp:inline>");
    } else {
        let behind = u8::from(wrapping == Wrapping::Behind);
        let left = image.style.margin_left.map(|m| m as i64 * EMUS_PER_PIXEL).unwrap_or(0);
        let top = image.style.margin_top.map(|m| m as i64 * EMUS_PER_PIXEL).unwrap_or(0);
        let _ = write!(
            xml,
            concat!(
                r#"<wp:anchor distT="0" distB="0" distL="114300" distR="114300" simplePos="0" "#,
                r#"relativeHeight="{height}" behindDoc="{behind}" locked="0" layoutInCell="1" allowOverlap="1">"#,
                r#"<wp:simplePos x="0" y="0"/>"#,
                r#"<wp:positionH relativeFrom="column"><wp:posOffset>{left}</wp:posOffset></wp:positionH>"#,
                r#"<wp:positionV relativeFrom="paragraph"><wp:posOffset>{top}</wp:posOffset></wp:positionV>"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/><wp:effectExtent l="0" t="0" r="0" b="0"/>"#
            ),
            height = RELATIVE_HEIGHT_BASE + doc_pr_id,
            behind = behind,
            left = left,
            top = top,
            cx = cx,
            cy = cy,
        );
        write_wrap(xml, wrapping);
        let _ = write!(
            xml,
            concat!(
                r#"<wp:docPr id="{id}" name="Picture {id}"/>"#,
                r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#
            ),
            id = doc_pr_id,
        );
        write_graphic(xml, image, cx, cy);
        xml.push_str("</wp:anchor>");
    }
    xml.push_str("</w:drawing></w:r>");
}

/// Write an embedded object run, shown as its icon.
pub(crate) fn write_object_run(xml: &mut String, object: &Object, shape_id: u32) {
    let (width, height) = object.extent();
    let _ = write!(
        xml,
        concat!(
            r#"<w:r><w:object w:dxaOrig="{dxa_w}" w:dyaOrig="{dxa_h}">"#,
            r##"<v:shape id="_x0000_i{shape}" type="#_x0000_t75" style="width:{w}pt;height:{h}pt" o:ole="">"##,
            r#"<v:imagedata r:id="rId{icon}" o:title=""/></v:shape>"#,
            r#"<o:OLEObject Type="Embed" ProgID="{prog}" ShapeID="_x0000_i{shape}" DrawAspect="Icon" "#,
            r#"ObjectID="_{object_id}" r:id="rId{rid}"/></w:object></w:r>"#
        ),
        dxa_w = width * TWIPS_PER_PIXEL,
        dxa_h = height * TWIPS_PER_PIXEL,
        shape = 1025 + shape_id,
        w = width * 3 / 4,
        h = height * 3 / 4,
        icon = object.icon().relationship_id(),
        prog = object.prog_id(),
        object_id = object.object_id(),
        rid = object.relationship_id(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Element, ElementContainer};
    use crate::media::MediaSource;
    use crate::style::ImageStyle;
    use image::{ImageFormat, RgbaImage};

    fn picture(style: ImageStyle) -> Image {
        let mut doc = Document::new();
        let section = doc.add_section(None).unwrap();
        let source = MediaSource::generated("dot.png", RgbaImage::new(4, 2), ImageFormat::Png);
        section.add_image(source, style).unwrap().clone()
    }

    #[test]
    fn test_inline_picture() {
        let image = picture(ImageStyle::new().size(100, 50));
        let mut xml = String::new();
        write_image_run(&mut xml, &image, 3);
        assert!(xml.contains(r#"<wp:extent cx="952500" cy="476250"/>"#));
        assert!(xml.contains(r#"<a:blip r:embed="rId7"/>"#));
        assert!(xml.contains(r#"<wp:docPr id="3" name="Picture 3"/>"#));
        assert!(!xml.contains("wp:anchor"));
    }

    #[test]
    fn test_floating_picture_behind_text() {
        let mut style = ImageStyle::new().wrapping(Wrapping::Behind);
        style.margin_left = Some(10);
        let image = picture(style);
        let mut xml = String::new();
        write_image_run(&mut xml, &image, 1);
        assert!(xml.contains(r#"behindDoc="1""#));
        assert!(xml.contains("<wp:posOffset>95250</wp:posOffset>"));
        assert!(xml.contains("<wp:wrapNone/>"));
        assert!(xml.contains(r#"<wp:extent cx="38100" cy="19050"/>"#));
    }

    #[test]
    fn test_object_markup() {
        let mut doc = Document::new();
        let section = doc.add_section(None).unwrap();
        section
            .add_object(MediaSource::bytes("budget.xlsx", vec![1u8, 2, 3]), None)
            .unwrap();
        let Element::Object(object) = &section.elements()[0] else {
            panic!("expected an object");
        };
        let mut xml = String::new();
        write_object_run(&mut xml, object, 0);
        assert!(xml.contains(r#"ProgID="Excel.Sheet.12""#));
        assert!(xml.contains(&format!(r#"r:id="rId{}""#, object.relationship_id())));
        assert!(xml.contains(&format!(r#"ObjectID="_{}""#, object.relationship_id() + 1_325_353_440)));
        assert!(xml.contains(&format!(r#"<v:imagedata r:id="rId{}""#, object.icon().relationship_id())));
    }
}
