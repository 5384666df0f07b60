//! Pictures and embedded OLE objects.
use super::context::BuildContext;
use crate::common::Result;
use crate::media::{IMAGE_EXTENSIONS, MediaError, MediaRef, MediaScope, MediaSource};
use crate::style::ImageStyle;
use image::{ImageFormat, Rgba, RgbaImage};
use log::debug;

/// A picture placed in the flow.
#[derive(Debug, Clone)]
pub struct Image {
    pub(crate) source: MediaSource,
    pub style: ImageStyle,
    pub(crate) intrinsic: (u32, u32),
    pub(crate) mime: &'static str,
    pub(crate) scope: MediaScope,
    pub(crate) media: MediaRef,
}

impl Image {
    pub(crate) fn build(ctx: &BuildContext, scope: MediaScope, source: MediaSource, style: ImageStyle) -> Result<Self> {
        let extension = source.extension().unwrap_or_default();
        if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(MediaError::unsupported(source.locator(), extension).into());
        }

        let (intrinsic, mime) = match &source {
            MediaSource::Generated { image, format, .. } => (image.dimensions(), format.to_mime_type()),
            MediaSource::Bytes { data, .. } => {
                let info = ctx.inspector().inspect(&source.locator(), data)?;
                ((info.width, info.height), info.mime)
            },
            MediaSource::File(path) => {
                let data = ctx
                    .provider()
                    .read(path)
                    .map_err(|e| MediaError::unreadable(source.locator(), e))?;
                let info = ctx.inspector().inspect(&source.locator(), &data)?;
                ((info.width, info.height), info.mime)
            },
        };

        let media = ctx.media().register_image(scope, &source)?;
        Ok(Self {
            source,
            style,
            intrinsic,
            mime,
            scope,
            media,
        })
    }

    #[inline]
    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    /// Pixel size of the payload.
    #[inline]
    pub fn intrinsic_size(&self) -> (u32, u32) {
        self.intrinsic
    }

    /// Displayed size in pixels.
    pub fn extent(&self) -> (u32, u32) {
        self.style.extent(self.intrinsic)
    }

    #[inline]
    pub fn mime_type(&self) -> &'static str {
        self.mime
    }

    #[inline]
    pub fn relationship_id(&self) -> u32 {
        self.media.relationship_id
    }

    /// Path of the payload relative to the `word/` folder.
    #[inline]
    pub fn target(&self) -> &str {
        &self.media.target
    }

    /// File name of the payload inside the package.
    pub fn file_name(&self) -> &str {
        self.media.target.rsplit('/').next().unwrap_or(&self.media.target)
    }

    #[inline]
    pub fn scope(&self) -> MediaScope {
        self.scope
    }
}

/// Application that opens an embedded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OleApplication {
    Excel,
    Word,
    PowerPoint,
}

impl OleApplication {
    fn icon_color(&self) -> Rgba<u8> {
        match self {
            OleApplication::Excel => Rgba([0x21, 0x73, 0x46, 0xFF]),
            OleApplication::Word => Rgba([0x2B, 0x57, 0x9A, 0xFF]),
            OleApplication::PowerPoint => Rgba([0xD2, 0x47, 0x26, 0xFF]),
        }
    }
}

/// ProgID and application for an object extension.
fn prog_id(extension: &str) -> Option<(&'static str, OleApplication)> {
    Some(match extension {
        "xls" => ("Excel.Sheet.8", OleApplication::Excel),
        "xlsx" => ("Excel.Sheet.12", OleApplication::Excel),
        "doc" => ("Word.Document.8", OleApplication::Word),
        "docx" => ("Word.Document.12", OleApplication::Word),
        "ppt" => ("PowerPoint.Show.8", OleApplication::PowerPoint),
        "pptx" => ("PowerPoint.Show.12", OleApplication::PowerPoint),
        _ => return None,
    })
}

const ICON_WIDTH: u32 = 32;
const ICON_HEIGHT: u32 = 40;

/// Draw the placeholder icon shown for an embedded object: a white sheet
/// with a folded corner and a band in the application's color.
fn render_icon(app: OleApplication) -> RgbaImage {
    let band = app.icon_color();
    let fold = 8;
    RgbaImage::from_fn(ICON_WIDTH, ICON_HEIGHT, |x, y| {
        let right = ICON_WIDTH - 1;
        let bottom = ICON_HEIGHT - 1;
        if x > right - fold && y < fold && x - (right - fold) > y {
            Rgba([0, 0, 0, 0])
        } else if x == 0 || y == 0 || x == right || y == bottom {
            Rgba([0x80, 0x80, 0x80, 0xFF])
        } else if (ICON_HEIGHT / 2..ICON_HEIGHT / 2 + 10).contains(&y) {
            band
        } else {
            Rgba([0xFF, 0xFF, 0xFF, 0xFF])
        }
    })
}

/// An embedded OLE object shown as an icon.
#[derive(Debug, Clone)]
pub struct Object {
    pub(crate) source: MediaSource,
    pub style: ImageStyle,
    pub(crate) icon: Image,
    pub(crate) media: MediaRef,
    pub(crate) object_id: u32,
    pub(crate) prog_id: &'static str,
}

impl Object {
    pub(crate) fn build(ctx: &BuildContext, scope: MediaScope, source: MediaSource, style: ImageStyle) -> Result<Self> {
        let extension = source.extension().unwrap_or_default();
        let Some((prog_id, app)) = prog_id(&extension) else {
            return Err(MediaError::unsupported(source.locator(), extension).into());
        };
        if let MediaSource::File(path) = &source {
            if !ctx.provider().is_readable(path) {
                return Err(MediaError::unreadable(
                    source.locator(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "object source is not readable"),
                )
                .into());
            }
        }

        let icon_source = MediaSource::generated(format!("{}_icon.png", extension), render_icon(app), ImageFormat::Png);
        let icon = Image::build(ctx, scope, icon_source, ImageStyle::new())?;
        let (media, object_id) = ctx.media().register_embedding(scope, &source)?;
        debug!("embedded {} as {} ({})", source.locator(), media.target, prog_id);
        Ok(Self {
            source,
            style,
            icon,
            media,
            object_id,
            prog_id,
        })
    }

    #[inline]
    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    /// The generated icon image.
    #[inline]
    pub fn icon(&self) -> &Image {
        &self.icon
    }

    #[inline]
    pub fn relationship_id(&self) -> u32 {
        self.media.relationship_id
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.media.target
    }

    /// `ObjectID` of the OLE object, `_` + this value in markup.
    #[inline]
    pub fn object_id(&self) -> u32 {
        self.object_id
    }

    #[inline]
    pub fn prog_id(&self) -> &'static str {
        self.prog_id
    }

    /// Displayed size in pixels.
    pub fn extent(&self) -> (u32, u32) {
        self.style.extent(self.icon.intrinsic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        RgbaImage::new(width, height)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_image_reads_dimensions() {
        let ctx = BuildContext::default();
        let image = Image::build(
            &ctx,
            MediaScope::Section,
            MediaSource::bytes("chart.png", png(40, 20)),
            ImageStyle::new(),
        )
        .unwrap();
        assert_eq!(image.intrinsic_size(), (40, 20));
        assert_eq!(image.relationship_id(), 7);
        assert_eq!(image.file_name(), "section_image1.png");
        assert_eq!(image.mime_type(), "image/png");
    }

    #[test]
    fn test_image_missing_file() {
        let ctx = BuildContext::default();
        let err = Image::build(
            &ctx,
            MediaScope::Section,
            MediaSource::file("/nonexistent/photo.jpg"),
            ImageStyle::new(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::Media(MediaError::SourceUnreadable { .. })));
        assert_eq!(ctx.media().count(MediaScope::Section), 0);
    }

    #[test]
    fn test_object_registers_icon_and_payload() {
        let ctx = BuildContext::default();
        let object = Object::build(
            &ctx,
            MediaScope::Section,
            MediaSource::bytes("budget.xlsx", vec![0u8; 16]),
            ImageStyle::new(),
        )
        .unwrap();
        assert_eq!(object.prog_id(), "Excel.Sheet.12");
        assert_eq!(object.icon().relationship_id(), 7);
        assert_eq!(object.relationship_id(), 8);
        assert_eq!(object.target(), "embeddings/section_oleObject1.bin");
        assert_eq!(object.object_id(), 8 + crate::media::OBJECT_ID_OFFSET);
    }

    #[test]
    fn test_object_rejects_unknown_extension() {
        let ctx = BuildContext::default();
        let err = Object::build(
            &ctx,
            MediaScope::Section,
            MediaSource::bytes("notes.txt", vec![1u8]),
            ImageStyle::new(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::Media(MediaError::UnsupportedMediaType { .. })));
        assert_eq!(ctx.media().count(MediaScope::Section), 0);
    }

    #[derive(Debug, Default)]
    struct MemoryProvider(std::collections::HashMap<std::path::PathBuf, Vec<u8>>);

    impl crate::media::ContentProvider for MemoryProvider {
        fn read(&self, path: &std::path::Path) -> std::io::Result<Vec<u8>> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "not in memory"))
        }
    }

    #[test]
    fn test_object_files_come_from_the_provider() {
        let mut provider = MemoryProvider::default();
        provider
            .0
            .insert("/virtual/budget.xlsx".into(), vec![0u8; 16]);
        let ctx = BuildContext::new(std::sync::Arc::new(provider), std::sync::Arc::new(crate::media::ImageCrateInspector));
        let object = Object::build(
            &ctx,
            MediaScope::Section,
            MediaSource::file("/virtual/budget.xlsx"),
            ImageStyle::new(),
        )
        .unwrap();
        assert_eq!(object.prog_id(), "Excel.Sheet.12");

        let err = Object::build(
            &ctx,
            MediaScope::Section,
            MediaSource::file("/virtual/missing.xlsx"),
            ImageStyle::new(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::Media(MediaError::SourceUnreadable { .. })));
    }

    #[test]
    fn test_icons_are_shared_per_application() {
        let ctx = BuildContext::default();
        let a = Object::build(&ctx, MediaScope::Section, MediaSource::bytes("a.docx", vec![1u8]), ImageStyle::new())
            .unwrap();
        let b = Object::build(&ctx, MediaScope::Section, MediaSource::bytes("b.docx", vec![2u8]), ImageStyle::new())
            .unwrap();
        assert_eq!(a.icon().relationship_id(), b.icon().relationship_id());
        assert_ne!(a.relationship_id(), b.relationship_id());
    }
}
