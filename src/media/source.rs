//! Media sources and the collaborators that read and inspect them.
use super::error::{MediaError, Result};
use image::{ImageFormat, ImageReader, RgbaImage};
use phf::phf_map;
use sha2::{Digest, Sha256};
use std::fmt::{self, Write as _};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// MIME types of every extension that can end up in a package.
static MIME_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "png" => "image/png",
    "jpg" => "image/jpeg",
    "gif" => "image/gif",
    "bmp" => "image/bmp",
    "tif" => "image/tiff",
    "bin" => "application/vnd.openxmlformats-officedocument.oleObject",
    "xml" => "application/xml",
    "rels" => "application/vnd.openxmlformats-package.relationships+xml",
};

/// Raster extensions accepted for images, after normalization.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "gif", "bmp", "tif"];

/// Extensions accepted for embedded objects.
pub const OBJECT_EXTENSIONS: &[&str] = &["xls", "xlsx", "doc", "docx", "ppt", "pptx"];

/// MIME type for a normalized extension.
pub fn mime_type(extension: &str) -> Option<&'static str> {
    MIME_TYPES.get(extension).copied()
}

/// Lower-case an extension and fold aliases (`jpeg` → `jpg`, `tiff` → `tif`).
pub fn normalize_extension(extension: &str) -> String {
    let lower = extension.trim_start_matches('.').to_ascii_lowercase();
    match lower.as_str() {
        "jpeg" | "jpe" => "jpg".to_string(),
        "tiff" => "tif".to_string(),
        _ => lower,
    }
}

/// Where a media payload comes from.
#[derive(Clone)]
pub enum MediaSource {
    /// A file on disk
    File(PathBuf),
    /// Bytes held in memory; `name` supplies the extension
    Bytes { name: String, data: Arc<[u8]> },
    /// A raster produced at build time, encoded when packaged
    Generated {
        name: String,
        image: Arc<RgbaImage>,
        format: ImageFormat,
    },
}

impl fmt::Debug for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaSource::File(path) => f.debug_tuple("File").field(path).finish(),
            MediaSource::Bytes { name, data } => f
                .debug_struct("Bytes")
                .field("name", name)
                .field("len", &data.len())
                .finish(),
            MediaSource::Generated { name, image, format } => f
                .debug_struct("Generated")
                .field("name", name)
                .field("size", &image.dimensions())
                .field("format", format)
                .finish(),
        }
    }
}

impl MediaSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        MediaSource::File(path.into())
    }

    pub fn bytes(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        MediaSource::Bytes {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn generated(name: impl Into<String>, image: RgbaImage, format: ImageFormat) -> Self {
        MediaSource::Generated {
            name: name.into(),
            image: Arc::new(image),
            format,
        }
    }

    /// Human-readable locator used in errors and logs.
    pub fn locator(&self) -> String {
        match self {
            MediaSource::File(path) => path.display().to_string(),
            MediaSource::Bytes { name, .. } => format!("memory:{}", name),
            MediaSource::Generated { name, .. } => format!("generated:{}", name),
        }
    }

    /// Normalized extension. Generated rasters use the extension of their
    /// encoding format, whatever their name says.
    pub fn extension(&self) -> Option<String> {
        match self {
            MediaSource::File(path) => path
                .extension()
                .and_then(|e| e.to_str())
                .map(normalize_extension),
            MediaSource::Bytes { name, .. } => Path::new(name)
                .extension()
                .and_then(|e| e.to_str())
                .map(normalize_extension),
            MediaSource::Generated { format, .. } => format
                .extensions_str()
                .first()
                .map(|e| normalize_extension(e)),
        }
    }

    #[inline]
    pub fn is_generated(&self) -> bool {
        matches!(self, MediaSource::Generated { .. })
    }

    /// Content key of this source for a given kind tag: SHA-256 over the tag
    /// and the locator. In-memory sources hash their payload as well, so two
    /// buffers with the same name stay distinct.
    pub(crate) fn content_key(&self, tag: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(tag.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.locator().as_bytes());
        match self {
            MediaSource::File(_) => {},
            MediaSource::Bytes { data, .. } => hasher.update(data),
            MediaSource::Generated { image, .. } => {
                let (w, h) = image.dimensions();
                hasher.update(w.to_le_bytes());
                hasher.update(h.to_le_bytes());
                hasher.update(image.as_raw());
            },
        }
        hex_digest(hasher)
    }

    /// Read the payload, encoding generated rasters on the fly.
    pub fn read(&self, provider: &dyn ContentProvider) -> Result<Vec<u8>> {
        match self {
            MediaSource::File(path) => provider
                .read(path)
                .map_err(|e| MediaError::unreadable(self.locator(), e)),
            MediaSource::Bytes { data, .. } => Ok(data.to_vec()),
            MediaSource::Generated { image, format, .. } => {
                let mut buffer = Cursor::new(Vec::new());
                image.write_to(&mut buffer, *format).map_err(|e| MediaError::UndecodableImage {
                    locator: self.locator(),
                    reason: format!("Failed to encode image: {}", e),
                })?;
                Ok(buffer.into_inner())
            },
        }
    }
}

impl From<&str> for MediaSource {
    fn from(path: &str) -> Self {
        MediaSource::File(path.into())
    }
}

impl From<String> for MediaSource {
    fn from(path: String) -> Self {
        MediaSource::File(path.into())
    }
}

impl From<PathBuf> for MediaSource {
    fn from(path: PathBuf) -> Self {
        MediaSource::File(path)
    }
}

impl From<&Path> for MediaSource {
    fn from(path: &Path) -> Self {
        MediaSource::File(path.to_path_buf())
    }
}

/// Content key for a hyperlink target.
pub(crate) fn link_key(target: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"link\0");
    hasher.update(target.as_bytes());
    hex_digest(hasher)
}

fn hex_digest(hasher: Sha256) -> String {
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

/// Reads source bytes. The default implementation reads the filesystem.
pub trait ContentProvider: Send + Sync + fmt::Debug {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Whether `path` can be read. Defaults to reading it through
    /// [`read`](Self::read).
    fn is_readable(&self, path: &Path) -> bool {
        self.read(path).is_ok()
    }
}

/// [`ContentProvider`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProvider;

impl ContentProvider for FsProvider {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn is_readable(&self, path: &Path) -> bool {
        std::fs::File::open(path).is_ok()
    }
}

/// Dimensions and type of an inspected image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub mime: &'static str,
}

/// Inspects image payloads. The default implementation uses the `image` crate.
pub trait ImageInspector: Send + Sync + fmt::Debug {
    fn inspect(&self, locator: &str, data: &[u8]) -> Result<ImageInfo>;
}

/// [`ImageInspector`] that sniffs the format and reads only the header.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateInspector;

impl ImageInspector for ImageCrateInspector {
    fn inspect(&self, locator: &str, data: &[u8]) -> Result<ImageInfo> {
        let header_err = |reason: String| MediaError::UndecodableImage {
            locator: locator.to_string(),
            reason,
        };
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| header_err(e.to_string()))?;
        let format = reader
            .format()
            .ok_or_else(|| header_err("unrecognized image format".to_string()))?;
        let (width, height) = reader.into_dimensions().map_err(|e| header_err(e.to_string()))?;
        Ok(ImageInfo {
            width,
            height,
            mime: format.to_mime_type(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn tiny_png() -> Vec<u8> {
        let image = RgbaImage::from_pixel(3, 2, Rgba([255, 0, 0, 255]));
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("JPEG"), "jpg");
        assert_eq!(normalize_extension(".tiff"), "tif");
        assert_eq!(normalize_extension("Png"), "png");
    }

    #[test]
    fn test_generated_extension_follows_format() {
        let source = MediaSource::generated("icon.jpeg", RgbaImage::new(1, 1), ImageFormat::Png);
        assert_eq!(source.extension().as_deref(), Some("png"));
        assert!(source.is_generated());
    }

    #[test]
    fn test_content_key_distinguishes_payloads() {
        let a = MediaSource::bytes("a.png", vec![1u8, 2, 3]);
        let b = MediaSource::bytes("a.png", vec![4u8, 5, 6]);
        assert_ne!(a.content_key("image"), b.content_key("image"));
        assert_eq!(a.content_key("image"), a.clone().content_key("image"));
        assert_ne!(a.content_key("image"), a.content_key("object"));
        assert_eq!(a.content_key("image").len(), 64);
    }

    #[test]
    fn test_inspect_png() {
        let info = ImageCrateInspector.inspect("tiny.png", &tiny_png()).unwrap();
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(info.mime, "image/png");
        assert!(ImageCrateInspector.inspect("junk", b"not an image").is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let err = MediaSource::file("/nonexistent/picture.png").read(&FsProvider).unwrap_err();
        assert!(matches!(err, MediaError::SourceUnreadable { .. }));
    }

    #[test]
    fn test_mime_lookup() {
        assert_eq!(mime_type("jpg"), Some("image/jpeg"));
        assert_eq!(mime_type("svg"), None);
    }
}
