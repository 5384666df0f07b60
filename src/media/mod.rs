//! Media, embedded objects and hyperlinks.
//!
//! The [`MediaRegistry`] hands out relationship ids and package paths for
//! everything a content part points at. It never touches the filesystem;
//! sources are read and inspected by the document model through the
//! [`ContentProvider`] and [`ImageInspector`] collaborators before they are
//! registered, and read again by the package writer when payloads are stored.
//!
//! # Examples
//!
//! ```rust
//! use quillpack::media::{MediaRegistry, MediaScope, MediaSource};
//!
//! let mut registry = MediaRegistry::new();
//! let logo = MediaSource::file("logo.png");
//! let first = registry.register_image(MediaScope::Section, &logo).unwrap();
//! let again = registry.register_image(MediaScope::Section, &logo).unwrap();
//! assert_eq!(first.rid(), "rId7");
//! assert_eq!(first, again);
//! ```

mod error;
mod registry;
mod source;

pub use error::{MediaError, Result};
pub use registry::{
    MediaEntry, MediaKind, MediaRef, MediaRegistry, MediaScope, OBJECT_ID_OFFSET, PART_BASE_OFFSET,
    SECTION_BASE_OFFSET,
};
pub use source::{
    ContentProvider, FsProvider, IMAGE_EXTENSIONS, ImageCrateInspector, ImageInfo, ImageInspector, MediaSource,
    OBJECT_EXTENSIONS, mime_type, normalize_extension,
};
