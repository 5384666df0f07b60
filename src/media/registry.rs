//! Per-document registry of media, embedded objects and hyperlinks.
//!
//! Entries are kept per [`MediaScope`]. Within a scope every distinct source
//! gets exactly one entry, and its relationship id is the scope's base offset
//! plus the number of entries registered before it. Re-registering a source
//! returns the identifiers it already has.
use super::error::{MediaError, Result};
use super::source::{IMAGE_EXTENSIONS, MediaSource, OBJECT_EXTENSIONS, link_key};
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Relationship ids below this one in `document.xml.rels` are taken by the
/// fixed parts (styles, numbering, settings, theme, webSettings, fontTable).
pub const SECTION_BASE_OFFSET: u32 = 7;

/// First relationship id of header, footer and footnotes parts.
pub const PART_BASE_OFFSET: u32 = 1;

/// Added to an embedding's relationship id to form its `ObjectID`.
pub const OBJECT_ID_OFFSET: u32 = 1_325_353_440;

/// The relationship table an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaScope {
    /// The main document part
    Section,
    /// Header part with its 1-based sequence number
    Header(u32),
    /// Footer part with its 1-based sequence number
    Footer(u32),
    /// The footnotes part
    Footnotes,
}

impl MediaScope {
    /// First relationship id handed out in this scope.
    pub fn base_offset(&self) -> u32 {
        match self {
            MediaScope::Section => SECTION_BASE_OFFSET,
            _ => PART_BASE_OFFSET,
        }
    }

    /// Prefix of synthesized file names.
    fn prefix(&self) -> String {
        match self {
            MediaScope::Section => "section".to_string(),
            MediaScope::Header(n) => format!("header{}", n),
            MediaScope::Footer(n) => format!("footer{}", n),
            MediaScope::Footnotes => "footnote".to_string(),
        }
    }
}

impl fmt::Display for MediaScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaScope::Section => f.write_str("section"),
            MediaScope::Header(n) => write!(f, "header{}", n),
            MediaScope::Footer(n) => write!(f, "footer{}", n),
            MediaScope::Footnotes => f.write_str("footnotes"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Embedding,
    Hyperlink,
}

impl MediaKind {
    fn tag(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Embedding => "object",
            MediaKind::Hyperlink => "link",
        }
    }
}

/// One registered relationship target.
#[derive(Debug, Clone)]
pub struct MediaEntry {
    content_key: String,
    kind: MediaKind,
    source: Option<MediaSource>,
    target: String,
    relationship_id: u32,
    object_id: Option<u32>,
    extension: Option<String>,
}

impl MediaEntry {
    #[inline]
    pub fn content_key(&self) -> &str {
        &self.content_key
    }

    #[inline]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Payload source; `None` for hyperlinks.
    #[inline]
    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    /// Path relative to the `word/` folder, or the URL of a hyperlink.
    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[inline]
    pub fn relationship_id(&self) -> u32 {
        self.relationship_id
    }

    /// `rId<n>` form used in markup.
    pub fn rid(&self) -> String {
        format!("rId{}", self.relationship_id)
    }

    #[inline]
    pub fn object_id(&self) -> Option<u32> {
        self.object_id
    }

    #[inline]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    #[inline]
    pub fn is_generated(&self) -> bool {
        self.source.as_ref().is_some_and(MediaSource::is_generated)
    }

    /// Whether the relationship points outside the package.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.kind == MediaKind::Hyperlink
    }
}

/// Identifiers handed back to the caller of a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub relationship_id: u32,
    pub target: String,
}

impl MediaRef {
    pub fn rid(&self) -> String {
        format!("rId{}", self.relationship_id)
    }
}

#[derive(Debug, Default, Clone)]
struct ScopeTable {
    entries: Vec<MediaEntry>,
    index: HashMap<String, usize>,
    images: u32,
    embeddings: u32,
}

impl ScopeTable {
    fn find(&self, key: &str) -> Option<&MediaEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    fn push(&mut self, entry: MediaEntry) -> &MediaEntry {
        let i = self.entries.len();
        self.index.insert(entry.content_key.clone(), i);
        self.entries.push(entry);
        &self.entries[i]
    }

    fn next_id(&self, scope: MediaScope) -> u32 {
        scope.base_offset() + self.entries.len() as u32
    }
}

/// Media of one document, grouped by scope.
#[derive(Debug, Default, Clone)]
pub struct MediaRegistry {
    scopes: HashMap<MediaScope, ScopeTable>,
    extensions: Vec<String>,
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn note_extension(&mut self, extension: &str) {
        if !self.extensions.iter().any(|e| e == extension) {
            self.extensions.push(extension.to_string());
        }
    }

    /// Register an image.
    pub fn register_image(&mut self, scope: MediaScope, source: &MediaSource) -> Result<MediaRef> {
        let extension = source
            .extension()
            .filter(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| {
                MediaError::unsupported(source.locator(), source.extension().unwrap_or_default())
            })?;
        let key = source.content_key(MediaKind::Image.tag());
        let table = self.scopes.entry(scope).or_default();
        if let Some(existing) = table.find(&key) {
            debug!("image {} already registered in {} as {}", source.locator(), scope, existing.rid());
            return Ok(MediaRef {
                relationship_id: existing.relationship_id,
                target: existing.target.clone(),
            });
        }

        table.images += 1;
        let target = format!("media/{}_image{}.{}", scope.prefix(), table.images, extension);
        let relationship_id = table.next_id(scope);
        let entry = table.push(MediaEntry {
            content_key: key,
            kind: MediaKind::Image,
            source: Some(source.clone()),
            target,
            relationship_id,
            object_id: None,
            extension: Some(extension.clone()),
        });
        debug!("registered image {} in {} as rId{}", entry.target, scope, relationship_id);
        let media_ref = MediaRef {
            relationship_id,
            target: entry.target.clone(),
        };
        self.note_extension(&extension);
        Ok(media_ref)
    }

    /// Register an embedded object. Returns its reference and `ObjectID`.
    pub fn register_embedding(&mut self, scope: MediaScope, source: &MediaSource) -> Result<(MediaRef, u32)> {
        let original = source.extension().unwrap_or_default();
        if !OBJECT_EXTENSIONS.contains(&original.as_str()) {
            return Err(MediaError::unsupported(source.locator(), original));
        }
        let key = source.content_key(MediaKind::Embedding.tag());
        let table = self.scopes.entry(scope).or_default();
        if let Some(existing) = table.find(&key) {
            debug!("object {} already registered in {} as {}", source.locator(), scope, existing.rid());
            let object_id = existing
                .object_id
                .unwrap_or(existing.relationship_id + OBJECT_ID_OFFSET);
            return Ok((
                MediaRef {
                    relationship_id: existing.relationship_id,
                    target: existing.target.clone(),
                },
                object_id,
            ));
        }

        table.embeddings += 1;
        let target = format!("embeddings/{}_oleObject{}.bin", scope.prefix(), table.embeddings);
        let relationship_id = table.next_id(scope);
        let object_id = relationship_id + OBJECT_ID_OFFSET;
        let entry = table.push(MediaEntry {
            content_key: key,
            kind: MediaKind::Embedding,
            source: Some(source.clone()),
            target,
            relationship_id,
            object_id: Some(object_id),
            extension: Some("bin".to_string()),
        });
        debug!("registered object {} in {} as rId{}", entry.target, scope, relationship_id);
        let media_ref = MediaRef {
            relationship_id,
            target: entry.target.clone(),
        };
        self.note_extension("bin");
        Ok((media_ref, object_id))
    }

    /// Register an external hyperlink; returns its relationship id.
    pub fn register_hyperlink(&mut self, scope: MediaScope, target: &str) -> Result<u32> {
        let key = link_key(target);
        let table = self.scopes.entry(scope).or_default();
        if let Some(existing) = table.find(&key) {
            return Ok(existing.relationship_id);
        }
        let relationship_id = table.next_id(scope);
        table.push(MediaEntry {
            content_key: key,
            kind: MediaKind::Hyperlink,
            source: None,
            target: target.to_string(),
            relationship_id,
            object_id: None,
            extension: None,
        });
        debug!("registered hyperlink {} in {} as rId{}", target, scope, relationship_id);
        Ok(relationship_id)
    }

    /// Entries of a scope in registration order.
    pub fn entries(&self, scope: MediaScope) -> &[MediaEntry] {
        self.scopes
            .get(&scope)
            .map(|t| t.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn section_media_elements(&self) -> &[MediaEntry] {
        self.entries(MediaScope::Section)
    }

    pub fn header_media_elements(&self, header: u32) -> &[MediaEntry] {
        self.entries(MediaScope::Header(header))
    }

    pub fn footer_media_elements(&self, footer: u32) -> &[MediaEntry] {
        self.entries(MediaScope::Footer(footer))
    }

    pub fn count(&self, scope: MediaScope) -> usize {
        self.entries(scope).len()
    }

    /// Every packaged entry (images and objects) across all scopes, sorted by
    /// scope then registration order.
    pub fn payload_entries(&self) -> Vec<&MediaEntry> {
        let mut scopes: Vec<&MediaScope> = self.scopes.keys().collect();
        scopes.sort();
        scopes
            .into_iter()
            .flat_map(|scope| self.entries(*scope))
            .filter(|entry| !entry.is_external())
            .collect()
    }

    /// Distinct extensions of packaged payloads, in first-use order.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether any embedded object was registered.
    pub fn has_embeddings(&self) -> bool {
        self.extensions.iter().any(|e| e == "bin")
    }
}
