//! Build context shared by a document and all of its containers.
use crate::common::Result;
use crate::media::{ContentProvider, FsProvider, ImageCrateInspector, ImageInspector, MediaRegistry};
use crate::style::{StyleError, StyleRef, StyleRegistry};
use log::warn;
use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Base of the numeric part of title bookmark anchors.
pub const TOC_ANCHOR_BASE: u32 = 252_634_154;

/// A title as recorded for the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEntry {
    pub text: String,
    pub depth: u32,
    pub bookmark_id: u32,
}

impl TitleEntry {
    /// Bookmark name, e.g. `_Toc252634154` for the first title.
    pub fn anchor(&self) -> String {
        anchor_for(self.bookmark_id)
    }
}

pub(crate) fn anchor_for(bookmark_id: u32) -> String {
    format!("_Toc{}", TOC_ANCHOR_BASE + bookmark_id)
}

/// Titles of one document in creation order. Bookmark ids are 0-based.
#[derive(Debug, Default, Clone)]
pub struct TitleRegistry {
    titles: Vec<TitleEntry>,
}

impl TitleRegistry {
    pub fn add(&mut self, text: &str, depth: u32) -> u32 {
        let bookmark_id = self.titles.len() as u32;
        self.titles.push(TitleEntry {
            text: text.to_string(),
            depth,
            bookmark_id,
        });
        bookmark_id
    }

    pub fn titles(&self) -> &[TitleEntry] {
        &self.titles
    }
}

#[derive(Debug, Default)]
struct Counters {
    footnotes: u32,
    headers: u32,
    footers: u32,
    sections: u32,
}

/// Registries and counters of one document.
///
/// Cloning is cheap and yields a handle to the same registries; a fresh
/// context is created with every [`Document`](super::Document).
#[derive(Debug, Clone)]
pub struct BuildContext {
    styles: Arc<RwLock<StyleRegistry>>,
    media: Arc<Mutex<MediaRegistry>>,
    titles: Arc<Mutex<TitleRegistry>>,
    counters: Arc<Mutex<Counters>>,
    provider: Arc<dyn ContentProvider>,
    inspector: Arc<dyn ImageInspector>,
    strict_style_names: Arc<AtomicBool>,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::new(Arc::new(FsProvider), Arc::new(ImageCrateInspector))
    }
}

impl BuildContext {
    pub fn new(provider: Arc<dyn ContentProvider>, inspector: Arc<dyn ImageInspector>) -> Self {
        Self {
            styles: Arc::new(RwLock::new(StyleRegistry::new())),
            media: Arc::new(Mutex::new(MediaRegistry::new())),
            titles: Arc::new(Mutex::new(TitleRegistry::default())),
            counters: Arc::new(Mutex::new(Counters::default())),
            provider,
            inspector,
            strict_style_names: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether style names that cannot be resolved are errors.
    pub fn strict_style_names(&self) -> bool {
        self.strict_style_names.load(Ordering::Relaxed)
    }

    pub(crate) fn set_strict_style_names(&self, strict: bool) {
        self.strict_style_names.store(strict, Ordering::Relaxed);
    }

    /// Resolve the style of an image, row or cell. These styles have no
    /// registry, so a name is an error in strict mode and falls back to the
    /// default otherwise.
    pub(crate) fn owned_style<T: Default>(&self, style: StyleRef<T>, kind: &str) -> Result<T> {
        match style {
            StyleRef::Default => Ok(T::default()),
            StyleRef::Inline(style) => Ok(style),
            StyleRef::Named(name) if self.strict_style_names() => Err(StyleError::UnknownStyleName(name).into()),
            StyleRef::Named(name) => {
                warn!("{} style '{}' cannot be referenced by name, using the default", kind, name);
                Ok(T::default())
            },
        }
    }

    pub fn styles(&self) -> RwLockReadGuard<'_, StyleRegistry> {
        self.styles.read()
    }

    pub fn styles_mut(&self) -> RwLockWriteGuard<'_, StyleRegistry> {
        self.styles.write()
    }

    pub fn media(&self) -> MutexGuard<'_, MediaRegistry> {
        self.media.lock()
    }

    pub fn titles(&self) -> MutexGuard<'_, TitleRegistry> {
        self.titles.lock()
    }

    pub fn provider(&self) -> &dyn ContentProvider {
        self.provider.as_ref()
    }

    pub fn inspector(&self) -> &dyn ImageInspector {
        self.inspector.as_ref()
    }

    /// Next footnote id, starting at 1.
    pub(crate) fn next_footnote_id(&self) -> u32 {
        let mut counters = self.counters.lock();
        counters.footnotes += 1;
        counters.footnotes
    }

    /// Next header sequence number, starting at 1.
    pub(crate) fn next_header(&self) -> u32 {
        let mut counters = self.counters.lock();
        counters.headers += 1;
        counters.headers
    }

    /// Next footer sequence number, starting at 1.
    pub(crate) fn next_footer(&self) -> u32 {
        let mut counters = self.counters.lock();
        counters.footers += 1;
        counters.footers
    }

    pub(crate) fn next_section(&self) -> u32 {
        let mut counters = self.counters.lock();
        counters.sections += 1;
        counters.sections
    }

    /// Number of footnotes created so far.
    pub fn footnote_count(&self) -> u32 {
        self.counters.lock().footnotes
    }
}
