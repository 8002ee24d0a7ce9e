//! The injectable per-URL module cache.
//!
//! One entry per URL for the life of the process; no eviction. A URL is
//! written at most once per outcome: `Pending` while a load is in
//! flight, then `Loaded` or `Failed` forever after. The atomic `claim`
//! is what makes the single-flight guarantee explicit rather than
//! incidental.

use std::collections::HashMap;

use parking_lot::Mutex;
use soundstage_overlay_model::RendererHandle;

/// Cache entry for one module URL.
#[derive(Clone)]
pub enum ModuleEntry {
    /// A load is in flight.
    Pending,

    /// The module resolved to a renderer.
    Loaded(RendererHandle),

    /// The load failed; the message replays to every later requester.
    Failed(String),
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleEntry::Pending => write!(f, "Pending"),
            ModuleEntry::Loaded(handle) => f.debug_tuple("Loaded").field(&handle.name()).finish(),
            ModuleEntry::Failed(message) => f.debug_tuple("Failed").field(message).finish(),
        }
    }
}

/// Cache service injected into the loader.
pub trait ModuleCache: Send + Sync {
    /// Current entry for a URL, if any.
    fn get(&self, url: &str) -> Option<ModuleEntry>;

    /// Publish an entry for a URL.
    fn put(&self, url: &str, entry: ModuleEntry);

    /// Whether a load for this URL is currently in flight.
    fn has_in_flight(&self, url: &str) -> bool;

    /// Atomically claim the load for a URL.
    ///
    /// Returns true and records `Pending` only when the URL has no entry
    /// at all; exactly one concurrent caller wins.
    fn claim(&self, url: &str) -> bool;
}

/// The process-wide cache implementation.
#[derive(Default)]
pub struct SharedModuleCache {
    entries: Mutex<HashMap<String, ModuleEntry>>,
}

impl SharedModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached URLs (any status).
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl ModuleCache for SharedModuleCache {
    fn get(&self, url: &str) -> Option<ModuleEntry> {
        self.entries.lock().get(url).cloned()
    }

    fn put(&self, url: &str, entry: ModuleEntry) {
        self.entries.lock().insert(url.to_string(), entry);
    }

    fn has_in_flight(&self, url: &str) -> bool {
        matches!(self.entries.lock().get(url), Some(ModuleEntry::Pending))
    }

    fn claim(&self, url: &str) -> bool {
        let mut entries = self.entries.lock();
        if entries.contains_key(url) {
            return false;
        }
        entries.insert(url.to_string(), ModuleEntry::Pending);
        true
    }
}
