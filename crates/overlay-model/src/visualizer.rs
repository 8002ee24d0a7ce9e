//! The pluggable renderer contract.
//!
//! A visualizer is the visual layer driven by playback time. It may be
//! supplied in-process or resolved from a remotely loaded module; either
//! way the engine only sees this trait.

use std::collections::HashMap;
use std::sync::Arc;

use crate::scene::Scene;

/// The renderer capability a loaded module is expected to expose.
pub const VISUALIZER_CAPABILITY: &str = "visualizer";

/// A time-driven visual renderer.
///
/// The engine never draws; it places the renderer's canvas (see
/// `soundstage-render-overlay`) and hands it the current time. Scene
/// boundaries are optional: a renderer that knows its own internal cuts
/// publishes them here and they become authoritative.
pub trait Visualizer: Send + Sync {
    /// Stable name, used for diagnostics and export resolution.
    fn name(&self) -> &str;

    /// Scene cuts internal to this renderer, ordered and non-overlapping.
    fn scene_boundaries(&self) -> Option<Vec<Scene>> {
        None
    }
}

impl std::fmt::Debug for dyn Visualizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visualizer")
            .field("name", &self.name())
            .finish()
    }
}

/// Shared handle to a resolved renderer.
pub type RendererHandle = Arc<dyn Visualizer>;

/// What an executed module publishes under its binding name.
#[derive(Clone)]
pub enum ModuleExports {
    /// The binding is the renderer itself.
    Renderer(RendererHandle),

    /// The binding is a bundle of named capabilities.
    Bundle(HashMap<String, RendererHandle>),
}

impl ModuleExports {
    /// Resolve a capability from the exports.
    ///
    /// A bundle that exposes the sought capability name yields that entry;
    /// a bare renderer is itself the capability regardless of name.
    pub fn resolve_capability(&self, capability: &str) -> Option<RendererHandle> {
        match self {
            ModuleExports::Renderer(handle) => Some(handle.clone()),
            ModuleExports::Bundle(bundle) => bundle.get(capability).cloned(),
        }
    }
}

impl std::fmt::Debug for ModuleExports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleExports::Renderer(handle) => {
                f.debug_tuple("Renderer").field(&handle.name()).finish()
            }
            ModuleExports::Bundle(bundle) => {
                let mut names: Vec<&str> = bundle.keys().map(String::as_str).collect();
                names.sort_unstable();
                f.debug_tuple("Bundle").field(&names).finish()
            }
        }
    }
}
