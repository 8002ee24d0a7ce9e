//! Soundstage Module Host
//!
//! Loads the visual renderer from an externally hosted module:
//! - **Registry:** Process-local named bindings that executed modules
//!   publish their exports into
//! - **Provider:** The `ModuleProvider` seam hiding the concrete load
//!   mechanism (registry lookup here; script or dynamic-library hosts
//!   bring their own)
//! - **Cache:** An explicit, injectable per-URL cache with an atomic
//!   claim, enforcing the single-flight guarantee: concurrent requests
//!   for one URL collapse into one underlying load
//!
//! Module failures are non-fatal to the host: the overlay simply
//! renders without a visual layer.

pub mod cache;
pub mod loader;
pub mod provider;
pub mod registry;

pub use cache::{ModuleCache, ModuleEntry, SharedModuleCache};
pub use loader::RemoteModuleLoader;
pub use provider::{LoadError, ModuleProvider, RegistryProvider};
pub use registry::ExportRegistry;
