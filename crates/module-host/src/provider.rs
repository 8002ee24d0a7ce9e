//! The module provider seam.
//!
//! `ModuleProvider` hides how a URL becomes a renderer. The shipped
//! [`RegistryProvider`] resolves a named binding from the process-local
//! [`ExportRegistry`]; hosts with a real script or dynamic-library
//! runtime implement the same one-method trait over their own
//! fetch-and-execute path.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use soundstage_overlay_model::{RendererHandle, VISUALIZER_CAPABILITY};

use crate::registry::ExportRegistry;

/// Binding name used when nothing better can be derived from the URL.
pub const DEFAULT_EXPORT_NAME: &str = "RemoteModule";

/// Module load failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("module fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("export '{name}' not found after loading {url}")]
    MissingExport { name: String, url: String },

    #[error("module load previously failed for {url}: {message}")]
    Failed { url: String, message: String },
}

/// Resolves a module URL to a renderer. The concrete mechanism is an
/// implementation detail behind this one method.
pub trait ModuleProvider: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<RendererHandle, LoadError>> + Send;
}

/// Derive the binding name a module is expected to publish under:
/// an explicit hint wins, else the URL's file stem, else a default.
pub fn derive_export_name(url: &str, hint: Option<&str>) -> String {
    if let Some(hint) = hint {
        if !hint.is_empty() {
            return hint.to_string();
        }
    }

    let without_query = url.split_once('?').map_or(url, |(p, _)| p);
    let path = without_query
        .split_once('#')
        .map_or(without_query, |(p, _)| p);

    let stem = path
        .rsplit('/')
        .next()
        .map(|file| file.split_once('.').map(|(s, _)| s).unwrap_or(file))
        .unwrap_or("");

    if stem.is_empty() {
        DEFAULT_EXPORT_NAME.to_string()
    } else {
        stem.to_string()
    }
}

/// Provider that resolves exports from the process-local registry.
pub struct RegistryProvider {
    registry: Arc<ExportRegistry>,

    /// Explicit binding name; derived from the URL when absent.
    export_hint: Option<String>,

    /// Capability to resolve from the exports.
    capability: String,

    /// Delay before the second (and final) lookup of a missing binding.
    /// Covers exports that attach late relative to module execution.
    export_grace: Duration,
}

impl RegistryProvider {
    pub fn new(registry: Arc<ExportRegistry>) -> Self {
        Self {
            registry,
            export_hint: None,
            capability: VISUALIZER_CAPABILITY.to_string(),
            export_grace: Duration::from_millis(1000),
        }
    }

    pub fn with_export_hint(mut self, hint: impl Into<String>) -> Self {
        self.export_hint = Some(hint.into());
        self
    }

    pub fn with_export_grace(mut self, grace: Duration) -> Self {
        self.export_grace = grace;
        self
    }

    fn resolve(&self, name: &str, url: &str) -> Option<Result<RendererHandle, LoadError>> {
        let exports = self.registry.lookup(name)?;
        Some(
            exports
                .resolve_capability(&self.capability)
                .ok_or_else(|| LoadError::MissingExport {
                    name: self.capability.clone(),
                    url: url.to_string(),
                }),
        )
    }
}

impl ModuleProvider for RegistryProvider {
    async fn fetch(&self, url: &str) -> Result<RendererHandle, LoadError> {
        let name = derive_export_name(url, self.export_hint.as_deref());
        tracing::debug!(url, binding = %name, "Resolving module exports");

        if let Some(result) = self.resolve(&name, url) {
            return result;
        }

        // The binding may not have attached yet; check exactly once more.
        tokio::time::sleep(self.export_grace).await;
        match self.resolve(&name, url) {
            Some(result) => result,
            None => Err(LoadError::MissingExport {
                name,
                url: url.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundstage_overlay_model::{ModuleExports, Visualizer};

    struct Dummy(&'static str);

    impl Visualizer for Dummy {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_derive_export_name() {
        assert_eq!(
            derive_export_name("https://cdn.example/mods/WaveViz.js", None),
            "WaveViz"
        );
        assert_eq!(
            derive_export_name("https://cdn.example/mods/WaveViz.min.js?v=3", None),
            "WaveViz"
        );
        assert_eq!(derive_export_name("https://cdn.example/", None), DEFAULT_EXPORT_NAME);
        assert_eq!(derive_export_name("anything", Some("video")), "video");
    }

    #[tokio::test]
    async fn test_fetch_resolves_published_binding() {
        let registry = Arc::new(ExportRegistry::new());
        registry.publish(
            "WaveViz",
            ModuleExports::Renderer(Arc::new(Dummy("wave"))),
        );

        let provider = RegistryProvider::new(registry)
            .with_export_grace(Duration::from_millis(1));
        let handle = provider
            .fetch("https://cdn.example/mods/WaveViz.js")
            .await
            .unwrap();
        assert_eq!(handle.name(), "wave");
    }

    #[tokio::test]
    async fn test_fetch_retries_once_for_late_binding() {
        let registry = Arc::new(ExportRegistry::new());
        let provider = RegistryProvider::new(registry.clone())
            .with_export_grace(Duration::from_millis(50));

        let publisher = tokio::spawn({
            let registry = registry.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                registry.publish("Late", ModuleExports::Renderer(Arc::new(Dummy("late"))));
            }
        });

        let handle = provider.fetch("https://cdn.example/Late.js").await.unwrap();
        assert_eq!(handle.name(), "late");
        publisher.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_fails_after_single_retry() {
        let registry = Arc::new(ExportRegistry::new());
        let provider = RegistryProvider::new(registry)
            .with_export_grace(Duration::from_millis(1));

        let err = provider
            .fetch("https://cdn.example/Absent.js")
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingExport { ref name, .. } if name == "Absent"));
    }
}
