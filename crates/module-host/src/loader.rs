//! The single-flight remote module loader.
//!
//! For a given URL at most one load is ever in flight; concurrent
//! callers wait on that load by polling the cache at a fixed interval
//! and all observe the same eventual outcome. Failures are cached and
//! replayed without retrying.

use std::sync::Arc;
use std::time::Duration;

use soundstage_overlay_model::RendererHandle;

use crate::cache::{ModuleCache, ModuleEntry};
use crate::provider::{LoadError, ModuleProvider};

/// Loads renderer modules through an injected cache and provider.
pub struct RemoteModuleLoader<P> {
    cache: Arc<dyn ModuleCache>,
    provider: P,
    poll_interval: Duration,
}

impl<P: ModuleProvider> RemoteModuleLoader<P> {
    pub fn new(cache: Arc<dyn ModuleCache>, provider: P) -> Self {
        Self {
            cache,
            provider,
            poll_interval: Duration::from_millis(200),
        }
    }

    /// Interval at which waiters re-check an in-flight entry.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Resolve a renderer for a module URL.
    ///
    /// An empty URL means "no renderer" and resolves immediately. A
    /// cached success returns its handle; a cached failure replays its
    /// error. Otherwise exactly one caller claims the URL and performs
    /// the load while everyone else waits on the same outcome.
    pub async fn load(&self, url: &str) -> Result<Option<RendererHandle>, LoadError> {
        if url.is_empty() {
            return Ok(None);
        }

        loop {
            match self.cache.get(url) {
                Some(ModuleEntry::Loaded(handle)) => {
                    tracing::debug!(url, "Module cache hit");
                    return Ok(Some(handle));
                }
                Some(ModuleEntry::Failed(message)) => {
                    return Err(LoadError::Failed {
                        url: url.to_string(),
                        message,
                    });
                }
                Some(ModuleEntry::Pending) => {
                    tokio::time::sleep(self.poll_interval).await;
                }
                None => {
                    if self.cache.claim(url) {
                        return self.fetch_and_publish(url).await.map(Some);
                    }
                    // Lost the claim race; re-read the entry.
                }
            }
        }
    }

    async fn fetch_and_publish(&self, url: &str) -> Result<RendererHandle, LoadError> {
        tracing::info!(url, "Loading renderer module");
        match self.provider.fetch(url).await {
            Ok(handle) => {
                self.cache.put(url, ModuleEntry::Loaded(handle.clone()));
                tracing::info!(url, renderer = handle.name(), "Renderer module loaded");
                Ok(handle)
            }
            Err(error) => {
                // Cached so later requesters replay the same failure
                // instead of re-fetching.
                self.cache.put(url, ModuleEntry::Failed(error.to_string()));
                tracing::warn!(url, %error, "Renderer module load failed");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use soundstage_overlay_model::Visualizer;

    use crate::cache::SharedModuleCache;

    struct Dummy;

    impl Visualizer for Dummy {
        fn name(&self) -> &str {
            "dummy"
        }
    }

    struct CountingProvider {
        fetches: AtomicUsize,
        fail: bool,
    }

    impl CountingProvider {
        fn new(fail: bool) -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl ModuleProvider for &CountingProvider {
        async fn fetch(&self, url: &str) -> Result<RendererHandle, LoadError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(LoadError::Fetch {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                })
            } else {
                Ok(Arc::new(Dummy))
            }
        }
    }

    #[tokio::test]
    async fn test_empty_url_means_no_renderer() {
        let provider = CountingProvider::new(false);
        let loader = RemoteModuleLoader::new(Arc::new(SharedModuleCache::new()), &provider);

        assert!(loader.load("").await.unwrap().is_none());
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_second_load_hits_cache() {
        let provider = CountingProvider::new(false);
        let loader = RemoteModuleLoader::new(Arc::new(SharedModuleCache::new()), &provider);

        let first = loader.load("https://cdn/viz.js").await.unwrap().unwrap();
        let second = loader.load("https://cdn/viz.js").await.unwrap().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cached_failure_replays_without_retry() {
        let provider = CountingProvider::new(true);
        let loader = RemoteModuleLoader::new(Arc::new(SharedModuleCache::new()), &provider);

        let first = loader.load("https://cdn/viz.js").await.unwrap_err();
        assert!(matches!(first, LoadError::Fetch { .. }));

        let second = loader.load("https://cdn/viz.js").await.unwrap_err();
        assert!(matches!(second, LoadError::Failed { ref message, .. }
            if message.contains("connection refused")));

        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);
    }
}
