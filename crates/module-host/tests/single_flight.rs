//! Concurrency tests for the single-flight loading guarantee.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use soundstage_module_host::{
    LoadError, ModuleProvider, RemoteModuleLoader, SharedModuleCache,
};
use soundstage_overlay_model::{RendererHandle, Visualizer};

struct SlowVisualizer;

impl Visualizer for SlowVisualizer {
    fn name(&self) -> &str {
        "slow"
    }
}

/// Provider that takes long enough for callers to overlap.
struct SlowProvider {
    fetches: Arc<AtomicUsize>,
    delay: Duration,
    fail: bool,
}

impl ModuleProvider for SlowProvider {
    async fn fetch(&self, url: &str) -> Result<RendererHandle, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.fail {
            Err(LoadError::Fetch {
                url: url.to_string(),
                message: "unreachable".to_string(),
            })
        } else {
            Ok(Arc::new(SlowVisualizer))
        }
    }
}

fn loader(fail: bool, fetches: Arc<AtomicUsize>) -> Arc<RemoteModuleLoader<SlowProvider>> {
    let provider = SlowProvider {
        fetches,
        delay: Duration::from_millis(50),
        fail,
    };
    Arc::new(
        RemoteModuleLoader::new(Arc::new(SharedModuleCache::new()), provider)
            .with_poll_interval(Duration::from_millis(5)),
    )
}

#[tokio::test]
async fn concurrent_loads_share_one_fetch() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let loader = loader(false, fetches.clone());

    let url = "https://cdn.example/modules/viz-1.2.0.js";
    let a = tokio::spawn({
        let loader = loader.clone();
        async move { loader.load(url).await }
    });
    let b = tokio::spawn({
        let loader = loader.clone();
        async move { loader.load(url).await }
    });

    let handle_a = a.await.unwrap().unwrap().unwrap();
    let handle_b = b.await.unwrap().unwrap().unwrap();

    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&handle_a, &handle_b));
}

#[tokio::test]
async fn concurrent_failures_share_one_fetch() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let loader = loader(true, fetches.clone());

    let url = "https://cdn.example/modules/broken.js";
    let a = tokio::spawn({
        let loader = loader.clone();
        async move { loader.load(url).await }
    });
    let b = tokio::spawn({
        let loader = loader.clone();
        async move { loader.load(url).await }
    });

    let err_a = a.await.unwrap().unwrap_err();
    let err_b = b.await.unwrap().unwrap_err();

    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    // One caller owns the fetch and sees the original error; the other
    // observes the cached failure. Both carry the same message.
    let message = |e: &LoadError| e.to_string();
    assert!(message(&err_a).contains("unreachable"));
    assert!(message(&err_b).contains("unreachable"));
}

#[tokio::test]
async fn distinct_urls_fetch_independently() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let loader = loader(false, fetches.clone());

    let a = loader.load("https://cdn.example/a.js").await.unwrap();
    let b = loader.load("https://cdn.example/b.js").await.unwrap();

    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    assert!(!Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
}
