//! Process-wide descriptor cache
//!
//! Resolution runs at most once per cache. The first caller starts it; every
//! caller that arrives while it is in flight awaits that same computation
//! rather than starting its own, and all of them then share the result.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};
use tokio::sync::OnceCell;
use tracing::info;

use crate::component::resolver::ResolvedConfig;
use crate::config::LoaderOptions;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::LoaderError;

static GLOBAL_CACHE: LazyLock<Arc<DescriptorCache>> =
    LazyLock::new(|| Arc::new(DescriptorCache::new()));

struct CacheEntry {
    options: LoaderOptions,
    resolved: Arc<ResolvedConfig>,
}

/// Memoized, single-flight resolution state
pub struct DescriptorCache {
    entry: OnceCell<CacheEntry>,
    /// Resolution computations started, including failed ones
    started: AtomicUsize,
}

impl Default for DescriptorCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self {
            entry: OnceCell::new(),
            started: AtomicUsize::new(0),
        }
    }

    /// The cache shared by every loader in the process
    pub fn global() -> Arc<DescriptorCache> {
        Arc::clone(&GLOBAL_CACHE)
    }

    /// Cached resolution, if one has completed
    pub fn get(&self) -> Option<Arc<ResolvedConfig>> {
        self.entry.get().map(|entry| Arc::clone(&entry.resolved))
    }

    pub fn is_resolved(&self) -> bool {
        self.entry.initialized()
    }

    /// Number of resolution computations started so far
    pub fn resolutions_started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Return the cached resolution, running `resolve` if there is none yet.
    ///
    /// Concurrent callers wait for the in-flight computation. If it fails, the
    /// error goes to the caller that ran it and the next waiting caller tries
    /// again with its own `resolve`.
    pub async fn get_or_resolve<F, Fut>(
        &self,
        options: &LoaderOptions,
        diagnostics: &Diagnostics<'_>,
        resolve: F,
    ) -> Result<Arc<ResolvedConfig>, LoaderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ResolvedConfig, LoaderError>>,
    {
        let entry = self
            .entry
            .get_or_try_init(move || async move {
                self.started.fetch_add(1, Ordering::SeqCst);
                let resolved = resolve().await?;
                info!(
                    "Cached {} component descriptors and {} base styles",
                    resolved.descriptors.len(),
                    resolved.base_styles.len()
                );
                Ok::<_, LoaderError>(CacheEntry {
                    options: options.clone(),
                    resolved: Arc::new(resolved),
                })
            })
            .await?;

        if entry.options != *options {
            diagnostics.report(Diagnostic::StaleOptions);
        }
        Ok(Arc::clone(&entry.resolved))
    }
}
