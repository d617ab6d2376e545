//! Content-hash keyed embedding cache.

use std::sync::Arc;

use moka::sync::Cache;
use xxhash_rust::xxh3::xxh3_128;

use super::embedder::Embedder;

/// Wraps an embedder so that identical text always maps to the vector
/// first produced for it.
///
/// Keys are xxh3-128 hashes of the text. Entries never expire by time.
/// The unbounded cache from [`CachingEmbedder::new`] keeps every entry for
/// the life of the process, which makes a non-deterministic inner embedder
/// reproducible. A bounded cache may evict and re-embed, so it is only
/// deterministic when the inner embedder is.
pub struct CachingEmbedder {
    inner: Arc<dyn Embedder>,
    cache: Cache<u128, Arc<Vec<f64>>>,
    bounded: bool,
    name: String,
}

impl CachingEmbedder {
    pub fn new(inner: Arc<dyn Embedder>) -> Self {
        let name = format!("cached({})", inner.name());
        Self {
            inner,
            cache: Cache::builder().build(),
            bounded: false,
            name,
        }
    }

    pub fn with_capacity(inner: Arc<dyn Embedder>, max_entries: u64) -> Self {
        let name = format!("cached({})", inner.name());
        Self {
            inner,
            cache: Cache::builder().max_capacity(max_entries).build(),
            bounded: true,
            name,
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Embedder for CachingEmbedder {
    fn embed(&self, text: &str) -> Vec<f64> {
        let key = xxh3_128(text.as_bytes());
        let vector = self
            .cache
            .get_with(key, || Arc::new(self.inner.embed(text)));
        vector.as_ref().clone()
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_deterministic(&self) -> bool {
        !self.bounded || self.inner.is_deterministic()
    }
}
