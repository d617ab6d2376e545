//! Embedding provider trait.

/// Turns text into a vector of reals.
///
/// Gate decisions must be reproducible, so the calculator refuses an
/// embedder that reports `is_deterministic() == false` unless it is
/// wrapped in an unbounded [`super::CachingEmbedder`].
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    fn embed(&self, text: &str) -> Vec<f64>;

    /// Natural dimensionality of this embedder's vectors.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether identical input always yields an identical vector.
    fn is_deterministic(&self) -> bool {
        true
    }
}

/// Adapts a closure into an [`Embedder`].
pub struct FnEmbedder<F> {
    name: String,
    dimensions: usize,
    deterministic: bool,
    func: F,
}

impl<F> FnEmbedder<F>
where
    F: Fn(&str) -> Vec<f64> + Send + Sync,
{
    pub fn new(name: impl Into<String>, dimensions: usize, func: F) -> Self {
        Self {
            name: name.into(),
            dimensions,
            deterministic: true,
            func,
        }
    }

    /// Mark the closure as non-deterministic (e.g. a remote model).
    pub fn nondeterministic(mut self) -> Self {
        self.deterministic = false;
        self
    }
}

impl<F> Embedder for FnEmbedder<F>
where
    F: Fn(&str) -> Vec<f64> + Send + Sync,
{
    fn embed(&self, text: &str) -> Vec<f64> {
        (self.func)(text)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_deterministic(&self) -> bool {
        self.deterministic
    }
}
