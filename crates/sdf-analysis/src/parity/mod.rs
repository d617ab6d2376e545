//! Parity calculator: textual alignment of the quartet buckets.

pub mod caching;
pub mod calculator;
pub mod embedder;
pub mod fallback;
pub mod types;

pub use caching::CachingEmbedder;
pub use calculator::{calculate_parity, cosine_similarity, weighted_parity, ParityCalculator};
pub use embedder::{Embedder, FnEmbedder};
pub use fallback::FallbackEmbedder;
pub use types::ParityResult;
