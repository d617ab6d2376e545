//! Deterministic character-statistics embedder.

use sdf_core::constants::DEFAULT_MAX_EMBED_CHARS;

use super::embedder::Embedder;

/// Three-dimensional `(sum, mean, variance)` of the code points in the
/// first `max_chars` characters of the trimmed text.
///
/// A content-volume and shape signal, stable under leading/trailing
/// whitespace changes. No model required.
#[derive(Debug, Clone, Copy)]
pub struct FallbackEmbedder {
    max_chars: usize,
}

impl Default for FallbackEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EMBED_CHARS)
    }
}

impl FallbackEmbedder {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Embedder for FallbackEmbedder {
    fn embed(&self, text: &str) -> Vec<f64> {
        let codes: Vec<f64> = text
            .trim()
            .chars()
            .take(self.max_chars)
            .map(|c| f64::from(u32::from(c)))
            .collect();
        if codes.is_empty() {
            return vec![0.0; 3];
        }

        let n = codes.len() as f64;
        let total: f64 = codes.iter().sum();
        let mean = total / n;
        let variance = codes.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
        vec![total, mean, variance]
    }

    fn dimensions(&self) -> usize {
        3
    }

    fn name(&self) -> &str {
        "fallback-char-stats"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_zero_vector() {
        assert_eq!(FallbackEmbedder::default().embed("  \n\t "), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_known_statistics() {
        // 'a' = 97, 'c' = 99
        let v = FallbackEmbedder::default().embed(" ac\n");
        assert_eq!(v, vec![196.0, 98.0, 1.0]);
    }

    #[test]
    fn test_only_prefix_is_considered() {
        let e = FallbackEmbedder::new(2);
        assert_eq!(e.embed("abXYZ"), e.embed("ab"));
    }
}
