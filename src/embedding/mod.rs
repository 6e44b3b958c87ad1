//! Text-to-vector embedding pipeline and embedding record storage.
//!
//! Provides the [`EmbeddingProvider`] trait and a local implementation using
//! all-MiniLM-L6-v2 (384 dimensions, L2-normalized), plus the pieces around it:
//! searchable-text extraction ([`text`]), on-disk records ([`record`]) and
//! [`cosine_similarity`].

pub mod local;
pub mod record;
pub mod text;

use std::sync::Arc;

use anyhow::Result;

use crate::error::EmbeddingError;

/// Number of dimensions in the embedding vectors (all-MiniLM-L6-v2).
pub const EMBEDDING_DIM: usize = 384;

/// Trait for embedding text into vectors.
///
/// All methods are synchronous — callers in async contexts should go through
/// [`embed_text`], which runs the model on the blocking pool.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string into a vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of text strings. Implementations may override for batched inference.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// The model handle shared by every writer, scanner and search.
pub type SharedProvider = Arc<dyn EmbeddingProvider>;

/// Create an embedding provider from config.
///
/// Currently only `"local"` is supported (ONNX Runtime + all-MiniLM-L6-v2).
/// Returns an error if model files are not found — run `private-journal model download` first.
pub fn create_provider(config: &crate::config::EmbeddingConfig) -> Result<SharedProvider> {
    match config.provider.as_str() {
        "local" => {
            let provider = local::LocalEmbeddingProvider::new(config)?;
            Ok(Arc::new(provider))
        }
        other => anyhow::bail!("unknown embedding provider: {other}. Supported: local"),
    }
}

/// Embed `text` on the blocking pool. Empty or whitespace-only text is refused.
pub async fn embed_text(provider: &SharedProvider, text: &str) -> Result<Vec<f32>, EmbeddingError> {
    if text.trim().is_empty() {
        return Err(EmbeddingError::EmptyText);
    }
    let provider = Arc::clone(provider);
    let text = text.to_string();
    tokio::task::spawn_blocking(move || provider.embed(&text))
        .await?
        .map_err(EmbeddingError::Model)
}

/// Cosine similarity in `[-1, 1]`. Zero vectors and mismatched lengths score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(Vec<f32>);

    impl EmbeddingProvider for Constant {
        fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn identical_vectors_score_one() {
        let v = vec![0.3, -1.2, 4.0, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn opposite_vectors_score_minus_one() {
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn mismatched_lengths_score_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn embed_text_refuses_blank_input() {
        let provider: SharedProvider = Arc::new(Constant(vec![1.0]));
        let err = embed_text(&provider, "  \n\t").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::EmptyText));

        let v = embed_text(&provider, "hello").await.unwrap();
        assert_eq!(v, vec![1.0]);
    }
}
