//! Text embedders
//!
//! The catalog store only needs *some* deterministic text-to-vector mapping.
//! [`HashingEmbedder`] provides one without model files: character trigrams and
//! whole words are hashed into a fixed number of buckets.

use crate::Vector;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Default dimension for hashed text embeddings
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> Vector;
}

/// Feature-hashing embedder over character trigrams and words
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn bucket(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dim
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl Embedder for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Vector {
        let mut vector = Vector::zeros(self.dim);
        let normalized = text.to_lowercase();

        let data = vector.as_mut_slice();
        for trigram in generate_trigrams(&normalized) {
            data[self.bucket(&trigram)] += 1.0;
        }

        // Words contribute more
        for word in tokenize(&normalized) {
            data[self.bucket(word)] += 2.0;
        }

        vector.normalize();
        vector
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|s| !s.is_empty())
}

/// Character trigrams of each word, padded so short words still produce some
fn generate_trigrams(text: &str) -> HashSet<String> {
    let mut trigrams = HashSet::new();
    for word in tokenize(text) {
        let padded = format!(" {} ", word);
        let chars: Vec<char> = padded.chars().collect();
        for window in chars.windows(3) {
            trigrams.insert(window.iter().collect::<String>());
        }
    }
    trigrams
}
