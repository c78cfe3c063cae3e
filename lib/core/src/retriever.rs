use crate::{AttributeFilter, CatalogItem, Result};
use serde::{Deserialize, Serialize};

/// Result count used when a request does not ask for one
pub const DEFAULT_N_RESULTS: usize = 15;

/// Upper bound on results a single retrieval may return
pub const MAX_N_RESULTS: usize = 100;

/// Semantic search over the furniture catalog.
///
/// Results come back in descending relevance; callers must not reorder them.
pub trait Retriever: Send + Sync {
    fn retrieve(
        &self,
        query: &str,
        n_results: usize,
        filter: &AttributeFilter,
    ) -> Result<Vec<CatalogItem>>;

    fn stats(&self) -> Result<CatalogStats>;
}

/// Builds a prompt for the generative model with catalog items as context
pub trait PromptAugmenter: Send + Sync {
    fn create_prompt_with_context(
        &self,
        user_prompt: &str,
        room_type: Option<&str>,
        style: Option<&str>,
        n_items: usize,
    ) -> Result<String>;
}

/// Summary of the catalog behind a retriever
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    #[serde(default)]
    pub total_items: usize,
    #[serde(default)]
    pub embedding_dim: usize,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub room_types: Vec<String>,
    #[serde(default)]
    pub furniture_types: Vec<String>,
}

/// Clamp a requested result count to [`MAX_N_RESULTS`]
#[inline]
pub fn clamp_n_results(requested: usize) -> usize {
    requested.min(MAX_N_RESULTS)
}
