//! # DecoPlan
//!
//! Semantic retrieval over a furniture catalog, exposed as a small REST API,
//! plus retrieval-augmented prompt assembly for a downstream generative model.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! decoplan serve --db-path ./furniture_db --port 5000
//! curl -X POST localhost:5000/api/search -H 'content-type: application/json' \
//!      -d '{"query": "modern sofa", "n_results": 3}'
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use decoplan::prelude::*;
//!
//! let store = FurnitureStore::open("./furniture_db")?;
//! let filter = AttributeFilter::default();
//! for item in store.retrieve("modern sofa", 3, &filter)? {
//!     println!("{} ({:.3})", item.name, item.relevance_score);
//! }
//! # Ok::<(), decoplan::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! - `decoplan-core` - Catalog items, attribute filters, retrieval contracts, embedders
//! - `decoplan-storage` - On-disk catalog store and prompt builder
//! - `decoplan-api` - actix-web REST API
//! - `decoplan-training` - LoRA fine-tuning configuration tables
//!
//! ## Endpoints
//!
//! - `GET /health`
//! - `POST /api/search`, `POST /api/recommendations`, `POST /api/batch-search`
//! - `POST /api/enhance-prompt`
//! - `GET /api/stats`, `GET /api/filters`

// Re-export core types
pub use decoplan_core::{
    AttributeFilter, CatalogItem, CatalogStats, Filter,
    Embedder, HashingEmbedder, Vector,
    PromptAugmenter, Retriever,
    Error, Result,
    DEFAULT_N_RESULTS, MAX_N_RESULTS,
};

// Re-export storage
pub use decoplan_storage::{FurnitureStore, PromptBuilder};

// Re-export API
pub use decoplan_api::{ApiError, AppState, RestApi};

pub use decoplan_training as training;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AttributeFilter, CatalogItem, CatalogStats, Filter,
        Embedder, HashingEmbedder,
        PromptAugmenter, Retriever,
        Error, Result,
        FurnitureStore, PromptBuilder,
        AppState, RestApi,
    };
}
