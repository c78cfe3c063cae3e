//! # DecoPlan Core
//!
//! Shared types for the DecoPlan furniture retrieval service.
//!
//! - [`CatalogItem`] - A furniture record with a per-query relevance score
//! - [`AttributeFilter`] - Exact-match filter over item attributes
//! - [`Retriever`] / [`PromptAugmenter`] - Contracts the HTTP layer calls into
//! - [`Embedder`] - Text to [`Vector`] mapping used by retrieval backends
//!
//! ## Example
//!
//! ```rust
//! use decoplan_core::{AttributeFilter, CatalogItem, Filter};
//! use serde_json::json;
//!
//! let item = CatalogItem::new("sofa-1", "Velvet Sofa", "Sofa", "Modern");
//! let filter = AttributeFilter::default().with("Style", json!("Modern"));
//! assert!(filter.matches(&item));
//! ```

pub mod item;
pub mod filter;
pub mod vector;
pub mod embedder;
pub mod retriever;
pub mod error;

pub use item::CatalogItem;
pub use filter::{AttributeFilter, Filter};
pub use vector::Vector;
pub use embedder::{Embedder, HashingEmbedder, DEFAULT_EMBEDDING_DIM};
pub use retriever::{
    clamp_n_results, CatalogStats, PromptAugmenter, Retriever, DEFAULT_N_RESULTS, MAX_N_RESULTS,
};
pub use error::{Error, Result};
