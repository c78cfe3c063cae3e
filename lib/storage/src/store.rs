use crate::catalog::load_catalog;
use decoplan_core::{
    clamp_n_results, AttributeFilter, CatalogItem, CatalogStats, Embedder, Filter,
    HashingEmbedder, Result, Retriever, Vector,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

struct IndexedItem {
    item: CatalogItem,
    vector: Vector,
}

/// Read-only furniture catalog with embedded items
///
/// Items are embedded once when the store is opened. Searches are a linear
/// scan over the filtered items, scored by cosine similarity.
pub struct FurnitureStore {
    db_path: PathBuf,
    embedder: Arc<dyn Embedder>,
    items: Vec<IndexedItem>,
    stats: CatalogStats,
}

impl FurnitureStore {
    /// Open the catalog in `db_path` with the default hashing embedder
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        Self::open_with_embedder(db_path, Arc::new(HashingEmbedder::default()))
    }

    pub fn open_with_embedder<P: AsRef<Path>>(
        db_path: P,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        let items = load_catalog(&db_path)?;
        let store = Self::from_items(items, embedder).with_path(db_path);
        info!(
            "Opened furniture database at {} ({} items)",
            store.db_path.display(),
            store.len()
        );
        Ok(store)
    }

    /// Build a store from items already in memory
    pub fn from_items(items: Vec<CatalogItem>, embedder: Arc<dyn Embedder>) -> Self {
        let mut styles = BTreeSet::new();
        let mut room_types = BTreeSet::new();
        let mut furniture_types = BTreeSet::new();

        let items: Vec<IndexedItem> = items
            .into_iter()
            .map(|item| {
                styles.insert(item.feel.clone());
                furniture_types.insert(item.furniture_type.clone());
                if let Some(room_type) = &item.room_type {
                    room_types.insert(room_type.clone());
                }
                let vector = embedder.embed(&item.searchable_text());
                IndexedItem { item, vector }
            })
            .collect();

        let stats = CatalogStats {
            total_items: items.len(),
            embedding_dim: embedder.dim(),
            styles: styles.into_iter().filter(|s| !s.is_empty()).collect(),
            room_types: room_types.into_iter().filter(|s| !s.is_empty()).collect(),
            furniture_types: furniture_types.into_iter().filter(|s| !s.is_empty()).collect(),
        };

        Self {
            db_path: PathBuf::new(),
            embedder,
            items,
            stats,
        }
    }

    fn with_path(mut self, db_path: PathBuf) -> Self {
        self.db_path = db_path;
        self
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by ID
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().map(|i| &i.item).find(|item| item.id == id)
    }
}

impl Retriever for FurnitureStore {
    fn retrieve(
        &self,
        query: &str,
        n_results: usize,
        filter: &AttributeFilter,
    ) -> Result<Vec<CatalogItem>> {
        let limit = clamp_n_results(n_results);
        let query_vector = self.embedder.embed(query);

        let mut scored: Vec<(&CatalogItem, f32)> = self
            .items
            .iter()
            .filter(|indexed| filter.matches(&indexed.item))
            .map(|indexed| (&indexed.item, indexed.vector.cosine_similarity(&query_vector)))
            .collect();

        // Stable sort: equal scores keep catalog order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        debug!(
            query,
            limit,
            filters = filter.conditions().len(),
            hits = scored.len(),
            "catalog search"
        );

        Ok(scored
            .into_iter()
            .map(|(item, score)| {
                let mut item = item.clone();
                item.relevance_score = score;
                item
            })
            .collect())
    }

    fn stats(&self) -> Result<CatalogStats> {
        Ok(self.stats.clone())
    }
}
