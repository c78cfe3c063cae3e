use crate::ApiError;
use decoplan_core::{PromptAugmenter, Retriever};
use decoplan_storage::{FurnitureStore, PromptBuilder};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Handles shared by every request handler.
///
/// Built once at startup and never mutated afterwards. A handle is `None`
/// when the database could not be opened.
#[derive(Clone)]
pub struct AppState {
    retriever: Option<Arc<dyn Retriever>>,
    augmenter: Option<Arc<dyn PromptAugmenter>>,
    database_path: PathBuf,
}

impl AppState {
    pub fn new(
        database_path: impl Into<PathBuf>,
        retriever: Arc<dyn Retriever>,
        augmenter: Arc<dyn PromptAugmenter>,
    ) -> Self {
        Self {
            retriever: Some(retriever),
            augmenter: Some(augmenter),
            database_path: database_path.into(),
        }
    }

    pub fn uninitialized(database_path: impl Into<PathBuf>) -> Self {
        Self {
            retriever: None,
            augmenter: None,
            database_path: database_path.into(),
        }
    }

    /// Open the furniture database, degrading to an uninitialized state on failure
    pub fn open(database_path: &Path) -> Self {
        info!("Initializing RAG components with database at {}", database_path.display());
        match FurnitureStore::open(database_path) {
            Ok(store) => {
                let store: Arc<dyn Retriever> = Arc::new(store);
                let augmenter = Arc::new(PromptBuilder::new(store.clone()));
                info!("RAG components initialized successfully");
                Self::new(database_path, store, augmenter)
            }
            Err(e) => {
                error!("Failed to initialize RAG components: {}", e);
                Self::uninitialized(database_path)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.retriever.is_some() && self.augmenter.is_some()
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn retriever(&self) -> Result<Arc<dyn Retriever>, ApiError> {
        self.retriever.clone().ok_or(ApiError::BackendUnavailable)
    }

    pub fn augmenter(&self) -> Result<Arc<dyn PromptAugmenter>, ApiError> {
        self.augmenter.clone().ok_or(ApiError::BackendUnavailable)
    }
}
