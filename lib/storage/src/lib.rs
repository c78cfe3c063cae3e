pub mod catalog;
pub mod store;
pub mod augment;

pub use catalog::{load_catalog, save_catalog, CATALOG_FILE, COMPRESSED_CATALOG_FILE};
pub use store::FurnitureStore;
pub use augment::{render_prompt, PromptBuilder};
