//! HTTP surface of DecoPlan: furniture search, recommendations and
//! retrieval-augmented prompts over actix-web.

pub mod error;
pub mod models;
pub mod rest;
pub mod state;

pub use error::ApiError;
pub use rest::{configure, RestApi};
pub use state::AppState;
