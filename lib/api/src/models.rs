// Request and response bodies of the REST API
use decoplan_core::{CatalogItem, CatalogStats};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub n_results: Option<usize>,
    pub filters: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub prompt: Option<String>,
    pub n_results: Option<usize>,
    pub filters: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct EnhancePromptRequest {
    pub prompt: Option<String>,
    pub room_type: Option<String>,
    pub style: Option<String>,
    pub n_items: Option<usize>,
}

/// Elements stay untyped so one bad entry cannot reject the whole batch
#[derive(Debug, Deserialize)]
pub struct BatchSearchRequest {
    pub queries: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub database_path: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub n_results: usize,
    pub results: Vec<CatalogItem>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub query: String,
    pub recommendations: Vec<Recommendation>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    /// Seconds, rounded to the millisecond
    #[serde(rename = "processingTime")]
    pub processing_time: f64,
}

/// A catalog item in the shape the frontend expects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    pub category: String,
    pub style: String,
    /// The catalog carries no prices
    pub price: f64,
    pub description: String,
    pub image_url: String,
    pub dimensions: String,
    pub material: String,
    pub color: String,
    pub relevance_score: f32,
}

const NOT_AVAILABLE: &str = "N/A";

impl From<CatalogItem> for Recommendation {
    fn from(item: CatalogItem) -> Self {
        Self {
            image_url: placeholder_image_url(&item.id),
            id: item.id,
            name: item.name,
            category: item.furniture_type,
            style: item.feel,
            price: 0.0,
            description: item.description,
            dimensions: item.dimensions.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            material: item.material.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            color: item.color.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            relevance_score: item.relevance_score,
        }
    }
}

/// Placeholder image for an item. Stable per id, not a real asset.
pub fn placeholder_image_url(id: &str) -> String {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    format!(
        "https://images.unsplash.com/photo-{}?w=400",
        hasher.finish() % 1_000_000_000
    )
}

#[derive(Debug, Serialize)]
pub struct EnhancePromptResponse {
    pub success: bool,
    pub original_prompt: String,
    pub enhanced_prompt: String,
    pub room_type: Option<String>,
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: CatalogStats,
}

#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub success: bool,
    pub filters: AvailableFilters,
}

#[derive(Debug, Default, Serialize)]
pub struct AvailableFilters {
    pub styles: Vec<String>,
    pub room_types: Vec<String>,
    pub furniture_types: Vec<String>,
}

impl From<CatalogStats> for AvailableFilters {
    fn from(stats: CatalogStats) -> Self {
        Self {
            styles: stats.styles,
            room_types: stats.room_types,
            furniture_types: stats.furniture_types,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchSearchResponse {
    pub success: bool,
    pub batch_results: Vec<BatchResult>,
}

/// Outcome of one batch entry: results or an error, never both
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchResult {
    Found {
        success: bool,
        query: String,
        results: Vec<CatalogItem>,
    },
    Failed {
        success: bool,
        query: String,
        error: String,
    },
    Rejected {
        error: String,
    },
}

impl BatchResult {
    pub fn found(query: String, results: Vec<CatalogItem>) -> Self {
        BatchResult::Found { success: true, query, results }
    }

    pub fn failed(query: String, error: String) -> Self {
        BatchResult::Failed { success: false, query, error }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        BatchResult::Rejected { error: error.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recommendation_shape() {
        let item = CatalogItem::new("42", "Rattan Chair", "Chair", "Bohemian")
            .with_description("Woven rattan accent chair")
            .with_material("Rattan");
        let rec = Recommendation::from(item);
        let value = serde_json::to_value(&rec).unwrap();

        assert_eq!(value["category"], json!("Chair"));
        assert_eq!(value["style"], json!("Bohemian"));
        assert_eq!(value["price"], json!(0.0));
        assert_eq!(value["material"], json!("Rattan"));
        assert_eq!(value["color"], json!("N/A"));
        assert_eq!(value["dimensions"], json!("N/A"));
        assert!(value["imageUrl"].as_str().unwrap().starts_with("https://images.unsplash.com/photo-"));
        assert!(value.get("relevanceScore").is_some());
    }

    #[test]
    fn test_placeholder_image_is_deterministic_per_id() {
        assert_eq!(placeholder_image_url("abc"), placeholder_image_url("abc"));
    }

    #[test]
    fn test_batch_result_never_has_both_fields() {
        let ok = serde_json::to_value(BatchResult::found("q".into(), vec![])).unwrap();
        assert!(ok.get("results").is_some() && ok.get("error").is_none());

        let failed = serde_json::to_value(BatchResult::failed("q".into(), "boom".into())).unwrap();
        assert!(failed.get("error").is_some() && failed.get("results").is_none());
        assert_eq!(failed["success"], json!(false));

        let rejected = serde_json::to_value(BatchResult::rejected("Missing query field")).unwrap();
        assert_eq!(rejected, json!({"error": "Missing query field"}));
    }
}
