use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use decoplan_core::{AttributeFilter, CatalogItem, Retriever, DEFAULT_N_RESULTS};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::models::*;
use crate::{ApiError, AppState};

type ApiResult = Result<HttpResponse, ApiError>;

/// Largest JSON body accepted by any endpoint
const JSON_LIMIT: usize = 1024 * 1024;

pub struct RestApi;

impl RestApi {
    pub async fn start(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
        info!("Starting server on {}:{}", host, port);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(Logger::default())
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(configure)
        })
        .bind((host, port))?
        .run()
        .await
    }
}

/// Register routes, JSON extraction and the fallback handler.
///
/// Application state must be provided separately as `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            ApiError::InvalidInput(format!("Invalid JSON body: {}", err)).into()
        });

    cfg.app_data(json_config)
        .route("/health", web::get().to(health_check))
        .route("/api/search", web::post().to(search_furniture))
        .route("/api/recommendations", web::post().to(get_recommendations))
        .route("/api/enhance-prompt", web::post().to(enhance_prompt))
        .route("/api/stats", web::get().to(get_database_stats))
        .route("/api/filters", web::get().to(get_available_filters))
        .route("/api/batch-search", web::post().to(batch_search))
        .default_service(web::route().to(not_found));
}

async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let ready = state.is_ready();
    let body = HealthResponse {
        status: if ready { "healthy" } else { "initializing" },
        ready,
        database_path: state.database_path().display().to_string(),
    };

    if ready {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Run a retrieval on the blocking pool
async fn retrieve(
    retriever: Arc<dyn Retriever>,
    query: String,
    n_results: usize,
    filters: Option<BTreeMap<String, Value>>,
) -> Result<Vec<CatalogItem>, ApiError> {
    let filter = AttributeFilter::from(filters.unwrap_or_default());
    let results = web::block(move || retriever.retrieve(&query, n_results, &filter)).await??;
    Ok(results)
}

async fn search_furniture(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> ApiResult {
    let req = req.into_inner();
    let query = req.query.ok_or_else(|| ApiError::missing_field("query"))?;
    let retriever = state.retriever()?;

    let results = retrieve(
        retriever,
        query.clone(),
        req.n_results.unwrap_or(DEFAULT_N_RESULTS),
        req.filters,
    )
    .await?;

    Ok(HttpResponse::Ok().json(SearchResponse {
        success: true,
        query,
        n_results: results.len(),
        results,
    }))
}

async fn get_recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> ApiResult {
    let start_time = Instant::now();
    let req = req.into_inner();
    let prompt = req.prompt.ok_or_else(|| ApiError::missing_field("prompt"))?;
    let retriever = state.retriever()?;

    let results = retrieve(
        retriever,
        prompt.clone(),
        req.n_results.unwrap_or(DEFAULT_N_RESULTS),
        req.filters,
    )
    .await?;

    let recommendations: Vec<Recommendation> =
        results.into_iter().map(Recommendation::from).collect();
    let processing_time = (start_time.elapsed().as_secs_f64() * 1000.0).round() / 1000.0;

    Ok(HttpResponse::Ok().json(RecommendationsResponse {
        query: prompt,
        total_results: recommendations.len(),
        recommendations,
        processing_time,
    }))
}

async fn enhance_prompt(
    state: web::Data<AppState>,
    req: web::Json<EnhancePromptRequest>,
) -> ApiResult {
    let req = req.into_inner();
    let user_prompt = req.prompt.ok_or_else(|| ApiError::missing_field("prompt"))?;
    let augmenter = state.augmenter()?;

    let n_items = req.n_items.unwrap_or(DEFAULT_N_RESULTS);
    let (prompt, room_type, style) = (user_prompt.clone(), req.room_type.clone(), req.style.clone());
    let enhanced_prompt = web::block(move || {
        augmenter.create_prompt_with_context(
            &prompt,
            room_type.as_deref(),
            style.as_deref(),
            n_items,
        )
    })
    .await??;

    Ok(HttpResponse::Ok().json(EnhancePromptResponse {
        success: true,
        original_prompt: user_prompt,
        enhanced_prompt,
        room_type: req.room_type,
        style: req.style,
    }))
}

async fn get_database_stats(state: web::Data<AppState>) -> ApiResult {
    let retriever = state.retriever()?;
    let stats = web::block(move || retriever.stats()).await??;
    Ok(HttpResponse::Ok().json(StatsResponse { success: true, stats }))
}

async fn get_available_filters(state: web::Data<AppState>) -> ApiResult {
    let retriever = state.retriever()?;
    let stats = web::block(move || retriever.stats()).await??;
    Ok(HttpResponse::Ok().json(FiltersResponse {
        success: true,
        filters: AvailableFilters::from(stats),
    }))
}

async fn batch_search(
    state: web::Data<AppState>,
    req: web::Json<BatchSearchRequest>,
) -> ApiResult {
    let queries = match req.into_inner().queries {
        Some(Value::Array(queries)) => queries,
        _ => {
            return Err(ApiError::InvalidInput(
                "Missing or invalid 'queries' field".to_string(),
            ))
        }
    };
    let retriever = state.retriever()?;

    let batch_results = web::block(move || {
        queries
            .into_iter()
            .map(|entry| run_batch_entry(retriever.as_ref(), entry))
            .collect::<Vec<_>>()
    })
    .await?;

    Ok(HttpResponse::Ok().json(BatchSearchResponse {
        success: true,
        batch_results,
    }))
}

fn run_batch_entry(retriever: &dyn Retriever, entry: Value) -> BatchResult {
    let req: SearchRequest = match serde_json::from_value(entry) {
        Ok(req) => req,
        Err(e) => {
            warn!("Batch entry rejected: {}", e);
            return BatchResult::rejected(format!("Invalid query entry: {}", e));
        }
    };
    let Some(query) = req.query else {
        warn!("Batch entry rejected: missing query field");
        return BatchResult::rejected("Missing query field");
    };

    let filter = AttributeFilter::from(req.filters.unwrap_or_default());
    match retriever.retrieve(&query, req.n_results.unwrap_or(DEFAULT_N_RESULTS), &filter) {
        Ok(results) => BatchResult::found(query, results),
        Err(e) => {
            warn!("Batch entry {:?} failed: {}", query, e);
            BatchResult::failed(query, e.to_string())
        }
    }
}

async fn not_found() -> ApiResult {
    Err(ApiError::NotFound)
}
