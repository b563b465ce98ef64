use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use exactfit_common::types::{CustomerConfig, LeadStatus, Tier};

use crate::store::LeadFilter;
use crate::AppState;

// --- Request/query structs ---

#[derive(Deserialize)]
pub struct ResearchRequest {
    pub icp: String,
}

#[derive(Deserialize)]
pub struct EnrichRequest {
    #[serde(default)]
    pub lead_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub enrich_all: bool,
    #[serde(default)]
    pub target_job_title: Option<String>,
}

#[derive(Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub lead_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub score_all: bool,
    #[serde(default)]
    pub customer_config: Option<CustomerConfig>,
}

#[derive(Deserialize)]
pub struct LeadsQuery {
    pub status: Option<String>,
    pub tier: Option<String>,
    pub min_score: Option<u32>,
    pub limit: Option<usize>,
}

// --- Helpers ---

fn parse_status(s: &str) -> Option<LeadStatus> {
    match s {
        "discovered" => Some(LeadStatus::Discovered),
        "enriched" => Some(LeadStatus::Enriched),
        "enrichment_failed" => Some(LeadStatus::EnrichmentFailed),
        "scored" => Some(LeadStatus::Scored),
        _ => None,
    }
}

fn parse_tier(s: &str) -> Option<Tier> {
    match s {
        "hot" => Some(Tier::Hot),
        "warm" => Some(Tier::Warm),
        "cold" => Some(Tier::Cold),
        _ => None,
    }
}

// --- Handlers ---

pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "healthy", "service": "exactfit-api"}))
}

/// Discover candidate companies for an ICP and store them.
pub async fn run_research(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResearchRequest>,
) -> impl IntoResponse {
    if request.icp.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "icp must not be empty"})),
        )
            .into_response();
    }

    let outcome = state.pipeline.research(&request.icp).await;
    let inserted = state.store.insert_discovered(outcome.companies).await;
    info!(inserted, icp = request.icp.as_str(), "Research complete");

    Json(json!({
        "total_found": inserted,
        "queries_used": outcome.queries_used,
        "errors": outcome.errors,
    }))
    .into_response()
}

/// Resolve contacts for discovered leads.
pub async fn run_enrich(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EnrichRequest>,
) -> impl IntoResponse {
    if !request.enrich_all && request.lead_ids.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Provide lead_ids or set enrich_all=true"})),
        )
            .into_response();
    }

    let leads = state
        .store
        .companies_in_status(LeadStatus::Discovered, request.lead_ids.as_deref())
        .await;
    if leads.is_empty() {
        return Json(json!({"message": "No leads to enrich", "enriched": 0})).into_response();
    }

    let total_input = leads.len();
    let outcome = state
        .pipeline
        .enrich(leads, request.target_job_title.as_deref())
        .await;
    state
        .store
        .apply_enrichment(&outcome.enriched, &outcome.failed)
        .await;

    let success_rate = if total_input > 0 {
        (outcome.enriched.len() as f64 / total_input as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    Json(json!({
        "message": "Enrichment complete",
        "stats": {
            "total_input": total_input,
            "enriched": outcome.enriched.len(),
            "failed": outcome.failed.len(),
            "success_rate": success_rate,
        },
        "errors": outcome.errors,
    }))
    .into_response()
}

/// Score enriched leads against a customer config.
pub async fn run_score(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScoreRequest>,
) -> impl IntoResponse {
    if !request.score_all && request.lead_ids.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Provide lead_ids or set score_all=true"})),
        )
            .into_response();
    }

    let leads = state.store.enriched_pairs(request.lead_ids.as_deref()).await;
    if leads.is_empty() {
        return Json(json!({"message": "No leads to score", "scored": 0})).into_response();
    }

    let config = request.customer_config.unwrap_or_default();
    let outcome = state.pipeline.score(leads, &config).await;
    state
        .store
        .apply_scoring(&outcome.qualified, &outcome.unqualified)
        .await;

    Json(json!({
        "message": "Scoring complete",
        "stats": {
            "qualified": outcome.qualified.len(),
            "unqualified": outcome.unqualified.len(),
        },
        "market_mentions": outcome.market_mentions.len(),
        "errors": outcome.errors,
    }))
    .into_response()
}

/// List stored leads, optionally filtered, highest score first.
pub async fn get_leads(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeadsQuery>,
) -> impl IntoResponse {
    let filter = LeadFilter {
        status: params.status.as_deref().and_then(parse_status),
        tier: params.tier.as_deref().and_then(parse_tier),
        min_score: params.min_score,
        limit: params.limit.unwrap_or(50),
    };
    let leads = state.store.list(&filter).await;
    Json(json!({"count": leads.len(), "leads": leads})).into_response()
}

/// Store-wide counters.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.stats().await).into_response()
}
