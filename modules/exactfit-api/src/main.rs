use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use exactfit_common::Config;
use exactfit_engine::pipeline::Pipeline;
use exactfit_engine::tech::HttpPageFetcher;

mod rest;
mod store;

use store::LeadStore;

pub struct AppState {
    pub pipeline: Pipeline,
    pub store: LeadStore,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("exactfit=info".parse()?))
        .init();

    let config = Config::from_env();

    let mut pipeline = Pipeline::new(
        Arc::new(serper_client::SerperClient::new(config.serper_api_key.clone())),
        Arc::new(hunter_client::HunterClient::new(config.hunter_api_key.clone())),
        Arc::new(HttpPageFetcher::new()),
    )
    .with_post_searcher(Arc::new(reddit_client::RedditClient::new()));

    if let Some(key) = config.pdl_api_key.clone() {
        pipeline = pipeline.with_enricher(Arc::new(pdl_client::PdlClient::new(key)));
    }
    if let Some(key) = config.anthropic_api_key.clone() {
        pipeline = pipeline.with_text_generator(Arc::new(claude_client::ClaudeClient::new(key)));
    }

    let state = Arc::new(AppState {
        pipeline,
        store: LeadStore::new(),
    });

    let app = Router::new()
        .route("/", get(rest::health))
        .route("/api/research", post(rest::run_research))
        .route("/api/enrich", post(rest::run_enrich))
        .route("/api/score", post(rest::run_score))
        .route("/api/leads", get(rest::get_leads))
        .route("/api/stats", get(rest::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!(addr = addr.as_str(), "ExactFit API listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
