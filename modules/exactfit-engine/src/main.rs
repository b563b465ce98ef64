use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use exactfit_common::types::CustomerConfig;
use exactfit_common::Config;
use exactfit_engine::pipeline::Pipeline;
use exactfit_engine::tech::HttpPageFetcher;

/// Run the lead-generation pipeline end to end for one ICP.
#[derive(Parser, Debug)]
#[command(name = "exactfit", about = "B2B intent-signal lead pipeline")]
struct Args {
    /// Ideal Customer Profile description.
    #[arg(long)]
    icp: String,

    /// Target job title for contact resolution (e.g. "VP Sales").
    #[arg(long)]
    title: Option<String>,

    /// Competitor tools to detect, comma separated.
    #[arg(long, value_delimiter = ',')]
    competitors: Vec<String>,

    /// Target tools that indicate a good fit, comma separated.
    #[arg(long, value_delimiter = ',')]
    target_tools: Vec<String>,

    /// Minimum signals to qualify.
    #[arg(long, default_value_t = 1)]
    min_signals: u32,

    /// Minimum score to qualify.
    #[arg(long, default_value_t = 0)]
    min_score: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("exactfit=info".parse()?))
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    info!(icp = args.icp.as_str(), "ExactFit pipeline starting");

    let mut pipeline = Pipeline::new(
        Arc::new(serper_client::SerperClient::new(config.serper_api_key)),
        Arc::new(hunter_client::HunterClient::new(config.hunter_api_key)),
        Arc::new(HttpPageFetcher::new()),
    )
    .with_post_searcher(Arc::new(reddit_client::RedditClient::new()));

    if let Some(key) = config.pdl_api_key {
        pipeline = pipeline.with_enricher(Arc::new(pdl_client::PdlClient::new(key)));
    } else {
        info!("No PDL key configured; contacts will stay single-source");
    }
    if let Some(key) = config.anthropic_api_key {
        pipeline = pipeline.with_text_generator(Arc::new(claude_client::ClaudeClient::new(key)));
    }

    let customer = CustomerConfig {
        competitors: args.competitors,
        target_tools: args.target_tools,
        target_job_title: args.title,
        min_signals: args.min_signals,
        min_score: args.min_score,
    };

    let outcome = pipeline.run(&args.icp, &customer).await;

    for lead in outcome.qualified.iter().take(10) {
        info!(
            company = lead.company.company_name.as_str(),
            domain = lead.company.domain.as_str(),
            score = lead.score,
            tier = %lead.tier,
            email = lead
                .contact
                .as_ref()
                .map(|c| c.email.as_str())
                .unwrap_or("-"),
            "Qualified lead"
        );
    }
    for error in &outcome.errors {
        info!(error = error.as_str(), "Run error");
    }

    info!("{}", outcome.stats);
    Ok(())
}
