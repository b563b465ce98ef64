// Pipeline orchestration. Each stage is a pure-ish function from explicit
// input records to explicit output records; provider failures degrade to
// per-lead outcomes and run-level error log entries, never to a thrown
// batch abort. Leads are processed one at a time, one provider call at a
// time.

use std::sync::Arc;

use tracing::{info, warn};

use exactfit_common::types::{
    CandidateCompany, Contact, CustomerConfig, EnrichedLead, FailedLead, MentionPost, ScoredLead,
};

use crate::dedup::dedup_by_domain;
use crate::normalize::{candidate_from_news, candidate_from_result, classify_hit, dedup_results_by_url};
use crate::qualify::{qualify, QualifyRules};
use crate::queries::{generate_search_queries, FUNDING_NEWS_QUERIES, MAX_QUERIES};
use crate::resolver::{ContactResolver, Resolution};
use crate::scoring::{rank, score_lead, SignalWeights};
use crate::social::MentionScanner;
use crate::stats::RunStats;
use crate::talking_points::{generate_opener, talking_points};
use crate::tech::{categorize_tools, PageFetcher, TechDetector};
use crate::traits::{ContactFinder, PersonEnricher, PostSearcher, TextGenerator, WebSearcher};

/// Organic results requested per search query.
const RESULTS_PER_QUERY: u32 = 10;
/// News results requested per funding query.
const NEWS_PER_QUERY: u32 = 5;
/// Competitor mentions collected per competitor.
const MENTIONS_PER_COMPETITOR: usize = 10;

// ---------------------------------------------------------------------------
// Stage outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ResearchOutcome {
    pub companies: Vec<CandidateCompany>,
    pub queries_used: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Default)]
pub struct EnrichmentOutcome {
    pub enriched: Vec<EnrichedLead>,
    pub failed: Vec<FailedLead>,
    pub errors: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ScoringOutcome {
    pub qualified: Vec<ScoredLead>,
    pub unqualified: Vec<ScoredLead>,
    pub market_mentions: Vec<MentionPost>,
    pub errors: Vec<String>,
}

/// Everything one full run produces.
#[derive(Debug)]
pub struct RunOutcome {
    pub qualified: Vec<ScoredLead>,
    pub unqualified: Vec<ScoredLead>,
    pub failed: Vec<FailedLead>,
    pub market_mentions: Vec<MentionPost>,
    pub queries_used: Vec<String>,
    pub stats: RunStats,
    pub errors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

pub struct Pipeline {
    searcher: Arc<dyn WebSearcher>,
    finder: Arc<dyn ContactFinder>,
    enricher: Option<Arc<dyn PersonEnricher>>,
    fetcher: Arc<dyn PageFetcher>,
    posts: Option<Arc<dyn PostSearcher>>,
    generator: Option<Arc<dyn TextGenerator>>,
    weights: SignalWeights,
}

impl Pipeline {
    pub fn new(
        searcher: Arc<dyn WebSearcher>,
        finder: Arc<dyn ContactFinder>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            searcher,
            finder,
            enricher: None,
            fetcher,
            posts: None,
            generator: None,
            weights: SignalWeights::default(),
        }
    }

    pub fn with_enricher(mut self, enricher: Arc<dyn PersonEnricher>) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn with_post_searcher(mut self, posts: Arc<dyn PostSearcher>) -> Self {
        self.posts = Some(posts);
        self
    }

    pub fn with_text_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_weights(mut self, weights: SignalWeights) -> Self {
        self.weights = weights;
        self
    }

    // -----------------------------------------------------------------------
    // Stage 1: research — queries, search, normalize, dedup
    // -----------------------------------------------------------------------

    pub async fn research(&self, icp: &str) -> ResearchOutcome {
        let mut errors = Vec::new();
        let queries =
            generate_search_queries(self.generator.as_deref(), icp, &mut errors).await;

        let mut raw_results = Vec::new();
        for query in queries.iter().take(MAX_QUERIES) {
            match self.searcher.search(query, RESULTS_PER_QUERY).await {
                Ok(hits) => {
                    raw_results.extend(hits.into_iter().map(|h| classify_hit(h, query)));
                }
                Err(e) => {
                    warn!(query = query.as_str(), error = %e, "Search failed");
                    errors.push(format!("Search failed for '{query}': {e}"));
                }
            }
        }
        let raw_results = dedup_results_by_url(raw_results);
        info!(results = raw_results.len(), "Search sweep complete");

        let board_companies = dedup_by_domain(
            raw_results
                .iter()
                .filter_map(candidate_from_result)
                .collect(),
        );

        // Funding-news sweep: dedicated news queries catch announcements the
        // job-board queries never see.
        let mut news_companies = Vec::new();
        let mut seen_news_urls = std::collections::HashSet::new();
        for query in FUNDING_NEWS_QUERIES {
            match self.searcher.news(query, NEWS_PER_QUERY).await {
                Ok(items) => {
                    for item in items {
                        if seen_news_urls.insert(item.url.clone()) {
                            if let Some(candidate) = candidate_from_news(&item) {
                                news_companies.push(candidate);
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(query, error = %e, "Funding news search failed");
                    errors.push(format!("Funding news search failed for '{query}': {e}"));
                }
            }
        }
        let news_companies = dedup_by_domain(news_companies);

        // Per-source dedup above, then one more pass across the merged set:
        // a company hiring *and* freshly funded keeps its first-seen record.
        let mut companies = board_companies;
        companies.extend(news_companies);
        let companies = dedup_by_domain(companies);
        info!(companies = companies.len(), "Research stage complete");

        ResearchOutcome {
            companies,
            queries_used: queries,
            errors,
        }
    }

    // -----------------------------------------------------------------------
    // Stage 2: enrichment — contact resolution, one lead at a time
    // -----------------------------------------------------------------------

    pub async fn enrich(
        &self,
        leads: Vec<CandidateCompany>,
        target_title: Option<&str>,
    ) -> EnrichmentOutcome {
        let resolver = ContactResolver::new(self.finder.clone(), self.enricher.clone());
        let mut outcome = EnrichmentOutcome::default();

        for lead in leads {
            match resolver
                .resolve(lead, target_title, &mut outcome.errors)
                .await
            {
                Resolution::Resolved(enriched) => outcome.enriched.push(enriched),
                Resolution::Failed(failed) => outcome.failed.push(failed),
            }
        }

        info!(
            enriched = outcome.enriched.len(),
            failed = outcome.failed.len(),
            "Enrichment stage complete"
        );
        outcome
    }

    // -----------------------------------------------------------------------
    // Stage 3: scoring — tech detection, mentions, scores, qualification,
    // talking points
    // -----------------------------------------------------------------------

    pub async fn score(
        &self,
        leads: Vec<(CandidateCompany, Option<Contact>)>,
        config: &CustomerConfig,
    ) -> ScoringOutcome {
        let mut errors = Vec::new();
        let detector = TechDetector::new(self.fetcher.clone());
        let all_tools = config.all_tools();

        let mut scored = Vec::new();
        for (company, contact) in leads {
            let detected = detector.detect(&company.domain, &all_tools).await;
            let tech_signals = categorize_tools(&detected, config);
            scored.push(score_lead(company, contact, &tech_signals, &self.weights));
        }
        rank(&mut scored);

        let market_mentions = match (&self.posts, config.competitors.is_empty()) {
            (Some(posts), false) => {
                MentionScanner::new(posts.clone())
                    .market_signals(&config.competitors, MENTIONS_PER_COMPETITOR)
                    .await
            }
            _ => Vec::new(),
        };

        let rules = QualifyRules::from(config);
        let split = qualify(scored, &rules);
        let mut qualified = split.qualified;

        for lead in &mut qualified {
            lead.talking_points = talking_points(&lead.signals);
            let opener = generate_opener(self.generator.as_deref(), lead, &mut errors).await;
            lead.sample_opener = opener;
        }

        info!(
            qualified = qualified.len(),
            unqualified = split.unqualified.len(),
            mentions = market_mentions.len(),
            "Scoring stage complete"
        );

        ScoringOutcome {
            qualified,
            unqualified: split.unqualified,
            market_mentions,
            errors,
        }
    }

    // -----------------------------------------------------------------------
    // Full run
    // -----------------------------------------------------------------------

    pub async fn run(&self, icp: &str, config: &CustomerConfig) -> RunOutcome {
        let research = self.research(icp).await;
        let total_input = research.companies.len();

        let enrichment = self
            .enrich(research.companies, config.target_job_title.as_deref())
            .await;

        let to_score: Vec<(CandidateCompany, Option<Contact>)> = enrichment
            .enriched
            .iter()
            .cloned()
            .map(|lead| (lead.company, Some(lead.contact)))
            .collect();
        let scoring = self.score(to_score, config).await;

        let stats = RunStats::compute(
            total_input,
            &enrichment.enriched,
            &enrichment.failed,
            &scoring.qualified,
            &scoring.unqualified,
        );

        let mut errors = research.errors;
        errors.extend(enrichment.errors);
        errors.extend(scoring.errors);

        RunOutcome {
            qualified: scoring.qualified,
            unqualified: scoring.unqualified,
            failed: enrichment.failed,
            market_mentions: scoring.market_mentions,
            queries_used: research.queries_used,
            stats,
            errors,
        }
    }
}
