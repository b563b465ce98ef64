// ICP → search queries. Delegates to the text generator when one is
// configured and falls back to a small deterministic template set whenever
// generation or parsing fails — the pipeline never stalls on the generator.

use serde::Deserialize;
use tracing::{info, warn};

use crate::traits::TextGenerator;

/// At most this many generated queries are executed per run.
pub const MAX_QUERIES: usize = 8;

/// News queries for the funding-announcement sweep.
pub const FUNDING_NEWS_QUERIES: &[&str] = &[
    "B2B SaaS raised series A",
    "SaaS startup funding announcement",
    "series A funding announced startup",
    "B2B startup raises seed round",
    "SaaS company series B funding",
];

const QUERY_SYSTEM_PROMPT: &str = "\
You are a B2B sales research expert. Given an Ideal Customer Profile (ICP), \
generate 8 Google search queries to find companies showing BUYING INTENT signals.

Use these job board search patterns:
- site:greenhouse.io \"job title\" - Greenhouse jobs
- site:lever.co \"job title\" - Lever jobs
- site:indeed.com \"job title\" \"company type\" - Indeed jobs
- site:glassdoor.com/job \"job title\" - Glassdoor jobs
- site:linkedin.com/jobs \"job title\" - LinkedIn jobs
- site:wellfound.com/jobs \"job title\" - Startup jobs
- site:builtin.com/jobs \"job title\" - Tech company jobs

Also search for funding signals:
- \"raised\" \"$XM\" \"series A\" site:techcrunch.com
- \"announces funding\" site:crunchbase.com

Return ONLY valid JSON: {\"queries\": [\"...\", \"...\"]}";

#[derive(Debug, Deserialize)]
struct QueryPayload {
    #[serde(default)]
    queries: Vec<String>,
}

/// Generate search queries for an ICP. Any generator failure (unavailable,
/// transport error, malformed JSON) is logged into `errors` and answered
/// with the static fallback set.
pub async fn generate_search_queries(
    generator: Option<&dyn TextGenerator>,
    icp: &str,
    errors: &mut Vec<String>,
) -> Vec<String> {
    let Some(generator) = generator else {
        info!("No text generator configured, using fallback queries");
        return fallback_queries(icp);
    };

    let user = format!("Generate search queries for this ICP: {icp}");
    match generator.complete(QUERY_SYSTEM_PROMPT, &user).await {
        Ok(raw) => match parse_query_payload(&raw) {
            Ok(queries) if !queries.is_empty() => queries,
            Ok(_) => {
                warn!("Query generator returned an empty list, using fallback");
                errors.push("Query generator returned no queries".to_string());
                fallback_queries(icp)
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse query generation response");
                errors.push("Failed to parse query generation response".to_string());
                fallback_queries(icp)
            }
        },
        Err(e) => {
            warn!(error = %e, "Query generation call failed");
            errors.push(format!("Query generation failed: {e}"));
            fallback_queries(icp)
        }
    }
}

/// Static deterministic fallback, keyed by the ICP text.
pub fn fallback_queries(icp: &str) -> Vec<String> {
    vec![
        format!("site:greenhouse.io SDR {icp}"),
        format!("site:lever.co BDR {icp}"),
        format!("site:indeed.com SDR {icp}"),
    ]
}

/// Parse a `{"queries": [...]}` payload out of a possibly-fenced response.
fn parse_query_payload(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    let cleaned = strip_code_fences(raw);
    let payload: QueryPayload = serde_json::from_str(cleaned)?;
    Ok(payload.queries)
}

/// Models tend to wrap JSON in markdown fences; take the fenced block when
/// present and drop a leading language tag.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let inner = trimmed.trim_start_matches("```");
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    match inner.find("```") {
        Some(end) => inner[..end].trim(),
        None => inner.trim(),
    }
}
