// Tech-stack detection: fetch a lead's homepage and pattern-match tool
// fingerprints (CDN hosts, script paths, widget domains) against it, then
// categorize detections into competitor/target signals.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use exactfit_common::types::{CustomerConfig, SignalKind, TechSignal};

/// Common B2B tools, used as the detection set when the customer names no
/// competitors or target tools.
pub const COMMON_TOOLS: &[&str] = &[
    // CRM
    "HubSpot",
    "Salesforce",
    "Pipedrive",
    "Zoho",
    // Sales intelligence
    "Apollo",
    "ZoomInfo",
    "Lusha",
    "Clearbit",
    "Cognism",
    // Sales engagement
    "Outreach",
    "SalesLoft",
    "Gong",
    // Support
    "Intercom",
    "Drift",
    "Zendesk",
    "Freshdesk",
    "Crisp",
    "Gorgias",
    "Tidio",
    // Marketing
    "Mailchimp",
    "Klaviyo",
    "Marketo",
    "ActiveCampaign",
    // Analytics
    "Mixpanel",
    "Amplitude",
    "Segment",
    "Heap",
    // Other
    "Stripe",
    "Slack",
    "Notion",
    "Monday",
];

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a company homepage as raw HTML.
    async fn homepage_html(&self, domain: &str) -> Result<String>;
}

/// Plain HTTP fetcher with a browser user agent and a bounded wait.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn homepage_html(&self, domain: &str) -> Result<String> {
        let url = format!("https://{domain}");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {status} fetching {url}");
        }
        Ok(resp.text().await?)
    }
}

// ---------------------------------------------------------------------------
// Pattern matching
// ---------------------------------------------------------------------------

/// Fingerprint patterns for a tool name: bare-domain, CDN, script and
/// widget variants, plus dashed forms for multi-word names.
pub fn tool_patterns(tool_name: &str) -> Vec<String> {
    let name = tool_name.to_lowercase().trim().to_string();
    let no_spaces = name.replace(' ', "");
    let dashes = name.replace(' ', "-");

    let mut patterns = vec![
        format!("{no_spaces}.com/"),
        format!("{no_spaces}.io/"),
        format!("{no_spaces}.co/"),
        format!("cdn.{no_spaces}"),
        format!("js.{no_spaces}"),
        format!("widget.{no_spaces}"),
        format!("app.{no_spaces}"),
        format!("api.{no_spaces}"),
        format!("{no_spaces}cdn"),
        format!("{no_spaces}.js"),
        format!("/{no_spaces}/"),
        format!("\"{no_spaces}\""),
    ];

    if dashes != no_spaces {
        patterns.push(format!("{dashes}.com/"));
        patterns.push(format!("{dashes}.io/"));
    }

    patterns
}

/// Case-insensitive fingerprint check against homepage HTML.
pub fn detect_tool(html_lower: &str, tool_name: &str) -> bool {
    tool_patterns(tool_name)
        .iter()
        .any(|p| html_lower.contains(p.as_str()))
}

/// Categorize detected tools against the customer config. A tool in both
/// lists counts as a competitor (checked first).
pub fn categorize_tools(detected: &[String], config: &CustomerConfig) -> Vec<TechSignal> {
    detected
        .iter()
        .filter_map(|tool| {
            if config.competitors.iter().any(|c| c == tool) {
                Some(TechSignal {
                    kind: SignalKind::TechCompetitor,
                    tool: tool.clone(),
                    detail: format!("Uses {tool} (your competitor)"),
                })
            } else if config.target_tools.iter().any(|t| t == tool) {
                Some(TechSignal {
                    kind: SignalKind::TechTarget,
                    tool: tool.clone(),
                    detail: format!("Uses {tool} (good fit)"),
                })
            } else {
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Detector
// ---------------------------------------------------------------------------

pub struct TechDetector {
    fetcher: Arc<dyn PageFetcher>,
}

impl TechDetector {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Detect which of `tools` a domain's homepage uses. A fetch failure is
    /// no data, not an error: the lead simply gets no tech signals.
    pub async fn detect(&self, domain: &str, tools: &[String]) -> Vec<String> {
        if tools.is_empty() {
            return Vec::new();
        }

        let html = match self.fetcher.homepage_html(domain).await {
            Ok(html) => html.to_lowercase(),
            Err(e) => {
                warn!(domain, error = %e, "Homepage fetch failed, skipping tech detection");
                return Vec::new();
            }
        };

        let detected: Vec<String> = tools
            .iter()
            .filter(|tool| detect_tool(&html, tool))
            .cloned()
            .collect();
        debug!(domain, detected = detected.len(), "Tech detection complete");
        detected
    }
}
