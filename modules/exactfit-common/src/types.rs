use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Enums ---

/// What kind of buying-intent evidence first surfaced a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    Hiring,
    Funding,
    TechStack,
    YcCompany,
    ProductLaunch,
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalType::Hiring => write!(f, "hiring"),
            SignalType::Funding => write!(f, "funding"),
            SignalType::TechStack => write!(f, "tech_stack"),
            SignalType::YcCompany => write!(f, "yc_company"),
            SignalType::ProductLaunch => write!(f, "product_launch"),
        }
    }
}

impl SignalType {
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "funding" | "funding_news" => Self::Funding,
            "tech_stack" => Self::TechStack,
            "yc_company" => Self::YcCompany,
            "product_launch" => Self::ProductLaunch,
            _ => Self::Hiring,
        }
    }
}

/// Where a lead sits in the pipeline. A lead is never deleted once created;
/// "dropped" leads are excluded from output sequences, not destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Discovered,
    Enriched,
    EnrichmentFailed,
    Scored,
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadStatus::Discovered => write!(f, "discovered"),
            LeadStatus::Enriched => write!(f, "enriched"),
            LeadStatus::EnrichmentFailed => write!(f, "enrichment_failed"),
            LeadStatus::Scored => write!(f, "scored"),
        }
    }
}

/// Which discovery backend a raw search hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Greenhouse,
    Lever,
    Wellfound,
    Builtin,
    Indeed,
    Glassdoor,
    Linkedin,
    FundingNews,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Greenhouse => write!(f, "greenhouse"),
            SourceKind::Lever => write!(f, "lever"),
            SourceKind::Wellfound => write!(f, "wellfound"),
            SourceKind::Builtin => write!(f, "builtin"),
            SourceKind::Indeed => write!(f, "indeed"),
            SourceKind::Glassdoor => write!(f, "glassdoor"),
            SourceKind::Linkedin => write!(f, "linkedin"),
            SourceKind::FundingNews => write!(f, "funding_news"),
        }
    }
}

impl SourceKind {
    /// Classify a search-result URL by the job board or news site it points at.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.contains("greenhouse.io") {
            Some(Self::Greenhouse)
        } else if url.contains("lever.co") {
            Some(Self::Lever)
        } else if url.contains("wellfound.com") {
            Some(Self::Wellfound)
        } else if url.contains("builtin.com") {
            Some(Self::Builtin)
        } else if url.contains("indeed.com") {
            Some(Self::Indeed)
        } else if url.contains("glassdoor.com") {
            Some(Self::Glassdoor)
        } else if url.contains("linkedin.com") {
            Some(Self::Linkedin)
        } else if url.contains("techcrunch.com") || url.contains("crunchbase.com") {
            Some(Self::FundingNews)
        } else {
            None
        }
    }
}

/// Which contact-finding provider contributed to a resolved contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactSource {
    Hunter,
    Pdl,
}

impl std::fmt::Display for ContactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactSource::Hunter => write!(f, "hunter"),
            ContactSource::Pdl => write!(f, "pdl"),
        }
    }
}

/// Closed set of scoreable intent signals. Not every variant is wired into
/// every discovery pathway; the weight table covers them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    HiringSales,
    HiringMultiple,
    HiringLeadership,
    Funding,
    TechCompetitor,
    TechTarget,
    RedditMention,
    RedditBuyingIntent,
    G2Complaint,
    GrowthSignal,
    ComboBonus,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::HiringSales => write!(f, "hiring_sales"),
            SignalKind::HiringMultiple => write!(f, "hiring_multiple"),
            SignalKind::HiringLeadership => write!(f, "hiring_leadership"),
            SignalKind::Funding => write!(f, "funding"),
            SignalKind::TechCompetitor => write!(f, "tech_competitor"),
            SignalKind::TechTarget => write!(f, "tech_target"),
            SignalKind::RedditMention => write!(f, "reddit_mention"),
            SignalKind::RedditBuyingIntent => write!(f, "reddit_buying_intent"),
            SignalKind::G2Complaint => write!(f, "g2_complaint"),
            SignalKind::GrowthSignal => write!(f, "growth_signal"),
            SignalKind::ComboBonus => write!(f, "combo_bonus"),
        }
    }
}

/// Tier derived from the final score. Always recomputed from the score,
/// never cached independently of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Hot,
    Warm,
    Cold,
}

impl Tier {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            Tier::Hot
        } else if score >= 50 {
            Tier::Warm
        } else {
            Tier::Cold
        }
    }

    pub fn recommended_action(&self) -> &'static str {
        match self {
            Tier::Hot => "Contact immediately",
            Tier::Warm => "Contact this week",
            Tier::Cold => "Keep monitoring",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Hot => write!(f, "hot"),
            Tier::Warm => write!(f, "warm"),
            Tier::Cold => write!(f, "cold"),
        }
    }
}

// --- Discovery records ---

/// One raw hit from a search backend, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// The query that produced this hit.
    pub query: String,
    pub source_kind: Option<SourceKind>,
    /// Board-specific company slug extracted from the URL, when the board
    /// embeds one (boards.greenhouse.io/<slug>/...).
    pub company_slug: Option<String>,
    /// Real company domain scraped from the job page. Always preferred over
    /// the slug guess when present.
    pub verified_domain: Option<String>,
}

/// A startup-directory entry (YC-style batch directory).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub company_name: String,
    pub website: Option<String>,
    pub batch: String,
    pub one_liner: String,
    pub source_url: String,
}

/// A launch-directory entry (Product-Hunt-style daily launches).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchEntry {
    pub product_name: String,
    pub tagline: String,
    pub source_url: String,
}

// --- Provider records ---

/// One web-search hit as the search backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// One news-search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A candidate contact from provider #1 (direct finder or bulk
/// domain-contact list).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCandidate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    /// Provider-reported confidence, 0-100. Never flows into the resolved
    /// contact's confidence (that one is source-count-derived).
    pub confidence: u32,
    /// Provider #1's own deliverability check, when it ran one.
    pub verified: bool,
}

impl ContactCandidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A person record from provider #2's find-person endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRecord {
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
}

/// Provider #2's verdict on an email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailVerification {
    pub valid: bool,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
}

impl EmailVerification {
    pub fn invalid() -> Self {
        Self {
            valid: false,
            first_name: None,
            last_name: None,
            title: None,
            linkedin_url: None,
        }
    }
}

/// A raw social post from the mention search backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialPost {
    pub title: String,
    pub body: String,
    pub author: String,
    pub subreddit: String,
    pub url: String,
    pub score: i64,
    pub num_comments: u32,
}

// --- Candidate Company ---

/// A company discovered with a buying-intent signal. The lowercased domain
/// is the canonical identity used for deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateCompany {
    pub id: Uuid,
    pub company_name: String,
    pub domain: String,
    pub source_url: String,
    pub signal_type: SignalType,
    pub signal_detail: String,
    pub status: LeadStatus,
    pub score: u32,
    pub discovered_at: DateTime<Utc>,
}

impl CandidateCompany {
    pub fn new(
        company_name: impl Into<String>,
        domain: impl Into<String>,
        source_url: impl Into<String>,
        signal_type: SignalType,
        signal_detail: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_name: company_name.into(),
            domain: domain.into().to_lowercase(),
            source_url: source_url.into(),
            signal_type,
            signal_detail: signal_detail.into(),
            status: LeadStatus::Discovered,
            score: 0,
            discovered_at: Utc::now(),
        }
    }
}

// --- Contact ---

/// A resolved contact for a lead. Confidence encodes how many independent
/// providers agree — it is a fixed lookup table {0.9, 0.85, 0.7, 0.6},
/// not a calibrated probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub confidence: f64,
    pub sources: Vec<ContactSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    /// A different email provider #2 surfaced for the same domain+title.
    /// Recorded, never used for outreach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_email: Option<String>,
    /// False when the title matcher found nothing and the caller fell back
    /// to the first/highest-confidence contact in the raw list.
    pub exact_title_match: bool,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// --- Signals and scored leads ---

/// One scored piece of evidence. Insertion order is detection order; the
/// first signal is the primary one for opener generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub points: u32,
    pub detail: String,
}

/// A tech-stack detection on a lead's website, categorized against the
/// customer's competitor/target tool lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechSignal {
    pub kind: SignalKind,
    pub tool: String,
    pub detail: String,
}

/// A lead that made it through enrichment with a contact attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedLead {
    pub company: CandidateCompany,
    pub contact: Contact,
}

/// Final pipeline output for one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredLead {
    pub company: CandidateCompany,
    pub contact: Option<Contact>,
    pub signals: Vec<Signal>,
    pub signal_count: u32,
    pub score: u32,
    pub tier: Tier,
    pub recommended_action: String,
    pub talking_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_opener: Option<String>,
}

/// A lead that could not be processed, with a human-readable reason.
/// Failures are data routed alongside successes, never raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedLead {
    pub company: CandidateCompany,
    pub reason: String,
}

/// A market-level social mention (competitor complaint, tool-recommendation
/// ask). Attached to the run, not to individual leads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionPost {
    pub title: String,
    pub body: String,
    pub author: String,
    pub subreddit: String,
    pub url: String,
    pub score: i64,
    pub num_comments: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor: Option<String>,
    pub signal_kind: SignalKind,
    pub signal_detail: String,
}

// --- Customer configuration ---

/// Per-customer ICP settings driving scoring and qualification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerConfig {
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub target_tools: Vec<String>,
    #[serde(default)]
    pub target_job_title: Option<String>,
    #[serde(default = "default_min_signals")]
    pub min_signals: u32,
    #[serde(default)]
    pub min_score: u32,
}

fn default_min_signals() -> u32 {
    1
}

impl CustomerConfig {
    /// All tools worth detecting on a lead's website.
    pub fn all_tools(&self) -> Vec<String> {
        let mut tools = self.competitors.clone();
        tools.extend(self.target_tools.iter().cloned());
        tools
    }
}

// --- Domain helpers ---

/// Extract a clean, lowercased domain from a URL
/// ("https://www.Example.com/path?q=1" -> "example.com").
pub fn extract_domain(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let stripped = stripped.strip_prefix("www.").unwrap_or(stripped);
    stripped
        .split('/')
        .next()
        .unwrap_or("")
        .split('?')
        .next()
        .unwrap_or("")
        .to_lowercase()
}

/// Deduplication-key invariant: a usable domain is non-empty, contains a
/// dot, and is at least 4 characters long.
pub fn is_valid_domain(domain: &str) -> bool {
    !domain.is_empty() && domain.contains('.') && domain.len() >= 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_from_score_boundaries() {
        assert_eq!(Tier::from_score(80), Tier::Hot);
        assert_eq!(Tier::from_score(79), Tier::Warm);
        assert_eq!(Tier::from_score(50), Tier::Warm);
        assert_eq!(Tier::from_score(49), Tier::Cold);
        assert_eq!(Tier::from_score(0), Tier::Cold);
        assert_eq!(Tier::from_score(100), Tier::Hot);
    }

    #[test]
    fn source_kind_from_url_classifies_boards() {
        assert_eq!(
            SourceKind::from_url("https://boards.greenhouse.io/acme/jobs/1"),
            Some(SourceKind::Greenhouse)
        );
        assert_eq!(
            SourceKind::from_url("https://jobs.lever.co/acme/123"),
            Some(SourceKind::Lever)
        );
        assert_eq!(
            SourceKind::from_url("https://techcrunch.com/2026/01/acme-raises"),
            Some(SourceKind::FundingNews)
        );
        assert_eq!(SourceKind::from_url("https://acme.com/careers"), None);
    }

    #[test]
    fn extract_domain_strips_scheme_www_and_path() {
        assert_eq!(extract_domain("https://www.Example.com/path?q=1"), "example.com");
        assert_eq!(extract_domain("http://acme.io"), "acme.io");
        assert_eq!(extract_domain("acme.io/jobs"), "acme.io");
    }

    #[test]
    fn domain_validity_invariant() {
        assert!(is_valid_domain("acme.com"));
        assert!(is_valid_domain("a.co"));
        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain("acme"));
        assert!(!is_valid_domain("a.b"));
    }

    #[test]
    fn signal_kind_serializes_snake_case() {
        let json = serde_json::to_string(&SignalKind::HiringSales).unwrap();
        assert_eq!(json, "\"hiring_sales\"");
        let json = serde_json::to_string(&SignalKind::ComboBonus).unwrap();
        assert_eq!(json, "\"combo_bonus\"");
    }

    #[test]
    fn customer_config_defaults_are_permissive() {
        let config: CustomerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.min_signals, 1);
        assert_eq!(config.min_score, 0);
        assert!(config.competitors.is_empty());
    }

    #[test]
    fn contact_full_name_trims_missing_parts() {
        let contact = Contact {
            email: "a@acme.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: String::new(),
            title: "VP Sales".to_string(),
            confidence: 0.9,
            sources: vec![ContactSource::Hunter, ContactSource::Pdl],
            linkedin_url: None,
            alternate_email: None,
            exact_title_match: true,
        };
        assert_eq!(contact.full_name(), "Ada");
    }
}
