// Source normalization: heterogeneous discovery-provider output becomes a
// uniform CandidateCompany record. Deterministic — job-board URLs carry a
// company slug, news headlines carry a company name and funding amount,
// directory entries carry their own fields.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use exactfit_common::types::{
    extract_domain, CandidateCompany, DirectoryEntry, LaunchEntry, NewsItem, RawSearchResult,
    SearchHit, SignalType, SourceKind,
};

/// Leading capitalized words of a funding headline ("Acme Robotics raises…").
static HEADLINE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)?)").unwrap());

/// Funding amount: $4M, $1.5B, $750K.
static FUNDING_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[\d.]+[MBK]").unwrap());

/// Classify one web-search hit: attach the board kind and, where the board
/// embeds one, the company slug.
pub fn classify_hit(hit: SearchHit, query: &str) -> RawSearchResult {
    let source_kind = SourceKind::from_url(&hit.url);
    let company_slug = source_kind.and_then(|kind| match kind {
        SourceKind::Greenhouse => slug_after(&hit.url, "greenhouse.io/"),
        SourceKind::Lever => slug_after(&hit.url, "lever.co/"),
        SourceKind::Wellfound | SourceKind::Linkedin => slug_after(&hit.url, "/company/"),
        SourceKind::Indeed => slug_after(&hit.url, "/cmp/"),
        SourceKind::Builtin | SourceKind::Glassdoor | SourceKind::FundingNews => None,
    });

    RawSearchResult {
        title: hit.title,
        url: hit.url,
        snippet: hit.snippet,
        query: query.to_string(),
        source_kind,
        company_slug,
        verified_domain: None,
    }
}

/// Drop repeat URLs, keeping the first occurrence of each.
pub fn dedup_results_by_url(results: Vec<RawSearchResult>) -> Vec<RawSearchResult> {
    let mut seen: HashSet<String> = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.url.clone()))
        .collect()
}

/// Build a candidate from a classified search hit. Returns `None` for hits
/// with nothing to anchor a company identity on (board homepages, news
/// listings, unclassified URLs without a verified domain).
pub fn candidate_from_result(result: &RawSearchResult) -> Option<CandidateCompany> {
    let kind = result.source_kind?;

    if kind == SourceKind::FundingNews {
        return candidate_from_news(&NewsItem {
            title: result.title.clone(),
            url: result.url.clone(),
            snippet: result.snippet.clone(),
            date: None,
            source: None,
        });
    }

    let (company_name, domain) = match (&result.company_slug, &result.verified_domain) {
        (Some(slug), Some(verified)) => (humanize_slug(slug), verified.to_lowercase()),
        (Some(slug), None) => (humanize_slug(slug), format!("{}.com", slug.to_lowercase())),
        // No slug: only a scraped real domain can anchor the company.
        (None, Some(verified)) => {
            let domain = verified.to_lowercase();
            (name_from_domain(&domain), domain)
        }
        (None, None) => return None,
    };

    Some(CandidateCompany::new(
        company_name,
        domain,
        result.url.clone(),
        SignalType::Hiring,
        format!("Hiring: {}", result.title),
    ))
}

/// Build a funding candidate from a news hit: company name from the
/// headline, round size from the `$N[MBK]` pattern when present.
pub fn candidate_from_news(item: &NewsItem) -> Option<CandidateCompany> {
    let name = HEADLINE_NAME_RE
        .captures(&item.title)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())?;
    if name.len() <= 2 {
        return None;
    }

    let haystack = format!("{} {}", item.title, item.snippet);
    let detail = match FUNDING_AMOUNT_RE.find(&haystack) {
        Some(amount) => format!("Raised {}", amount.as_str()),
        None => "Recent funding announcement".to_string(),
    };

    let domain = format!("{}.com", name.to_lowercase().replace(' ', ""));

    Some(CandidateCompany::new(
        name,
        domain,
        item.url.clone(),
        SignalType::Funding,
        detail,
    ))
}

/// Build a candidate from a startup-directory entry.
pub fn candidate_from_directory(entry: &DirectoryEntry) -> Option<CandidateCompany> {
    if entry.company_name.is_empty() {
        return None;
    }

    let domain = match &entry.website {
        Some(site) if !site.is_empty() => extract_domain(site),
        _ => format!(
            "{}.com",
            entry.company_name.to_lowercase().replace([' ', '-'], "")
        ),
    };

    let one_liner: String = entry.one_liner.chars().take(50).collect();
    Some(CandidateCompany::new(
        entry.company_name.clone(),
        domain,
        entry.source_url.clone(),
        SignalType::YcCompany,
        format!("Y Combinator {} - {}", entry.batch, one_liner),
    ))
}

/// Build a candidate from a launch-directory entry.
pub fn candidate_from_launch(entry: &LaunchEntry) -> Option<CandidateCompany> {
    if entry.product_name.is_empty() {
        return None;
    }

    let domain = format!(
        "{}.com",
        entry.product_name.to_lowercase().replace([' ', '-'], "")
    );
    let tagline: String = entry.tagline.chars().take(50).collect();

    Some(CandidateCompany::new(
        entry.product_name.clone(),
        domain,
        entry.source_url.clone(),
        SignalType::ProductLaunch,
        format!("Recently launched: {tagline}"),
    ))
}

fn slug_after(url: &str, marker: &str) -> Option<String> {
    let rest = url.split(marker).nth(1)?;
    let slug = rest.split(['/', '?']).next().unwrap_or("");
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}

/// "acme-corp" -> "Acme Corp".
fn humanize_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// "acme.com" -> "Acme".
fn name_from_domain(domain: &str) -> String {
    humanize_slug(domain.split('.').next().unwrap_or(domain))
}
