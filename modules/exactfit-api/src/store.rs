// In-memory lead store backing the REST surface. Leads are never deleted:
// enrichment failures and unqualified leads keep their records, flagged by
// status, so every pipeline outcome stays inspectable.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use exactfit_common::types::{
    CandidateCompany, Contact, EnrichedLead, FailedLead, LeadStatus, ScoredLead, Signal, Tier,
};

#[derive(Debug, Clone, Serialize)]
pub struct StoredLead {
    pub company: CandidateCompany,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    pub signals: Vec<Signal>,
    pub signal_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_action: Option<String>,
    pub talking_points: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_opener: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Whether the last scoring pass qualified this lead.
    pub qualified: bool,
}

impl StoredLead {
    fn discovered(company: CandidateCompany) -> Self {
        Self {
            company,
            contact: None,
            signals: Vec::new(),
            signal_count: 0,
            tier: None,
            recommended_action: None,
            talking_points: Vec::new(),
            sample_opener: None,
            failure_reason: None,
            qualified: false,
        }
    }
}

/// Listing filters for GET /api/leads.
#[derive(Debug, Default)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub tier: Option<Tier>,
    pub min_score: Option<u32>,
    pub limit: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct StoreStats {
    pub total: u32,
    pub discovered: u32,
    pub enriched: u32,
    pub enrichment_failed: u32,
    pub scored: u32,
    pub hot: u32,
    pub warm: u32,
    pub cold: u32,
    pub avg_score: f64,
}

#[derive(Default)]
pub struct LeadStore {
    leads: RwLock<HashMap<Uuid, StoredLead>>,
}

impl LeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert newly discovered companies. Returns how many were inserted.
    pub async fn insert_discovered(&self, companies: Vec<CandidateCompany>) -> usize {
        let mut leads = self.leads.write().await;
        let mut inserted = 0;
        for company in companies {
            leads.insert(company.id, StoredLead::discovered(company));
            inserted += 1;
        }
        inserted
    }

    /// Companies in a given status, for stage input. With `ids`, restricts
    /// to that set.
    pub async fn companies_in_status(
        &self,
        status: LeadStatus,
        ids: Option<&[Uuid]>,
    ) -> Vec<CandidateCompany> {
        let leads = self.leads.read().await;
        leads
            .values()
            .filter(|l| l.company.status == status)
            .filter(|l| ids.is_none_or(|ids| ids.contains(&l.company.id)))
            .map(|l| l.company.clone())
            .collect()
    }

    /// Enriched leads ready for scoring, as (company, contact) pairs.
    pub async fn enriched_pairs(
        &self,
        ids: Option<&[Uuid]>,
    ) -> Vec<(CandidateCompany, Option<Contact>)> {
        let leads = self.leads.read().await;
        leads
            .values()
            .filter(|l| l.company.status == LeadStatus::Enriched)
            .filter(|l| ids.is_none_or(|ids| ids.contains(&l.company.id)))
            .map(|l| (l.company.clone(), l.contact.clone()))
            .collect()
    }

    /// Apply enrichment results.
    pub async fn apply_enrichment(&self, enriched: &[EnrichedLead], failed: &[FailedLead]) {
        let mut leads = self.leads.write().await;
        for lead in enriched {
            let entry = leads
                .entry(lead.company.id)
                .or_insert_with(|| StoredLead::discovered(lead.company.clone()));
            entry.company = lead.company.clone();
            entry.contact = Some(lead.contact.clone());
            entry.failure_reason = None;
        }
        for lead in failed {
            let entry = leads
                .entry(lead.company.id)
                .or_insert_with(|| StoredLead::discovered(lead.company.clone()));
            entry.company = lead.company.clone();
            entry.failure_reason = Some(lead.reason.clone());
        }
    }

    /// Apply scoring results (qualified and unqualified alike).
    pub async fn apply_scoring(&self, qualified: &[ScoredLead], unqualified: &[ScoredLead]) {
        let mut leads = self.leads.write().await;
        for (scored, is_qualified) in qualified
            .iter()
            .map(|l| (l, true))
            .chain(unqualified.iter().map(|l| (l, false)))
        {
            let entry = leads
                .entry(scored.company.id)
                .or_insert_with(|| StoredLead::discovered(scored.company.clone()));
            entry.company = scored.company.clone();
            entry.contact = scored.contact.clone();
            entry.signals = scored.signals.clone();
            entry.signal_count = scored.signal_count;
            entry.tier = Some(scored.tier);
            entry.recommended_action = Some(scored.recommended_action.clone());
            entry.talking_points = scored.talking_points.clone();
            entry.sample_opener = scored.sample_opener.clone();
            entry.qualified = is_qualified;
        }
    }

    /// Filtered listing, highest score first.
    pub async fn list(&self, filter: &LeadFilter) -> Vec<StoredLead> {
        let leads = self.leads.read().await;
        let mut out: Vec<StoredLead> = leads
            .values()
            .filter(|l| filter.status.is_none_or(|s| l.company.status == s))
            .filter(|l| filter.tier.is_none_or(|t| l.tier == Some(t)))
            .filter(|l| filter.min_score.is_none_or(|m| l.company.score >= m))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.company.score.cmp(&a.company.score));
        if filter.limit > 0 {
            out.truncate(filter.limit);
        }
        out
    }

    pub async fn stats(&self) -> StoreStats {
        let leads = self.leads.read().await;
        let mut stats = StoreStats::default();
        let mut scores = Vec::new();

        for lead in leads.values() {
            stats.total += 1;
            match lead.company.status {
                LeadStatus::Discovered => stats.discovered += 1,
                LeadStatus::Enriched => stats.enriched += 1,
                LeadStatus::EnrichmentFailed => stats.enrichment_failed += 1,
                LeadStatus::Scored => {
                    stats.scored += 1;
                    scores.push(lead.company.score);
                    match lead.tier {
                        Some(Tier::Hot) => stats.hot += 1,
                        Some(Tier::Warm) => stats.warm += 1,
                        Some(Tier::Cold) => stats.cold += 1,
                        None => {}
                    }
                }
            }
        }

        if !scores.is_empty() {
            let sum: u32 = scores.iter().sum();
            stats.avg_score = (sum as f64 / scores.len() as f64 * 10.0).round() / 10.0;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exactfit_common::types::SignalType;

    fn company(domain: &str) -> CandidateCompany {
        CandidateCompany::new(
            "Acme",
            domain,
            "https://example.com",
            SignalType::Hiring,
            "Hiring SDR",
        )
    }

    #[tokio::test]
    async fn discovered_leads_are_listed_and_counted() {
        let store = LeadStore::new();
        store
            .insert_discovered(vec![company("a.com"), company("b.com")])
            .await;

        let all = store.list(&LeadFilter::default()).await;
        assert_eq!(all.len(), 2);

        let stats = store.stats().await;
        assert_eq!(stats.total, 2);
        assert_eq!(stats.discovered, 2);
    }

    #[tokio::test]
    async fn status_filter_selects_stage_input() {
        let store = LeadStore::new();
        store.insert_discovered(vec![company("a.com")]).await;

        let discovered = store
            .companies_in_status(LeadStatus::Discovered, None)
            .await;
        assert_eq!(discovered.len(), 1);

        let enriched = store.companies_in_status(LeadStatus::Enriched, None).await;
        assert!(enriched.is_empty());
    }

    #[tokio::test]
    async fn enrichment_failure_keeps_the_lead_with_a_reason() {
        let store = LeadStore::new();
        let mut failed_company = company("a.com");
        store.insert_discovered(vec![failed_company.clone()]).await;

        failed_company.status = LeadStatus::EnrichmentFailed;
        store
            .apply_enrichment(
                &[],
                &[FailedLead {
                    company: failed_company,
                    reason: "no email found from either provider".to_string(),
                }],
            )
            .await;

        let all = store.list(&LeadFilter::default()).await;
        assert_eq!(all.len(), 1);
        assert_eq!(
            all[0].failure_reason.as_deref(),
            Some("no email found from either provider")
        );
    }
}
