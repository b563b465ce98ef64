// Run statistics reported to the surrounding API/persistence layer.

use serde::Serialize;

use exactfit_common::types::{EnrichedLead, FailedLead, ScoredLead, Tier};

/// Resolved contacts at or above this confidence count as high-confidence.
const HIGH_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    pub total_input: u32,
    pub enriched: u32,
    pub failed: u32,
    /// Percentage, one decimal. 0 when there was no input.
    pub success_rate: f64,
    pub high_confidence_count: u32,
    pub qualified: u32,
    pub unqualified: u32,
    pub hot: u32,
    pub warm: u32,
    pub cold: u32,
    /// Mean score over qualified leads, one decimal. 0 when none qualified.
    pub avg_score: f64,
}

impl RunStats {
    pub fn compute(
        total_input: usize,
        enriched: &[EnrichedLead],
        failed: &[FailedLead],
        qualified: &[ScoredLead],
        unqualified: &[ScoredLead],
    ) -> Self {
        let success_rate = if total_input > 0 {
            round1(enriched.len() as f64 / total_input as f64 * 100.0)
        } else {
            0.0
        };

        let avg_score = if qualified.is_empty() {
            0.0
        } else {
            let sum: u32 = qualified.iter().map(|l| l.score).sum();
            round1(sum as f64 / qualified.len() as f64)
        };

        let high_confidence_count = enriched
            .iter()
            .filter(|l| l.contact.confidence >= HIGH_CONFIDENCE)
            .count() as u32;

        let tier_count =
            |tier: Tier| qualified.iter().filter(|l| l.tier == tier).count() as u32;

        Self {
            total_input: total_input as u32,
            enriched: enriched.len() as u32,
            failed: failed.len() as u32,
            success_rate,
            high_confidence_count,
            qualified: qualified.len() as u32,
            unqualified: unqualified.len() as u32,
            hot: tier_count(Tier::Hot),
            warm: tier_count(Tier::Warm),
            cold: tier_count(Tier::Cold),
            avg_score,
        }
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Pipeline Run Complete ===")?;
        writeln!(f, "Leads in:         {}", self.total_input)?;
        writeln!(f, "Enriched:         {}", self.enriched)?;
        writeln!(f, "Failed:           {}", self.failed)?;
        writeln!(f, "Success rate:     {:.1}%", self.success_rate)?;
        writeln!(f, "High confidence:  {}", self.high_confidence_count)?;
        writeln!(f, "Qualified:        {}", self.qualified)?;
        writeln!(f, "Unqualified:      {}", self.unqualified)?;
        writeln!(f, "\nBy tier:")?;
        writeln!(f, "  Hot:  {}", self.hot)?;
        writeln!(f, "  Warm: {}", self.warm)?;
        writeln!(f, "  Cold: {}", self.cold)?;
        writeln!(f, "\nAverage score:    {:.1}", self.avg_score)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{score_lead, SignalWeights};
    use exactfit_common::types::{
        CandidateCompany, Contact, ContactSource, SignalType,
    };

    fn enriched(confidence: f64) -> EnrichedLead {
        EnrichedLead {
            company: CandidateCompany::new(
                "Acme",
                "acme.com",
                "https://example.com",
                SignalType::Hiring,
                "Hiring SDR",
            ),
            contact: Contact {
                email: "a@acme.com".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Nolan".to_string(),
                title: "VP Sales".to_string(),
                confidence,
                sources: vec![ContactSource::Hunter],
                linkedin_url: None,
                alternate_email: None,
                exact_title_match: true,
            },
        }
    }

    fn scored(detail: &str) -> ScoredLead {
        score_lead(
            CandidateCompany::new(
                "Acme",
                "acme.com",
                "https://example.com",
                SignalType::Hiring,
                detail,
            ),
            None,
            &[],
            &SignalWeights::default(),
        )
    }

    #[test]
    fn success_rate_rounds_to_one_decimal() {
        let enriched = vec![enriched(0.9)];
        let failed = vec![
            FailedLead {
                company: CandidateCompany::new(
                    "B",
                    "b.com",
                    "https://example.com",
                    SignalType::Hiring,
                    "",
                ),
                reason: "no email found from either provider".to_string(),
            },
            FailedLead {
                company: CandidateCompany::new(
                    "C",
                    "c.com",
                    "https://example.com",
                    SignalType::Hiring,
                    "",
                ),
                reason: "no domain available".to_string(),
            },
        ];
        let stats = RunStats::compute(3, &enriched, &failed, &[], &[]);
        assert_eq!(stats.success_rate, 33.3);
        assert_eq!(stats.high_confidence_count, 1);
    }

    #[test]
    fn empty_input_reports_zero_rates() {
        let stats = RunStats::compute(0, &[], &[], &[], &[]);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.avg_score, 0.0);
    }

    #[test]
    fn avg_score_covers_qualified_leads_only() {
        let qualified = vec![scored("Hiring SDR"), scored("Hiring SDR and VP Sales")];
        let unqualified = vec![scored("Hiring Office Manager")];
        let stats = RunStats::compute(3, &[], &[], &qualified, &unqualified);
        // (40 + 75) / 2 = 57.5
        assert_eq!(stats.avg_score, 57.5);
        assert_eq!(stats.qualified, 2);
        assert_eq!(stats.unqualified, 1);
    }

    #[test]
    fn tier_counts_follow_scores() {
        let qualified = vec![
            scored("Hiring SDRs and a VP of Sales, raised $5M"), // 100 -> hot
            scored("Hiring SDR and VP Sales"),                   // 75  -> warm
            scored("Hiring SDR"),                                // 40  -> cold
        ];
        let stats = RunStats::compute(3, &[], &[], &qualified, &[]);
        assert_eq!((stats.hot, stats.warm, stats.cold), (1, 1, 1));
    }

    #[test]
    fn confidence_below_threshold_is_not_high_confidence() {
        let enriched = vec![enriched(0.7), enriched(0.85), enriched(0.6)];
        let stats = RunStats::compute(3, &enriched, &[], &[], &[]);
        assert_eq!(stats.high_confidence_count, 1);
    }
}
