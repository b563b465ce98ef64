// Weighted multi-signal lead scoring. Pure functions over a lead's
// accumulated evidence — no provider calls, deterministic for fixed input.

use exactfit_common::types::{
    CandidateCompany, Contact, LeadStatus, ScoredLead, Signal, SignalKind, SignalType, TechSignal,
    Tier,
};

/// Job-title fragments that mark a sales hire.
const SALES_KEYWORDS: &[&str] = &[
    "sdr",
    "bdr",
    "sales",
    "account executive",
    "ae",
    "business development",
];

/// Fragments that mark a leadership hire.
const LEADERSHIP_KEYWORDS: &[&str] = &["vp", "head of", "director", "chief", "cro"];

/// Signals needed before the combo bonus fires.
const COMBO_THRESHOLD: usize = 3;

const MAX_SCORE: u32 = 100;

/// Signal weight table. Passed explicitly into scoring; the defaults are
/// the production weights. Some categories cover signal types that not
/// every discovery pathway emits yet.
#[derive(Debug, Clone)]
pub struct SignalWeights {
    /// Hiring SDRs, BDRs, sales roles
    pub hiring_sales: u32,
    /// Bonus: 3+ sales roles
    pub hiring_multiple: u32,
    /// New VP Sales, Head of Sales
    pub hiring_leadership: u32,
    /// Recent funding
    pub funding: u32,
    /// Uses competitor tool
    pub tech_competitor: u32,
    /// Uses target tool (good fit)
    pub tech_target: u32,
    /// Mentioned competitor negatively on Reddit
    pub reddit_mention: u32,
    /// Asking for recommendations
    pub reddit_buying_intent: u32,
    /// Left negative G2 review (hottest)
    pub g2_complaint: u32,
    /// Company growing
    pub growth_signal: u32,
    /// 3+ signals bonus
    pub combo_bonus: u32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            hiring_sales: 40,
            hiring_multiple: 10,
            hiring_leadership: 35,
            funding: 40,
            tech_competitor: 15,
            tech_target: 10,
            reddit_mention: 30,
            reddit_buying_intent: 35,
            g2_complaint: 40,
            growth_signal: 25,
            combo_bonus: 10,
        }
    }
}

impl SignalWeights {
    pub fn points(&self, kind: SignalKind) -> u32 {
        match kind {
            SignalKind::HiringSales => self.hiring_sales,
            SignalKind::HiringMultiple => self.hiring_multiple,
            SignalKind::HiringLeadership => self.hiring_leadership,
            SignalKind::Funding => self.funding,
            SignalKind::TechCompetitor => self.tech_competitor,
            SignalKind::TechTarget => self.tech_target,
            SignalKind::RedditMention => self.reddit_mention,
            SignalKind::RedditBuyingIntent => self.reddit_buying_intent,
            SignalKind::G2Complaint => self.g2_complaint,
            SignalKind::GrowthSignal => self.growth_signal,
            SignalKind::ComboBonus => self.combo_bonus,
        }
    }
}

/// Detect signals for one lead, in detection order: hiring (sales and
/// leadership independently), funding, tech stack, then the combo bonus.
pub fn detect_signals(
    company: &CandidateCompany,
    tech_signals: &[TechSignal],
    weights: &SignalWeights,
) -> Vec<Signal> {
    let mut signals = Vec::new();
    let detail_lower = company.signal_detail.to_lowercase();

    if company.signal_type == SignalType::Hiring {
        if SALES_KEYWORDS.iter().any(|kw| detail_lower.contains(kw)) {
            signals.push(Signal {
                kind: SignalKind::HiringSales,
                points: weights.hiring_sales,
                detail: company.signal_detail.clone(),
            });
        }
        // Not mutually exclusive with a sales hire: "Hiring SDRs and a VP
        // of Sales" counts for both.
        if LEADERSHIP_KEYWORDS.iter().any(|kw| detail_lower.contains(kw)) {
            signals.push(Signal {
                kind: SignalKind::HiringLeadership,
                points: weights.hiring_leadership,
                detail: "Hiring sales leadership".to_string(),
            });
        }
    }

    if company.signal_type == SignalType::Funding
        || detail_lower.contains("funding")
        || detail_lower.contains("raised")
    {
        let detail = if company.signal_detail.is_empty() {
            "Recent funding".to_string()
        } else {
            company.signal_detail.clone()
        };
        signals.push(Signal {
            kind: SignalKind::Funding,
            points: weights.funding,
            detail,
        });
    }

    for tech in tech_signals {
        signals.push(Signal {
            kind: tech.kind,
            points: weights.points(tech.kind),
            detail: tech.detail.clone(),
        });
    }

    if signals.len() >= COMBO_THRESHOLD {
        let detail = format!("Multiple signals detected ({})", signals.len());
        signals.push(Signal {
            kind: SignalKind::ComboBonus,
            points: weights.combo_bonus,
            detail,
        });
    }

    signals
}

/// Score one lead: sum the signal points, clamp to 100, derive the tier.
pub fn score_lead(
    mut company: CandidateCompany,
    contact: Option<Contact>,
    tech_signals: &[TechSignal],
    weights: &SignalWeights,
) -> ScoredLead {
    let signals = detect_signals(&company, tech_signals, weights);
    let raw: u32 = signals.iter().map(|s| s.points).sum();
    let score = raw.min(MAX_SCORE);
    let tier = Tier::from_score(score);

    company.status = LeadStatus::Scored;
    company.score = score;

    ScoredLead {
        company,
        contact,
        signal_count: signals.len() as u32,
        signals,
        score,
        tier,
        recommended_action: tier.recommended_action().to_string(),
        talking_points: Vec::new(),
        sample_opener: None,
    }
}

/// Stable descending sort by score; ties retain input order.
pub fn rank(leads: &mut [ScoredLead]) {
    leads.sort_by(|a, b| b.score.cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use exactfit_common::types::SignalType;

    fn company(signal_type: SignalType, detail: &str) -> CandidateCompany {
        CandidateCompany::new(
            "Acme",
            "acme.com",
            "https://boards.greenhouse.io/acme",
            signal_type,
            detail,
        )
    }

    fn tech(kind: SignalKind, tool: &str, detail: &str) -> TechSignal {
        TechSignal {
            kind,
            tool: tool.to_string(),
            detail: detail.to_string(),
        }
    }

    #[test]
    fn default_weights_reproduce_the_table() {
        let w = SignalWeights::default();
        assert_eq!(w.hiring_sales, 40);
        assert_eq!(w.hiring_multiple, 10);
        assert_eq!(w.hiring_leadership, 35);
        assert_eq!(w.funding, 40);
        assert_eq!(w.tech_competitor, 15);
        assert_eq!(w.tech_target, 10);
        assert_eq!(w.reddit_mention, 30);
        assert_eq!(w.reddit_buying_intent, 35);
        assert_eq!(w.g2_complaint, 40);
        assert_eq!(w.growth_signal, 25);
        assert_eq!(w.combo_bonus, 10);
    }

    #[test]
    fn sales_hire_fires_hiring_sales() {
        let lead = score_lead(
            company(SignalType::Hiring, "Hiring 3 SDRs"),
            None,
            &[],
            &SignalWeights::default(),
        );
        assert_eq!(lead.score, 40);
        assert_eq!(lead.signal_count, 1);
        assert_eq!(lead.signals[0].kind, SignalKind::HiringSales);
        assert_eq!(lead.tier, Tier::Cold);
        assert_eq!(lead.company.status, LeadStatus::Scored);
    }

    #[test]
    fn sales_and_leadership_detection_are_independent() {
        let lead = score_lead(
            company(SignalType::Hiring, "Hiring SDRs and a VP of Sales"),
            None,
            &[],
            &SignalWeights::default(),
        );
        assert_eq!(lead.signal_count, 2);
        assert_eq!(lead.score, 75);
        assert_eq!(lead.tier, Tier::Warm);
    }

    #[test]
    fn funding_fires_on_detail_keywords_too() {
        let lead = score_lead(
            company(SignalType::Hiring, "Hiring ops after they raised $10M"),
            None,
            &[],
            &SignalWeights::default(),
        );
        assert!(lead
            .signals
            .iter()
            .any(|s| s.kind == SignalKind::Funding));
    }

    #[test]
    fn score_clamps_at_100_and_reports_hot() {
        // hiring_sales(40) + hiring_leadership(35) + funding(40) +
        // combo_bonus(10) = 125 raw points.
        let lead = score_lead(
            company(SignalType::Hiring, "Hiring SDRs and a VP of Sales, raised $5M"),
            None,
            &[],
            &SignalWeights::default(),
        );
        let raw: u32 = lead.signals.iter().map(|s| s.points).sum();
        assert_eq!(raw, 125);
        assert_eq!(lead.score, 100);
        assert_eq!(lead.tier, Tier::Hot);
    }

    #[test]
    fn combo_bonus_fires_at_three_signals_and_reports_pre_bonus_count() {
        let lead = score_lead(
            company(SignalType::Hiring, "Hiring SDR"),
            None,
            &[
                tech(SignalKind::TechCompetitor, "Apollo", "Uses Apollo (your competitor)"),
                tech(SignalKind::TechTarget, "HubSpot", "Uses HubSpot (good fit)"),
            ],
            &SignalWeights::default(),
        );
        assert_eq!(lead.signal_count, 4);
        let bonus = lead
            .signals
            .iter()
            .find(|s| s.kind == SignalKind::ComboBonus)
            .unwrap();
        assert_eq!(bonus.detail, "Multiple signals detected (3)");
        assert_eq!(lead.score, 40 + 15 + 10 + 10);
    }

    #[test]
    fn two_signals_get_no_combo_bonus() {
        let lead = score_lead(
            company(SignalType::Hiring, "Hiring SDR"),
            None,
            &[tech(SignalKind::TechTarget, "HubSpot", "Uses HubSpot (good fit)")],
            &SignalWeights::default(),
        );
        assert!(lead
            .signals
            .iter()
            .all(|s| s.kind != SignalKind::ComboBonus));
    }

    #[test]
    fn unrelated_hire_scores_zero() {
        let lead = score_lead(
            company(SignalType::Hiring, "Hiring Marketing Manager"),
            None,
            &[],
            &SignalWeights::default(),
        );
        // "Marketing Manager" hits neither keyword set.
        assert_eq!(lead.score, 0);
        assert_eq!(lead.signal_count, 0);
        assert_eq!(lead.tier, Tier::Cold);
    }

    #[test]
    fn tier_follows_score_at_the_boundaries() {
        for (score, tier) in [(80, Tier::Hot), (79, Tier::Warm), (50, Tier::Warm), (49, Tier::Cold)]
        {
            assert_eq!(Tier::from_score(score), tier);
        }
    }

    #[test]
    fn rank_is_a_stable_descending_sort() {
        let mk = |name: &str, detail: &str| {
            let mut lead = score_lead(
                company(SignalType::Hiring, detail),
                None,
                &[],
                &SignalWeights::default(),
            );
            lead.company.company_name = name.to_string();
            lead
        };
        // Two 40-point leads keep their relative order; the 75-point lead
        // moves to the front.
        let mut leads = vec![
            mk("first", "Hiring SDR"),
            mk("second", "Hiring BDR"),
            mk("leader", "Hiring SDR and VP Sales"),
        ];
        rank(&mut leads);
        assert_eq!(leads[0].company.company_name, "leader");
        assert_eq!(leads[1].company.company_name, "first");
        assert_eq!(leads[2].company.company_name, "second");
    }
}
