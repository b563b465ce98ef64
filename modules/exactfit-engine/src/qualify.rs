// Qualification: the permissive-by-default filter between scoring and
// output. Dropped leads are preserved in the unqualified sequence, never
// discarded.

use exactfit_common::types::{CustomerConfig, ScoredLead};

/// Thresholds a lead must clear to qualify.
#[derive(Debug, Clone)]
pub struct QualifyRules {
    pub min_signals: u32,
    pub min_score: u32,
}

impl Default for QualifyRules {
    fn default() -> Self {
        Self {
            min_signals: 1,
            min_score: 0,
        }
    }
}

impl From<&CustomerConfig> for QualifyRules {
    fn from(config: &CustomerConfig) -> Self {
        Self {
            min_signals: config.min_signals,
            min_score: config.min_score,
        }
    }
}

#[derive(Debug, Default)]
pub struct QualifiedSplit {
    pub qualified: Vec<ScoredLead>,
    pub unqualified: Vec<ScoredLead>,
}

/// Keep a lead iff it has enough signals AND enough score.
pub fn qualify(leads: Vec<ScoredLead>, rules: &QualifyRules) -> QualifiedSplit {
    let mut split = QualifiedSplit::default();
    for lead in leads {
        if lead.signal_count >= rules.min_signals && lead.score >= rules.min_score {
            split.qualified.push(lead);
        } else {
            split.unqualified.push(lead);
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{score_lead, SignalWeights};
    use exactfit_common::types::{CandidateCompany, SignalType};

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
    fn default_rules_keep_any_lead_with_one_signal() {
        let split = qualify(
            vec![scored("Hiring SDR"), scored("Hiring Office Manager")],
            &QualifyRules::default(),
        );
        assert_eq!(split.qualified.len(), 1);
        assert_eq!(split.unqualified.len(), 1);
    }

    #[test]
    fn min_score_drops_low_scoring_leads_into_unqualified() {
        let rules = QualifyRules {
            min_signals: 1,
            min_score: 50,
        };
        // One signal at 40 points: enough signals, not enough score.
        let split = qualify(vec![scored("Hiring SDR")], &rules);
        assert!(split.qualified.is_empty());
        assert_eq!(split.unqualified.len(), 1);
    }

    #[test]
    fn both_thresholds_must_pass() {
        let rules = QualifyRules {
            min_signals: 3,
            min_score: 40,
        };
        // 40 points but only one signal.
        let split = qualify(vec![scored("Hiring SDR")], &rules);
        assert!(split.qualified.is_empty());
    }

    #[test]
    fn rules_come_from_customer_config() {
        let config = CustomerConfig {
            min_signals: 2,
            min_score: 30,
            ..Default::default()
        };
        let rules = QualifyRules::from(&config);
        assert_eq!(rules.min_signals, 2);
        assert_eq!(rules.min_score, 30);
    }
}
