// Fuzzy job-title matching used for contact selection.
//
// Provider #1's bulk-list selection runs the seniority-boosted variant;
// provider #2's candidate selection runs the plain variant. Both share the
// same normalization, substring short-circuit and overlap scoring.

use std::collections::HashSet;

/// Words that carry no matching signal in a job title.
const STOP_WORDS: &[&str] = &["of", "the", "and", "a", "an", "at", "in", "for"];

/// Seniority/role keywords that earn the boosted variant's flat bonus when
/// they appear in the matched-word intersection.
const SENIORITY_KEYWORDS: &[&str] = &[
    "head",
    "vp",
    "vice",
    "president",
    "director",
    "manager",
    "chief",
    "lead",
    "senior",
];

/// Immutable matcher configuration, passed in explicitly rather than read
/// from module globals.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    pub stop_words: &'static [&'static str],
    pub seniority_keywords: &'static [&'static str],
    /// Flat bonus added when the matched words include a seniority keyword.
    pub seniority_bonus: f64,
    /// Minimum overlap score for a candidate to be accepted.
    pub min_score: f64,
    /// Whether the seniority bonus applies at all (the two variants).
    pub boost_seniority: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            stop_words: STOP_WORDS,
            seniority_keywords: SENIORITY_KEYWORDS,
            seniority_bonus: 0.2,
            min_score: 0.4,
            boost_seniority: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TitleMatcher {
    config: MatcherConfig,
}

impl TitleMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Plain variant: word overlap only.
    pub fn plain() -> Self {
        Self::new(MatcherConfig::default())
    }

    /// Boosted variant: +0.2 when the overlap hits a seniority keyword.
    pub fn with_seniority_boost() -> Self {
        Self::new(MatcherConfig {
            boost_seniority: true,
            ..MatcherConfig::default()
        })
    }

    /// Select the best-matching position, returning its index.
    ///
    /// Precedence: an exact substring relation (either direction, on the raw
    /// lowercased strings) wins immediately; otherwise the highest word
    /// overlap ≥ min_score wins, earliest candidate on ties. An empty target
    /// never matches — the caller applies its default selection policy.
    pub fn best_match(&self, target: &str, positions: &[&str]) -> Option<usize> {
        if target.trim().is_empty() {
            return None;
        }

        let target_lower = target.to_lowercase();
        let target_words = self.normalize_words(&target_lower);

        let mut best_idx: Option<usize> = None;
        let mut best_score = 0.0_f64;

        for (idx, position) in positions.iter().enumerate() {
            let position_lower = position.to_lowercase();
            let position_words = self.normalize_words(&position_lower);

            if position_words.is_empty() {
                continue;
            }

            // Highest-precedence match, no further scoring.
            if position_lower.contains(&target_lower) || target_lower.contains(&position_lower) {
                return Some(idx);
            }

            let score = self.overlap_score(&target_words, &position_words);
            if score > best_score {
                best_score = score;
                best_idx = Some(idx);
            }
        }

        if best_score >= self.config.min_score {
            best_idx
        } else {
            None
        }
    }

    /// Word-overlap score for a single target/position pair. Exposed so the
    /// scoring behavior itself is testable apart from selection.
    pub fn score(&self, target: &str, position: &str) -> f64 {
        let target_words = self.normalize_words(&target.to_lowercase());
        let position_words = self.normalize_words(&position.to_lowercase());
        self.overlap_score(&target_words, &position_words)
    }

    fn overlap_score(
        &self,
        target_words: &HashSet<String>,
        position_words: &HashSet<String>,
    ) -> f64 {
        let matching: HashSet<&String> = target_words.intersection(position_words).collect();
        let mut score = matching.len() as f64 / target_words.len().max(1) as f64;

        if self.config.boost_seniority
            && matching
                .iter()
                .any(|w| self.config.seniority_keywords.contains(&w.as_str()))
        {
            score += self.config.seniority_bonus;
        }

        score
    }

    /// Lowercase, hyphens to spaces, split, drop stop words.
    fn normalize_words(&self, lowercased: &str) -> HashSet<String> {
        lowercased
            .replace('-', " ")
            .split_whitespace()
            .filter(|w| !self.config.stop_words.contains(w))
            .map(|w| w.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_substring_short_circuits() {
        let matcher = TitleMatcher::plain();
        let positions = vec!["Chief Revenue Officer", "VP Sales and Marketing"];
        // "vp sales" is a substring of "vp sales and marketing"
        assert_eq!(matcher.best_match("VP Sales", &positions), Some(1));
    }

    #[test]
    fn overlap_selects_head_of_support_operations() {
        let matcher = TitleMatcher::plain();
        let positions = vec!["VP of Customer Support and Head of Support Operations"];
        // Words {head, support} overlap after stop-word removal: 2/2 = 1.0.
        let score = matcher.score("Head of Support", positions[0]);
        assert!(score >= 0.4, "expected >= 0.4, got {score}");
        assert_eq!(matcher.best_match("Head of Support", &positions), Some(0));
    }

    #[test]
    fn zero_overlap_returns_no_match() {
        let matcher = TitleMatcher::plain();
        let positions = vec!["Software Engineer"];
        assert_eq!(matcher.best_match("HR Manager", &positions), None);
        assert_eq!(matcher.score("HR Manager", "Software Engineer"), 0.0);
    }

    #[test]
    fn empty_target_never_matches() {
        let matcher = TitleMatcher::plain();
        let positions = vec!["VP Sales"];
        assert_eq!(matcher.best_match("", &positions), None);
        assert_eq!(matcher.best_match("   ", &positions), None);
    }

    #[test]
    fn empty_positions_are_skipped() {
        let matcher = TitleMatcher::plain();
        let positions = vec!["", "   ", "VP Sales"];
        assert_eq!(matcher.best_match("VP Sales", &positions), Some(2));
    }

    #[test]
    fn seniority_bonus_lifts_boosted_variant_over_threshold() {
        // One of three target words matches (1/3 ≈ 0.33): below threshold
        // plain, above it with the +0.2 seniority bonus on "director".
        let plain = TitleMatcher::plain();
        let boosted = TitleMatcher::with_seniority_boost();
        let positions = vec!["Director of Engineering"];
        let target = "Director Revenue Operations";

        assert_eq!(plain.best_match(target, &positions), None);
        assert_eq!(boosted.best_match(target, &positions), Some(0));
    }

    #[test]
    fn ties_keep_the_earliest_candidate() {
        let matcher = TitleMatcher::plain();
        // Both overlap exactly one of the two target words (0.5 each).
        let positions = vec!["Sales Engineer", "Sales Analyst"];
        assert_eq!(matcher.best_match("Sales Operations", &positions), Some(0));
    }

    #[test]
    fn hyphens_are_treated_as_spaces() {
        let matcher = TitleMatcher::plain();
        let positions = vec!["Sales-Operations Specialist"];
        assert_eq!(matcher.best_match("Sales Operations", &positions), Some(0));
    }
}
