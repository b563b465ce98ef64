// Cross-source candidate deduplication. The lowercased domain is the
// canonical company identity; the first-seen record wins and later
// duplicates are dropped silently — expected steady state, not a failure.

use std::collections::HashSet;

use tracing::debug;

use exactfit_common::types::{is_valid_domain, CandidateCompany};

/// Merge candidates down to one record per domain, order-preserving.
/// Records with unusable domains (empty, no dot, shorter than 4 chars) are
/// discarded entirely rather than merged.
pub fn dedup_by_domain(candidates: Vec<CandidateCompany>) -> Vec<CandidateCompany> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(candidates.len());
    let mut dropped_invalid = 0_u32;
    let mut dropped_duplicate = 0_u32;

    for candidate in candidates {
        let domain = candidate.domain.to_lowercase();
        if !is_valid_domain(&domain) {
            dropped_invalid += 1;
            continue;
        }
        if seen.insert(domain) {
            unique.push(candidate);
        } else {
            dropped_duplicate += 1;
        }
    }

    if dropped_invalid > 0 || dropped_duplicate > 0 {
        debug!(
            kept = unique.len(),
            dropped_invalid, dropped_duplicate, "Candidate dedup complete"
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use exactfit_common::types::SignalType;

    fn candidate(name: &str, domain: &str) -> CandidateCompany {
        CandidateCompany::new(
            name,
            domain,
            format!("https://boards.greenhouse.io/{name}"),
            SignalType::Hiring,
            "Hiring SDR",
        )
    }

    #[test]
    fn first_occurrence_wins() {
        let out = dedup_by_domain(vec![
            candidate("Acme", "acme.com"),
            candidate("Beta", "beta.io"),
            candidate("Acme Corp", "ACME.com"),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].company_name, "Acme");
        assert_eq!(out[1].company_name, "Beta");
    }

    #[test]
    fn invalid_domains_are_discarded_not_merged() {
        let out = dedup_by_domain(vec![
            candidate("NoDot", "acmecom"),
            candidate("Short", "a.b"),
            candidate("Empty", ""),
            candidate("Good", "acme.com"),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].domain, "acme.com");
    }

    #[test]
    fn dedup_is_idempotent() {
        let input = vec![
            candidate("Acme", "acme.com"),
            candidate("Acme2", "acme.com"),
            candidate("Beta", "beta.io"),
            candidate("Bad", "x"),
        ];
        let once = dedup_by_domain(input);
        let twice = dedup_by_domain(once.clone());
        assert_eq!(once.len(), twice.len());
        let domains_once: Vec<_> = once.iter().map(|c| c.domain.clone()).collect();
        let domains_twice: Vec<_> = twice.iter().map(|c| c.domain.clone()).collect();
        assert_eq!(domains_once, domains_twice);
    }

    #[test]
    fn all_output_domains_satisfy_the_invariant() {
        let out = dedup_by_domain(vec![
            candidate("A", "acme.com"),
            candidate("B", "bad"),
            candidate("C", "beta.io"),
        ]);
        for c in &out {
            assert!(c.domain.contains('.') && c.domain.len() >= 4);
        }
    }
}
