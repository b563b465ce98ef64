// Contact resolution: NoEmail → HunterAttempted → Resolved | Failed.
//
// Provider #1 (direct finder, then bulk domain list + title matcher)
// produces a tentative contact; provider #2 cross-validates it. The
// resolved confidence is a fixed lookup table encoding how many independent
// sources agree — {0.9, 0.85, 0.7, 0.6} are the only attainable values.

use std::sync::Arc;

use tracing::{info, warn};

use exactfit_common::types::{
    Contact, ContactCandidate, ContactSource, EmailVerification, EnrichedLead, FailedLead,
    LeadStatus,
};
use exactfit_common::CandidateCompany;

use crate::title_match::TitleMatcher;
use crate::traits::{ContactFinder, PersonEnricher};

/// Both providers confirmed the same address.
const CONFIDENCE_VERIFIED: f64 = 0.9;
/// Provider #2 independently surfaced the same address without confirming it.
const CONFIDENCE_AGREEMENT: f64 = 0.85;
/// Provider #2 surfaced a different person; provider #1's contact kept.
const CONFIDENCE_CONFLICT: f64 = 0.7;
/// Single source, unconfirmed.
const CONFIDENCE_SINGLE_SOURCE: f64 = 0.6;

const REASON_NO_DOMAIN: &str = "no domain available";
const REASON_PRIMARY_ONLY: &str = "no email found from primary provider";
const REASON_BOTH_PROVIDERS: &str = "no email found from either provider";

/// How many contacts the bulk domain list is asked for.
const BULK_LIST_LIMIT: u32 = 10;

/// Terminal outcome for one lead.
#[derive(Debug)]
pub enum Resolution {
    Resolved(EnrichedLead),
    Failed(FailedLead),
}

/// Tentative single-source contact awaiting cross-validation.
struct TentativeContact {
    email: String,
    first_name: String,
    last_name: String,
    title: String,
    exact_title_match: bool,
}

impl TentativeContact {
    fn from_candidate(candidate: ContactCandidate, exact_title_match: bool) -> Self {
        Self {
            email: candidate.email,
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            title: candidate.position,
            exact_title_match,
        }
    }
}

pub struct ContactResolver {
    finder: Arc<dyn ContactFinder>,
    /// Provider #2 is optional; without it every contact stays single-source.
    enricher: Option<Arc<dyn PersonEnricher>>,
    matcher: TitleMatcher,
}

impl ContactResolver {
    pub fn new(finder: Arc<dyn ContactFinder>, enricher: Option<Arc<dyn PersonEnricher>>) -> Self {
        Self {
            finder,
            enricher,
            matcher: TitleMatcher::with_seniority_boost(),
        }
    }

    /// Resolve a contact for one lead. Provider failures degrade to
    /// not-found and land in `errors`; the outcome is always a value.
    pub async fn resolve(
        &self,
        mut company: CandidateCompany,
        target_title: Option<&str>,
        errors: &mut Vec<String>,
    ) -> Resolution {
        if company.domain.is_empty() {
            company.status = LeadStatus::EnrichmentFailed;
            return Resolution::Failed(FailedLead {
                company,
                reason: REASON_NO_DOMAIN.to_string(),
            });
        }

        // --- NoEmail: provider #1, direct finder then bulk list ---

        let tentative = match self.primary_lookup(&company.domain, target_title, errors).await {
            Some(t) => t,
            None => {
                // State stayed NoEmail — provider #2 directly, if we have one.
                return self.secondary_only(company, target_title, errors).await;
            }
        };

        // --- HunterAttempted: cross-validate with provider #2 ---

        let contact = match &self.enricher {
            Some(enricher) => {
                self.cross_validate(enricher.as_ref(), &company.domain, target_title, tentative, errors)
                    .await
            }
            None => single_source_contact(tentative),
        };

        info!(
            domain = company.domain.as_str(),
            email = contact.email.as_str(),
            confidence = contact.confidence,
            "Contact resolved"
        );
        company.status = LeadStatus::Enriched;
        Resolution::Resolved(EnrichedLead { company, contact })
    }

    /// Provider #1: direct finder, then the bulk list with title matching.
    async fn primary_lookup(
        &self,
        domain: &str,
        target_title: Option<&str>,
        errors: &mut Vec<String>,
    ) -> Option<TentativeContact> {
        let direct = match self.finder.find_direct_contact(domain, target_title).await {
            Ok(found) => found,
            Err(e) => {
                warn!(domain, error = %e, "Direct contact lookup failed");
                errors.push(format!("hunter direct finder failed for {domain}: {e}"));
                None
            }
        };
        if let Some(candidate) = direct {
            return Some(TentativeContact::from_candidate(candidate, true));
        }

        let contacts = match self
            .finder
            .list_contacts_at_domain(domain, BULK_LIST_LIMIT)
            .await
        {
            Ok(contacts) => contacts,
            Err(e) => {
                warn!(domain, error = %e, "Bulk contact list failed");
                errors.push(format!("hunter domain search failed for {domain}: {e}"));
                Vec::new()
            }
        };
        if contacts.is_empty() {
            return None;
        }

        if let Some(target) = target_title {
            let positions: Vec<&str> = contacts.iter().map(|c| c.position.as_str()).collect();
            if let Some(idx) = self.matcher.best_match(target, &positions) {
                let candidate = contacts.into_iter().nth(idx)?;
                return Some(TentativeContact::from_candidate(candidate, true));
            }
        }

        // No title or no match: first (highest-confidence) contact, tagged
        // as a non-exact fallback.
        contacts
            .into_iter()
            .next()
            .map(|c| TentativeContact::from_candidate(c, false))
    }

    /// Provider #1 found nothing; ask provider #2 directly.
    async fn secondary_only(
        &self,
        mut company: CandidateCompany,
        target_title: Option<&str>,
        errors: &mut Vec<String>,
    ) -> Resolution {
        let Some(enricher) = &self.enricher else {
            company.status = LeadStatus::EnrichmentFailed;
            return Resolution::Failed(FailedLead {
                company,
                reason: REASON_PRIMARY_ONLY.to_string(),
            });
        };

        let person = match enricher.find_person(&company.domain, target_title).await {
            Ok(person) => person,
            Err(e) => {
                warn!(domain = company.domain.as_str(), error = %e, "Person search failed");
                errors.push(format!("pdl person search failed for {}: {e}", company.domain));
                None
            }
        };

        if let Some(person) = person {
            if let Some(email) = person.email {
                let contact = Contact {
                    email,
                    first_name: person.first_name,
                    last_name: person.last_name,
                    title: person.title,
                    confidence: CONFIDENCE_SINGLE_SOURCE,
                    sources: vec![ContactSource::Pdl],
                    linkedin_url: person.linkedin_url,
                    alternate_email: None,
                    exact_title_match: true,
                };
                company.status = LeadStatus::Enriched;
                return Resolution::Resolved(EnrichedLead { company, contact });
            }
        }

        company.status = LeadStatus::EnrichmentFailed;
        Resolution::Failed(FailedLead {
            company,
            reason: REASON_BOTH_PROVIDERS.to_string(),
        })
    }

    /// Provider #2 cross-validation of a tentative provider #1 contact.
    async fn cross_validate(
        &self,
        enricher: &dyn PersonEnricher,
        domain: &str,
        target_title: Option<&str>,
        tentative: TentativeContact,
        errors: &mut Vec<String>,
    ) -> Contact {
        let verification = match enricher.verify_contact_email(&tentative.email).await {
            Ok(v) => v,
            Err(e) => {
                // A transport failure is indistinguishable from "no record":
                // proceed to the independent cross-check.
                warn!(domain, error = %e, "Email verification failed");
                errors.push(format!("pdl email verification failed for {domain}: {e}"));
                EmailVerification::invalid()
            }
        };

        if verification.valid {
            return Contact {
                email: tentative.email,
                first_name: prefer(tentative.first_name, verification.first_name),
                last_name: prefer(tentative.last_name, verification.last_name),
                title: prefer(tentative.title, verification.title),
                confidence: CONFIDENCE_VERIFIED,
                sources: vec![ContactSource::Hunter, ContactSource::Pdl],
                linkedin_url: verification.linkedin_url,
                alternate_email: None,
                exact_title_match: tentative.exact_title_match,
            };
        }

        // Not confirmed: ask provider #2 for a person independently.
        let person = match enricher.find_person(domain, target_title).await {
            Ok(person) => person,
            Err(e) => {
                warn!(domain, error = %e, "Person cross-check failed");
                errors.push(format!("pdl person search failed for {domain}: {e}"));
                None
            }
        };

        let (confidence, sources, alternate_email) = match person.as_ref().and_then(|p| p.email.as_deref()) {
            Some(email) if email == tentative.email => (
                CONFIDENCE_AGREEMENT,
                vec![ContactSource::Hunter, ContactSource::Pdl],
                None,
            ),
            Some(email) => (
                CONFIDENCE_CONFLICT,
                vec![ContactSource::Hunter],
                Some(email.to_string()),
            ),
            None => (CONFIDENCE_SINGLE_SOURCE, vec![ContactSource::Hunter], None),
        };

        Contact {
            email: tentative.email,
            first_name: tentative.first_name,
            last_name: tentative.last_name,
            title: tentative.title,
            confidence,
            sources,
            linkedin_url: None,
            alternate_email,
            exact_title_match: tentative.exact_title_match,
        }
    }
}

/// Provider #2 absent: keep the tentative contact at single-source
/// confidence.
fn single_source_contact(tentative: TentativeContact) -> Contact {
    Contact {
        email: tentative.email,
        first_name: tentative.first_name,
        last_name: tentative.last_name,
        title: tentative.title,
        confidence: CONFIDENCE_SINGLE_SOURCE,
        sources: vec![ContactSource::Hunter],
        linkedin_url: None,
        alternate_email: None,
        exact_title_match: tentative.exact_title_match,
    }
}

fn prefer(primary: String, secondary: Option<String>) -> String {
    if primary.is_empty() {
        secondary.unwrap_or_default()
    } else {
        primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockContactFinder, MockPersonEnricher};
    use exactfit_common::types::{PersonRecord, SignalType};

    fn lead(domain: &str) -> CandidateCompany {
        CandidateCompany::new(
            "Acme",
            domain,
            "https://boards.greenhouse.io/acme",
            SignalType::Hiring,
            "Hiring 3 SDRs",
        )
    }

    fn candidate(email: &str, position: &str) -> ContactCandidate {
        ContactCandidate {
            email: email.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Nolan".to_string(),
            position: position.to_string(),
            confidence: 80,
            verified: false,
        }
    }

    fn person(email: Option<&str>) -> PersonRecord {
        PersonRecord {
            email: email.map(|e| e.to_string()),
            first_name: "Ada".to_string(),
            last_name: "Nolan".to_string(),
            title: "VP Sales".to_string(),
            linkedin_url: Some("https://linkedin.com/in/ada".to_string()),
        }
    }

    async fn resolve_with(
        finder: MockContactFinder,
        enricher: Option<MockPersonEnricher>,
        title: Option<&str>,
    ) -> Resolution {
        let resolver = ContactResolver::new(
            Arc::new(finder),
            enricher.map(|e| Arc::new(e) as Arc<dyn PersonEnricher>),
        );
        let mut errors = Vec::new();
        resolver.resolve(lead("acme.com"), title, &mut errors).await
    }

    #[tokio::test]
    async fn verified_email_resolves_at_0_9_with_both_sources() {
        let finder = MockContactFinder::new()
            .on_list("acme.com", vec![candidate("a@acme.com", "VP Sales")]);
        let enricher = MockPersonEnricher::new().verify_valid("a@acme.com");

        match resolve_with(finder, Some(enricher), Some("VP Sales")).await {
            Resolution::Resolved(lead) => {
                assert_eq!(lead.contact.email, "a@acme.com");
                assert_eq!(lead.contact.confidence, 0.9);
                assert_eq!(
                    lead.contact.sources,
                    vec![ContactSource::Hunter, ContactSource::Pdl]
                );
                assert_eq!(lead.company.status, LeadStatus::Enriched);
            }
            Resolution::Failed(f) => panic!("expected resolution, got failure: {}", f.reason),
        }
    }

    #[tokio::test]
    async fn independent_agreement_resolves_at_0_85() {
        let finder = MockContactFinder::new()
            .on_list("acme.com", vec![candidate("a@acme.com", "VP Sales")]);
        let enricher =
            MockPersonEnricher::new().on_find_person("acme.com", person(Some("a@acme.com")));

        match resolve_with(finder, Some(enricher), Some("VP Sales")).await {
            Resolution::Resolved(lead) => {
                assert_eq!(lead.contact.confidence, 0.85);
                assert_eq!(
                    lead.contact.sources,
                    vec![ContactSource::Hunter, ContactSource::Pdl]
                );
            }
            Resolution::Failed(f) => panic!("unexpected failure: {}", f.reason),
        }
    }

    #[tokio::test]
    async fn conflicting_person_resolves_at_0_7_and_records_alternate() {
        let finder = MockContactFinder::new()
            .on_list("acme.com", vec![candidate("a@acme.com", "VP Sales")]);
        let enricher =
            MockPersonEnricher::new().on_find_person("acme.com", person(Some("b@acme.com")));

        match resolve_with(finder, Some(enricher), Some("VP Sales")).await {
            Resolution::Resolved(lead) => {
                assert_eq!(lead.contact.email, "a@acme.com");
                assert_eq!(lead.contact.confidence, 0.7);
                assert_eq!(lead.contact.sources, vec![ContactSource::Hunter]);
                assert_eq!(lead.contact.alternate_email.as_deref(), Some("b@acme.com"));
            }
            Resolution::Failed(f) => panic!("unexpected failure: {}", f.reason),
        }
    }

    #[tokio::test]
    async fn unconfirmed_single_source_resolves_at_0_6() {
        let finder = MockContactFinder::new()
            .on_list("acme.com", vec![candidate("a@acme.com", "VP Sales")]);
        let enricher = MockPersonEnricher::new();

        match resolve_with(finder, Some(enricher), Some("VP Sales")).await {
            Resolution::Resolved(lead) => {
                assert_eq!(lead.contact.confidence, 0.6);
                assert_eq!(lead.contact.sources, vec![ContactSource::Hunter]);
            }
            Resolution::Failed(f) => panic!("unexpected failure: {}", f.reason),
        }
    }

    #[tokio::test]
    async fn secondary_only_path_resolves_at_0_6_with_pdl() {
        let finder = MockContactFinder::new();
        let enricher =
            MockPersonEnricher::new().on_find_person("acme.com", person(Some("vp@acme.com")));

        match resolve_with(finder, Some(enricher), Some("VP Sales")).await {
            Resolution::Resolved(lead) => {
                assert_eq!(lead.contact.email, "vp@acme.com");
                assert_eq!(lead.contact.confidence, 0.6);
                assert_eq!(lead.contact.sources, vec![ContactSource::Pdl]);
            }
            Resolution::Failed(f) => panic!("unexpected failure: {}", f.reason),
        }
    }

    #[tokio::test]
    async fn exhausting_both_providers_fails_with_reason() {
        let finder = MockContactFinder::new();
        let enricher = MockPersonEnricher::new();

        match resolve_with(finder, Some(enricher), Some("VP Sales")).await {
            Resolution::Failed(failed) => {
                assert_eq!(failed.reason, "no email found from either provider");
                assert_eq!(failed.company.status, LeadStatus::EnrichmentFailed);
            }
            Resolution::Resolved(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn missing_secondary_provider_fails_with_primary_reason() {
        let finder = MockContactFinder::new();

        match resolve_with(finder, None, Some("VP Sales")).await {
            Resolution::Failed(failed) => {
                assert_eq!(failed.reason, "no email found from primary provider");
            }
            Resolution::Resolved(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn empty_domain_fails_immediately() {
        let resolver = ContactResolver::new(Arc::new(MockContactFinder::new()), None);
        let mut errors = Vec::new();
        match resolver.resolve(lead(""), None, &mut errors).await {
            Resolution::Failed(failed) => assert_eq!(failed.reason, "no domain available"),
            Resolution::Resolved(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn bulk_list_without_match_falls_back_to_first_contact() {
        let finder = MockContactFinder::new().on_list(
            "acme.com",
            vec![
                candidate("first@acme.com", "Software Engineer"),
                candidate("second@acme.com", "Data Analyst"),
            ],
        );
        let enricher = MockPersonEnricher::new();

        match resolve_with(finder, Some(enricher), Some("HR Manager")).await {
            Resolution::Resolved(lead) => {
                assert_eq!(lead.contact.email, "first@acme.com");
                assert!(!lead.contact.exact_title_match);
            }
            Resolution::Failed(f) => panic!("unexpected failure: {}", f.reason),
        }
    }

    #[tokio::test]
    async fn direct_finder_hit_skips_the_bulk_list() {
        let finder = MockContactFinder::new()
            .on_direct("acme.com", candidate("direct@acme.com", "CEO"))
            .on_list("acme.com", vec![candidate("bulk@acme.com", "VP Sales")]);
        let enricher = MockPersonEnricher::new().verify_valid("direct@acme.com");

        match resolve_with(finder, Some(enricher), Some("VP Sales")).await {
            Resolution::Resolved(lead) => {
                assert_eq!(lead.contact.email, "direct@acme.com");
                assert_eq!(lead.contact.confidence, 0.9);
            }
            Resolution::Failed(f) => panic!("unexpected failure: {}", f.reason),
        }
    }

    #[tokio::test]
    async fn provider_errors_degrade_to_not_found_and_log() {
        let finder = MockContactFinder::new().fail_all();
        let resolver = ContactResolver::new(Arc::new(finder), None);
        let mut errors = Vec::new();
        match resolver
            .resolve(lead("acme.com"), Some("VP Sales"), &mut errors)
            .await
        {
            Resolution::Failed(failed) => {
                assert_eq!(failed.reason, "no email found from primary provider");
                assert_eq!(errors.len(), 2);
            }
            Resolution::Resolved(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn resolved_confidence_stays_in_the_fixed_table() {
        let table = [0.6, 0.7, 0.85, 0.9];
        let cases: Vec<(MockContactFinder, Option<MockPersonEnricher>)> = vec![
            (
                MockContactFinder::new().on_list("acme.com", vec![candidate("a@acme.com", "VP Sales")]),
                Some(MockPersonEnricher::new().verify_valid("a@acme.com")),
            ),
            (
                MockContactFinder::new().on_list("acme.com", vec![candidate("a@acme.com", "VP Sales")]),
                Some(MockPersonEnricher::new().on_find_person("acme.com", person(Some("a@acme.com")))),
            ),
            (
                MockContactFinder::new().on_list("acme.com", vec![candidate("a@acme.com", "VP Sales")]),
                Some(MockPersonEnricher::new().on_find_person("acme.com", person(Some("x@acme.com")))),
            ),
            (
                MockContactFinder::new().on_list("acme.com", vec![candidate("a@acme.com", "VP Sales")]),
                Some(MockPersonEnricher::new()),
            ),
            (MockContactFinder::new(), Some(MockPersonEnricher::new().on_find_person("acme.com", person(Some("p@acme.com"))))),
        ];

        for (finder, enricher) in cases {
            if let Resolution::Resolved(lead) = resolve_with(finder, enricher, Some("VP Sales")).await {
                assert!(
                    table.contains(&lead.contact.confidence),
                    "confidence {} outside the fixed table",
                    lead.contact.confidence
                );
            } else {
                panic!("expected resolution");
            }
        }
    }
}
