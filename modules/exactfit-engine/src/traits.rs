// Trait abstractions for the pipeline's external collaborators.
//
// ContactFinder — contact provider #1 (direct finder + bulk domain list).
// PersonEnricher — contact provider #2 (email verification + person search).
// WebSearcher — web/news search backend.
// PostSearcher — social mention search backend.
// TextGenerator — text generation for query expansion and outreach copy;
//   every use has a deterministic engine-owned fallback.
//
// These enable deterministic testing with the mocks in testing.rs:
// no network, no API keys. `cargo test` in seconds.

use anyhow::Result;
use async_trait::async_trait;

use exactfit_common::types::{
    ContactCandidate, EmailVerification, NewsItem, PersonRecord, SearchHit, SocialPost,
};

use crate::title_match::TitleMatcher;

// ---------------------------------------------------------------------------
// ContactFinder — provider #1
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ContactFinder: Send + Sync {
    /// Ask the provider for a single decision-maker contact at a domain.
    /// The provider's direct endpoint cannot filter by title; the title is
    /// part of the interface for implementations that can.
    async fn find_direct_contact(
        &self,
        domain: &str,
        title: Option<&str>,
    ) -> Result<Option<ContactCandidate>>;

    /// List contacts at a domain, most confident first.
    async fn list_contacts_at_domain(
        &self,
        domain: &str,
        limit: u32,
    ) -> Result<Vec<ContactCandidate>>;
}

#[async_trait]
impl ContactFinder for hunter_client::HunterClient {
    async fn find_direct_contact(
        &self,
        domain: &str,
        _title: Option<&str>,
    ) -> Result<Option<ContactCandidate>> {
        let found = self.find_email(domain).await?;
        Ok(found.and_then(|data| {
            let verified = data.is_verified();
            data.email.map(|email| ContactCandidate {
                email,
                first_name: data.first_name.unwrap_or_default(),
                last_name: data.last_name.unwrap_or_default(),
                position: data.position.unwrap_or_default(),
                confidence: data.score.unwrap_or(0),
                verified,
            })
        }))
    }

    async fn list_contacts_at_domain(
        &self,
        domain: &str,
        limit: u32,
    ) -> Result<Vec<ContactCandidate>> {
        let search = self.domain_search(domain, limit).await?;
        Ok(search
            .emails
            .into_iter()
            .map(|c| ContactCandidate {
                email: c.email,
                first_name: c.first_name.unwrap_or_default(),
                last_name: c.last_name.unwrap_or_default(),
                position: c.position.unwrap_or_default(),
                confidence: c.confidence.unwrap_or(0),
                verified: false,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// PersonEnricher — provider #2
// ---------------------------------------------------------------------------

/// How many candidates provider #2's search is asked for before the title
/// matcher picks one.
const PERSON_SEARCH_SIZE: u32 = 3;

#[async_trait]
pub trait PersonEnricher: Send + Sync {
    /// Check an email address against the provider's person graph.
    async fn verify_contact_email(&self, email: &str) -> Result<EmailVerification>;

    /// Find a person at a domain, optionally matching a target title.
    async fn find_person(&self, domain: &str, title: Option<&str>) -> Result<Option<PersonRecord>>;
}

#[async_trait]
impl PersonEnricher for pdl_client::PdlClient {
    async fn verify_contact_email(&self, email: &str) -> Result<EmailVerification> {
        match self.enrich_email(email).await? {
            Some(person) => Ok(EmailVerification {
                valid: true,
                first_name: person.first_name,
                last_name: person.last_name,
                title: person.job_title,
                linkedin_url: person.linkedin_url,
            }),
            None => Ok(EmailVerification::invalid()),
        }
    }

    async fn find_person(&self, domain: &str, title: Option<&str>) -> Result<Option<PersonRecord>> {
        let people = self
            .search_person(domain, title, PERSON_SEARCH_SIZE)
            .await?;
        let records: Vec<PersonRecord> = people
            .into_iter()
            .map(|p| PersonRecord {
                email: p.best_email(),
                first_name: p.first_name.unwrap_or_default(),
                last_name: p.last_name.unwrap_or_default(),
                title: p.job_title.unwrap_or_default(),
                linkedin_url: p.linkedin_url,
            })
            .collect();
        Ok(select_person(records, title))
    }
}

/// Pick the record whose title best matches the target, falling back to the
/// provider's own top hit. Provider #2 uses the plain matcher variant.
pub fn select_person(records: Vec<PersonRecord>, title: Option<&str>) -> Option<PersonRecord> {
    if records.is_empty() {
        return None;
    }
    if let Some(target) = title {
        let matcher = TitleMatcher::plain();
        let positions: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        if let Some(idx) = matcher.best_match(target, &positions) {
            return records.into_iter().nth(idx);
        }
    }
    records.into_iter().next()
}

// ---------------------------------------------------------------------------
// WebSearcher
// ---------------------------------------------------------------------------

#[async_trait]
pub trait WebSearcher: Send + Sync {
    async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchHit>>;
    async fn news(&self, query: &str, num: u32) -> Result<Vec<NewsItem>>;
}

#[async_trait]
impl WebSearcher for serper_client::SerperClient {
    async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchHit>> {
        let hits = serper_client::SerperClient::search(self, query, num).await?;
        Ok(hits
            .into_iter()
            .map(|h| SearchHit {
                title: h.title,
                url: h.link,
                snippet: h.snippet,
            })
            .collect())
    }

    async fn news(&self, query: &str, num: u32) -> Result<Vec<NewsItem>> {
        let hits = serper_client::SerperClient::news(self, query, num).await?;
        Ok(hits
            .into_iter()
            .map(|h| NewsItem {
                title: h.title,
                url: h.link,
                snippet: h.snippet,
                date: h.date,
                source: h.source,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// PostSearcher
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PostSearcher: Send + Sync {
    async fn search_posts(
        &self,
        subreddit: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SocialPost>>;
}

#[async_trait]
impl PostSearcher for reddit_client::RedditClient {
    async fn search_posts(
        &self,
        subreddit: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SocialPost>> {
        let posts = self.search(subreddit, query, limit).await?;
        Ok(posts
            .into_iter()
            .map(|p| SocialPost {
                title: p.title,
                body: p.body,
                author: p.author,
                subreddit: p.subreddit,
                url: p.url,
                score: p.score,
                num_comments: p.num_comments,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// TextGenerator
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

#[async_trait]
impl TextGenerator for claude_client::ClaudeClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        Ok(self.chat(system, user).await?)
    }
}
