// Test mocks for the pipeline's capability traits.
//
// Builder-pattern registries: `.on_direct()`, `.on_list()`, `.on_query()`
// etc. Unregistered lookups behave like "no data" (the common provider
// outcome), except MockPageFetcher, which errors like a dead site.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use exactfit_common::types::{
    ContactCandidate, EmailVerification, NewsItem, PersonRecord, SearchHit, SocialPost,
};

use crate::tech::PageFetcher;
use crate::traits::{ContactFinder, PersonEnricher, PostSearcher, TextGenerator, WebSearcher};

// ---------------------------------------------------------------------------
// MockContactFinder
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockContactFinder {
    direct: HashMap<String, ContactCandidate>,
    lists: HashMap<String, Vec<ContactCandidate>>,
    fail_all: bool,
}

impl MockContactFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_direct(mut self, domain: &str, candidate: ContactCandidate) -> Self {
        self.direct.insert(domain.to_string(), candidate);
        self
    }

    pub fn on_list(mut self, domain: &str, candidates: Vec<ContactCandidate>) -> Self {
        self.lists.insert(domain.to_string(), candidates);
        self
    }

    /// Every call fails, as if the provider were down.
    pub fn fail_all(mut self) -> Self {
        self.fail_all = true;
        self
    }
}

#[async_trait]
impl ContactFinder for MockContactFinder {
    async fn find_direct_contact(
        &self,
        domain: &str,
        _title: Option<&str>,
    ) -> Result<Option<ContactCandidate>> {
        if self.fail_all {
            return Err(anyhow!("MockContactFinder: provider unavailable"));
        }
        Ok(self.direct.get(domain).cloned())
    }

    async fn list_contacts_at_domain(
        &self,
        domain: &str,
        _limit: u32,
    ) -> Result<Vec<ContactCandidate>> {
        if self.fail_all {
            return Err(anyhow!("MockContactFinder: provider unavailable"));
        }
        Ok(self.lists.get(domain).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// MockPersonEnricher
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockPersonEnricher {
    valid_emails: HashMap<String, EmailVerification>,
    people: HashMap<String, PersonRecord>,
    fail_all: bool,
}

impl MockPersonEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an email as verifying valid (no extra person details).
    pub fn verify_valid(mut self, email: &str) -> Self {
        self.valid_emails.insert(
            email.to_string(),
            EmailVerification {
                valid: true,
                first_name: None,
                last_name: None,
                title: None,
                linkedin_url: None,
            },
        );
        self
    }

    /// Mark an email as verifying valid with full person details.
    pub fn verify_valid_with(mut self, email: &str, verification: EmailVerification) -> Self {
        self.valid_emails.insert(email.to_string(), verification);
        self
    }

    pub fn on_find_person(mut self, domain: &str, person: PersonRecord) -> Self {
        self.people.insert(domain.to_string(), person);
        self
    }

    pub fn fail_all(mut self) -> Self {
        self.fail_all = true;
        self
    }
}

#[async_trait]
impl PersonEnricher for MockPersonEnricher {
    async fn verify_contact_email(&self, email: &str) -> Result<EmailVerification> {
        if self.fail_all {
            return Err(anyhow!("MockPersonEnricher: provider unavailable"));
        }
        Ok(self
            .valid_emails
            .get(email)
            .cloned()
            .unwrap_or_else(EmailVerification::invalid))
    }

    async fn find_person(
        &self,
        domain: &str,
        _title: Option<&str>,
    ) -> Result<Option<PersonRecord>> {
        if self.fail_all {
            return Err(anyhow!("MockPersonEnricher: provider unavailable"));
        }
        Ok(self.people.get(domain).cloned())
    }
}

// ---------------------------------------------------------------------------
// MockWebSearcher
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockWebSearcher {
    searches: HashMap<String, Vec<SearchHit>>,
    news: HashMap<String, Vec<NewsItem>>,
    fail_all: bool,
}

impl MockWebSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(mut self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.searches.insert(query.to_string(), hits);
        self
    }

    pub fn on_news(mut self, query: &str, items: Vec<NewsItem>) -> Self {
        self.news.insert(query.to_string(), items);
        self
    }

    pub fn fail_all(mut self) -> Self {
        self.fail_all = true;
        self
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str, _num: u32) -> Result<Vec<SearchHit>> {
        if self.fail_all {
            return Err(anyhow!("MockWebSearcher: provider unavailable"));
        }
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    async fn news(&self, query: &str, _num: u32) -> Result<Vec<NewsItem>> {
        if self.fail_all {
            return Err(anyhow!("MockWebSearcher: provider unavailable"));
        }
        Ok(self.news.get(query).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// MockPageFetcher
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockPageFetcher {
    pages: HashMap<String, String>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page(mut self, domain: &str, html: &str) -> Self {
        self.pages.insert(domain.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn homepage_html(&self, domain: &str) -> Result<String> {
        self.pages
            .get(domain)
            .cloned()
            .ok_or_else(|| anyhow!("MockPageFetcher: no page registered for {domain}"))
    }
}

// ---------------------------------------------------------------------------
// MockPostSearcher
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockPostSearcher {
    queries: HashMap<String, Vec<SocialPost>>,
    failing_subreddits: Vec<String>,
}

impl MockPostSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts returned for a query, whatever subreddit is searched.
    pub fn on_query(mut self, query: &str, posts: Vec<SocialPost>) -> Self {
        self.queries.insert(query.to_string(), posts);
        self
    }

    /// Searches against this subreddit fail.
    pub fn fail_subreddit(mut self, subreddit: &str) -> Self {
        self.failing_subreddits.push(subreddit.to_string());
        self
    }
}

#[async_trait]
impl PostSearcher for MockPostSearcher {
    async fn search_posts(
        &self,
        subreddit: &str,
        query: &str,
        _limit: u32,
    ) -> Result<Vec<SocialPost>> {
        if self.failing_subreddits.iter().any(|s| s == subreddit) {
            return Err(anyhow!("MockPostSearcher: r/{subreddit} unavailable"));
        }
        Ok(self.queries.get(query).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// MockTextGenerator
// ---------------------------------------------------------------------------

pub struct MockTextGenerator {
    response: Option<String>,
}

impl MockTextGenerator {
    /// Always answers with the given text.
    pub fn responding(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
        }
    }

    /// Always fails, as if the model were unreachable.
    pub fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(anyhow!("MockTextGenerator: model unavailable")),
        }
    }
}
