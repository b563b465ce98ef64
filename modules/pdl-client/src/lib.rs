pub mod error;
pub mod types;

pub use error::{PdlError, Result};
pub use types::{EmailEntry, PersonData};

use serde_json::json;
use types::{EnrichResponse, SearchResponse};

const BASE_URL: &str = "https://api.peopledatalabs.com/v5";

pub struct PdlClient {
    client: reqwest::Client,
    api_key: String,
}

impl PdlClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Search for people at a company by website, optionally filtered by
    /// job title. Results come back best-match first.
    pub async fn search_person(
        &self,
        domain: &str,
        job_title: Option<&str>,
        size: u32,
    ) -> Result<Vec<PersonData>> {
        let mut must = vec![json!({"term": {"job_company_website": domain}})];
        if let Some(title) = job_title {
            must.push(json!({"match": {"job_title": title}}));
        }
        let payload = json!({
            "query": {"bool": {"must": must}},
            "size": size,
        });

        let url = format!("{BASE_URL}/person/search");
        let resp = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        // PDL reports an empty result set as 404 on this endpoint.
        if status.as_u16() == 404 {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PdlError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let search: SearchResponse = resp.json().await?;
        tracing::debug!(domain, hits = search.data.len(), "PDL person search complete");
        Ok(search.data)
    }

    /// Enrich an email address. Returns `None` when PDL has no record for
    /// it (404) — the caller treats that as "not confirmed".
    pub async fn enrich_email(&self, email: &str) -> Result<Option<PersonData>> {
        let url = format!("{BASE_URL}/person/enrich");
        let resp = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .query(&[("email", email)])
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PdlError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let enrich: EnrichResponse = resp.json().await?;
        Ok(enrich.data)
    }
}
