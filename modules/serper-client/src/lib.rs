pub mod error;
pub mod types;

pub use error::{Result, SerperError};
pub use types::{NewsHit, OrganicHit};

use serde_json::json;
use types::{NewsResponse, SearchResponse};

const BASE_URL: &str = "https://google.serper.dev";

pub struct SerperClient {
    client: reqwest::Client,
    api_key: String,
}

impl SerperClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    async fn post(&self, endpoint: &str, query: &str, num: u32) -> Result<reqwest::Response> {
        let url = format!("{BASE_URL}/{endpoint}");
        let resp = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&json!({"q": query, "num": num}))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SerperError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(resp)
    }

    /// Run a web search, returning organic hits.
    pub async fn search(&self, query: &str, num: u32) -> Result<Vec<OrganicHit>> {
        let resp = self.post("search", query, num).await?;
        let parsed: SearchResponse = resp.json().await?;
        tracing::debug!(query, hits = parsed.organic.len(), "Serper search complete");
        Ok(parsed.organic)
    }

    /// Run a news search. Serper returns recent items by default, which is
    /// what funding-announcement sweeps want.
    pub async fn news(&self, query: &str, num: u32) -> Result<Vec<NewsHit>> {
        let resp = self.post("news", query, num).await?;
        let parsed: NewsResponse = resp.json().await?;
        tracing::debug!(query, hits = parsed.news.len(), "Serper news search complete");
        Ok(parsed.news)
    }
}
