pub mod error;
pub mod types;

pub use error::{RedditError, Result};
pub use types::RedditPost;

use types::Listing;

const BASE_URL: &str = "https://www.reddit.com";
const USER_AGENT: &str = "exactfit/0.1 (intent signal finder)";

pub struct RedditClient {
    client: reqwest::Client,
}

impl RedditClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Search one subreddit through the public JSON endpoint.
    pub async fn search(
        &self,
        subreddit: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<RedditPost>> {
        let url = format!("{BASE_URL}/r/{subreddit}/search.json");
        let limit = limit.min(25).to_string();
        let resp = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("q", query),
                ("restrict_sr", "on"),
                ("sort", "new"),
                ("limit", &limit),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RedditError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let listing: Listing = resp.json().await?;
        let posts: Vec<RedditPost> = listing
            .data
            .children
            .into_iter()
            .map(|c| RedditPost::from_raw(c.data, subreddit))
            .collect();
        tracing::debug!(subreddit, query, posts = posts.len(), "Reddit search complete");
        Ok(posts)
    }
}

impl Default for RedditClient {
    fn default() -> Self {
        Self::new()
    }
}
