use serde::{Deserialize, Serialize};

/// Listing envelope: `data.children[].data` holds the posts.
#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
pub struct ListingChild {
    pub data: RawPost,
}

/// Raw post payload as Reddit returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u32,
}

/// A parsed post with an absolute URL and a bounded body excerpt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPost {
    pub title: String,
    pub body: String,
    pub author: String,
    pub subreddit: String,
    pub url: String,
    pub score: i64,
    pub num_comments: u32,
    pub created_utc: f64,
}

impl RedditPost {
    pub fn from_raw(raw: RawPost, subreddit: &str) -> Self {
        let body: String = raw.selftext.chars().take(500).collect();
        Self {
            title: raw.title,
            body,
            author: raw.author,
            subreddit: subreddit.to_string(),
            url: format!("https://reddit.com{}", raw.permalink),
            score: raw.score,
            num_comments: raw.num_comments,
            created_utc: raw.created_utc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_builds_absolute_url_and_bounds_body() {
        let raw = RawPost {
            title: "Apollo alternative?".to_string(),
            selftext: "x".repeat(900),
            author: "u1".to_string(),
            permalink: "/r/sales/comments/abc/apollo_alternative/".to_string(),
            created_utc: 1_700_000_000.0,
            score: 42,
            num_comments: 7,
        };
        let post = RedditPost::from_raw(raw, "sales");
        assert_eq!(
            post.url,
            "https://reddit.com/r/sales/comments/abc/apollo_alternative/"
        );
        assert_eq!(post.body.len(), 500);
        assert_eq!(post.subreddit, "sales");
    }
}
