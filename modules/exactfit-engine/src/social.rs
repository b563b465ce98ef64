// Social mention scanning: competitor complaints and tool-recommendation
// asks. These are market-level signals attached to the run, not to
// individual leads.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use exactfit_common::types::{MentionPost, SignalKind, SocialPost};

use crate::traits::PostSearcher;

/// Default communities for B2B SaaS intent scanning.
pub const DEFAULT_SUBREDDITS: &[&str] = &[
    "sales",
    "SaaS",
    "startups",
    "Entrepreneur",
    "smallbusiness",
    "B2B",
];

/// General buying-intent searches used when no competitor is named.
pub const BUYING_INTENT_KEYWORDS: &[&str] = &[
    "lead generation tool recommendation",
    "best sales intelligence tool",
    "looking for prospecting tool",
    "need better lead data",
    "email finder recommendation",
    "B2B data provider",
    "sales tool recommendation",
];

/// Queries that surface negative competitor sentiment or switching intent.
pub fn intent_queries(competitor: &str) -> Vec<String> {
    vec![
        format!("{competitor} alternative"),
        format!("{competitor} alternatives"),
        format!("better than {competitor}"),
        format!("replace {competitor}"),
        format!("leaving {competitor}"),
        format!("switch from {competitor}"),
        format!("{competitor} sucks"),
        format!("{competitor} expensive"),
        format!("{competitor} problems"),
        format!("hate {competitor}"),
    ]
}

pub struct MentionScanner {
    searcher: Arc<dyn PostSearcher>,
}

impl MentionScanner {
    pub fn new(searcher: Arc<dyn PostSearcher>) -> Self {
        Self { searcher }
    }

    /// Search the default subreddit list for one query, collecting up to
    /// `limit` posts. Per-subreddit failures are skipped.
    async fn search_communities(&self, query: &str, limit: usize) -> Vec<SocialPost> {
        let mut results = Vec::new();
        for subreddit in DEFAULT_SUBREDDITS {
            if results.len() >= limit {
                break;
            }
            match self
                .searcher
                .search_posts(subreddit, query, limit.min(25) as u32)
                .await
            {
                Ok(posts) => {
                    for post in posts {
                        results.push(post);
                        if results.len() >= limit {
                            break;
                        }
                    }
                }
                Err(e) => {
                    warn!(subreddit, query, error = %e, "Social search failed, skipping subreddit");
                }
            }
        }
        results
    }

    /// Posts mentioning a competitor with switching intent, URL-deduped.
    pub async fn competitor_mentions(&self, competitor: &str, limit: usize) -> Vec<MentionPost> {
        let mut mentions: Vec<MentionPost> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for query in intent_queries(competitor) {
            if mentions.len() >= limit {
                break;
            }
            for post in self.search_communities(&query, 5).await {
                if !seen.insert(post.url.clone()) {
                    continue;
                }
                mentions.push(mention_from_post(
                    post,
                    Some(competitor),
                    SignalKind::RedditMention,
                ));
                if mentions.len() >= limit {
                    break;
                }
            }
        }

        debug!(competitor, mentions = mentions.len(), "Competitor mention scan complete");
        mentions
    }

    /// Posts asking for tool recommendations, URL-deduped.
    pub async fn buying_intent_posts(&self, limit: usize) -> Vec<MentionPost> {
        let mut mentions: Vec<MentionPost> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for keyword in BUYING_INTENT_KEYWORDS {
            if mentions.len() >= limit {
                break;
            }
            for post in self.search_communities(keyword, 5).await {
                if !seen.insert(post.url.clone()) {
                    continue;
                }
                mentions.push(mention_from_post(post, None, SignalKind::RedditBuyingIntent));
                if mentions.len() >= limit {
                    break;
                }
            }
        }

        mentions
    }

    /// Market-level scan across every named competitor, most upvoted first.
    pub async fn market_signals(
        &self,
        competitors: &[String],
        limit_per_competitor: usize,
    ) -> Vec<MentionPost> {
        let mut all = Vec::new();
        for competitor in competitors {
            let mentions = self
                .competitor_mentions(competitor, limit_per_competitor)
                .await;
            all.extend(mentions);
        }
        // Most upvoted = most community-validated.
        all.sort_by(|a, b| b.score.cmp(&a.score));
        all
    }
}

fn mention_from_post(post: SocialPost, competitor: Option<&str>, kind: SignalKind) -> MentionPost {
    let detail = match (kind, competitor) {
        (SignalKind::RedditMention, Some(name)) => {
            format!("Posted about {name} on r/{}", post.subreddit)
        }
        _ => format!("Asking for tool recommendations on r/{}", post.subreddit),
    };
    MentionPost {
        title: post.title,
        body: post.body,
        author: post.author,
        subreddit: post.subreddit,
        url: post.url,
        score: post.score,
        num_comments: post.num_comments,
        competitor: competitor.map(|c| c.to_string()),
        signal_kind: kind,
        signal_detail: detail,
    }
}
