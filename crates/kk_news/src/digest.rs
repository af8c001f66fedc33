use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use kk_core::{Article, NewsQuery, NewsSource, Result};
use kk_summarizer::aggregator::{aggregate, truncate_text};
use kk_summarizer::Summarizer;

pub const DEFAULT_HEADLINES: usize = 5;

/// One summary over a whole batch of fetched articles plus the headlines shown under it.
#[derive(Debug, Clone, Serialize)]
pub struct NewsDigest {
    pub query: String,
    pub summary: String,
    pub article_count: usize,
    pub headlines: Vec<Article>,
    pub fetched_at: DateTime<Utc>,
}

impl NewsDigest {
    pub async fn build(
        source: &dyn NewsSource,
        query: &NewsQuery,
        summarizer: &Summarizer,
        sentences: usize,
        headlines: usize,
    ) -> Result<Self> {
        let articles = source.fetch_articles(query).await?;
        Self::from_articles(query, articles, summarizer, sentences, headlines)
    }

    /// Summarizes every article as a single document; the first `headlines` articles are kept.
    pub fn from_articles(
        query: &NewsQuery,
        mut articles: Vec<Article>,
        summarizer: &Summarizer,
        sentences: usize,
        headlines: usize,
    ) -> Result<Self> {
        if articles.is_empty() {
            warn!("⚠️ No articles found for '{}'", query.query);
        }

        let document = aggregate(&articles);
        let document = match summarizer.config().max_input_chars {
            Some(max) => truncate_text(&document, max),
            None => document.as_str(),
        };
        let summary = summarizer.summarize_text(document, sentences)?;

        let article_count = articles.len();
        articles.truncate(headlines);

        Ok(Self {
            query: query.query.clone(),
            summary,
            article_count,
            headlines: articles,
            fetched_at: Utc::now(),
        })
    }
}
