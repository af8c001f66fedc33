use clap::Args;

use kk_core::{NewsQuery, NewsSource, Result};
use kk_summarizer::Summarizer;

use crate::digest::{NewsDigest, DEFAULT_HEADLINES};

#[derive(Args, Debug, Clone)]
pub struct NewsArgs {
    /// Search query sent to the news API
    #[arg(long, default_value = "farmers-india")]
    pub query: String,
    /// Only consider articles from the last N days
    #[arg(long, default_value_t = 10)]
    pub days: i64,
    /// Maximum number of articles to summarize
    #[arg(long, default_value_t = 100)]
    pub limit: usize,
    /// Language code of the articles requested from the API
    #[arg(long, default_value = "en")]
    pub news_language: String,
    /// Sentences in the accumulated summary
    #[arg(long, default_value_t = kk_summarizer::DEFAULT_ARTICLE_SENTENCES)]
    pub sentences: usize,
    /// Number of articles listed under the summary
    #[arg(long, default_value_t = DEFAULT_HEADLINES)]
    pub headlines: usize,
}

impl NewsArgs {
    pub fn query(&self) -> NewsQuery {
        NewsQuery {
            query: self.query.clone(),
            lookback_days: self.days,
            language: self.news_language.clone(),
            limit: self.limit,
            ..NewsQuery::default()
        }
    }
}

pub async fn handle_command(args: &NewsArgs, source: &dyn NewsSource, summarizer: &Summarizer) -> Result<NewsDigest> {
    let digest = NewsDigest::build(source, &args.query(), summarizer, args.sentences, args.headlines).await?;
    print!("{}", render(&digest));
    Ok(digest)
}

pub fn render(digest: &NewsDigest) -> String {
    if digest.article_count == 0 {
        return "No articles found or there was an error fetching the news.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("\nAccumulated Summary of Agricultural News:\n");
    out.push_str(&digest.summary);
    out.push_str("\n\nRecent Agricultural News Articles:\n");
    for article in &digest.headlines {
        out.push_str(&format!("\n📰 {}\n", article.title));
        out.push_str(&format!("   Published At: {}\n", article.published_at.to_rfc3339()));
        out.push_str(&format!("   Source: {}\n", article.source_name()));
        if let Some(description) = &article.description {
            out.push_str(&format!("   {}\n", description));
        }
        out.push_str(&format!("   Read more: {}\n", article.url));
    }
    out
}
