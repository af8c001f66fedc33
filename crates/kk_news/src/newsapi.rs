use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use kk_core::{Article, Error, NewsQuery, NewsSource, Result};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the `everything` endpoint of newsapi.org.
pub struct NewsApiClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn everything_url(&self, query: &NewsQuery) -> Result<Url> {
        let date_from = query.date_from(Utc::now()).format("%Y-%m-%d").to_string();
        Url::parse_with_params(
            &format!("{}/everything", self.base_url),
            &[
                ("q", query.query.as_str()),
                ("from", date_from.as_str()),
                ("sortBy", query.sort_by.as_str()),
                ("language", query.language.as_str()),
                ("apiKey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| Error::News(format!("Invalid news API URL: {}", e)))
    }
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub(crate) fn parse_response(body: &str, limit: usize) -> Result<Vec<Article>> {
    let response: NewsApiResponse = serde_json::from_str(body)?;
    if response.status != "ok" {
        return Err(Error::News(format!(
            "News API returned status {}: {}",
            response.status,
            response.message.unwrap_or_default()
        )));
    }
    debug!("News API reports {:?} total results", response.total_results);
    Ok(response.articles.into_iter().take(limit).collect())
}

#[async_trait]
impl NewsSource for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_articles(&self, query: &NewsQuery) -> Result<Vec<Article>> {
        let url = self.everything_url(query)?;
        info!("📰 Fetching news for '{}' from the last {} days", query.query, query.lookback_days);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::News(format!("Error fetching news: {}", status.as_u16())));
        }

        let body = response.text().await?;
        let articles = parse_response(&body, query.limit)?;
        info!("✨ Fetched {} articles", articles.len());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "status": "ok",
        "totalResults": 3,
        "articles": [
            {
                "source": {"id": null, "name": "Down To Earth"},
                "author": null,
                "title": "Kharif sowing picks up",
                "description": "Sowing has picked up after good rains.",
                "url": "https://example.com/1",
                "urlToImage": null,
                "publishedAt": "2024-09-02T06:00:00Z",
                "content": "Kharif sowing picked up pace this week after good rains across central India."
            },
            {
                "source": {"id": "the-hindu", "name": "The Hindu"},
                "author": "Staff",
                "title": "Farmers protest",
                "description": null,
                "url": "https://example.com/2",
                "urlToImage": null,
                "publishedAt": "2024-09-01T06:00:00Z",
                "content": null
            },
            {
                "source": {"id": null, "name": "Mint"},
                "title": "Edible oil imports",
                "url": "https://example.com/3",
                "publishedAt": "2024-08-31T06:00:00Z"
            }
        ]
    }"#;

    #[test]
    fn test_parse_response() {
        let articles = parse_response(BODY, 100).unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].source_name(), "Down To Earth");
        assert!(articles[1].content.is_none());
        assert!(articles[2].description.is_none());
    }

    #[test]
    fn test_parse_response_respects_limit() {
        let articles = parse_response(BODY, 2).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].title, "Farmers protest");
    }

    #[test]
    fn test_parse_error_status() {
        let body = r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."}"#;
        let err = parse_response(body, 100).unwrap_err();
        assert!(matches!(err, Error::News(_)));
        assert!(err.to_string().contains("Your API key is invalid."));
    }

    #[test]
    fn test_everything_url() {
        let client = NewsApiClient::new("secret").with_base_url("http://localhost:8080/v2/");
        let url = client.everything_url(&NewsQuery::new("farmers-fertilizer")).unwrap();
        assert_eq!(url.path(), "/v2/everything");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".to_string(), "farmers-fertilizer".to_string())));
        assert!(pairs.contains(&("sortBy".to_string(), "publishedAt".to_string())));
        assert!(pairs.contains(&("language".to_string(), "en".to_string())));
        assert!(pairs.contains(&("apiKey".to_string(), "secret".to_string())));
        assert!(pairs.iter().any(|(k, v)| k == "from" && v.len() == 10));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = NewsApiClient::new("secret");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
