use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use kk_core::{Article, CropFeatures, CurrentWeather, Error, Result};
use kk_news::digest::{NewsDigest, DEFAULT_HEADLINES};
use kk_prices::{predict_and_compare, FeatureOptions, PredictionReport, PriceHistory, PriceSeries, PriceStats};
use kk_summarizer::aggregator::{aggregate, truncate_text};
use kk_summarizer::{Config, Language, Summarizer};
use kk_weather::{assess, Advisory};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TextSummaryRequest {
    pub text: String,
    #[serde(default)]
    pub sentences: Option<usize>,
    /// Overrides the server's summarization language for this request
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArticlesSummaryRequest {
    pub articles: Vec<Article>,
    #[serde(default)]
    pub sentences: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    pub sentences: Option<usize>,
    pub headlines: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct WeatherReport {
    pub weather: CurrentWeather,
    pub icon_url: String,
    pub advisories: Vec<Advisory>,
}

#[derive(Debug, Serialize)]
pub struct CommodityList {
    pub commodities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CommodityReport {
    pub stats: PriceStats,
    pub series: PriceSeries,
}

#[derive(Debug, Deserialize)]
pub struct ComparisonParams {
    /// Comma separated commodity names
    pub commodities: String,
}

#[derive(Debug, Serialize)]
pub struct Comparison {
    pub series: Vec<PriceSeries>,
}

/// Summaries are CPU-bound; keep them off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::External(e.into()))?
}

fn capped<'a>(summarizer: &Summarizer, text: &'a str) -> &'a str {
    match summarizer.config().max_input_chars {
        Some(max) => truncate_text(text, max),
        None => text,
    }
}

fn summarizer_for(state: &AppState, language: Option<&str>) -> Result<Arc<Summarizer>> {
    match language {
        Some(tag) => {
            let language: Language = tag.parse()?;
            if language == state.summarizer.config().language {
                return Ok(state.summarizer.clone());
            }
            Ok(Arc::new(Summarizer::new(Config {
                language,
                ..state.summarizer.config().clone()
            })))
        }
        None => Ok(state.summarizer.clone()),
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn summarize_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextSummaryRequest>,
) -> std::result::Result<Json<SummaryResponse>, ApiError> {
    let summarizer = summarizer_for(&state, request.language.as_deref())?;
    let sentences = request.sentences.unwrap_or(summarizer.config().text_sentences);

    let summary = run_blocking(move || {
        summarizer.summarize_text(capped(&summarizer, &request.text), sentences)
    })
    .await?;

    Ok(Json(SummaryResponse { summary }))
}

pub async fn summarize_articles(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ArticlesSummaryRequest>,
) -> std::result::Result<Json<SummaryResponse>, ApiError> {
    let summarizer = state.summarizer.clone();
    let sentences = request.sentences.unwrap_or(summarizer.config().article_sentences);

    let summary = run_blocking(move || {
        let document = aggregate(&request.articles);
        summarizer.summarize_text(capped(&summarizer, &document), sentences)
    })
    .await?;

    Ok(Json(SummaryResponse { summary }))
}

pub async fn news_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
) -> std::result::Result<Json<NewsDigest>, ApiError> {
    let articles = state.news.fetch_articles(&state.news_query).await?;
    info!("📰 Summarizing {} articles from {}", articles.len(), state.news.name());

    let summarizer = state.summarizer.clone();
    let query = state.news_query.clone();
    let sentences = params.sentences.unwrap_or(summarizer.config().article_sentences);
    let headlines = params.headlines.unwrap_or(DEFAULT_HEADLINES);

    let digest = run_blocking(move || {
        NewsDigest::from_articles(&query, articles, &summarizer, sentences, headlines)
    })
    .await?;

    Ok(Json(digest))
}

pub async fn weather(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> std::result::Result<Json<WeatherReport>, ApiError> {
    let weather = state.weather.current(&city).await?;
    let advisories = assess(&weather, &state.thresholds);
    Ok(Json(WeatherReport {
        icon_url: weather.icon_url(),
        weather,
        advisories,
    }))
}

fn price_history(state: &AppState) -> Result<&PriceHistory> {
    state
        .price_history
        .as_deref()
        .ok_or_else(|| Error::Prices("price history is not loaded".to_string()))
}

pub async fn commodities(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<CommodityList>, ApiError> {
    let history = price_history(&state)?;
    Ok(Json(CommodityList {
        commodities: history.commodities().to_vec(),
    }))
}

pub async fn commodity(
    State(state): State<Arc<AppState>>,
    Path(commodity): Path<String>,
) -> std::result::Result<Json<CommodityReport>, ApiError> {
    let series = price_history(&state)?.series(&commodity)?;
    Ok(Json(CommodityReport {
        stats: series.stats()?,
        series,
    }))
}

pub async fn compare_commodities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ComparisonParams>,
) -> std::result::Result<Json<Comparison>, ApiError> {
    let names: Vec<&str> = params
        .commodities
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    let series = price_history(&state)?.compare(&names)?;
    Ok(Json(Comparison { series }))
}

pub async fn crop_options(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<FeatureOptions>, ApiError> {
    let records = state
        .crop_records
        .as_deref()
        .ok_or_else(|| Error::Prices("crop data is not loaded".to_string()))?;
    Ok(Json(records.options()))
}

pub async fn predict_price(
    State(state): State<Arc<AppState>>,
    Json(features): Json<CropFeatures>,
) -> std::result::Result<Json<PredictionReport>, ApiError> {
    let records = state
        .crop_records
        .as_deref()
        .ok_or_else(|| Error::Prices("crop data is not loaded".to_string()))?;
    let predictor = state
        .predictor
        .as_deref()
        .ok_or_else(|| Error::Prices("no price model is configured".to_string()))?;

    let report = predict_and_compare(predictor, records, &features).await?;
    Ok(Json(report))
}
