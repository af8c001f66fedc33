use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/summaries/text", post(handlers::summarize_text))
        .route("/api/summaries/articles", post(handlers::summarize_articles))
        .route("/api/news/summary", get(handlers::news_summary))
        .route("/api/weather/:city", get(handlers::weather))
        .route("/api/prices/commodities", get(handlers::commodities))
        .route("/api/prices/commodities/:commodity", get(handlers::commodity))
        .route("/api/prices/comparison", get(handlers::compare_commodities))
        .route("/api/prices/crops", get(handlers::crop_options))
        .route("/api/prices/predictions", post(handlers::predict_price))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use kk_core::{Article, Error, Result};
    pub use crate::AppState;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use kk_core::{
        Article, ArticleSource, CropFeatures, CurrentWeather, Error, NewsQuery, NewsSource, PricePredictor, Result,
        WeatherSource,
    };
    use kk_prices::{CropRecords, PriceHistory};
    use kk_summarizer::{Config, Summarizer};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct StubNews(Vec<Article>);

    #[async_trait]
    impl NewsSource for StubNews {
        fn name(&self) -> &str {
            "stub"
        }

        async fn fetch_articles(&self, query: &NewsQuery) -> Result<Vec<Article>> {
            Ok(self.0.iter().take(query.limit).cloned().collect())
        }
    }

    struct StubWeather;

    #[async_trait]
    impl WeatherSource for StubWeather {
        fn name(&self) -> &str {
            "stub"
        }

        async fn current(&self, city: &str) -> Result<CurrentWeather> {
            if city == "Atlantis" {
                return Err(Error::Weather("Error in API call: city not found".to_string()));
            }
            Ok(CurrentWeather {
                city: city.to_string(),
                temperature_c: 34.0,
                humidity: 85.0,
                wind_speed: 4.0,
                visibility_km: 8.0,
                description: "light rain".to_string(),
                icon: "10d".to_string(),
            })
        }
    }

    struct FixedPredictor(f64);

    #[async_trait]
    impl PricePredictor for FixedPredictor {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn predict(&self, _features: &CropFeatures) -> Result<f64> {
            Ok(self.0)
        }
    }

    const PRICE_HISTORY: &str = "date,Wheat,Rice\n2024-01-01,2000,3000\n2024-02-01,2200,3300\n2024-03-01,2400,\n";
    const CROP_DATA: &str = "Crop,Season,State,Soil Type,Price\nWheat,Rabi,Punjab,Loamy,2000\nRice,Kharif,Odisha,Clay,3000\n";

    fn article(i: usize, content: Option<&str>, description: Option<&str>) -> Article {
        Article {
            source: ArticleSource {
                id: None,
                name: "Krishi Jagran".to_string(),
            },
            author: None,
            title: format!("Story {}", i),
            description: description.map(str::to_string),
            url: format!("https://example.com/{}", i),
            url_to_image: None,
            published_at: Utc::now(),
            content: content.map(str::to_string),
        }
    }

    async fn app(articles: Vec<Article>) -> Router {
        let state = AppState::new(Summarizer::new(Config::default()), Arc::new(StubNews(articles)), Arc::new(StubWeather));
        create_app(state).await
    }

    async fn price_app() -> Router {
        let state = AppState::new(Summarizer::new(Config::default()), Arc::new(StubNews(vec![])), Arc::new(StubWeather))
            .with_price_history(PriceHistory::from_reader(PRICE_HISTORY.as_bytes()).unwrap())
            .with_crop_records(CropRecords::from_reader(CROP_DATA.as_bytes()).unwrap())
            .with_predictor(Arc::new(FixedPredictor(2500.0)));
        create_app(state).await
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(vec![]).await, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_summarize_text() {
        let request = post_json(
            "/api/summaries/text",
            json!({
                "text": "Rain helps crops grow. Drought damages crops severely. Farmers need better irrigation.",
                "sentences": 10
            }),
        );
        let (status, body) = send(app(vec![]).await, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["summary"],
            "Rain helps crops grow. Drought damages crops severely. Farmers need better irrigation."
        );
    }

    #[tokio::test]
    async fn test_summarize_empty_text() {
        let (status, body) = send(app(vec![]).await, post_json("/api/summaries/text", json!({ "text": "" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "");
    }

    #[tokio::test]
    async fn test_unsupported_language_is_bad_request() {
        let request = post_json("/api/summaries/text", json!({ "text": "Hello there.", "language": "klingon" }));
        let (status, body) = send(app(vec![]).await, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("klingon"));
    }

    #[tokio::test]
    async fn test_summarize_articles() {
        let articles = vec![
            article(0, Some("Urea stocks ran out in Vidarbha."), None),
            article(1, None, None),
            article(2, None, Some("Cotton prices firmed up.")),
        ];
        let request = post_json("/api/summaries/articles", json!({ "articles": articles }));
        let (status, body) = send(app(vec![]).await, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "Urea stocks ran out in Vidarbha. Cotton prices firmed up.");
    }

    #[tokio::test]
    async fn test_news_summary() {
        let articles = (0..7)
            .map(|i| article(i, Some(format!("Procurement of paddy lot {} began at the mandi.", i).as_str()), None))
            .collect();
        let (status, body) = send(app(articles).await, get("/api/news/summary?sentences=2&headlines=3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["article_count"], 7);
        assert_eq!(body["headlines"].as_array().unwrap().len(), 3);
        assert_eq!(body["query"], "farmers-india");
        assert!(!body["summary"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_weather_with_advisories() {
        let (status, body) = send(app(vec![]).await, get("/api/weather/Nashik")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weather"]["city"], "Nashik");
        assert_eq!(body["icon_url"], "http://openweathermap.org/img/wn/10d@2x.png");

        let advisories = body["advisories"].as_array().unwrap();
        assert_eq!(advisories.len(), 3);
        assert_eq!(advisories[2]["severity"], "info");
    }

    #[tokio::test]
    async fn test_weather_upstream_failure() {
        let (status, body) = send(app(vec![]).await, get("/api/weather/Atlantis")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("city not found"));
    }

    #[tokio::test]
    async fn test_commodity_stats() {
        let (status, body) = send(price_app().await, get("/api/prices/commodities")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["commodities"], json!(["Wheat", "Rice"]));

        let (status, body) = send(price_app().await, get("/api/prices/commodities/Wheat")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["latest"], 2400.0);
        assert_eq!(body["stats"]["average"], 2200.0);
        assert_eq!(body["stats"]["minimum"], 2000.0);
        assert_eq!(body["series"]["points"].as_array().unwrap().len(), 3);
        assert_eq!(body["series"]["points"][0]["date"], "2024-01-01");
    }

    #[tokio::test]
    async fn test_commodity_comparison() {
        let (status, body) = send(price_app().await, get("/api/prices/comparison?commodities=Rice,%20Wheat")).await;
        assert_eq!(status, StatusCode::OK);
        let series = body["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["commodity"], "Rice");
        assert_eq!(series[0]["points"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_commodity_is_not_found() {
        let (status, body) = send(price_app().await, get("/api/prices/commodities/Saffron")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("Saffron"));

        let (status, _) = send(app(vec![]).await, get("/api/prices/commodities")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_price_prediction() {
        let (status, body) = send(price_app().await, get("/api/prices/crops")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["crops"], json!(["Wheat", "Rice"]));
        assert_eq!(body["usage_levels"], json!(["Low", "Medium", "High"]));

        let features = json!({
            "crop": "Wheat",
            "season": "Rabi",
            "state": "Punjab",
            "soil_type": "Loamy",
            "pesticide_usage": "Low",
            "fertilizer_usage": "Medium",
            "ph": 6.5,
            "temperature_c": 30.0,
            "area_hectares": 1.0,
            "rainfall_mm": 100.0
        });
        let (status, body) = send(price_app().await, post_json("/api/prices/predictions", features.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["predicted_price"], 2500.0);
        assert_eq!(body["average_price"], 2000.0);
        assert_eq!(body["percent_difference"], 25.0);

        let mut invalid = features;
        invalid["ph"] = json!(11.0);
        let (status, _) = send(price_app().await, post_json("/api/prices/predictions", invalid)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
