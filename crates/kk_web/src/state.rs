use std::sync::Arc;

use kk_core::{NewsQuery, NewsSource, PricePredictor, WeatherSource};
use kk_prices::{CropRecords, PriceHistory};
use kk_summarizer::Summarizer;
use kk_weather::Thresholds;

pub struct AppState {
    pub summarizer: Arc<Summarizer>,
    pub news: Arc<dyn NewsSource>,
    pub weather: Arc<dyn WeatherSource>,
    pub news_query: NewsQuery,
    pub thresholds: Thresholds,
    /// Price endpoints answer 404 until their data is loaded
    pub price_history: Option<Arc<PriceHistory>>,
    pub crop_records: Option<Arc<CropRecords>>,
    pub predictor: Option<Arc<dyn PricePredictor>>,
}

impl AppState {
    pub fn new(summarizer: Summarizer, news: Arc<dyn NewsSource>, weather: Arc<dyn WeatherSource>) -> Self {
        Self {
            summarizer: Arc::new(summarizer),
            news,
            weather,
            news_query: NewsQuery::default(),
            thresholds: Thresholds::default(),
            price_history: None,
            crop_records: None,
            predictor: None,
        }
    }

    pub fn with_news_query(mut self, query: NewsQuery) -> Self {
        self.news_query = query;
        self
    }

    pub fn with_price_history(mut self, history: PriceHistory) -> Self {
        self.price_history = Some(Arc::new(history));
        self
    }

    pub fn with_crop_records(mut self, records: CropRecords) -> Self {
        self.crop_records = Some(Arc::new(records));
        self
    }

    pub fn with_predictor(mut self, predictor: Arc<dyn PricePredictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }
}
