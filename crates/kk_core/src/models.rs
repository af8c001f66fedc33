use async_trait::async_trait;
use crate::types::{Article, CropFeatures, CurrentWeather, NewsQuery};
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Human readable name of the provider
    fn name(&self) -> &str;

    /// Fetch recent articles matching `query`, at most `query.limit` of them
    async fn fetch_articles(&self, query: &NewsQuery) -> Result<Vec<Article>>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    fn name(&self) -> &str;

    /// Current conditions for a city
    async fn current(&self, city: &str) -> Result<CurrentWeather>;
}

/// A fitted crop price model. Implementations are opaque: a served model, a
/// remote endpoint, or a fixed stub in tests.
#[async_trait]
pub trait PricePredictor: Send + Sync {
    fn name(&self) -> &str;

    /// Predicted price in rupees for the given growing conditions
    async fn predict(&self, features: &CropFeatures) -> Result<f64>;
}
