pub mod error;
pub mod logging;
pub mod models;
pub mod types;

pub use error::Error;
pub use models::{NewsSource, PricePredictor, WeatherSource};
pub use types::{Article, ArticleSource, CropFeatures, CurrentWeather, NewsQuery, UsageLevel};

pub type Result<T> = std::result::Result<T, Error>;
