//! Commodity price history statistics and crop price predictions.

pub mod cli;
pub mod crops;
pub mod history;
pub mod prediction;

pub use cli::{handle_command, PriceCommand};
pub use crops::{CropRecord, CropRecords, FeatureOptions};
pub use history::{PriceHistory, PricePoint, PriceSeries, PriceStats};
pub use prediction::{predict_and_compare, HttpPricePredictor, PredictionReport};

pub mod prelude {
    pub use super::crops::CropRecords;
    pub use super::history::PriceHistory;
    pub use super::prediction::{predict_and_compare, HttpPricePredictor, PredictionReport};
    pub use kk_core::{CropFeatures, Error, PricePredictor, Result, UsageLevel};
}
