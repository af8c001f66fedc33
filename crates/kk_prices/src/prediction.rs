use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use kk_core::{CropFeatures, Error, PricePredictor, Result};

use crate::crops::CropRecords;

/// A prediction next to the crop's recorded average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub features: CropFeatures,
    pub predictor: String,
    pub predicted_price: f64,
    pub average_price: f64,
    /// Predicted minus average
    pub difference: f64,
    /// `None` when the average is zero
    pub percent_difference: Option<f64>,
}

pub async fn predict_and_compare(
    predictor: &dyn PricePredictor,
    records: &CropRecords,
    features: &CropFeatures,
) -> Result<PredictionReport> {
    features.validate()?;
    let average_price = records.average_price(&features.crop)?;

    let predicted_price = predictor.predict(features).await?;
    if !predicted_price.is_finite() {
        return Err(Error::Prediction(format!(
            "{} returned a non-finite price",
            predictor.name()
        )));
    }
    info!(
        "🌱 Predicted ₹{:.2} for {} (average ₹{:.2})",
        predicted_price, features.crop, average_price
    );

    let difference = predicted_price - average_price;
    Ok(PredictionReport {
        features: features.clone(),
        predictor: predictor.name().to_string(),
        predicted_price,
        average_price,
        difference,
        percent_difference: (average_price != 0.0).then(|| difference / average_price * 100.0),
    })
}

/// One input row keyed by the column names the model was trained with.
#[derive(Debug, Serialize)]
struct ModelRow<'a> {
    #[serde(rename = "Crop")]
    crop: &'a str,
    #[serde(rename = "Season")]
    season: &'a str,
    #[serde(rename = "State")]
    state: &'a str,
    #[serde(rename = "Soil Type")]
    soil_type: &'a str,
    #[serde(rename = "Pesticide Usage")]
    pesticide_usage: &'static str,
    #[serde(rename = "pH")]
    ph: f64,
    #[serde(rename = "Temperature")]
    temperature: f64,
    #[serde(rename = "Fertilizer Usage")]
    fertilizer_usage: &'static str,
    #[serde(rename = "Area")]
    area: f64,
    #[serde(rename = "Rainfall")]
    rainfall: f64,
}

impl<'a> From<&'a CropFeatures> for ModelRow<'a> {
    fn from(features: &'a CropFeatures) -> Self {
        Self {
            crop: &features.crop,
            season: &features.season,
            state: &features.state,
            soil_type: &features.soil_type,
            pesticide_usage: features.pesticide_usage.as_str(),
            ph: features.ph,
            temperature: features.temperature_c,
            fertilizer_usage: features.fertilizer_usage.as_str(),
            area: features.area_hectares,
            rainfall: features.rainfall_mm,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelResponse {
    #[serde(alias = "prediction")]
    price: f64,
}

/// A price model served over HTTP: `POST {base_url}/predict` with one feature row,
/// answered by `{"price": <rupees>}`.
#[derive(Debug, Clone)]
pub struct HttpPricePredictor {
    client: Arc<Client>,
    base_url: String,
}

impl HttpPricePredictor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn predict_url(&self) -> Result<Url> {
        Url::parse(&format!("{}/predict", self.base_url))
            .map_err(|e| Error::Configuration(format!("Invalid price model URL: {}", e)))
    }
}

#[async_trait]
impl PricePredictor for HttpPricePredictor {
    fn name(&self) -> &str {
        "price model"
    }

    async fn predict(&self, features: &CropFeatures) -> Result<f64> {
        let url = self.predict_url()?;
        let response = self
            .client
            .post(url)
            .json(&ModelRow::from(features))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Prediction(format!(
                "Error from price model: {} {}",
                status.as_u16(),
                body
            )));
        }
        let body: ModelResponse = response.json().await?;
        Ok(body.price)
    }
}
