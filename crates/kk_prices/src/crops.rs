//! Crop records the price model was fitted on. They supply the choices for each
//! categorical feature and the average price a prediction is compared with.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use tracing::debug;

use kk_core::{Error, Result, UsageLevel};

/// One row of the crop data file. Columns the model uses but nothing here reads are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CropRecord {
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Soil Type")]
    pub soil_type: String,
    #[serde(rename = "Price")]
    pub price: Option<f64>,
}

/// Distinct values of each categorical feature, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureOptions {
    pub crops: Vec<String>,
    pub seasons: Vec<String>,
    pub states: Vec<String>,
    pub soil_types: Vec<String>,
    pub usage_levels: Vec<UsageLevel>,
}

#[derive(Debug, Clone, Default)]
pub struct CropRecords {
    records: Vec<CropRecord>,
}

impl CropRecords {
    pub fn new(records: Vec<CropRecord>) -> Self {
        Self { records }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let records = Self::from_reader(File::open(path)?)?;
        debug!("Loaded {} crop records from {}", records.len(), path.display());
        Ok(records)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<CropRecord>, _>>()
            .map_err(|e| Error::Prices(format!("invalid crop CSV: {}", e)))?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn options(&self) -> FeatureOptions {
        FeatureOptions {
            crops: distinct(self.records.iter().map(|r| r.crop.as_str())),
            seasons: distinct(self.records.iter().map(|r| r.season.as_str())),
            states: distinct(self.records.iter().map(|r| r.state.as_str())),
            soil_types: distinct(self.records.iter().map(|r| r.soil_type.as_str())),
            usage_levels: vec![UsageLevel::Low, UsageLevel::Medium, UsageLevel::High],
        }
    }

    /// Mean recorded price of `crop`; rows without a price are skipped.
    pub fn average_price(&self, crop: &str) -> Result<f64> {
        let prices: Vec<f64> = self
            .records
            .iter()
            .filter(|r| r.crop == crop)
            .filter_map(|r| r.price)
            .collect();

        if prices.is_empty() {
            return Err(Error::Prices(format!("no recorded prices for crop {}", crop)));
        }
        Ok(prices.iter().sum::<f64>() / prices.len() as f64)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}
