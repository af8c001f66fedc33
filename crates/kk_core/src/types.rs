use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A news article as delivered by the news API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: ArticleSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl Article {
    pub fn source_name(&self) -> &str {
        &self.source.name
    }
}

/// Parameters for a news search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsQuery {
    pub query: String,
    /// Only articles published within this many days
    pub lookback_days: i64,
    pub language: String,
    pub sort_by: String,
    /// Maximum number of articles kept from a response
    pub limit: usize,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            query: "farmers-india".to_string(),
            lookback_days: 10,
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
            limit: 100,
        }
    }
}

impl NewsQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// First day included in the search window
    pub fn date_from(&self, now: DateTime<Utc>) -> chrono::NaiveDate {
        (now - chrono::Duration::days(self.lookback_days)).date_naive()
    }
}

/// Current conditions for a city, already converted to metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    /// Degrees Celsius
    pub temperature_c: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Metres per second
    pub wind_speed: f64,
    pub visibility_km: f64,
    pub description: String,
    pub icon: String,
}

impl CurrentWeather {
    pub fn icon_url(&self) -> String {
        format!("http://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

/// Input usage level of pesticide or fertilizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UsageLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl UsageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageLevel::Low => "Low",
            UsageLevel::Medium => "Medium",
            UsageLevel::High => "High",
        }
    }
}

impl fmt::Display for UsageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsageLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(UsageLevel::Low),
            "medium" => Ok(UsageLevel::Medium),
            "high" => Ok(UsageLevel::High),
            other => Err(Error::Configuration(format!("unknown usage level: {}", other))),
        }
    }
}

/// Growing conditions a crop price prediction is made for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropFeatures {
    pub crop: String,
    pub season: String,
    pub state: String,
    pub soil_type: String,
    pub pesticide_usage: UsageLevel,
    pub fertilizer_usage: UsageLevel,
    pub ph: f64,
    pub temperature_c: f64,
    pub area_hectares: f64,
    pub rainfall_mm: f64,
}

impl CropFeatures {
    pub const PH_RANGE: (f64, f64) = (4.0, 9.0);
    pub const TEMPERATURE_RANGE: (f64, f64) = (10.0, 50.0);
    pub const MIN_AREA_HECTARES: f64 = 0.1;

    /// Rejects blank categories and measurements outside the ranges the model was fitted on.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("crop", &self.crop),
            ("season", &self.season),
            ("state", &self.state),
            ("soil_type", &self.soil_type),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Configuration(format!("{} must not be empty", field)));
            }
        }

        let in_range = |value: f64, (low, high): (f64, f64)| value.is_finite() && value >= low && value <= high;
        if !in_range(self.ph, Self::PH_RANGE) {
            return Err(Error::Configuration(format!("pH {} is outside 4.0 to 9.0", self.ph)));
        }
        if !in_range(self.temperature_c, Self::TEMPERATURE_RANGE) {
            return Err(Error::Configuration(format!(
                "temperature {}°C is outside 10 to 50",
                self.temperature_c
            )));
        }
        if !self.area_hectares.is_finite() || self.area_hectares < Self::MIN_AREA_HECTARES {
            return Err(Error::Configuration(format!(
                "area must be at least 0.1 hectares, got {}",
                self.area_hectares
            )));
        }
        if !self.rainfall_mm.is_finite() || self.rainfall_mm < 0.0 {
            return Err(Error::Configuration(format!(
                "rainfall must not be negative, got {}",
                self.rainfall_mm
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_from_news_api_json() {
        let json = r#"{
            "source": {"id": null, "name": "The Hindu"},
            "author": "Staff Reporter",
            "title": "Farmers protest fertilizer shortage",
            "description": "Farmers gathered outside the collectorate.",
            "url": "https://example.com/farmers",
            "urlToImage": null,
            "publishedAt": "2024-09-01T10:15:00Z",
            "content": null
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.source_name(), "The Hindu");
        assert_eq!(article.title, "Farmers protest fertilizer shortage");
        assert!(article.content.is_none());
        assert_eq!(article.description.as_deref(), Some("Farmers gathered outside the collectorate."));
    }

    #[test]
    fn test_news_query_window() {
        let now = DateTime::parse_from_rfc3339("2024-09-11T08:00:00Z").unwrap().with_timezone(&Utc);
        let query = NewsQuery::default();
        assert_eq!(query.date_from(now).to_string(), "2024-09-01");

        let query = NewsQuery { lookback_days: 0, ..NewsQuery::new("farmers-fertilizer") };
        assert_eq!(query.query, "farmers-fertilizer");
        assert_eq!(query.date_from(now).to_string(), "2024-09-11");
    }

    #[test]
    fn test_icon_url() {
        let weather = CurrentWeather {
            city: "Mumbai".to_string(),
            temperature_c: 31.0,
            humidity: 70.0,
            wind_speed: 3.5,
            visibility_km: 6.0,
            description: "haze".to_string(),
            icon: "50d".to_string(),
        };
        assert_eq!(weather.icon_url(), "http://openweathermap.org/img/wn/50d@2x.png");
    }

    fn features() -> CropFeatures {
        CropFeatures {
            crop: "Wheat".to_string(),
            season: "Rabi".to_string(),
            state: "Punjab".to_string(),
            soil_type: "Loamy".to_string(),
            pesticide_usage: UsageLevel::Low,
            fertilizer_usage: UsageLevel::Medium,
            ph: 6.5,
            temperature_c: 30.0,
            area_hectares: 1.0,
            rainfall_mm: 100.0,
        }
    }

    #[test]
    fn test_crop_features_validation() {
        assert!(features().validate().is_ok());
        assert!(CropFeatures { ph: 9.0, temperature_c: 10.0, area_hectares: 0.1, rainfall_mm: 0.0, ..features() }
            .validate()
            .is_ok());

        for invalid in [
            CropFeatures { crop: " ".to_string(), ..features() },
            CropFeatures { ph: 3.9, ..features() },
            CropFeatures { ph: f64::NAN, ..features() },
            CropFeatures { temperature_c: 51.0, ..features() },
            CropFeatures { area_hectares: 0.0, ..features() },
            CropFeatures { rainfall_mm: -1.0, ..features() },
        ] {
            assert!(matches!(invalid.validate(), Err(Error::Configuration(_))), "{:?}", invalid);
        }
    }

    #[test]
    fn test_usage_level_parsing() {
        assert_eq!("high".parse::<UsageLevel>().unwrap(), UsageLevel::High);
        assert_eq!(" Low ".parse::<UsageLevel>().unwrap(), UsageLevel::Low);
        assert!("extreme".parse::<UsageLevel>().is_err());

        let json = serde_json::to_value(features()).unwrap();
        assert_eq!(json["pesticide_usage"], "Low");
        assert_eq!(json["soil_type"], "Loamy");
    }
}
