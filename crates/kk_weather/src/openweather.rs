use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;
use url::Url;

use kk_core::{CurrentWeather, Error, Result, WeatherSource};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: MainReadings,
    wind: Wind,
    /// Metres
    visibility: f64,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    /// Kelvin
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

/// Current weather from the OpenWeatherMap `weather` endpoint.
pub struct OpenWeatherClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
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

    fn weather_url(&self, city: &str) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/weather", self.base_url),
            &[("q", city), ("appid", self.api_key.as_str())],
        )
        .map_err(|e| Error::Weather(format!("Invalid weather API URL: {}", e)))
    }
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn parse_response(city: &str, body: &str) -> Result<CurrentWeather> {
    let response: WeatherResponse = serde_json::from_str(body)?;
    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| Error::Weather(format!("No weather conditions reported for {}", city)))?;

    Ok(CurrentWeather {
        city: city.to_string(),
        temperature_c: response.main.temp - KELVIN_OFFSET,
        humidity: response.main.humidity,
        wind_speed: response.wind.speed,
        visibility_km: response.visibility / 1000.0,
        description: condition.description,
        icon: condition.icon,
    })
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    fn name(&self) -> &str {
        "OpenWeatherMap"
    }

    async fn current(&self, city: &str) -> Result<CurrentWeather> {
        let city = city.trim();
        if city.is_empty() {
            return Err(Error::Weather("City name is empty".to_string()));
        }

        info!("🌦️ Fetching weather for {}", city);
        let response = self.client.get(self.weather_url(city)?).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Weather(format!("Error in API call: {}", body)));
        }

        parse_response(city, &body)
    }
}
