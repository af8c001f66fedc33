//! Rule-based agricultural advisories derived from current conditions.

use serde::{Deserialize, Serialize};

use kk_core::CurrentWeather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub severity: Severity,
    pub message: String,
}

impl Advisory {
    fn warning(message: &str) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.to_string(),
        }
    }

    fn info(message: &str) -> Self {
        Self {
            severity: Severity::Info,
            message: message.to_string(),
        }
    }
}

/// Limits beyond which an advisory is raised. All comparisons are strict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub high_temperature_c: f64,
    pub low_temperature_c: f64,
    pub high_humidity: f64,
    pub low_humidity: f64,
    pub strong_wind: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high_temperature_c: 30.0,
            low_temperature_c: 10.0,
            high_humidity: 80.0,
            low_humidity: 30.0,
            strong_wind: 10.0,
        }
    }
}

pub fn assess(weather: &CurrentWeather, thresholds: &Thresholds) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if weather.temperature_c > thresholds.high_temperature_c {
        advisories.push(Advisory::warning("High temperature may stress crops. Consider irrigation."));
    } else if weather.temperature_c < thresholds.low_temperature_c {
        advisories.push(Advisory::warning("Low temperature may slow growth. Protect sensitive crops."));
    }

    if weather.humidity > thresholds.high_humidity {
        advisories.push(Advisory::warning("High humidity may increase disease risk. Monitor crops closely."));
    } else if weather.humidity < thresholds.low_humidity {
        advisories.push(Advisory::warning("Low humidity may increase water requirements. Adjust irrigation."));
    }

    if weather.wind_speed > thresholds.strong_wind {
        advisories.push(Advisory::warning("Strong winds may damage crops. Consider wind breaks."));
    }

    if weather.description.to_lowercase().contains("rain") {
        advisories.push(Advisory::info("Rainfall expected. Adjust irrigation schedules accordingly."));
    }

    advisories
}
