pub mod advisory;
pub mod openweather;

pub use advisory::{assess, Advisory, Severity, Thresholds};
pub use openweather::OpenWeatherClient;

pub mod prelude {
    pub use super::advisory::{assess, Advisory, Severity, Thresholds};
    pub use super::openweather::OpenWeatherClient;
    pub use kk_core::{CurrentWeather, Error, Result, WeatherSource};
}
