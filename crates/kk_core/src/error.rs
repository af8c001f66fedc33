use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("News error: {0}")]
    News(String),

    #[error("Weather error: {0}")]
    Weather(String),

    #[error("Price error: {0}")]
    Prices(String),

    #[error("Prediction error: {0}")]
    Prediction(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True for failures caused by a collaborator service rather than the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::News(_) | Error::Weather(_) | Error::Prediction(_) | Error::Http(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
