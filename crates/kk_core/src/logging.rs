use tracing::Level;

/// Tags every message of one repeating job, e.g. `📰 [cycle 3] fetched 12 articles`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    tags: Vec<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    fn line(&self, message: &str) -> String {
        self.tags
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(message))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", self.line(message));
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", self.line(message));
    }
}

/// Installs the global fmt subscriber. When one is already installed the call
/// only hands out a logger.
pub fn init_logging(level: Level) -> Logger {
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
    Logger::new()
}
