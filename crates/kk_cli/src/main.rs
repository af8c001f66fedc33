use clap::Parser;
use kk_core::logging::init_logging;
use kk_core::{Error, NewsSource, Result, WeatherSource};
use kk_news::{NewsApiClient, NewsArgs};
use kk_prices::{CropRecords, HttpPricePredictor, PriceCommand, PriceHistory};
use kk_summarizer::aggregator::truncate_text;
use kk_summarizer::{Config, Language, SentenceCount, Summarizer};
use kk_weather::{assess, OpenWeatherClient, Severity};
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    /// Accepts `<number><unit>` pairs such as `1h15m30s` or `1d 2h`. A number without
    /// a unit counts as seconds.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total = 0u64;
        for chunk in s.split_whitespace() {
            let mut rest = chunk;
            while !rest.is_empty() {
                let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
                if digits == 0 {
                    return Err(format!("Expected a number before: {}", rest));
                }
                let value: u64 = rest[..digits]
                    .parse()
                    .map_err(|_| format!("Number out of range: {}", &rest[..digits]))?;
                let mut tail = rest[digits..].chars();
                let unit = match tail.next() {
                    None | Some('s') => 1,
                    Some('m') => 60,
                    Some('h') => 3600,
                    Some('d') => 86_400,
                    Some(other) => return Err(format!("Invalid duration unit: {}", other)),
                };
                total = value
                    .checked_mul(unit)
                    .and_then(|secs| total.checked_add(secs))
                    .ok_or_else(|| "Duration is too long".to_string())?;
                rest = tail.as_str();
            }
        }

        if total == 0 {
            return Err("Duration must be longer than zero".to_string());
        }
        Ok(HumanDuration(Duration::from_secs(total)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Kissan Konnect: agricultural news summaries, weather advisories and crop prices", long_about = None)]
pub struct Cli {
    /// Language of the text being summarized (name or ISO code)
    #[arg(long, global = true, default_value = "english")]
    language: String,
    /// Log debug output
    #[arg(long, short, global = true)]
    verbose: bool,
    /// NewsAPI key
    #[arg(long, global = true, env = "NEWS_API_KEY", hide_env_values = true)]
    news_api_key: Option<String>,
    /// OpenWeatherMap key
    #[arg(long, global = true, env = "OPENWEATHERMAP_API_KEY", hide_env_values = true)]
    weather_api_key: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Summarize a text file, or stdin when no file is given
    Summarize {
        file: Option<PathBuf>,
        /// Sentences to keep, either a count (2) or a share of the text (20%)
        #[arg(long, default_value = "2")]
        sentences: SentenceCount,
    },
    /// Fetch recent agricultural news and print an accumulated summary
    News {
        #[command(flatten)]
        args: NewsArgs,
        /// Repeat with this interval (e.g. 3h, 30m, 1h15m30s)
        #[arg(long)]
        interval: Option<HumanDuration>,
    },
    /// Current weather for a city with advisories for farmers
    Weather {
        city: String,
    },
    /// Commodity price trends and crop price predictions
    Prices {
        #[command(subcommand)]
        command: PriceCommand,
    },
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
        /// News query used by the news summary endpoint
        #[arg(long, default_value = "farmers-india")]
        news_query: String,
        /// Price history CSV served under /api/prices/commodities
        #[arg(long, env = "KK_PRICE_HISTORY")]
        price_history: Option<PathBuf>,
        /// Crop records CSV used by the prediction endpoints
        #[arg(long, env = "KK_CROP_DATA")]
        crop_data: Option<PathBuf>,
        /// Base URL of the served price model
        #[arg(long, env = "KK_PREDICTOR_URL")]
        predictor_url: Option<String>,
    },
}

fn require_key(key: Option<String>, name: &str) -> Result<String> {
    key.filter(|k| !k.trim().is_empty())
        .ok_or_else(|| Error::Configuration(format!("missing API key: pass --{} or set its environment variable", name)))
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

async fn run_news(args: NewsArgs, interval: Option<HumanDuration>, source: &dyn NewsSource, summarizer: &Summarizer, verbose: bool) -> Result<()> {
    let Some(interval) = interval else {
        kk_news::handle_command(&args, source, summarizer).await?;
        return Ok(());
    };

    let logger = init_logging(log_level(verbose)).with_prefix("📰");
    info!("Running in periodic mode with {}s interval", interval.0.as_secs());
    let mut cycle = 1u64;
    loop {
        let cycle_logger = logger.clone().with_prefix(format!("[cycle {}]", cycle));
        cycle_logger.info("Fetching and summarizing agricultural news...");
        match kk_news::handle_command(&args, source, summarizer).await {
            Ok(digest) => cycle_logger.info(&format!("Summarized {} articles", digest.article_count)),
            Err(e) => cycle_logger.error(&format!("Error during news cycle: {}", e)),
        }
        cycle_logger.info(&format!("Waiting {}s before the next update", interval.0.as_secs()));
        tokio::time::sleep(interval.0).await;
        cycle += 1;
    }
}

async fn run_weather(city: &str, source: &dyn WeatherSource) -> Result<()> {
    let weather = source.current(city).await?;
    println!("\nCurrent Weather in {}", weather.city);
    println!("  Temperature: {:.1}°C", weather.temperature_c);
    println!("  Humidity:    {}%", weather.humidity);
    println!("  Wind Speed:  {} m/s", weather.wind_speed);
    println!("  Visibility:  {:.1} km", weather.visibility_km);
    println!("  Description: {}", capitalize(&weather.description));

    let advisories = assess(&weather, &Default::default());
    println!("\nAgricultural Impact");
    if advisories.is_empty() {
        println!("  ✅ No weather risks for crops right now.");
    }
    for advisory in advisories {
        let emoji = match advisory.severity {
            Severity::Warning => "⚠️",
            Severity::Info => "ℹ️",
        };
        println!("  {} {}", emoji, advisory.message);
    }
    Ok(())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn log_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(log_level(cli.verbose));

    let language: Language = cli.language.parse()?;
    let config = Config {
        language,
        ..Config::default()
    };
    let summarizer = Summarizer::new(config);
    info!("🧠 Summarizer initialized (language: {})", language);

    match cli.command {
        Commands::Summarize { file, sentences } => {
            let text = read_input(file)?;
            let text = match summarizer.config().max_input_chars {
                Some(max) => truncate_text(&text, max),
                None => text.as_str(),
            };
            let summary = summarizer.summarize(text, sentences)?;
            println!("{}", summary);
        }
        Commands::News { args, interval } => {
            let source = NewsApiClient::new(require_key(cli.news_api_key, "news-api-key")?);
            run_news(args, interval, &source, &summarizer, cli.verbose).await?;
        }
        Commands::Weather { city } => {
            let source = OpenWeatherClient::new(require_key(cli.weather_api_key, "weather-api-key")?);
            run_weather(&city, &source).await?;
        }
        Commands::Prices { command } => {
            kk_prices::handle_command(&command).await?;
        }
        Commands::Serve {
            addr,
            news_query,
            price_history,
            crop_data,
            predictor_url,
        } => {
            let news = Arc::new(NewsApiClient::new(require_key(cli.news_api_key, "news-api-key")?));
            let weather = Arc::new(OpenWeatherClient::new(require_key(cli.weather_api_key, "weather-api-key")?));
            let mut state = kk_web::AppState::new(summarizer, news, weather)
                .with_news_query(kk_core::NewsQuery::new(news_query));
            if let Some(path) = price_history {
                state = state.with_price_history(PriceHistory::from_path(&path)?);
                info!("📈 Loaded price history from {}", path.display());
            }
            if let Some(path) = crop_data {
                state = state.with_crop_records(CropRecords::from_path(&path)?);
                info!("🌱 Loaded crop records from {}", path.display());
            }
            if let Some(url) = predictor_url {
                state = state.with_predictor(Arc::new(HttpPricePredictor::new(url)));
            }
            let app = kk_web::create_app(state).await;

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("🌾 Serving API on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
