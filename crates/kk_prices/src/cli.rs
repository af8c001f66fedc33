use std::path::PathBuf;

use clap::{Args, Subcommand};

use kk_core::{CropFeatures, PricePredictor, Result, UsageLevel};

use crate::crops::CropRecords;
use crate::history::{PriceHistory, PriceSeries, PriceStats};
use crate::prediction::{predict_and_compare, HttpPricePredictor, PredictionReport};

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// CSV with a date column and one price column per commodity
    #[arg(long, env = "KK_PRICE_HISTORY", default_value = "data/india.csv")]
    pub history: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Crop records the model was fitted on
    #[arg(long, env = "KK_CROP_DATA", default_value = "data/crop_data.csv")]
    pub crop_data: PathBuf,
    /// Base URL of the served price model
    #[arg(long, env = "KK_PREDICTOR_URL")]
    pub predictor_url: String,
    #[arg(long)]
    pub crop: String,
    #[arg(long)]
    pub season: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub soil_type: String,
    /// Low, Medium or High
    #[arg(long, default_value = "Medium")]
    pub pesticide_usage: UsageLevel,
    /// Low, Medium or High
    #[arg(long, default_value = "Medium")]
    pub fertilizer_usage: UsageLevel,
    /// Soil pH (4.0 to 9.0)
    #[arg(long, default_value_t = 6.5)]
    pub ph: f64,
    /// Temperature in °C (10 to 50)
    #[arg(long, default_value_t = 30.0)]
    pub temperature: f64,
    /// Area in hectares
    #[arg(long, default_value_t = 1.0)]
    pub area: f64,
    /// Rainfall in mm
    #[arg(long, default_value_t = 100.0)]
    pub rainfall: f64,
}

impl PredictArgs {
    pub fn features(&self) -> CropFeatures {
        CropFeatures {
            crop: self.crop.clone(),
            season: self.season.clone(),
            state: self.state.clone(),
            soil_type: self.soil_type.clone(),
            pesticide_usage: self.pesticide_usage,
            fertilizer_usage: self.fertilizer_usage,
            ph: self.ph,
            temperature_c: self.temperature,
            area_hectares: self.area,
            rainfall_mm: self.rainfall,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum PriceCommand {
    /// List the commodities in the price history
    List {
        #[command(flatten)]
        history: HistoryArgs,
    },
    /// Latest, average, maximum and minimum price of a commodity
    Stats {
        commodity: String,
        #[command(flatten)]
        history: HistoryArgs,
    },
    /// Compare several commodities side by side
    Compare {
        #[arg(required = true)]
        commodities: Vec<String>,
        #[command(flatten)]
        history: HistoryArgs,
    },
    /// Predict a crop price and compare it with the crop's average
    Predict(PredictArgs),
}

pub async fn handle_command(command: &PriceCommand) -> Result<()> {
    let out = match command {
        PriceCommand::List { history } => render_commodities(&PriceHistory::from_path(&history.history)?),
        PriceCommand::Stats { commodity, history } => {
            render_stats(&PriceHistory::from_path(&history.history)?.stats(commodity)?)
        }
        PriceCommand::Compare { commodities, history } => {
            render_comparison(&PriceHistory::from_path(&history.history)?.compare(commodities)?)?
        }
        PriceCommand::Predict(args) => {
            let predictor = HttpPricePredictor::new(args.predictor_url.as_str());
            render_prediction(&run_prediction(args, &predictor).await?)
        }
    };
    print!("{}", out);
    Ok(())
}

pub async fn run_prediction(args: &PredictArgs, predictor: &dyn PricePredictor) -> Result<PredictionReport> {
    let records = CropRecords::from_path(&args.crop_data)?;
    predict_and_compare(predictor, &records, &args.features()).await
}

pub fn render_commodities(history: &PriceHistory) -> String {
    let mut out = format!("\n{} commodities, {} dates:\n", history.commodities().len(), history.len());
    for commodity in history.commodities() {
        out.push_str(&format!("  {}\n", commodity));
    }
    out
}

pub fn render_stats(stats: &PriceStats) -> String {
    format!(
        "\nQuick Stats: {}\n  Latest Price:  ₹{:.2} ({})\n  Average Price: ₹{:.2}\n  Maximum Price: ₹{:.2}\n  Minimum Price: ₹{:.2}\n",
        stats.commodity, stats.latest, stats.latest_date, stats.average, stats.maximum, stats.minimum
    )
}

pub fn render_comparison(series: &[PriceSeries]) -> Result<String> {
    let mut out = String::from("\nCommodity Price Comparison\n");
    out.push_str(&format!(
        "  {:<16} {:>10} {:>10} {:>10} {:>10} {:>8}\n",
        "Commodity", "Latest", "Average", "Max", "Min", "Change"
    ));
    for s in series {
        let stats = s.stats()?;
        let change = s
            .change_percent()
            .map_or_else(|| "n/a".to_string(), |c| format!("{:+.1}%", c));
        out.push_str(&format!(
            "  {:<16} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>8}\n",
            stats.commodity, stats.latest, stats.average, stats.maximum, stats.minimum, change
        ));
    }
    Ok(out)
}

pub fn render_prediction(report: &PredictionReport) -> String {
    let mut out = format!(
        "\nPredicted Price: ₹{:.2}\nAverage Price:   ₹{:.2} ({})\n",
        report.predicted_price, report.average_price, report.features.crop
    );
    if let Some(percent) = report.percent_difference {
        let direction = if report.difference >= 0.0 { "above" } else { "below" };
        out.push_str(&format!("The prediction is {:.1}% {} the average.\n", percent.abs(), direction));
    }
    out
}
