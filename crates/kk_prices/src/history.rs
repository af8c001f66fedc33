//! Historical commodity prices: a CSV with a date column followed by one price
//! column per commodity.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use tracing::debug;

use kk_core::{Error, Result};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Recorded prices of one commodity in file order; missing cells are skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub commodity: String,
    pub points: Vec<PricePoint>,
}

/// The "quick stats" of a commodity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    pub commodity: String,
    pub latest: f64,
    pub latest_date: NaiveDate,
    pub average: f64,
    pub maximum: f64,
    pub minimum: f64,
    pub observations: usize,
}

impl PriceSeries {
    pub fn stats(&self) -> Result<PriceStats> {
        let Some(last) = self.points.last() else {
            return Err(Error::Prices(format!("no prices recorded for {}", self.commodity)));
        };
        let prices = self.points.iter().map(|p| p.price);
        let sum: f64 = prices.clone().sum();

        Ok(PriceStats {
            commodity: self.commodity.clone(),
            latest: last.price,
            latest_date: last.date,
            average: sum / self.points.len() as f64,
            maximum: prices.clone().fold(f64::NEG_INFINITY, f64::max),
            minimum: prices.fold(f64::INFINITY, f64::min),
            observations: self.points.len(),
        })
    }

    /// Relative move from the first to the latest recorded price, in percent.
    pub fn change_percent(&self) -> Option<f64> {
        let first = self.points.first()?.price;
        let last = self.points.last()?.price;
        (first != 0.0).then(|| (last - first) / first * 100.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PriceHistory {
    commodities: Vec<String>,
    dates: Vec<NaiveDate>,
    /// One row per date, one cell per commodity
    rows: Vec<Vec<Option<f64>>>,
}

impl PriceHistory {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let history = Self::from_reader(File::open(path)?)?;
        debug!(
            "Loaded {} dates for {} commodities from {}",
            history.len(),
            history.commodities.len(),
            path.display()
        );
        Ok(history)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = reader.headers().map_err(csv_error)?.clone();
        if headers.len() < 2 {
            return Err(Error::Prices(
                "price history needs a date column and at least one commodity column".to_string(),
            ));
        }
        let commodities: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut dates = Vec::new();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let line = record.position().map_or(0, |p| p.line());
            dates.push(parse_date(&record[0], line)?);

            let row = commodities
                .iter()
                .zip(record.iter().skip(1))
                .map(|(commodity, cell)| parse_price(cell, commodity, line))
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }

        Ok(Self {
            commodities,
            dates,
            rows,
        })
    }

    pub fn commodities(&self) -> &[String] {
        &self.commodities
    }

    /// Number of dates
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Column of `commodity`, matched exactly first and then ignoring case.
    fn column(&self, commodity: &str) -> Result<usize> {
        let commodity = commodity.trim();
        self.commodities
            .iter()
            .position(|c| c == commodity)
            .or_else(|| self.commodities.iter().position(|c| c.eq_ignore_ascii_case(commodity)))
            .ok_or_else(|| Error::Prices(format!("unknown commodity: {}", commodity)))
    }

    pub fn series(&self, commodity: &str) -> Result<PriceSeries> {
        let column = self.column(commodity)?;
        let points = self
            .dates
            .iter()
            .zip(&self.rows)
            .filter_map(|(date, row)| row[column].map(|price| PricePoint { date: *date, price }))
            .collect();

        Ok(PriceSeries {
            commodity: self.commodities[column].clone(),
            points,
        })
    }

    pub fn stats(&self, commodity: &str) -> Result<PriceStats> {
        self.series(commodity)?.stats()
    }

    /// Series of several commodities for side-by-side comparison, duplicates dropped.
    pub fn compare<S: AsRef<str>>(&self, commodities: &[S]) -> Result<Vec<PriceSeries>> {
        let mut seen = Vec::new();
        let mut series = Vec::new();
        for commodity in commodities {
            let column = self.column(commodity.as_ref())?;
            if seen.contains(&column) {
                continue;
            }
            seen.push(column);
            series.push(self.series(&self.commodities[column])?);
        }
        Ok(series)
    }
}

fn csv_error(err: csv::Error) -> Error {
    Error::Prices(format!("invalid price CSV: {}", err))
}

fn parse_date(cell: &str, line: u64) -> Result<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
        .ok_or_else(|| Error::Prices(format!("line {}: unrecognised date {:?}", line, cell)))
}

fn parse_price(cell: &str, commodity: &str, line: u64) -> Result<Option<f64>> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| Error::Prices(format!("line {}: invalid {} price {:?}", line, commodity, cell)))
}
