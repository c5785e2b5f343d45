//! Daily price series and CSV loading.
//!
//! Files carry a `date,close` header with ISO dates:
//!
//! ```text
//! date,close
//! 2024-01-02,23.71
//! 2024-01-03,23.15
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HistoryError;

/// One daily observation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new observation.
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Date-ordered series of strictly positive prices.
///
/// # Examples
///
/// ```
/// use adapter_history::PriceSeries;
///
/// let csv = "date,close\n2024-01-03,11.0\n2024-01-02,10.0\n";
/// let series = PriceSeries::from_reader(csv.as_bytes()).unwrap();
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.closes(), vec![10.0, 11.0]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series, sorting by date.
    ///
    /// # Errors
    ///
    /// - [`HistoryError::InvalidPrice`] for a non-positive or non-finite close
    /// - [`HistoryError::DuplicateDate`] if a date repeats
    pub fn new(mut points: Vec<PricePoint>) -> Result<Self, HistoryError> {
        if let Some(bad) = points
            .iter()
            .find(|p| !(p.close.is_finite() && p.close > 0.0))
        {
            return Err(HistoryError::InvalidPrice {
                date: bad.date,
                value: bad.close,
            });
        }

        points.sort_by_key(|p| p.date);
        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(HistoryError::DuplicateDate(pair[0].date));
        }

        Ok(Self { points })
    }

    /// Reads a `date,close` CSV stream.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Csv`] for malformed records, plus the
    /// validation errors of [`new`](Self::new).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, HistoryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let points = csv_reader
            .deserialize::<PricePoint>()
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(points)
    }

    /// Reads a `date,close` CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Io`] if the file cannot be opened, plus the
    /// errors of [`from_reader`](Self::from_reader).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let series = Self::from_reader(file)?;
        debug!(path = %path.display(), observations = series.len(), "Loaded price series");
        Ok(series)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observations in date order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// First observation.
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Most recent observation.
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Restricts the series to `[start, end]`, either bound optional and
    /// inclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// use adapter_history::PriceSeries;
    /// use chrono::NaiveDate;
    ///
    /// let csv = "date,close\n2024-01-01,1.0\n2024-01-02,2.0\n2024-01-03,3.0\n";
    /// let series = PriceSeries::from_reader(csv.as_bytes()).unwrap();
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 2);
    /// assert_eq!(series.window(start, None).closes(), vec![2.0, 3.0]);
    /// ```
    pub fn window(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let points = self
            .points
            .iter()
            .filter(|p| start.map_or(true, |s| p.date >= s) && end.map_or(true, |e| p.date <= e))
            .copied()
            .collect();
        Self { points }
    }
}
