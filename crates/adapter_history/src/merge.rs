//! Currency and unit conversion of a price series.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::error::HistoryError;
use crate::series::{PricePoint, PriceSeries};

/// Grams per troy ounce.
pub const TROY_OUNCE_GRAMS: f64 = 31.1035;

/// Converts `prices` into another currency and unit using an FX series.
///
/// The two series are aligned on the union of their dates, each side carried
/// forward over dates it lacks. Dates before both sides have an observation
/// are dropped. The converted close is `close / unit_divisor · fx`; a divisor
/// of `1.0` leaves the unit unchanged.
///
/// # Errors
///
/// Returns [`HistoryError::InvalidParameter`] if `unit_divisor` is not
/// positive and finite.
///
/// # Examples
///
/// ```
/// use adapter_history::{convert_with_fx, PriceSeries};
///
/// let prices = PriceSeries::from_reader("date,close\n2024-01-01,10.0\n2024-01-03,12.0\n".as_bytes()).unwrap();
/// let fx = PriceSeries::from_reader("date,close\n2024-01-01,2.0\n2024-01-02,3.0\n".as_bytes()).unwrap();
///
/// let merged = convert_with_fx(&prices, &fx, 1.0).unwrap();
/// // 01-01: 10·2, 01-02: 10·3 (price carried), 01-03: 12·3 (fx carried)
/// assert_eq!(merged.closes(), vec![20.0, 30.0, 36.0]);
/// ```
pub fn convert_with_fx(
    prices: &PriceSeries,
    fx: &PriceSeries,
    unit_divisor: f64,
) -> Result<PriceSeries, HistoryError> {
    if !(unit_divisor.is_finite() && unit_divisor > 0.0) {
        return Err(HistoryError::InvalidParameter {
            name: "unit_divisor",
            value: format!("must be positive and finite, got {}", unit_divisor),
        });
    }

    let dates: BTreeSet<_> = prices
        .points()
        .iter()
        .chain(fx.points())
        .map(|p| p.date)
        .collect();

    let mut price_iter = prices.points().iter().peekable();
    let mut fx_iter = fx.points().iter().peekable();
    let mut last_price = None;
    let mut last_fx = None;
    let mut dropped = 0usize;
    let mut points = Vec::with_capacity(dates.len());

    for date in dates {
        if let Some(p) = price_iter.next_if(|p| p.date == date) {
            last_price = Some(p.close);
        }
        if let Some(r) = fx_iter.next_if(|r| r.date == date) {
            last_fx = Some(r.close);
        }

        match (last_price, last_fx) {
            (Some(price), Some(rate)) => {
                points.push(PricePoint::new(date, price / unit_divisor * rate));
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, "Dropped leading dates without both price and FX");
    }
    debug!(observations = points.len(), unit_divisor, "Converted price series");

    PriceSeries::new(points)
}
