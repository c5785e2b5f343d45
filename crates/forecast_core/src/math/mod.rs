//! Mathematical utilities.
//!
//! - [`statistics`]: descriptive statistics over `f64` samples

pub mod statistics;

pub use statistics::{
    excess_kurtosis, mean, quantile, quantile_sorted, sample_std_dev, sample_variance, skewness,
    sorted, CentralMoments,
};
