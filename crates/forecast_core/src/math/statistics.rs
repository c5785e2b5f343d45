//! Descriptive statistics over `f64` samples.
//!
//! Every estimator here states its convention explicitly, since the choice
//! (biased vs. Bessel-corrected, interpolation rule) changes reported values.
//!
//! | Function | Convention |
//! |----------|------------|
//! | [`mean`] | arithmetic mean |
//! | [`sample_variance`] | Bessel-corrected, divisor `n - 1` |
//! | [`quantile`] | linear interpolation between order statistics, `h = (n - 1)·p` |
//! | [`skewness`] | biased moment estimator `g1 = m3 / m2^(3/2)` |
//! | [`excess_kurtosis`] | biased moment estimator `g2 = m4 / m2² - 3` |
//!
//! The skewness and kurtosis estimators match the default (non bias-corrected)
//! Fisher definitions used by common scientific libraries.

use crate::types::StatisticsError;

/// Returns a sorted copy of the sample using IEEE 754 total ordering.
///
/// NaN values sort to the end; callers that must reject them should check
/// finiteness before sorting.
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut values = data.to_vec();
    values.sort_by(f64::total_cmp);
    values
}

/// Arithmetic mean of the sample.
///
/// # Errors
///
/// Returns [`StatisticsError::EmptySample`] for an empty slice.
///
/// # Examples
///
/// ```
/// use forecast_core::math::statistics::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 6.0]).unwrap(), 3.0);
/// assert!(mean(&[]).is_err());
/// ```
pub fn mean(data: &[f64]) -> Result<f64, StatisticsError> {
    if data.is_empty() {
        return Err(StatisticsError::EmptySample);
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Bessel-corrected sample variance (divisor `n - 1`).
///
/// A single observation carries no dispersion information; its variance is
/// reported as `0.0` rather than undefined.
///
/// # Errors
///
/// Returns [`StatisticsError::EmptySample`] for an empty slice.
pub fn sample_variance(data: &[f64]) -> Result<f64, StatisticsError> {
    let mu = mean(data)?;
    if data.len() == 1 {
        return Ok(0.0);
    }
    let sum_sq: f64 = data.iter().map(|x| (x - mu) * (x - mu)).sum();
    Ok(sum_sq / (data.len() - 1) as f64)
}

/// Bessel-corrected sample standard deviation.
///
/// # Errors
///
/// Returns [`StatisticsError::EmptySample`] for an empty slice.
///
/// # Examples
///
/// ```
/// use forecast_core::math::statistics::sample_std_dev;
///
/// let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((sd - 2.138089935299395).abs() < 1e-12);
/// ```
#[inline]
pub fn sample_std_dev(data: &[f64]) -> Result<f64, StatisticsError> {
    sample_variance(data).map(f64::sqrt)
}

/// Quantile of an already sorted sample by linear interpolation.
///
/// With `n` observations the fractional rank is `h = (n - 1)·p`; the result
/// interpolates between the order statistics at `floor(h)` and `floor(h) + 1`.
/// The interpolation is evaluated from the nearer endpoint so the result
/// always stays inside `[x_lo, x_hi]`.
///
/// # Errors
///
/// - [`StatisticsError::EmptySample`] for an empty slice
/// - [`StatisticsError::InvalidProbability`] if `p` is not in `[0, 1]`
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Result<f64, StatisticsError> {
    if sorted.is_empty() {
        return Err(StatisticsError::EmptySample);
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(StatisticsError::InvalidProbability(p));
    }

    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let w = h - lo as f64;

    let a = sorted[lo];
    let b = sorted[hi];
    if w == 0.0 || lo == hi {
        return Ok(a);
    }

    let diff = b - a;
    if w < 0.5 {
        Ok(a + diff * w)
    } else {
        Ok(b - diff * (1.0 - w))
    }
}

/// Quantile of an unsorted sample; see [`quantile_sorted`].
///
/// # Errors
///
/// Same as [`quantile_sorted`].
///
/// # Examples
///
/// ```
/// use forecast_core::math::statistics::quantile;
///
/// let data = [10.0, 40.0, 20.0, 30.0];
/// assert_eq!(quantile(&data, 0.0).unwrap(), 10.0);
/// assert_eq!(quantile(&data, 1.0).unwrap(), 40.0);
/// assert!((quantile(&data, 0.25).unwrap() - 17.5).abs() < 1e-12);
/// ```
pub fn quantile(data: &[f64], p: f64) -> Result<f64, StatisticsError> {
    quantile_sorted(&sorted(data), p)
}

/// Population central moments of a sample (divisor `n`).
///
/// These are the building blocks of the biased skewness and kurtosis
/// estimators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CentralMoments {
    /// Number of observations.
    pub n: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Second central moment `m2 = Σ(x - μ)² / n`.
    pub m2: f64,
    /// Third central moment `m3 = Σ(x - μ)³ / n`.
    pub m3: f64,
    /// Fourth central moment `m4 = Σ(x - μ)⁴ / n`.
    pub m4: f64,
}

impl CentralMoments {
    /// Computes the central moments with a two-pass algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::EmptySample`] for an empty slice.
    pub fn from_sample(data: &[f64]) -> Result<Self, StatisticsError> {
        let mu = mean(data)?;
        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        for &x in data {
            let d = x - mu;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }
        let n = data.len() as f64;
        Ok(Self {
            n: data.len(),
            mean: mu,
            m2: m2 / n,
            m3: m3 / n,
            m4: m4 / n,
        })
    }

    /// Returns `true` when the sample has no measurable dispersion.
    ///
    /// `m2` is compared against the squared rounding error of the mean, so a
    /// constant sample whose mean picked up a rounding residue still counts.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.m2 <= (f64::EPSILON * self.mean).powi(2)
    }

    /// Biased skewness `g1 = m3 / m2^(3/2)`.
    ///
    /// A degenerate sample gives `0.0`. `scipy.stats.skew` applies the same
    /// degeneracy test but returns NaN.
    #[inline]
    pub fn skewness(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.m3 / self.m2.powf(1.5)
        }
    }

    /// Biased excess kurtosis `g2 = m4 / m2² - 3`.
    ///
    /// A degenerate sample gives `0.0` where `scipy.stats.kurtosis` returns
    /// NaN.
    #[inline]
    pub fn excess_kurtosis(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.m4 / (self.m2 * self.m2) - 3.0
        }
    }
}

/// Biased sample skewness; see [`CentralMoments::skewness`].
///
/// # Errors
///
/// Returns [`StatisticsError::EmptySample`] for an empty slice.
pub fn skewness(data: &[f64]) -> Result<f64, StatisticsError> {
    CentralMoments::from_sample(data).map(|m| m.skewness())
}

/// Biased sample excess kurtosis; see [`CentralMoments::excess_kurtosis`].
///
/// # Errors
///
/// Returns [`StatisticsError::EmptySample`] for an empty slice.
pub fn excess_kurtosis(data: &[f64]) -> Result<f64, StatisticsError> {
    CentralMoments::from_sample(data).map(|m| m.excess_kurtosis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_empty() {
        assert_eq!(mean(&[5.0]).unwrap(), 5.0);
        assert_eq!(mean(&[]), Err(StatisticsError::EmptySample));
    }

    #[test]
    fn test_sample_variance_bessel() {
        // Population variance 4, sample variance 32/7
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_variance(&data).unwrap(), 32.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_variance_single_observation() {
        assert_eq!(sample_variance(&[42.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_quantile_interpolation() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&data, 0.5).unwrap(), 3.0);
        assert_relative_eq!(quantile(&data, 0.05).unwrap(), 1.2, epsilon = 1e-12);
        assert_relative_eq!(quantile(&data, 0.95).unwrap(), 4.8, epsilon = 1e-12);
        assert_relative_eq!(quantile(&data, 0.1).unwrap(), 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_quantile_single_element() {
        assert_eq!(quantile(&[7.0], 0.01).unwrap(), 7.0);
        assert_eq!(quantile(&[7.0], 0.99).unwrap(), 7.0);
    }

    #[test]
    fn test_quantile_invalid_probability() {
        assert_eq!(
            quantile(&[1.0, 2.0], 1.5),
            Err(StatisticsError::InvalidProbability(1.5))
        );
        assert!(quantile(&[1.0, 2.0], f64::NAN).is_err());
    }

    #[test]
    fn test_skewness_symmetric_is_zero() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(skewness(&data).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_skewness_right_tail() {
        // m2 = 27/16, m3 = 81/32 -> g1 = 2/√3
        let data = [0.0, 0.0, 0.0, 3.0];
        let m = CentralMoments::from_sample(&data).unwrap();
        assert_relative_eq!(m.m2, 27.0 / 16.0, epsilon = 1e-12);
        assert_relative_eq!(skewness(&data).unwrap(), 2.0 / 3.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_excess_kurtosis_uniform_grid() {
        // Biased g2 of {1, 2, 3, 4, 5}: m2 = 2, m4 = 6.8 -> 6.8 / 4 - 3 = -1.3
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(excess_kurtosis(&data).unwrap(), -1.3, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_moments_are_zero() {
        let data = [0.1, 0.1, 0.1];
        assert_eq!(skewness(&data).unwrap(), 0.0);
        assert_eq!(excess_kurtosis(&data).unwrap(), 0.0);
    }

    #[test]
    fn test_sorted_total_order() {
        let s = sorted(&[3.0, -1.0, 2.0]);
        assert_eq!(s, vec![-1.0, 2.0, 3.0]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn test_quantile_monotone_in_p(
                data in prop::collection::vec(-1e6..1e6_f64, 1..200),
                p1 in 0.0..=1.0_f64,
                p2 in 0.0..=1.0_f64,
            ) {
                let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
                let s = sorted(&data);
                prop_assert!(quantile_sorted(&s, lo).unwrap() <= quantile_sorted(&s, hi).unwrap());
            }

            #[test]
            fn test_quantile_within_range(
                data in prop::collection::vec(-1e6..1e6_f64, 1..200),
                p in 0.0..=1.0_f64,
            ) {
                let s = sorted(&data);
                let q = quantile_sorted(&s, p).unwrap();
                prop_assert!(q >= s[0] && q <= s[s.len() - 1]);
            }

            #[test]
            fn test_variance_non_negative(data in prop::collection::vec(-1e3..1e3_f64, 1..100)) {
                prop_assert!(sample_variance(&data).unwrap() >= 0.0);
            }
        }
    }
}
