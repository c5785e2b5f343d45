//! Simulated price-path matrix.
//!
//! # Memory Layout
//!
//! Prices are stored step-major in one contiguous buffer:
//! `data[step * n_paths + path]`. A row is therefore the cross-section of all
//! paths at one step, which is what the analyzer and the band computation
//! consume.

/// Matrix of simulated prices indexed `[step][path]`.
///
/// Row 0 holds the start price for every path. GBM keeps every value
/// positive for finite normal draws; positivity is not enforced, and only
/// fails at the limits of the floating-point range.
///
/// # Examples
///
/// ```rust
/// use forecast_sim::mc::{simulate, SimulationParameters};
/// use forecast_sim::rng::ForecastRng;
///
/// let params = SimulationParameters::new(100.0, 0.0, 0.0, 3, 2);
/// let matrix = simulate(&params, &mut ForecastRng::from_seed(1)).unwrap();
///
/// assert_eq!(matrix.to_rows(), vec![vec![100.0, 100.0]; 3]);
/// assert_eq!(matrix.final_prices(), &[100.0, 100.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricePathMatrix {
    /// Step-major prices (n_steps × n_paths).
    data: Vec<f64>,
    /// Number of rows.
    n_steps: usize,
    /// Number of columns.
    n_paths: usize,
}

impl PricePathMatrix {
    /// Wraps a step-major buffer.
    pub(crate) fn from_raw(data: Vec<f64>, n_steps: usize, n_paths: usize) -> Self {
        debug_assert_eq!(data.len(), n_steps * n_paths);
        Self {
            data,
            n_steps,
            n_paths,
        }
    }

    /// Builds a matrix from explicit rows.
    ///
    /// Returns `None` if there are no rows, a row is empty, or rows differ in
    /// length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forecast_sim::mc::PricePathMatrix;
    ///
    /// let m = PricePathMatrix::from_rows(vec![vec![1.0, 1.0], vec![1.1, 0.9]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    /// assert!(PricePathMatrix::from_rows(vec![vec![1.0], vec![1.0, 2.0]]).is_none());
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let n_paths = rows.first()?.len();
        if n_paths == 0 || rows.iter().any(|row| row.len() != n_paths) {
            return None;
        }
        let n_steps = rows.len();
        let data = rows.into_iter().flatten().collect();
        Some(Self::from_raw(data, n_steps, n_paths))
    }

    /// Number of time steps (rows).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Number of paths (columns).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// `(n_steps, n_paths)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_steps, self.n_paths)
    }

    /// Price at `[step][path]`, or `None` when out of range.
    #[inline]
    pub fn get(&self, step: usize, path: usize) -> Option<f64> {
        if step < self.n_steps && path < self.n_paths {
            Some(self.data[step * self.n_paths + path])
        } else {
            None
        }
    }

    /// Cross-section of all paths at `step`.
    #[inline]
    pub fn row(&self, step: usize) -> Option<&[f64]> {
        if step < self.n_steps {
            let start = step * self.n_paths;
            Some(&self.data[start..start + self.n_paths])
        } else {
            None
        }
    }

    /// Iterates over rows in step order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.n_paths)
    }

    /// Trajectory of a single path, or `None` when `path` is out of range.
    pub fn path(&self, path: usize) -> Option<impl Iterator<Item = f64> + '_> {
        if path < self.n_paths {
            Some(self.data[path..].iter().step_by(self.n_paths).copied())
        } else {
            None
        }
    }

    /// End-of-horizon cross-section (the last row).
    #[inline]
    pub fn final_prices(&self) -> &[f64] {
        let start = (self.n_steps - 1) * self.n_paths;
        &self.data[start..]
    }

    /// Raw step-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Copies the matrix into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}
