//! # Forecast Simulation (Layer 2: Monte Carlo Kernel)
//!
//! Generates independent future price trajectories under discrete-time
//! Geometric Brownian Motion:
//!
//! ```text
//! S[0][p] = S₀
//! S[t][p] = S[t-1][p] · exp(μ + σ·Z[t][p]),   Z ~ N(0, 1) i.i.d.
//! ```
//!
//! where `μ` is the per-step variance-adjusted drift and `σ` the per-step
//! volatility, both estimated from history by the caller.
//!
//! ## Module Structure
//!
//! - [`rng`]: seeded PRNG wrapper with independent substreams
//! - [`mc`]: parameters, configuration, the price-path matrix and the
//!   sequential and block-parallel simulators
//!
//! ## Usage Example
//!
//! ```rust
//! use forecast_sim::mc::{simulate, SimulationParameters};
//! use forecast_sim::rng::ForecastRng;
//!
//! let params = SimulationParameters::new(100.0, 0.0002, 0.015, 252, 1_000);
//! let mut rng = ForecastRng::from_seed(42);
//!
//! let matrix = simulate(&params, &mut rng).unwrap();
//! assert_eq!(matrix.shape(), (252, 1_000));
//! assert!(matrix.row(0).unwrap().iter().all(|&p| p == 100.0));
//! ```
//!
//! ## Determinism
//!
//! A seeded run is bit-reproducible. The block-parallel simulator derives
//! one substream per block of paths, so its output depends on the seed and
//! the block width but never on the number of worker threads.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod mc;
pub mod rng;

pub use mc::{
    simulate, simulate_blocks, ConfigError, ParallelConfig, PathSimulator, PricePathMatrix,
    SimulationConfig, SimulationError, SimulationParameters, SimulationRun,
};
pub use rng::ForecastRng;
