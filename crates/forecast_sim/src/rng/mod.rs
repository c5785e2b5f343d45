//! # Random Number Generation Infrastructure
//!
//! Seeded pseudo-random number generation for the path simulator.
//!
//! ## Design
//!
//! - **Reproducibility**: every generator is created from a 64-bit seed
//! - **Efficiency**: zero-allocation batch fills via `&mut [f64]` slices
//! - **Partitioning**: [`ForecastRng::substream`] derives independent
//!   generators for parallel workers from one master seed
//!
//! ## Usage Example
//!
//! ```rust
//! use forecast_sim::rng::ForecastRng;
//!
//! let mut rng = ForecastRng::from_seed(12345);
//! let z = rng.gen_normal();
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//!
//! // Block 3 of a parallel run
//! let mut worker = ForecastRng::substream(12345, 3);
//! let _ = worker.gen_normal();
//! ```

mod prng;

pub use prng::ForecastRng;
