//! Epilogue transforms applied to raw matrix-multiply accumulators
//!
//! This module organizes the post-processing stage by concern:
//! - `fragment`: fixed-width chunks of row elements
//! - `params`: host-side parameter assembly and the borrowed views the
//!   transforms read
//! - `gaussian`: the Gaussian transfer functor

pub mod fragment;
pub mod gaussian;
pub mod params;

pub use fragment::Fragment;
pub use gaussian::GaussianEpilogue;
pub use params::{GaussianConfig, GaussianParams, GaussianParamsBuffer};
