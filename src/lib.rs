//! epiforge - Elementwise GEMM epilogue kernels
//!
//! Post-processing for matrix-multiply-accumulate outputs: each raw
//! accumulator element is converted to a working compute format, pushed
//! through a parametrized transfer function, and converted to its storage
//! format. The surrounding GEMM pipeline owns tiling, data movement and
//! memory I/O; this crate owns the per-element math and its numeric
//! contracts.
//!
//! The core is [`GaussianEpilogue`], a compile-time-specialized functor
//! over the (output, accumulator, compute, source) format quartet and the
//! fragment width, with [`kernels`] providing block-level application on
//! top of it.

#![cfg_attr(feature = "simd", feature(portable_simd))] // For std::simd f32 kernels (Rust 1.82+)
#![allow(clippy::needless_range_loop)] // Clearer for lane-indexed kernels

pub mod epilogue;
pub mod error;
pub mod kernels;
pub mod logging;
pub mod numeric;

pub use epilogue::fragment::Fragment;
pub use epilogue::gaussian::GaussianEpilogue;
pub use epilogue::params::{GaussianConfig, GaussianParams, GaussianParamsBuffer};
pub use error::{EpiForgeError, ErrorCategory, ForgeResult};
pub use numeric::convert::{NumericConverter, RoundNearest, RoundTowardZero, RoundingMode};
pub use numeric::element::{ComputeElement, Element};
pub use numeric::fast_exp::fast_exp;
