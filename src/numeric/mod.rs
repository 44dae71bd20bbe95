//! Numeric foundations for the epilogue kernels
//!
//! - `element`: the scalar formats data moves between and the compute
//!   formats transfer functions evaluate in
//! - `convert`: rounding-aware conversion between formats
//! - `fast_exp`: the approximate exponential used by the transforms

pub mod convert;
pub mod element;
pub mod fast_exp;

pub use convert::{NumericConverter, RoundNearest, RoundTowardZero, RoundingMode};
pub use element::{ComputeElement, Element};
pub use fast_exp::fast_exp;
