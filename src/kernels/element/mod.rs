//! Element-wise kernel implementations
//!
//! Block-level wrappers around the epilogue transforms:
//! - Gaussian: row-wise application of the Gaussian epilogue

pub mod gaussian;

// Public exports for element-wise operations
pub use gaussian::{gaussian_rows, gaussian_rows_scalar};
