//! Computational kernels
//!
//! Kernels apply an epilogue transform over whole output blocks rather than
//! one fragment at a time:
//! - `element`: element-wise block application (Gaussian)

pub mod element;
