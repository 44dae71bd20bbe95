//! Parameter records for the Gaussian epilogue
//!
//! Split into a host side and a transform side: [`GaussianParamsBuffer`]
//! owns and validates the per-lane parameter columns once per launch, and
//! lends out [`GaussianParams`] — the borrowed view the transform actually
//! reads. [`GaussianConfig`] is the serializable plain-`f32` description a
//! host assembles the buffer from.

use serde::{Deserialize, Serialize};

use crate::error::{EpiForgeError, ForgeResult};
use crate::numeric::element::ComputeElement;

/// Borrowed per-lane parameter table: amplitude (`p1`), mean (`p2`) and
/// standard deviation (`p3`), in that fixed order, indexed by
/// output-element position within a tile row.
///
/// The default value holds three empty columns — the unconfigured state.
/// An epilogue constructed from it must not be invoked: the first lane
/// lookup panics on the empty slice.
#[derive(Clone, Copy, Debug, Default)]
pub struct GaussianParams<'a, C: ComputeElement> {
    /// Peak amplitude per lane.
    pub amplitude: &'a [C],
    /// Center of the curve per lane.
    pub mean: &'a [C],
    /// Width of the curve per lane. A zero entry is not rejected: the
    /// division by it follows IEEE rules and yields Inf/NaN downstream.
    pub std_dev: &'a [C],
}

impl<'a, C: ComputeElement> GaussianParams<'a, C> {
    pub fn new(amplitude: &'a [C], mean: &'a [C], std_dev: &'a [C]) -> Self {
        Self {
            amplitude,
            mean,
            std_dev,
        }
    }

    /// Number of lanes covered by all three columns.
    pub fn covered_lanes(&self) -> usize {
        self.amplitude.len().min(self.mean.len()).min(self.std_dev.len())
    }

    pub fn is_empty(&self) -> bool {
        self.covered_lanes() == 0
    }
}

/// Host-owned parameter storage.
///
/// Constructed once per launch; the columns are validated to be equal-length
/// and non-empty so every view handed out covers a contiguous lane range.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianParamsBuffer<C: ComputeElement> {
    amplitude: Vec<C>,
    mean: Vec<C>,
    std_dev: Vec<C>,
}

impl<C: ComputeElement> GaussianParamsBuffer<C> {
    /// Take ownership of the three columns.
    ///
    /// # Errors
    ///
    /// [`EpiForgeError::EmptyParameterTable`] when the columns are empty,
    /// [`EpiForgeError::ParameterColumnMismatch`] when their lengths differ.
    pub fn new(amplitude: Vec<C>, mean: Vec<C>, std_dev: Vec<C>) -> ForgeResult<Self> {
        if amplitude.len() != mean.len() || amplitude.len() != std_dev.len() {
            return Err(EpiForgeError::ParameterColumnMismatch {
                amplitude: amplitude.len(),
                mean: mean.len(),
                std_dev: std_dev.len(),
            });
        }
        if amplitude.is_empty() {
            return Err(EpiForgeError::EmptyParameterTable);
        }
        Ok(Self {
            amplitude,
            mean,
            std_dev,
        })
    }

    /// Build a buffer in compute precision from plain `f32` columns.
    pub fn from_f32(amplitude: &[f32], mean: &[f32], std_dev: &[f32]) -> ForgeResult<Self> {
        let widen = |column: &[f32]| column.iter().map(|&v| C::from_f64(v as f64)).collect();
        Self::new(widen(amplitude), widen(mean), widen(std_dev))
    }

    /// Number of lanes the table covers.
    pub fn len(&self) -> usize {
        self.amplitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitude.is_empty()
    }

    /// Borrow the table for the duration of a launch.
    pub fn params(&self) -> GaussianParams<'_, C> {
        GaussianParams::new(&self.amplitude, &self.mean, &self.std_dev)
    }
}

/// Serializable description of a Gaussian parameter table.
///
/// The host-assembled record a launch is configured from; convert it into a
/// typed buffer with [`GaussianConfig::into_buffer`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GaussianConfig {
    pub amplitude: Vec<f32>,
    pub mean: Vec<f32>,
    pub std_dev: Vec<f32>,
}

impl GaussianConfig {
    /// Check column consistency without building a buffer.
    pub fn validate(&self) -> ForgeResult<()> {
        if self.amplitude.len() != self.mean.len() || self.amplitude.len() != self.std_dev.len() {
            return Err(EpiForgeError::ParameterColumnMismatch {
                amplitude: self.amplitude.len(),
                mean: self.mean.len(),
                std_dev: self.std_dev.len(),
            });
        }
        if self.amplitude.is_empty() {
            return Err(EpiForgeError::EmptyParameterTable);
        }
        Ok(())
    }

    /// Convert into an owned buffer in compute precision `C`.
    pub fn into_buffer<C: ComputeElement>(&self) -> ForgeResult<GaussianParamsBuffer<C>> {
        GaussianParamsBuffer::from_f32(&self.amplitude, &self.mean, &self.std_dev)
    }
}
