//! Row-wise Gaussian epilogue kernel
//!
//! Applies the Gaussian epilogue across a row-major block of accumulator
//! values: column `j` of every row uses parameter index `j`, matching how
//! the fragment transform maps lanes within a tile row. Rows are mutually
//! independent and the parameter table is read-only, so large blocks are
//! processed row-parallel with rayon without any shared mutable state.
//!
//! The scalar path is the correctness reference; a portable-SIMD `f32`
//! path is available behind the `simd` feature.

use rayon::prelude::*;
use tracing::trace;

use crate::epilogue::gaussian::GaussianEpilogue;
use crate::epilogue::params::GaussianParams;
use crate::error::{EpiForgeError, ForgeResult};
use crate::numeric::element::{ComputeElement, Element};

/// Blocks with at least this many rows are processed in parallel.
const PAR_ROW_THRESHOLD: usize = 64;

/// Validate block shape against the parameter table.
fn check_shape<C: ComputeElement>(
    params: &GaussianParams<'_, C>,
    accumulator_len: usize,
    output_len: usize,
    width: usize,
) -> ForgeResult<()> {
    if width == 0 {
        return Err(EpiForgeError::InvalidRowWidth(width));
    }
    if accumulator_len != output_len {
        return Err(EpiForgeError::ShapeMismatch(format!(
            "accumulator block has {} elements, output block has {}",
            accumulator_len, output_len
        )));
    }
    if accumulator_len % width != 0 {
        return Err(EpiForgeError::ShapeMismatch(format!(
            "block of {} elements is not a whole number of rows of width {}",
            accumulator_len, width
        )));
    }
    let covered = params.covered_lanes();
    if covered < width {
        return Err(EpiForgeError::ParameterTableTooShort {
            len: covered,
            required: width,
        });
    }
    Ok(())
}

/// Apply the Gaussian epilogue over a row-major block.
///
/// `accumulators` and `output` hold `rows * width` elements; row `r`
/// occupies `[r * width, (r + 1) * width)`. Blocks of
/// [`PAR_ROW_THRESHOLD`] rows or more are processed in parallel.
///
/// # Errors
///
/// Shape errors only; the transform itself cannot fail. Non-finite values
/// produced by degenerate parameters land in `output` as-is.
pub fn gaussian_rows<O, A, C>(
    params: GaussianParams<'_, C>,
    accumulators: &[A],
    width: usize,
    output: &mut [O],
) -> ForgeResult<()>
where
    O: Element,
    A: Element,
    C: ComputeElement,
{
    check_shape(&params, accumulators.len(), output.len(), width)?;

    let rows = accumulators.len() / width;
    trace!(rows, width, "gaussian epilogue over block");

    let epilogue = GaussianEpilogue::<O, 1, A, C>::new(params);

    if rows >= PAR_ROW_THRESHOLD {
        output
            .par_chunks_mut(width)
            .zip(accumulators.par_chunks(width))
            .for_each(|(out_row, acc_row)| {
                for (lane, out) in out_row.iter_mut().enumerate() {
                    *out = epilogue.apply_scalar(acc_row[lane], lane);
                }
            });
    } else {
        for (out_row, acc_row) in output.chunks_mut(width).zip(accumulators.chunks(width)) {
            for (lane, out) in out_row.iter_mut().enumerate() {
                *out = epilogue.apply_scalar(acc_row[lane], lane);
            }
        }
    }

    Ok(())
}

/// Serial reference implementation of [`gaussian_rows`].
pub fn gaussian_rows_scalar<O, A, C>(
    params: GaussianParams<'_, C>,
    accumulators: &[A],
    width: usize,
    output: &mut [O],
) -> ForgeResult<()>
where
    O: Element,
    A: Element,
    C: ComputeElement,
{
    check_shape(&params, accumulators.len(), output.len(), width)?;

    let epilogue = GaussianEpilogue::<O, 1, A, C>::new(params);
    for (out_row, acc_row) in output.chunks_mut(width).zip(accumulators.chunks(width)) {
        for (lane, out) in out_row.iter_mut().enumerate() {
            *out = epilogue.apply_scalar(acc_row[lane], lane);
        }
    }

    Ok(())
}

// ============================================================================
// Portable-SIMD f32 path
// ============================================================================

/// SIMD-accelerated homogeneous `f32` variant of [`gaussian_rows`].
///
/// Vector arithmetic covers the difference/ratio/scaling steps; the
/// exponential is evaluated per lane (std::simd has no vector exp), same
/// as the scalar path, so both produce identical results.
#[cfg(feature = "simd")]
pub fn gaussian_rows_f32_simd(
    params: GaussianParams<'_, f32>,
    accumulators: &[f32],
    width: usize,
    output: &mut [f32],
) -> ForgeResult<()> {
    use crate::numeric::fast_exp::fast_exp;
    use std::simd::f32x8;

    const LANES: usize = 8;

    check_shape(&params, accumulators.len(), output.len(), width)?;

    let rows = accumulators.len() / width;
    trace!(rows, width, "gaussian epilogue over block (simd)");

    let epilogue = GaussianEpilogue::<f32, 1>::new(params);
    let neg_half = f32x8::splat(-0.5);

    for (out_row, acc_row) in output.chunks_mut(width).zip(accumulators.chunks(width)) {
        let mut lane = 0;

        while lane + LANES <= width {
            let x = f32x8::from_slice(&acc_row[lane..lane + LANES]);
            let amp = f32x8::from_slice(&params.amplitude[lane..lane + LANES]);
            let mean = f32x8::from_slice(&params.mean[lane..lane + LANES]);
            let sigma = f32x8::from_slice(&params.std_dev[lane..lane + LANES]);

            let diff = (mean - x) / sigma;
            let exponent = neg_half * diff * diff;
            let value = amp * f32x8::from_array(exponent.to_array().map(fast_exp));

            out_row[lane..lane + LANES].copy_from_slice(&value.to_array());
            lane += LANES;
        }

        // Remaining columns
        while lane < width {
            out_row[lane] = epilogue.apply_scalar(acc_row[lane], lane);
            lane += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epilogue::params::GaussianParamsBuffer;
    use half::f16;

    fn table(width: usize) -> GaussianParamsBuffer<f32> {
        let amplitude: Vec<f32> = (0..width).map(|i| 1.0 + i as f32 * 0.125).collect();
        let mean: Vec<f32> = (0..width).map(|i| (i as f32 - width as f32 / 2.0) * 0.1).collect();
        let std_dev: Vec<f32> = (0..width).map(|i| 0.5 + i as f32 * 0.0625).collect();
        GaussianParamsBuffer::new(amplitude, mean, std_dev).unwrap()
    }

    #[test]
    fn test_rejects_zero_width() {
        let buffer = table(4);
        let mut out = vec![0.0f32; 4];
        let err = gaussian_rows(buffer.params(), &[0.0f32; 4], 0, &mut out).unwrap_err();
        assert!(matches!(err, EpiForgeError::InvalidRowWidth(0)));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let buffer = table(4);
        let mut out = vec![0.0f32; 8];
        let err = gaussian_rows(buffer.params(), &[0.0f32; 4], 4, &mut out).unwrap_err();
        assert!(matches!(err, EpiForgeError::ShapeMismatch(_)));
    }

    #[test]
    fn test_rejects_ragged_block() {
        let buffer = table(4);
        let mut out = vec![0.0f32; 6];
        let err = gaussian_rows(buffer.params(), &[0.0f32; 6], 4, &mut out).unwrap_err();
        assert!(matches!(err, EpiForgeError::ShapeMismatch(_)));
    }

    #[test]
    fn test_rejects_short_parameter_table() {
        let buffer = table(4);
        let mut out = vec![0.0f32; 8];
        let err = gaussian_rows(buffer.params(), &[0.0f32; 8], 8, &mut out).unwrap_err();
        assert!(matches!(
            err,
            EpiForgeError::ParameterTableTooShort { len: 4, required: 8 }
        ));
    }

    #[test]
    fn test_parallel_matches_scalar_reference() {
        // Enough rows to take the parallel path
        let width = 16;
        let rows = PAR_ROW_THRESHOLD * 2;
        let buffer = table(width);

        let accumulators: Vec<f32> = (0..rows * width)
            .map(|i| (i as f32 * 0.37).sin())
            .collect();

        let mut parallel = vec![0.0f32; rows * width];
        let mut scalar = vec![0.0f32; rows * width];
        gaussian_rows(buffer.params(), &accumulators, width, &mut parallel).unwrap();
        gaussian_rows_scalar(buffer.params(), &accumulators, width, &mut scalar).unwrap();

        assert_eq!(parallel, scalar);
    }

    #[test]
    fn test_mixed_precision_output() {
        let buffer = table(8);
        let accumulators: Vec<f32> = (0..8).map(|i| i as f32 * 0.2 - 0.8).collect();
        let mut out = vec![f16::ZERO; 8];
        gaussian_rows(buffer.params(), &accumulators, 8, &mut out).unwrap();

        let mut reference = vec![0.0f32; 8];
        gaussian_rows_scalar(buffer.params(), &accumulators, 8, &mut reference).unwrap();

        for lane in 0..8 {
            let expected = reference[lane];
            let got = out[lane].to_f64() as f32;
            assert!(
                (got - expected).abs() <= expected.abs() * 2e-3 + 1e-4,
                "lane {}: {} vs {}",
                lane,
                got,
                expected
            );
        }
    }

    #[cfg(feature = "simd")]
    #[test]
    fn test_simd_matches_scalar_reference() {
        // Width not a multiple of the vector width, to cover the remainder
        let width = 19;
        let rows = 8;
        let buffer = table(width);

        let accumulators: Vec<f32> = (0..rows * width)
            .map(|i| (i as f32 * 0.17).cos() * 2.0)
            .collect();

        let mut simd = vec![0.0f32; rows * width];
        let mut scalar = vec![0.0f32; rows * width];
        gaussian_rows_f32_simd(buffer.params(), &accumulators, width, &mut simd).unwrap();
        gaussian_rows_scalar(buffer.params(), &accumulators, width, &mut scalar).unwrap();

        assert_eq!(simd, scalar);
    }
}
