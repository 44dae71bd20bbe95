//! Gaussian epilogue transform
//!
//! Maps raw accumulator values to stored outputs through a per-lane
//! Gaussian transfer function:
//!
//! ```text
//! D[i] = p1[i] * exp(-0.5 * ((p2[i] - x[i]) / p3[i])^2)
//! ```
//!
//! where `x` is the accumulator converted to the compute format, `p1/p2/p3`
//! are the amplitude/mean/std-dev columns of the parameter table, and the
//! result is converted to the output format. The exponential is the
//! approximate one of [`crate::numeric::fast_exp`].

use std::marker::PhantomData;

use crate::epilogue::fragment::Fragment;
use crate::epilogue::params::GaussianParams;
use crate::numeric::convert::{NumericConverter, RoundNearest, RoundingMode};
use crate::numeric::element::{ComputeElement, Element};

/// Elementwise Gaussian transform over accumulator fragments.
///
/// One instantiation is generated per combination of output format `O`,
/// fragment width `N`, accumulator format `A`, compute format `C`, rounding
/// policy `R` and source format `S`; everything resolves at compile time
/// with no per-element dispatch. The accumulator and source formats default
/// to the output format, matching the common homogeneous case.
///
/// The functor borrows its parameter columns for the whole launch, is
/// immutable after construction, and keeps no state between calls: every
/// invocation is an independent, idempotent map. Lane `i` of a fragment
/// (and the `lane` argument of the scalar forms) indexes the parameter
/// columns directly, so the columns must cover every lane index used —
/// a shorter column panics at the lookup.
///
/// There is no error channel. A zero `p3[i]` makes the division produce an
/// infinity or NaN in the compute format, which flows through the
/// exponential and the output conversion as an ordinary value; consumers
/// must treat non-finite outputs as valid, numerically degenerate results.
#[derive(Clone, Copy, Debug)]
pub struct GaussianEpilogue<'a, O, const N: usize, A = O, C = O, R = RoundNearest, S = O> {
    amplitude: &'a [C],
    mean: &'a [C],
    std_dev: &'a [C],
    _types: PhantomData<fn(A, S, R) -> O>,
}

impl<'a, O, const N: usize, A, C, R, S> GaussianEpilogue<'a, O, N, A, C, R, S>
where
    O: Element,
    A: Element,
    C: ComputeElement,
    R: RoundingMode,
    S: Element,
{
    /// Construct the functor from a borrowed parameter table.
    pub fn new(params: GaussianParams<'a, C>) -> Self {
        Self {
            amplitude: params.amplitude,
            mean: params.mean,
            std_dev: params.std_dev,
            _types: PhantomData,
        }
    }

    /// Whether the optional source (bias/residual) fragment is read.
    ///
    /// Always `false`: a Gaussian transfer has no additive source term.
    /// The source arguments below are accepted purely for interface-shape
    /// compatibility and silently discarded.
    pub fn is_source_needed(&self) -> bool {
        false
    }

    /// Split-K reduction hook.
    ///
    /// A pure elementwise map carries no partial-accumulation state to
    /// merge across reduction partitions, so this is a no-op and never
    /// affects subsequent calls.
    pub fn set_partition(&self, _k_partition: usize, _k_partition_count: usize) {}

    /// The transfer function in compute precision for one lane.
    #[inline]
    fn transform(&self, x: C, lane: usize) -> C {
        let diff = (self.mean[lane] - x) / self.std_dev[lane];
        let exponent = C::from_f64(-0.5) * diff * diff;
        self.amplitude[lane] * exponent.exp_approx()
    }

    /// Transform one accumulator fragment; lane `i` uses parameter index
    /// `i`.
    pub fn apply(&self, accumulator: &Fragment<A, N>) -> Fragment<O, N> {
        let accumulator_converter = NumericConverter::<A, C, R>::new();
        let output_converter = NumericConverter::<C, O, R>::new();

        Fragment::from_fn(|lane| {
            let x = accumulator_converter.convert(accumulator[lane]);
            output_converter.convert(self.transform(x, lane))
        })
    }

    /// Transform one accumulator fragment, discarding the source fragment.
    ///
    /// Identical to [`apply`](Self::apply); see
    /// [`is_source_needed`](Self::is_source_needed).
    pub fn apply_with_source(
        &self,
        accumulator: &Fragment<A, N>,
        _source: &Fragment<S, N>,
    ) -> Fragment<O, N> {
        self.apply(accumulator)
    }

    /// Transform a single accumulator value using the parameters at `lane`.
    pub fn apply_scalar(&self, accumulator: A, lane: usize) -> O {
        let x = NumericConverter::<A, C, R>::new().convert(accumulator);
        NumericConverter::<C, O, R>::new().convert(self.transform(x, lane))
    }

    /// Scalar form with a discarded source value.
    pub fn apply_scalar_with_source(&self, accumulator: A, _source: S, lane: usize) -> O {
        self.apply_scalar(accumulator, lane)
    }
}
