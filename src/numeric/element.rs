//! Scalar element formats
//!
//! The numeric formats an epilogue moves data between: `f32`, `f64`, and the
//! two 16-bit `half` formats. [`Element`] covers pure storage (what can be
//! read from an accumulator or written to an output); [`ComputeElement`]
//! adds the arithmetic and the approximate exponential needed to evaluate a
//! transfer function in that precision.
//!
//! All conversions bridge through `f64`, which represents every member of
//! the set exactly: widening is lossless and narrowing rounds exactly once.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use half::{bf16, f16};

use crate::numeric::fast_exp::fast_exp;

/// A scalar storage format.
///
/// The set is closed; adding a format means implementing the `f64` bridge
/// (exact widening, nearest-even and toward-zero narrowing) for it.
pub trait Element: Copy + Default + PartialOrd + Debug + Send + Sync + 'static {
    /// Additive identity in this format.
    const ZERO: Self;

    /// Exact widening to the `f64` bridge.
    fn to_f64(self) -> f64;

    /// Narrowing from the bridge with ties-to-even rounding.
    fn from_f64(v: f64) -> Self;

    /// Narrowing from the bridge with toward-zero rounding.
    ///
    /// A finite value whose magnitude exceeds the format's range clamps to
    /// the largest finite value of matching sign; infinities and NaN pass
    /// through.
    fn from_f64_rz(v: f64) -> Self;

    fn is_nan(self) -> bool;

    fn is_finite(self) -> bool;
}

impl Element for f32 {
    const ZERO: Self = 0.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn from_f64_rz(v: f64) -> Self {
        let nearest = v as f32;
        if nearest.is_infinite() && v.is_finite() {
            // Overflowed past the largest finite f32
            return if v < 0.0 { f32::MIN } else { f32::MAX };
        }
        if nearest != 0.0 && nearest.is_finite() && (nearest as f64).abs() > v.abs() {
            // Nearest rounded away from zero; step one ulp back
            f32::from_bits(nearest.to_bits() - 1)
        } else {
            nearest
        }
    }

    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl Element for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn from_f64_rz(v: f64) -> Self {
        v
    }

    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl Element for f16 {
    const ZERO: Self = f16::ZERO;

    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        f16::from_f64(v)
    }

    #[inline]
    fn from_f64_rz(v: f64) -> Self {
        let nearest = f16::from_f64(v);
        if nearest.is_infinite() && v.is_finite() {
            return if v < 0.0 { -f16::MAX } else { f16::MAX };
        }
        if nearest != f16::ZERO
            && nearest.is_finite()
            && nearest.to_f64().abs() > v.abs()
        {
            f16::from_bits(nearest.to_bits() - 1)
        } else {
            nearest
        }
    }

    #[inline]
    fn is_nan(self) -> bool {
        f16::is_nan(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f16::is_finite(self)
    }
}

impl Element for bf16 {
    const ZERO: Self = bf16::ZERO;

    #[inline]
    fn to_f64(self) -> f64 {
        bf16::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        bf16::from_f64(v)
    }

    #[inline]
    fn from_f64_rz(v: f64) -> Self {
        let nearest = bf16::from_f64(v);
        if nearest.is_infinite() && v.is_finite() {
            return if v < 0.0 { -bf16::MAX } else { bf16::MAX };
        }
        if nearest != bf16::ZERO
            && nearest.is_finite()
            && nearest.to_f64().abs() > v.abs()
        {
            bf16::from_bits(nearest.to_bits() - 1)
        } else {
            nearest
        }
    }

    #[inline]
    fn is_nan(self) -> bool {
        bf16::is_nan(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        bf16::is_finite(self)
    }
}

/// A format a transfer function can be evaluated in.
///
/// Division follows the IEEE semantics of the format (the 16-bit formats
/// evaluate through `f32`, as their operator impls do): dividing by zero
/// produces an infinity or NaN that flows through the rest of the
/// computation untouched.
pub trait ComputeElement:
    Element
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Approximate exponential with the contract of
    /// [`fast_exp`](crate::numeric::fast_exp::fast_exp). Formats narrower
    /// than `f32` evaluate in `f32` and round once on the way out.
    fn exp_approx(self) -> Self;
}

impl ComputeElement for f32 {
    #[inline]
    fn exp_approx(self) -> Self {
        fast_exp(self)
    }
}

impl ComputeElement for f64 {
    /// Uses the standard library `exp`: in double precision there is no
    /// fast path worth its accuracy cost, so this is strictly more accurate
    /// than the documented bound requires.
    #[inline]
    fn exp_approx(self) -> Self {
        self.exp()
    }
}

impl ComputeElement for f16 {
    #[inline]
    fn exp_approx(self) -> Self {
        f16::from_f32(fast_exp(self.to_f32()))
    }
}

impl ComputeElement for bf16 {
    #[inline]
    fn exp_approx(self) -> Self {
        bf16::from_f32(fast_exp(self.to_f32()))
    }
}
