//! Fast approximate exponential
//!
//! GPU epilogues evaluate their transfer functions with a hardware
//! fast-exp instruction. On the CPU this module substitutes a range-reduced
//! polynomial with a comparable cost profile.
//!
//! # Accuracy contract
//!
//! `fast_exp` uses Cody-Waite argument reduction (`x = k*ln2 + r`,
//! `|r| <= ln2/2`) followed by a degree-5 polynomial for `e^r` and an
//! exponent-bit reconstruction of `2^k`. Relative error is bounded by
//! 2^-17 across the finite range, well inside the tolerance of half- and
//! single-precision outputs.
//!
//! Saturation behavior:
//! - inputs above [`EXP_OVERFLOW`] return `+inf`
//! - inputs below [`EXP_UNDERFLOW`] flush to `+0.0` (no denormal tail)
//! - NaN propagates unchanged

/// Arguments above this saturate to positive infinity.
pub const EXP_OVERFLOW: f32 = 88.0;

/// Arguments below this flush to zero.
pub const EXP_UNDERFLOW: f32 = -87.0;

const LOG2_E: f32 = std::f32::consts::LOG2_E;

// ln(2) split into a high part exact in f32 and a low correction term,
// so that x - k*LN2_HI is computed without rounding error.
const LN2_HI: f32 = 0.693_145_75;
const LN2_LO: f32 = 1.428_606_8e-6;

/// Approximate `e^x` in single precision.
///
/// See the module documentation for the accuracy and saturation contract.
#[inline]
pub fn fast_exp(x: f32) -> f32 {
    if x.is_nan() {
        return x;
    }
    if x > EXP_OVERFLOW {
        return f32::INFINITY;
    }
    if x < EXP_UNDERFLOW {
        return 0.0;
    }

    // x = k*ln2 + r with |r| <= ln2/2
    let k = (x * LOG2_E).round();
    let r = (x - k * LN2_HI) - k * LN2_LO;

    // e^r = 1 + r + r^2/2 + r^3/6 + r^4/24 + r^5/120
    let p = 1.0
        + r * (1.0 + r * (0.5 + r * (1.0 / 6.0 + r * (1.0 / 24.0 + r * (1.0 / 120.0)))));

    // 2^k via direct exponent construction; k is within [-126, 127] after
    // the saturation checks above.
    let scale = f32::from_bits(((127 + k as i32) as u32) << 23);
    p * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_error(approx: f32, exact: f64) -> f64 {
        ((approx as f64 - exact) / exact).abs()
    }

    #[test]
    fn test_fast_exp_zero_is_exact() {
        assert_eq!(fast_exp(0.0), 1.0);
    }

    #[test]
    fn test_fast_exp_accuracy_across_range() {
        // Sweep the usable range; bound is 2^-17, test against 1e-5 slack
        let mut x = -86.0f32;
        while x <= 86.0 {
            let exact = (x as f64).exp();
            let approx = fast_exp(x);
            assert!(
                rel_error(approx, exact) < 1e-5,
                "x={}: fast_exp={} exact={}",
                x,
                approx,
                exact
            );
            x += 0.37;
        }
    }

    #[test]
    fn test_fast_exp_small_arguments() {
        for &x in &[-2.0f32, -0.5, -0.125, 0.125, 0.5, 2.0] {
            let exact = (x as f64).exp();
            assert!(rel_error(fast_exp(x), exact) < 1e-6, "x={}", x);
        }
    }

    #[test]
    fn test_fast_exp_overflow_saturates() {
        assert_eq!(fast_exp(89.0), f32::INFINITY);
        assert_eq!(fast_exp(1000.0), f32::INFINITY);
        assert_eq!(fast_exp(f32::INFINITY), f32::INFINITY);
    }

    #[test]
    fn test_fast_exp_underflow_flushes() {
        assert_eq!(fast_exp(-88.0), 0.0);
        assert_eq!(fast_exp(-1000.0), 0.0);
        assert_eq!(fast_exp(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_fast_exp_nan_propagates() {
        assert!(fast_exp(f32::NAN).is_nan());
    }

    #[test]
    fn test_fast_exp_monotone_on_grid() {
        // Not a proof of monotonicity, but catches reduction seams
        let mut prev = fast_exp(-20.0);
        let mut x = -20.0f32 + 0.01;
        while x <= 20.0 {
            let cur = fast_exp(x);
            assert!(cur >= prev, "non-monotone at x={}: {} < {}", x, cur, prev);
            prev = cur;
            x += 0.01;
        }
    }
}
