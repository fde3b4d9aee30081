//! Floating-point abstraction trait for generic numeric operations.

use core::cmp::PartialOrd;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Trait abstracting the floating-point operations the cloth kernel needs.
///
/// Implemented for `f32` and `f64`. The `Send + Sync` bounds let grid state
/// be split across worker threads during integration.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + Send
    + Sync
    + core::fmt::Debug
{
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Half (0.5).
    fn half() -> Self;
    /// Machine epsilon.
    fn epsilon() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Raise to a floating-point power.
    fn powf(self, n: Self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Floor.
    fn floor(self) -> Self;
    /// Minimum of two values.
    fn min(self, other: Self) -> Self;
    /// Maximum of two values.
    fn max(self, other: Self) -> Self;
    /// Convert from f64 (for constants and configuration).
    fn from_f64(v: f64) -> Self;
    /// Convert a grid count or coordinate.
    fn from_usize(v: usize) -> Self;
    /// Truncate toward zero into an index. Negative and NaN map to 0.
    fn to_usize(self) -> usize;
    /// False for NaN and the infinities.
    fn is_finite(self) -> bool;

    /// Clamp self to [min, max].
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Linear interpolation: self + (other - self) * t
    fn lerp(self, other: Self, t: Self) -> Self {
        self + (other - self) * t
    }

    /// Check if approximately zero within epsilon.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn epsilon() -> Self { f32::EPSILON }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn powf(self, n: Self) -> Self { libm::powf(self, n) }
    fn abs(self) -> Self { libm::fabsf(self) }
    fn floor(self) -> Self { libm::floorf(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f64(v: f64) -> Self { v as f32 }
    fn from_usize(v: usize) -> Self { v as f32 }
    fn to_usize(self) -> usize { self as usize }
    fn is_finite(self) -> bool { f32::is_finite(self) }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn epsilon() -> Self { f64::EPSILON }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn powf(self, n: Self) -> Self { libm::pow(self, n) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn floor(self) -> Self { libm::floor(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f64(v: f64) -> Self { v }
    fn from_usize(v: usize) -> Self { v as f64 }
    fn to_usize(self) -> usize { self as usize }
    fn is_finite(self) -> bool { f64::is_finite(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_usize_truncates_and_saturates_negative() {
        assert_eq!(2.9f64.to_usize(), 2);
        assert_eq!((-1.5f64).to_usize(), 0);
        assert_eq!(f64::NAN.to_usize(), 0);
    }

    #[test]
    fn powf_of_one_is_exact() {
        for p in [0.0f64, 0.5, 1.0, 2.0, 7.25] {
            assert_eq!(Float::powf(1.0f64, p), 1.0);
        }
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(Float::clamp(0.7f64, 0.0, 0.5), 0.5);
        assert_eq!(Float::clamp(-0.2f64, 0.0, 0.5), 0.0);
    }
}
