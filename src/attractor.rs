//! Radial attractors: transient per-step force fields with a power-law falloff.

use crate::error::ClothError;
use crate::float::Float;
use crate::vec::Vec3;

/// A spherical force field applied to the cloth for a single step.
///
/// Inside `radius` the displacement follows `(l^power - l) * strength * radius`
/// with `l = distance / radius`, directed along the line from `center` to the
/// sampled point. The displacement vanishes at the center and at the rim, so
/// the sign and shape of the bump in between is governed by `power`:
/// `power > 1` pulls toward the center for positive `strength`, `power < 1`
/// pushes away, and `power == 1` is inert.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Attractor<F: Float = f64> {
    center: Vec3<F>,
    strength: F,
    power: F,
    radius: F,
}

impl<F: Float> Attractor<F> {
    /// Create an attractor, validating the falloff parameters.
    pub fn new(center: Vec3<F>, strength: F, power: F, radius: F) -> Result<Self, ClothError> {
        if !(radius > F::zero()) || !radius.is_finite() {
            return Err(ClothError::InvalidAttractorRadius);
        }
        if !(power >= F::zero()) {
            return Err(ClothError::InvalidAttractorPower);
        }
        Ok(Attractor { center, strength, power, radius })
    }

    /// Create an attractor with power 1 and radius 0.1.
    pub fn with_defaults(center: Vec3<F>, strength: F) -> Self {
        Attractor {
            center,
            strength,
            power: F::one(),
            radius: F::from_f64(0.1),
        }
    }

    /// Displacement this attractor applies to a vertex at `point`.
    pub fn sample(&self, point: Vec3<F>) -> Vec3<F> {
        let diff = point - self.center;
        let dist = diff.length();
        if dist == F::zero() {
            return Vec3::zero();
        }

        let l = (dist / self.radius).min(F::one());
        let l = (l.powf(self.power) - l) * self.strength * self.radius;
        diff.normalize().scale(l)
    }

    pub fn center(&self) -> Vec3<F> { self.center }
    pub fn strength(&self) -> F { self.strength }
    pub fn power(&self) -> F { self.power }
    pub fn radius(&self) -> F { self.radius }
}
