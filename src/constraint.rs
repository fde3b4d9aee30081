//! Structural edge constraint between two neighbouring cloth vertices.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// A rest-shape constraint between vertices `a` and `b`.
///
/// Unlike a scalar distance constraint this one preserves the full rest
/// offset `rest[a] - rest[b]`, so it resists shear and rotation of the
/// edge as well as stretch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeConstraint {
    pub a: usize,
    pub b: usize,
}

impl EdgeConstraint {
    pub fn new(a: usize, b: usize) -> Self {
        EdgeConstraint { a, b }
    }

    /// Half the offset error between rest and current shape, scaled by
    /// `stiffness`. Added to `a` and subtracted from `b`.
    pub fn correction<F: Float>(
        &self,
        rest: &[Vec3<F>],
        particles: &[Particle<F>],
        stiffness: F,
    ) -> Vec3<F> {
        let rest_delta = rest[self.a] - rest[self.b];
        let cur_delta = particles[self.a].pos - particles[self.b].pos;
        (rest_delta - cur_delta).scale(F::half()).scale(stiffness)
    }

    /// Move both endpoints toward the rest offset. Pinned endpoints stay put.
    pub fn solve<F: Float>(&self, rest: &[Vec3<F>], particles: &mut [Particle<F>], stiffness: F) {
        let correction = self.correction(rest, particles, stiffness);
        if !particles[self.a].pinned {
            particles[self.a].pos += correction;
        }
        if !particles[self.b].pinned {
            particles[self.b].pos -= correction;
        }
    }

    /// Absolute difference between the current and rest edge lengths.
    pub fn stretch<F: Float>(&self, rest: &[Vec3<F>], particles: &[Particle<F>]) -> F {
        let rest_len = rest[self.a].distance(rest[self.b]);
        let cur_len = particles[self.a].pos.distance(particles[self.b].pos);
        (cur_len - rest_len).abs()
    }
}
