//! Cloth vertices: Verlet particles with implicit velocity and an explicit
//! velocity accumulator.

use crate::attractor::Attractor;
use crate::float::Float;
use crate::vec::Vec3;

/// One simulated vertex of the cloth.
///
/// Velocity is carried implicitly by `pos - prev_pos`. `velocity` is a
/// separate accumulator fed by the direct-manipulation API; it is added into
/// the next integration step and then cleared.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float = f64> {
    pub pos: Vec3<F>,
    pub prev_pos: Vec3<F>,
    pub velocity: Vec3<F>,
    pub pinned: bool,
}

impl<F: Float> Particle<F> {
    /// A particle at rest at `pos`.
    pub fn new(pos: Vec3<F>) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            velocity: Vec3::zero(),
            pinned: false,
        }
    }

    /// Advance one Verlet step.
    ///
    /// Attractors are sampled at the pre-step position. Pinned particles are
    /// left untouched, including their velocity accumulator.
    pub fn integrate(
        &mut self,
        dt: F,
        damping: F,
        global_velocity: Vec3<F>,
        attractors: &[Attractor<F>],
    ) {
        if self.pinned {
            return;
        }
        let inertia = (self.pos - self.prev_pos).scale(damping);
        let external = (self.velocity + global_velocity).scale(dt * dt);
        let mut pull = Vec3::zero();
        for a in attractors {
            pull += a.sample(self.pos);
        }

        let next = self.pos + inertia + external;
        self.prev_pos = self.pos;
        self.pos = next + pull;
        self.velocity = Vec3::zero();
    }
}
