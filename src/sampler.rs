//! Bilinear lookups over per-vertex grid data and on-demand normals.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec;

/// Largest normalized coordinate used for lookups. Keeps the lower/right
/// neighbour of the selected cell inside the grid.
pub const MAX_LOOKUP: f64 = 0.9999999;

/// Lattice cell and fractional offsets for a normalized lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lookup<F: Float> {
    pub x: usize,
    pub y: usize,
    pub fx: F,
    pub fy: F,
}

impl<F: Float> Lookup<F> {
    /// Map `(u, v)` in [0, 1] onto a `resolution_x` x `resolution_y` lattice.
    ///
    /// Coordinates are clamped to `[0, MAX_LOOKUP]` first. A coordinate that
    /// lands within a few ulps of a lattice line snaps onto it, so
    /// `x / (resolution_x - 1)` addresses column `x` exactly.
    pub fn new(u: F, v: F, resolution_x: usize, resolution_y: usize) -> Self {
        let max = F::from_f64(MAX_LOOKUP);
        let gx = lattice_coord(u, resolution_x - 1, max);
        let gy = lattice_coord(v, resolution_y - 1, max);
        let x = gx.floor().to_usize().min(resolution_x - 2);
        let y = gy.floor().to_usize().min(resolution_y - 2);
        Lookup {
            x,
            y,
            fx: gx - F::from_usize(x),
            fy: gy - F::from_usize(y),
        }
    }

    /// Blend the four lattice values around this lookup.
    pub fn blend(&self, values: &[Vec3<F>], resolution_x: usize) -> Vec3<F> {
        self.blend_with(resolution_x, |i| values[i])
    }

    /// Blend using `value_at(flat_index)` as the lattice accessor.
    pub fn blend_with(&self, resolution_x: usize, value_at: impl Fn(usize) -> Vec3<F>) -> Vec3<F> {
        let i = self.y * resolution_x + self.x;
        let upper = value_at(i).lerp(value_at(i + 1), self.fx);
        let lower = value_at(i + resolution_x).lerp(value_at(i + resolution_x + 1), self.fx);
        upper.lerp(lower, self.fy)
    }
}

fn lattice_coord<F: Float>(c: F, span: usize, max: F) -> F {
    let g = clamp_coord(c, max) * F::from_usize(span);
    let nearest = (g + F::half()).floor();
    let tolerance = F::epsilon() * F::from_usize(4) * nearest.max(F::one());
    if (g - nearest).abs() <= tolerance { nearest } else { g }
}

fn clamp_coord<F: Float>(c: F, max: F) -> F {
    // NaN falls through to 0
    if c > F::zero() { c.min(max) } else { F::zero() }
}

/// Bilinearly sample `values` (row-major, x fastest) at `(u, v)`.
pub fn sample<F: Float>(
    values: &[Vec3<F>],
    resolution_x: usize,
    resolution_y: usize,
    u: F,
    v: F,
) -> Vec3<F> {
    Lookup::new(u, v, resolution_x, resolution_y).blend(values, resolution_x)
}

/// Per-vertex normals from current positions.
///
/// Each vertex averages the neighbour differences that exist:
/// `west - self`, `self - east`, `north - self` and `self - south`. The
/// result is not normalized. Computed from scratch on every call.
pub fn compute_normals<F: Float>(
    particles: &[Particle<F>],
    resolution_x: usize,
    resolution_y: usize,
) -> Vec<Vec3<F>> {
    let pos = |x: usize, y: usize| particles[y * resolution_x + x].pos;
    let mut normals = Vec::with_capacity(particles.len());

    for y in 0..resolution_y {
        for x in 0..resolution_x {
            let here = pos(x, y);
            let mut n = Vec3::zero();
            let mut count = 0usize;

            if x > 0 {
                n += pos(x - 1, y) - here;
                count += 1;
            }
            if x + 1 < resolution_x {
                n += here - pos(x + 1, y);
                count += 1;
            }
            if y > 0 {
                n += pos(x, y - 1) - here;
                count += 1;
            }
            if y + 1 < resolution_y {
                n += here - pos(x, y + 1);
                count += 1;
            }
            normals.push(n.scale(F::one() / F::from_usize(count)));
        }
    }
    normals
}
