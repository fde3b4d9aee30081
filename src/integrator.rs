//! Verlet integration over the whole grid, optionally split into row bands.
//!
//! Each vertex reads only its own pre-step state and the shared attractor
//! list, so contiguous row bands can be integrated concurrently without
//! synchronization. The only barrier is the join at the end of the pass.

use crate::attractor::Attractor;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Everything an integration pass needs besides the particles themselves.
#[derive(Clone, Copy, Debug)]
pub struct StepForces<'a, F: Float> {
    pub dt: F,
    pub damping: F,
    pub global_velocity: Vec3<F>,
    pub attractors: &'a [Attractor<F>],
}

/// Integrate a contiguous run of particles on the calling thread.
pub fn integrate_band<F: Float>(particles: &mut [Particle<F>], forces: &StepForces<'_, F>) {
    for p in particles.iter_mut() {
        p.integrate(forces.dt, forces.damping, forces.global_velocity, forces.attractors);
    }
}

/// Number of row bands to use for a requested parallelism.
///
/// Mirrors a "leave one core for the caller" policy: at most
/// `available_parallelism - 1` bands, never more than `rows`, and 1 whenever
/// fewer than two bands would result.
pub fn band_count(requested: usize, rows: usize) -> usize {
    if requested < 2 {
        return 1;
    }
    let bands = worker_limit().min(requested).min(rows);
    if bands < 2 {
        log::debug!("requested parallelism {} reduced to a single band", requested);
        1
    } else {
        bands
    }
}

#[cfg(feature = "parallel")]
fn worker_limit() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(1)
}

#[cfg(not(feature = "parallel"))]
fn worker_limit() -> usize {
    1
}

/// Integrate every particle of a `row_len`-wide grid, split into `bands`
/// contiguous row bands. Returns the number of bands actually used.
pub fn integrate_bands<F: Float>(
    particles: &mut [Particle<F>],
    row_len: usize,
    bands: usize,
    forces: &StepForces<'_, F>,
) -> usize {
    let rows = if row_len == 0 { 0 } else { particles.len() / row_len };
    if bands < 2 || rows < 2 {
        integrate_band(particles, forces);
        return 1;
    }

    let rows_per_band = rows.div_ceil(bands);
    let chunk = rows_per_band * row_len;
    let used = rows.div_ceil(rows_per_band);
    run_bands(particles, chunk, forces);
    used
}

#[cfg(feature = "parallel")]
fn run_bands<F: Float>(particles: &mut [Particle<F>], chunk: usize, forces: &StepForces<'_, F>) {
    particles
        .par_chunks_mut(chunk)
        .for_each(|band| integrate_band(band, forces));
}

#[cfg(not(feature = "parallel"))]
fn run_bands<F: Float>(particles: &mut [Particle<F>], chunk: usize, forces: &StepForces<'_, F>) {
    for band in particles.chunks_mut(chunk) {
        integrate_band(band, forces);
    }
}
