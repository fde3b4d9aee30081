//! Cloth grid: a fixed-topology sheet of Verlet particles spanned by four
//! corner anchors.

use crate::attractor::Attractor;
use crate::config::{GlobalForce, StepConfig};
use crate::error::ClothError;
use crate::float::Float;
use crate::integrator::{self, StepForces};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::Particle;
use crate::sampler::{self, Lookup};
use crate::solver::ConstraintSolver;
use crate::vec::Vec3;
use alloc::vec::Vec;

/// The four corners of the undeformed sheet.
///
/// Row 0 runs from `upper_left` to `upper_right`; the last row from
/// `lower_left` to `lower_right`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corners<F: Float = f64> {
    pub upper_left: Vec3<F>,
    pub upper_right: Vec3<F>,
    pub lower_left: Vec3<F>,
    pub lower_right: Vec3<F>,
}

impl<F: Float> Corners<F> {
    pub fn new(
        upper_left: Vec3<F>,
        upper_right: Vec3<F>,
        lower_left: Vec3<F>,
        lower_right: Vec3<F>,
    ) -> Self {
        Corners { upper_left, upper_right, lower_left, lower_right }
    }

    /// Bilinear point on the plane: `s` runs left to right, `t` top to bottom.
    pub fn interpolate(&self, s: F, t: F) -> Vec3<F> {
        let upper = self.upper_left.lerp(self.upper_right, s);
        let lower = self.lower_left.lerp(self.lower_right, s);
        upper.lerp(lower, t)
    }
}

impl<F: Float> Default for Corners<F> {
    /// A unit square in the XY plane centred on the origin.
    fn default() -> Self {
        let h = F::half();
        let z = F::zero();
        Corners {
            upper_left: Vec3::new(-h, h, z),
            upper_right: Vec3::new(h, h, z),
            lower_left: Vec3::new(-h, -h, z),
            lower_right: Vec3::new(h, -h, z),
        }
    }
}

/// A simulated cloth sheet.
///
/// Vertices live in one flat row-major buffer (x fastest), addressed
/// externally by a flat index that is clamped into range. Rest positions are
/// fixed at construction; changing resolution or corners means building a
/// new grid.
pub struct ClothGrid<F: Float = f64> {
    resolution_x: usize,
    resolution_y: usize,
    corners: Corners<F>,
    rest: Vec<Vec3<F>>,
    particles: Vec<Particle<F>>,
    solver: ConstraintSolver,
    global_velocity: Vec3<F>,
    friction: F,
    damping: F,
    stiffness: F,
    attractors: Vec<Attractor<F>>,
    is_new: bool,
}

impl<F: Float> ClothGrid<F> {
    /// Build a `resolution_x` x `resolution_y` sheet spanning `corners`.
    ///
    /// Starts at rest: no pins, zero velocity, no damping (friction 0),
    /// stiffness 0.5 and no global velocity.
    pub fn new(
        resolution_x: usize,
        resolution_y: usize,
        corners: Corners<F>,
    ) -> Result<Self, ClothError> {
        if resolution_x < 2 || resolution_y < 2 {
            return Err(ClothError::InvalidGridDimensions { resolution_x, resolution_y });
        }

        let span_x = F::from_usize(resolution_x - 1);
        let span_y = F::from_usize(resolution_y - 1);
        let mut rest = Vec::with_capacity(resolution_x * resolution_y);
        for y in 0..resolution_y {
            for x in 0..resolution_x {
                let s = F::from_usize(x) / span_x;
                let t = F::from_usize(y) / span_y;
                rest.push(corners.interpolate(s, t));
            }
        }
        let particles = rest.iter().map(|&p| Particle::new(p)).collect();

        log::debug!("cloth grid created: {}x{} vertices", resolution_x, resolution_y);

        Ok(ClothGrid {
            resolution_x,
            resolution_y,
            corners,
            rest,
            particles,
            solver: ConstraintSolver::new(resolution_x, resolution_y),
            global_velocity: Vec3::zero(),
            friction: F::zero(),
            damping: F::one(),
            stiffness: F::half(),
            attractors: Vec::new(),
            is_new: true,
        })
    }

    // ------------------------------------------------------------------
    // Topology
    // ------------------------------------------------------------------

    pub fn resolution_x(&self) -> usize { self.resolution_x }
    pub fn resolution_y(&self) -> usize { self.resolution_y }
    pub fn corners(&self) -> &Corners<F> { &self.corners }
    pub fn upper_left(&self) -> Vec3<F> { self.corners.upper_left }
    pub fn upper_right(&self) -> Vec3<F> { self.corners.upper_right }
    pub fn lower_left(&self) -> Vec3<F> { self.corners.lower_left }
    pub fn lower_right(&self) -> Vec3<F> { self.corners.lower_right }
    pub fn vertex_count(&self) -> usize { self.particles.len() }
    pub fn solver(&self) -> &ConstraintSolver { &self.solver }

    /// True until the first step completes.
    pub fn is_new(&self) -> bool { self.is_new }

    /// Flat buffer index of lattice point `(x, y)`.
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.resolution_x + x
    }

    /// Clamp a flat index into range and decode it to `(x, y)`.
    pub fn coordinates(&self, index: usize) -> (usize, usize) {
        let i = self.clamp_index(index);
        (i % self.resolution_x, i / self.resolution_x)
    }

    fn clamp_index(&self, index: usize) -> usize {
        let last = self.particles.len() - 1;
        if index > last {
            log::debug!("vertex index {} clamped to {}", index, last);
            return last;
        }
        index
    }

    fn particle_mut(&mut self, index: usize) -> &mut Particle<F> {
        let i = self.clamp_index(index);
        &mut self.particles[i]
    }

    fn particle(&self, index: usize) -> &Particle<F> {
        &self.particles[self.clamp_index(index)]
    }

    // ------------------------------------------------------------------
    // Per-vertex state
    // ------------------------------------------------------------------

    pub fn position(&self, index: usize) -> Vec3<F> {
        self.particle(index).pos
    }

    pub fn rest_position(&self, index: usize) -> Vec3<F> {
        self.rest[self.clamp_index(index)]
    }

    pub fn previous_position(&self, index: usize) -> Vec3<F> {
        self.particle(index).prev_pos
    }

    /// Pending explicit velocity. Stale for pinned vertices.
    pub fn velocity(&self, index: usize) -> Vec3<F> {
        self.particle(index).velocity
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        self.particle(index).pinned
    }

    /// Current positions in buffer order.
    pub fn positions(&self) -> impl Iterator<Item = Vec3<F>> + '_ {
        self.particles.iter().map(|p| p.pos)
    }

    pub fn rest_positions(&self) -> &[Vec3<F>] {
        &self.rest
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.particles
    }

    // ------------------------------------------------------------------
    // Direct manipulation
    // ------------------------------------------------------------------

    /// Blend the position toward `target`. `blend` outside [0, 1] extrapolates.
    pub fn set_position(&mut self, index: usize, target: Vec3<F>, blend: F) {
        let p = self.particle_mut(index);
        p.pos = p.pos.lerp(target, blend);
    }

    /// Blend the pending velocity toward the one that would reach `target`
    /// in a single step.
    pub fn set_target(&mut self, index: usize, target: Vec3<F>, blend: F) {
        let p = self.particle_mut(index);
        p.velocity = p.velocity.lerp(target - p.pos, blend);
    }

    /// Add to the pending velocity.
    pub fn set_velocity(&mut self, index: usize, velocity: Vec3<F>) {
        self.particle_mut(index).velocity += velocity;
    }

    /// Exclude a vertex from integration and relaxation. It keeps whatever
    /// position it currently holds.
    pub fn set_pin(&mut self, index: usize) {
        self.particle_mut(index).pinned = true;
    }

    pub fn reset_pin(&mut self, index: usize) {
        self.particle_mut(index).pinned = false;
    }

    pub fn reset_all_pins(&mut self) {
        for p in self.particles.iter_mut() {
            p.pinned = false;
        }
    }

    /// Queue an attractor for the next step only.
    pub fn add_attractor(&mut self, attractor: Attractor<F>) {
        self.attractors.push(attractor);
    }

    pub fn pending_attractors(&self) -> &[Attractor<F>] {
        &self.attractors
    }

    // ------------------------------------------------------------------
    // Tunables
    // ------------------------------------------------------------------

    pub fn global_velocity(&self) -> Vec3<F> { self.global_velocity }

    pub fn set_global_velocity(&mut self, velocity: Vec3<F>) {
        self.global_velocity = velocity;
    }

    /// Friction control in [0, 1]. Higher means more damping.
    pub fn friction(&self) -> F { self.friction }

    /// Inertia multiplier derived from friction: `1 - friction`.
    pub fn damping(&self) -> F { self.damping }

    pub fn set_friction(&mut self, friction: F) {
        let clamped = friction.clamp(F::zero(), F::one());
        if clamped != friction {
            log::warn!("friction {:?} clamped to {:?}", friction, clamped);
        }
        self.friction = clamped;
        self.damping = F::one() - clamped;
    }

    pub fn stiffness(&self) -> F { self.stiffness }

    /// Set constraint stiffness, clamped to [0, 0.5].
    pub fn set_stiffness(&mut self, stiffness: F) {
        let clamped = stiffness.clamp(F::zero(), F::half());
        if clamped != stiffness {
            log::warn!("stiffness {:?} clamped to {:?}", stiffness, clamped);
        }
        self.stiffness = clamped;
    }

    pub fn apply_global_force(&mut self, global: &GlobalForce<F>) {
        self.set_global_velocity(global.force);
        self.set_friction(global.friction);
        self.set_stiffness(global.stiffness);
    }

    // ------------------------------------------------------------------
    // Simulation
    // ------------------------------------------------------------------

    /// Advance one step: integrate, drop the pending attractors, relax
    /// constraints `iterations` times.
    pub fn update(&mut self, dt: F, iterations: usize, parallelism: usize) {
        let config = StepConfig::new()
            .with_delta_time(dt)
            .with_iterations(iterations)
            .with_parallelism(parallelism);
        self.step(&config, &mut NoOpStepObserver);
    }

    pub fn step<O: StepObserver>(&mut self, config: &StepConfig<F>, observer: &mut O) {
        let bands = integrator::band_count(config.parallelism, self.resolution_y);
        let forces = StepForces {
            dt: config.delta_time,
            damping: self.damping,
            global_velocity: self.global_velocity,
            attractors: &self.attractors,
        };
        let used = integrator::integrate_bands(&mut self.particles, self.resolution_x, bands, &forces);
        observer.on_integrate(used);

        log::trace!(
            "integrated {} vertices in {} band(s) with {} attractor(s)",
            self.particles.len(),
            used,
            self.attractors.len()
        );
        self.attractors.clear();

        self.solver.solve(
            &self.rest,
            &mut self.particles,
            self.stiffness,
            config.iterations,
            observer,
        );

        self.is_new = false;
        observer.on_step_complete();
    }

    /// Largest edge-length error against the rest shape.
    pub fn max_stretch(&self) -> F {
        self.solver.max_stretch(&self.rest, &self.particles)
    }

    // ------------------------------------------------------------------
    // Sampling
    // ------------------------------------------------------------------

    /// Per-vertex normals from current positions. Recomputed on every call,
    /// O(vertex count).
    pub fn normals(&self) -> Vec<Vec3<F>> {
        sampler::compute_normals(&self.particles, self.resolution_x, self.resolution_y)
    }

    pub fn sample_position(&self, u: F, v: F) -> Vec3<F> {
        Lookup::new(u, v, self.resolution_x, self.resolution_y)
            .blend_with(self.resolution_x, |i| self.particles[i].pos)
    }

    pub fn sample_rest_position(&self, u: F, v: F) -> Vec3<F> {
        sampler::sample(&self.rest, self.resolution_x, self.resolution_y, u, v)
    }

    /// Normal at `(u, v)`. Recomputes every vertex normal; prefer
    /// [`sample_normals`](Self::sample_normals) for batches.
    pub fn sample_normal(&self, u: F, v: F) -> Vec3<F> {
        let normals = self.normals();
        sampler::sample(&normals, self.resolution_x, self.resolution_y, u, v)
    }

    pub fn sample_normals(&self, lookups: &[(F, F)]) -> Vec<Vec3<F>> {
        let normals = self.normals();
        lookups
            .iter()
            .map(|&(u, v)| sampler::sample(&normals, self.resolution_x, self.resolution_y, u, v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rx: usize, ry: usize) -> ClothGrid<f64> {
        ClothGrid::new(rx, ry, Corners::default()).unwrap()
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let err = ClothGrid::<f64>::new(1, 4, Corners::default()).err();
        assert_eq!(
            err,
            Some(ClothError::InvalidGridDimensions { resolution_x: 1, resolution_y: 4 })
        );
        assert!(ClothGrid::<f64>::new(3, 0, Corners::default()).is_err());
    }

    #[test]
    fn vertex_count() {
        assert_eq!(grid(4, 3).vertex_count(), 12);
    }

    #[test]
    fn index_decoding_clamps() {
        let g = grid(4, 3);
        assert_eq!(g.coordinates(0), (0, 0));
        assert_eq!(g.coordinates(5), (1, 1));
        assert_eq!(g.coordinates(11), (3, 2));
        assert_eq!(g.coordinates(1000), (3, 2));
        assert_eq!(g.index(3, 2), 11);
    }

    #[test]
    fn corner_vertices_match_corners() {
        let g = grid(4, 3);
        assert_eq!(g.rest_position(0), g.upper_left());
        assert_eq!(g.rest_position(3), g.upper_right());
        assert_eq!(g.rest_position(8), g.lower_left());
        assert_eq!(g.rest_position(11), g.lower_right());
    }

    #[test]
    fn defaults() {
        let g = grid(2, 2);
        assert!(g.is_new());
        assert_eq!(g.friction(), 0.0);
        assert_eq!(g.damping(), 1.0);
        assert_eq!(g.stiffness(), 0.5);
        assert_eq!(g.global_velocity(), Vec3::zero());
        assert!(g.pending_attractors().is_empty());
    }

    #[test]
    fn friction_inverts_to_damping() {
        let mut g = grid(2, 2);
        g.set_friction(0.25);
        assert_eq!(g.friction(), 0.25);
        assert_eq!(g.damping(), 0.75);
        g.set_friction(3.0);
        assert_eq!(g.friction(), 1.0);
        assert_eq!(g.damping(), 0.0);
    }

    #[test]
    fn stiffness_is_clamped() {
        let mut g = grid(2, 2);
        g.set_stiffness(0.9);
        assert_eq!(g.stiffness(), 0.5);
        g.set_stiffness(-1.0);
        assert_eq!(g.stiffness(), 0.0);
        g.set_stiffness(0.3);
        assert_eq!(g.stiffness(), 0.3);
    }

    #[test]
    fn set_position_blends() {
        let mut g = grid(2, 2);
        let start = g.position(1);
        let target = start + Vec3::new(0.0, 0.0, 2.0);
        g.set_position(1, target, 0.25);
        assert!((g.position(1).z - 0.5).abs() < 1e-12);
        g.set_position(1, target, 1.0);
        assert_eq!(g.position(1), target);
    }

    #[test]
    fn set_target_writes_velocity_not_position() {
        let mut g = grid(2, 2);
        let start = g.position(2);
        g.set_target(2, start + Vec3::new(1.0, 0.0, 0.0), 0.5);
        assert_eq!(g.position(2), start);
        assert!((g.velocity(2).x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn set_velocity_accumulates() {
        let mut g = grid(2, 2);
        g.set_velocity(3, Vec3::new(1.0, 0.0, 0.0));
        g.set_velocity(3, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(g.velocity(3), Vec3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn out_of_range_index_hits_last_vertex() {
        let mut g = grid(3, 3);
        g.set_pin(usize::MAX);
        assert!(g.is_pinned(8));
        assert!(!g.is_pinned(7));
    }

    #[test]
    fn pins_toggle() {
        let mut g = grid(3, 2);
        g.set_pin(0);
        g.set_pin(4);
        assert!(g.is_pinned(0) && g.is_pinned(4));
        g.reset_pin(0);
        assert!(!g.is_pinned(0));
        g.reset_all_pins();
        assert!(g.particles().iter().all(|p| !p.pinned));
    }

    #[test]
    fn apply_global_force_sets_all_tunables() {
        let mut g = grid(2, 2);
        g.apply_global_force(
            &GlobalForce::new()
                .with_force(Vec3::new(0.0, -1.0, 0.0))
                .with_friction(0.1)
                .with_stiffness(0.4),
        );
        assert_eq!(g.global_velocity(), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(g.friction(), 0.1);
        assert!((g.damping() - 0.9).abs() < 1e-15);
        assert_eq!(g.stiffness(), 0.4);
    }

    #[test]
    fn step_clears_attractors_and_freshness() {
        let mut g = grid(3, 3);
        g.add_attractor(Attractor::with_defaults(Vec3::zero(), 1.0));
        g.add_attractor(Attractor::with_defaults(Vec3::zero(), -1.0));
        assert_eq!(g.pending_attractors().len(), 2);
        g.update(1.0 / 60.0, 0, 1);
        assert!(g.pending_attractors().is_empty());
        assert!(!g.is_new());
    }

    #[test]
    fn sample_position_agrees_with_sampler() {
        let mut g = grid(4, 4);
        g.set_position(5, Vec3::new(0.1, 0.2, 0.3), 1.0);
        let positions: Vec<_> = g.positions().collect();
        for &(u, v) in &[(0.1, 0.2), (0.5, 0.5), (0.9, 0.33)] {
            assert_eq!(g.sample_position(u, v), sampler::sample(&positions, 4, 4, u, v));
        }
    }
}
