//! Iterative constraint relaxation over the cloth's structural edges.

use crate::constraint::EdgeConstraint;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::vec::Vec3;

/// Gauss-Seidel relaxation of a `resolution_x` x `resolution_y` grid.
///
/// Edges are visited row-major; at each vertex the edge to its north
/// neighbour comes first, then the edge to its west neighbour. Corrections
/// are applied in place, so later edges in the same pass already see the
/// earlier ones. Results therefore depend on traversal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstraintSolver {
    resolution_x: usize,
    resolution_y: usize,
}

impl ConstraintSolver {
    pub fn new(resolution_x: usize, resolution_y: usize) -> Self {
        ConstraintSolver { resolution_x, resolution_y }
    }

    /// Structural edges in traversal order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeConstraint> + '_ {
        let rx = self.resolution_x;
        (0..self.resolution_y).flat_map(move |y| {
            (0..rx).flat_map(move |x| {
                let here = y * rx + x;
                let north = (y > 0).then(|| EdgeConstraint::new(here - rx, here));
                let west = (x > 0).then(|| EdgeConstraint::new(here - 1, here));
                north.into_iter().chain(west)
            })
        })
    }

    pub fn edge_count(&self) -> usize {
        let (rx, ry) = (self.resolution_x, self.resolution_y);
        (rx - 1) * ry + rx * (ry - 1)
    }

    /// One relaxation pass over every edge.
    pub fn relax<F: Float>(&self, rest: &[Vec3<F>], particles: &mut [Particle<F>], stiffness: F) {
        for edge in self.edges() {
            edge.solve(rest, particles, stiffness);
        }
    }

    /// `iterations` sequential relaxation passes.
    pub fn solve<F: Float, O: StepObserver>(
        &self,
        rest: &[Vec3<F>],
        particles: &mut [Particle<F>],
        stiffness: F,
        iterations: usize,
        observer: &mut O,
    ) {
        for i in 0..iterations {
            self.relax(rest, particles, stiffness);
            observer.on_constraint_iteration(i);
        }
    }

    /// Largest absolute edge-length error across the grid.
    pub fn max_stretch<F: Float>(&self, rest: &[Vec3<F>], particles: &[Particle<F>]) -> F {
        self.edges()
            .map(|e| e.stretch(rest, particles))
            .fold(F::zero(), |acc, s| acc.max(s))
    }
}
