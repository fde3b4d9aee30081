//! Configuration types for stepping and tuning a cloth grid.

use crate::float::Float;
use crate::vec::Vec3;

/// Per-step parameters for [`ClothGrid::step`](crate::grid::ClothGrid::step).
///
/// # Builder Pattern
/// ```
/// use verlet_cloth::config::StepConfig;
///
/// let config: StepConfig = StepConfig::new()
///     .with_delta_time(1.0 / 120.0)
///     .with_iterations(4)
///     .with_parallelism(3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepConfig<F: Float = f64> {
    /// Time step in seconds. Default: 1/60.
    pub delta_time: F,
    /// Constraint relaxation passes after integration. 0 disables
    /// relaxation but integration still happens. Default: 2.
    pub iterations: usize,
    /// Requested number of row bands integrated concurrently. Values below
    /// 2 integrate on the calling thread. Default: 1.
    pub parallelism: usize,
}

impl<F: Float> StepConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        StepConfig {
            delta_time: F::one() / F::from_f64(60.0),
            iterations: 2,
            parallelism: 1,
        }
    }

    pub fn with_delta_time(mut self, delta_time: F) -> Self {
        self.delta_time = delta_time;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }
}

impl<F: Float> Default for StepConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Global tunables applied to a whole grid at once.
///
/// `friction` is the user-facing control in [0, 1]: 0 keeps all inertia,
/// 1 removes it. The grid stores it alongside the derived damping
/// multiplier `1 - friction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalForce<F: Float = f64> {
    /// Velocity added to every unpinned vertex each step. Default: zero.
    pub force: Vec3<F>,
    /// Friction control, clamped to [0, 1]. Default: 0.5.
    pub friction: F,
    /// Constraint stiffness, clamped to [0, 0.5]. Default: 0.5.
    pub stiffness: F,
}

impl<F: Float> GlobalForce<F> {
    pub fn new() -> Self {
        GlobalForce {
            force: Vec3::zero(),
            friction: F::half(),
            stiffness: F::half(),
        }
    }

    pub fn with_force(mut self, force: Vec3<F>) -> Self {
        self.force = force;
        self
    }

    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }
}

impl<F: Float> Default for GlobalForce<F> {
    fn default() -> Self {
        Self::new()
    }
}
