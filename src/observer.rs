//! Step observer trait for monitoring cloth simulation progress.

/// Trait for observing cloth simulation steps.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after every vertex has been integrated. `bands` is the number
    /// of row bands the pass was split into (1 when sequential).
    fn on_integrate(&mut self, _bands: usize) {}

    /// Called after each constraint relaxation pass.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
