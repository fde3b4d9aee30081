//! Error types for cloth construction.

use core::fmt;

/// Errors raised when a grid or attractor is built from invalid parameters.
///
/// Runtime operations never fail: out-of-range vertex indices are clamped
/// and degenerate samples resolve to zero vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Grid dimensions must be at least 2x2.
    InvalidGridDimensions { resolution_x: usize, resolution_y: usize },
    /// Attractor radius must be positive and finite.
    InvalidAttractorRadius,
    /// Attractor power must be non-negative.
    InvalidAttractorPower,
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidGridDimensions { resolution_x, resolution_y } => {
                write!(f, "grid must be at least 2x2 (got {}x{})", resolution_x, resolution_y)
            }
            ClothError::InvalidAttractorRadius => {
                write!(f, "attractor radius must be positive and finite")
            }
            ClothError::InvalidAttractorPower => write!(f, "attractor power must be non-negative"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClothError {}
