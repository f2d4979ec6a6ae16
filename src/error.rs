use core::fmt;

/// Failure modes of [find_path](crate::find_path).
///
/// Only [Unreachable](PathError::Unreachable) is an ordinary outcome a caller
/// is expected to handle; the other variants indicate a broken provider or
/// resource exhaustion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathError {
    /// Storage for the distance/predecessor tables or the frontier could not
    /// be allocated.
    AllocationFailure,
    /// The provider reported a zero-sized grid, or a start/end point outside
    /// its bounds.
    InvalidGrid,
    /// Extraction was attempted on an empty frontier. Cannot occur through
    /// [find_path](crate::find_path); surfaced instead of panicking.
    EmptyFrontier,
    /// The end point was never relaxed to a finite distance: no route exists.
    Unreachable,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathError::AllocationFailure => write!(f, "failed to allocate pathfinding storage"),
            PathError::InvalidGrid => write!(f, "grid is empty or start/end lie outside it"),
            PathError::EmptyFrontier => write!(f, "extraction from an empty frontier"),
            PathError::Unreachable => write!(f, "no route from start to end"),
        }
    }
}

impl std::error::Error for PathError {}
