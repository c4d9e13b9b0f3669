//! Traversal algorithms.

pub mod traverse;
pub mod visits;

/// Traits used to interact with the implemented algorithms.
pub mod traits {
    use super::*;

    pub use visits::{Parallel, Sequential};
}
