use crate::algo::visits::{breadth_first, Levels, Parallel, Sequential};
use crate::source::NeighborSource;
use crate::utils::Threads;
use dsi_progress_logger::ProgressLog;

/// The default number of workers of a parallel traversal.
pub const DEFAULT_NUM_WORKERS: usize = 8;

/// How to perform a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// With a [parallel visit](breadth_first::ParQueue) on a dedicated pool
    /// of `num_workers` threads; zero means as many as rayon chooses.
    Parallel { num_workers: usize },
    /// With the [sequential reference visit](breadth_first::Seq).
    Sequential,
}

impl Mode {
    /// Parallel mode with [`DEFAULT_NUM_WORKERS`] workers.
    pub const fn parallel() -> Self {
        Mode::Parallel {
            num_workers: DEFAULT_NUM_WORKERS,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::parallel()
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Mode::Parallel { .. } => "parallel",
            Mode::Sequential => "sequential",
        })
    }
}

/// Groups by distance from `start` all nodes within `depth` hops.
///
/// The result has exactly `depth + 1` levels, the first one containing just
/// `start`. Lookups failing during the traversal are logged and treated as
/// nodes without neighbors.
///
/// # Examples
///
/// ```
/// use level_crawler::prelude::*;
/// use dsi_progress_logger::no_logging;
///
/// let source = MapSource::from_arcs([("X", "Y"), ("Y", "Z")]);
/// let levels = traverse(&source, "X", 3, Mode::parallel(), no_logging![]);
///
/// assert_eq!(levels.len(), 4);
/// assert_eq!(levels[2], ["Z"]);
/// assert!(levels[3].is_empty());
/// ```
pub fn traverse(
    source: impl NeighborSource,
    start: &str,
    depth: usize,
    mode: Mode,
    pl: &mut impl ProgressLog,
) -> Levels {
    match mode {
        Mode::Parallel { num_workers } => breadth_first::ParQueue::new(source).visit(
            start,
            depth,
            &Threads::from(num_workers).build(),
            pl,
        ),
        Mode::Sequential => breadth_first::Seq::new(source).visit(start, depth, pl),
    }
}
