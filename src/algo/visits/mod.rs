//! Level-by-level visits of a graph known only through a
//! [`NeighborSource`](crate::source::NeighborSource).
//!
//! A visit from a root up to a given depth returns the visited nodes grouped
//! by their distance from the root: see [`Levels`].

pub mod breadth_first;

use dsi_progress_logger::ProgressLog;
use rayon::ThreadPool;
use std::collections::BTreeSet;
use std::ops::Deref;

/// The nodes found by a visit, grouped by distance from the root.
///
/// A visit up to depth `d` has exactly `d + 1` levels; level 0 contains only
/// the root. Each node appears in at most one level, at most once. The order
/// of the nodes inside a level is the order in which they were recorded,
/// which in parallel visits depends on scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Levels(Vec<Vec<String>>);

impl Levels {
    /// The maximum distance of the visit.
    ///
    /// # Panics
    ///
    /// Panics if there are no levels.
    pub fn depth(&self) -> usize {
        self.0.len() - 1
    }

    /// The total number of nodes over all levels.
    pub fn num_nodes(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }

    /// Returns the levels as sets, for comparisons that must ignore the
    /// order inside a level.
    pub fn to_sets(&self) -> Vec<BTreeSet<String>> {
        self.0
            .iter()
            .map(|level| level.iter().cloned().collect())
            .collect()
    }

    pub fn into_inner(self) -> Vec<Vec<String>> {
        self.0
    }
}

impl From<Vec<Vec<String>>> for Levels {
    fn from(levels: Vec<Vec<String>>) -> Self {
        Self(levels)
    }
}

impl Deref for Levels {
    type Target = [Vec<String>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Levels {
    type Item = Vec<String>;
    type IntoIter = std::vec::IntoIter<Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Levels {
    type Item = &'a Vec<String>;
    type IntoIter = std::slice::Iter<'a, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A sequential level visit.
///
/// Failed lookups are not errors: a node whose neighbors cannot be
/// retrieved is recorded, but contributes no neighbors.
pub trait Sequential {
    /// Visits the graph from `root`, recording all nodes at distance at most
    /// `depth`.
    ///
    /// # Arguments
    /// * `root`: the node to start the visit from.
    ///
    /// * `depth`: the maximum distance from `root`; nodes at this distance
    ///   are recorded but not expanded.
    ///
    /// * `pl`: a progress logger, updated once per recorded node.
    fn visit(&mut self, root: &str, depth: usize, pl: &mut impl ProgressLog) -> Levels;
}

/// A parallel level visit.
///
/// Same contract as [`Sequential`], but the expansion of nodes is spread
/// over the threads of a pool.
pub trait Parallel {
    /// Visits the graph from `root`, recording all nodes at distance at most
    /// `depth`.
    ///
    /// # Arguments
    /// * `root`: the node to start the visit from.
    ///
    /// * `depth`: the maximum distance from `root`; nodes at this distance
    ///   are recorded but not expanded.
    ///
    /// * `thread_pool`: the pool whose threads perform the visit.
    ///
    /// * `pl`: a progress logger, updated once with the number of recorded
    ///   nodes when all workers have stopped.
    fn visit(
        &mut self,
        root: &str,
        depth: usize,
        thread_pool: &ThreadPool,
        pl: &mut impl ProgressLog,
    ) -> Levels;
}
