//! Breadth-first visits.
//!
//! Both visits group nodes by level and treat failed lookups as nodes
//! without neighbors; [`Seq`] is the reference for [`ParQueue`].

mod seq;
pub use seq::*;

mod par_queue;
pub use par_queue::*;

/// A pending obligation to record a node at a level and, if the level is
/// smaller than the depth of the visit, to expand it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    /// The node.
    pub node: String,
    /// The distance of the node from the root.
    pub level: usize,
}

impl WorkItem {
    pub fn new(node: impl Into<String>, level: usize) -> Self {
        Self {
            node: node.into(),
            level,
        }
    }
}
