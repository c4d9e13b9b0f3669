use dashmap::DashSet;

/// Admission control for a parallel visit.
///
/// A node is admitted the first time it is offered and rejected on every
/// later offer, from any thread. The check and the insertion happen under
/// the lock of the shard owning the node, so two concurrent offers of the
/// same node cannot both be admitted.
#[derive(Debug, Default)]
pub struct VisitedSet {
    nodes: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `node` and returns `true` if it was never offered before;
    /// returns `false` otherwise.
    pub fn try_admit(&self, node: &str) -> bool {
        // Skip the allocation for nodes we have already seen.
        if self.nodes.contains(node) {
            return false;
        }
        self.nodes.insert(node.to_owned())
    }

    pub fn contains(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
