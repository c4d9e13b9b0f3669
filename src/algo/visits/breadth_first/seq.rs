use super::WorkItem;
use crate::algo::visits::{Levels, Sequential};
use crate::source::NeighborSource;
use dsi_progress_logger::ProgressLog;
use log::warn;
use std::collections::{HashSet, VecDeque};

/// A sequential breadth-first visit.
///
/// This is the reference implementation the parallel visits are checked
/// against: nodes are extracted from a FIFO queue tagged with their
/// distance from the root, and each node is recorded in its level when
/// extracted. Nodes are admitted to the queue at most once, so on any graph
/// the levels are the exact breadth-first distances from the root, and
/// the order inside a level is deterministic for a deterministic source.
///
/// # Examples
///
/// ```
/// use level_crawler::algo::visits::{breadth_first, Sequential};
/// use level_crawler::source::MapSource;
/// use dsi_progress_logger::no_logging;
///
/// let source = MapSource::from_arcs([("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
/// let mut visit = breadth_first::Seq::new(&source);
/// let levels = visit.visit("A", 2, no_logging![]);
///
/// assert_eq!(levels[0], ["A"]);
/// assert_eq!(levels[1], ["B", "C"]);
/// assert_eq!(levels[2], ["D"]);
/// ```
pub struct Seq<S: NeighborSource> {
    source: S,
    visited: HashSet<String>,
    queue: VecDeque<WorkItem>,
    failed_lookups: usize,
}

impl<S: NeighborSource> Seq<S> {
    /// Creates a new sequential visit.
    ///
    /// # Arguments
    /// * `source`: the source of neighbors.
    pub fn new(source: S) -> Self {
        Self {
            source,
            visited: HashSet::new(),
            queue: VecDeque::new(),
            failed_lookups: 0,
        }
    }

    /// The number of lookups that failed during the last visit.
    pub fn failed_lookups(&self) -> usize {
        self.failed_lookups
    }

    fn reset(&mut self) {
        self.visited.clear();
        self.queue.clear();
        self.failed_lookups = 0;
    }
}

impl<S: NeighborSource> Sequential for Seq<S> {
    fn visit(&mut self, root: &str, depth: usize, pl: &mut impl ProgressLog) -> Levels {
        self.reset();
        let mut levels = vec![Vec::new(); depth + 1];

        pl.item_name("node");
        pl.expected_updates(None);
        pl.start(format!("Visiting from {root:?} up to depth {depth}..."));

        self.visited.insert(root.to_owned());
        self.queue.push_back(WorkItem::new(root, 0));

        while let Some(WorkItem { node, level }) = self.queue.pop_front() {
            if level < depth {
                match self.source.neighbors(&node) {
                    Ok(neighbors) => {
                        for succ in neighbors {
                            if !self.visited.contains(&succ) {
                                self.visited.insert(succ.clone());
                                self.queue.push_back(WorkItem {
                                    node: succ,
                                    level: level + 1,
                                });
                            }
                        }
                    }
                    Err(err) => {
                        warn!("{}", err);
                        self.failed_lookups += 1;
                    }
                }
            }
            levels[level].push(node);
            pl.light_update();
        }

        pl.done();
        if self.failed_lookups > 0 {
            warn!(
                "{} lookups failed; their nodes contributed no neighbors",
                self.failed_lookups
            );
        }
        Levels::from(levels)
    }
}
