use super::WorkItem;
use crate::algo::visits::{Levels, Parallel};
use crate::source::NeighborSource;
use crate::utils::{LevelBuckets, TerminationDetector, VisitedSet, WorkQueue};
use dsi_progress_logger::ProgressLog;
use log::{debug, warn};
use rayon::ThreadPool;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Parallel breadth-first visits driven by a shared work queue.
///
/// Each thread of the pool runs a worker that repeatedly extracts a work
/// item (a node tagged with its distance from the root), records the node in
/// its level and, if the node is not at the maximum depth, looks up its
/// neighbors and enqueues the ones seen for the first time. Workers never
/// wait for a level to be complete, so a slow lookup delays only the worker
/// performing it.
///
/// The visit ends when a [`TerminationDetector`] sees the number of
/// outstanding work items drop to zero: the worker retiring the last item
/// shuts down the queue, which wakes up and stops all other workers.
///
/// Since nodes are admitted on a first-come, first-served basis, a node
/// reachable from nodes at different levels is recorded at the level of
/// whichever parent is expanded first. On graphs in which every path from the
/// root to a node has the same length (e.g., trees and graded DAGs) the
/// levels are exactly the breadth-first distances; otherwise a node might be
/// recorded at a level larger than its distance, and the result may vary
/// between runs.
///
/// # Examples
///
/// ```
/// use level_crawler::algo::visits::{breadth_first, Parallel};
/// use level_crawler::source::MapSource;
/// use level_crawler::threads;
/// use dsi_progress_logger::no_logging;
///
/// let source = MapSource::from_arcs([("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
/// let mut visit = breadth_first::ParQueue::new(&source);
/// let levels = visit.visit("A", 2, &threads![4], no_logging![]);
///
/// assert_eq!(levels[0], ["A"]);
/// assert_eq!(levels[1].len(), 2);
/// assert_eq!(levels[2], ["D"]);
/// ```
pub struct ParQueue<S: NeighborSource> {
    source: S,
    failed_lookups: usize,
}

impl<S: NeighborSource> ParQueue<S> {
    /// Creates a new parallel visit.
    ///
    /// # Arguments
    /// * `source`: the source of neighbors; it will be called concurrently
    ///   by all workers.
    pub fn new(source: S) -> Self {
        Self {
            source,
            failed_lookups: 0,
        }
    }

    /// The number of lookups that failed during the last visit.
    pub fn failed_lookups(&self) -> usize {
        self.failed_lookups
    }
}

/// State shared by the workers of a visit.
///
/// Each field has its own lock (or none), and no worker ever holds two of
/// them at the same time.
struct Shared {
    depth: usize,
    queue: WorkQueue<WorkItem>,
    visited: VisitedSet,
    detector: TerminationDetector,
    buckets: LevelBuckets,
    recorded: AtomicUsize,
    failed_lookups: AtomicUsize,
}

impl Shared {
    fn new(root: &str, depth: usize) -> Self {
        let shared = Self {
            depth,
            queue: WorkQueue::new(),
            visited: VisitedSet::new(),
            // Accounts for the root.
            detector: TerminationDetector::new(),
            buckets: LevelBuckets::new(depth),
            recorded: AtomicUsize::new(0),
            failed_lookups: AtomicUsize::new(0),
        };
        shared.visited.try_admit(root);
        shared.queue.push(WorkItem::new(root, 0));
        shared
    }

    /// Publishes a newly admitted node.
    fn enqueue(&self, item: WorkItem) {
        // The counter must be incremented before the item becomes visible,
        // or its consumer could retire it and drive the counter to zero
        // while the parent is still outstanding.
        self.detector.on_enqueue();
        self.queue.push(item);
    }

    /// Retires a work item, shutting down the queue if it was the last one.
    fn retire(&self) {
        if self.detector.on_retire() {
            debug!("No outstanding work items: shutting down the work queue");
            self.queue.shutdown();
        }
    }
}

/// Retires the item being processed when dropped, so that the visit
/// terminates even if a lookup panics.
struct Retirement<'a>(&'a Shared);

impl Drop for Retirement<'_> {
    fn drop(&mut self) {
        self.0.retire();
    }
}

fn work(source: &impl NeighborSource, shared: &Shared) {
    let mut processed = 0_usize;

    while let Some(WorkItem { node, level }) = shared.queue.pop() {
        let _retirement = Retirement(shared);

        if shared.buckets.record(level, &node) {
            shared.recorded.fetch_add(1, Ordering::Relaxed);
        }

        if level < shared.depth {
            // No lock is held during the lookup.
            match source.neighbors(&node) {
                Ok(neighbors) => {
                    for succ in neighbors {
                        if shared.visited.try_admit(&succ) {
                            shared.enqueue(WorkItem {
                                node: succ,
                                level: level + 1,
                            });
                        }
                    }
                }
                Err(err) => {
                    warn!("{}", err);
                    shared.failed_lookups.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        processed += 1;
        // _retirement is dropped here, after all children have been enqueued
    }

    debug!("Worker stopped after processing {} items", processed);
}

impl<S: NeighborSource> Parallel for ParQueue<S> {
    fn visit(
        &mut self,
        root: &str,
        depth: usize,
        thread_pool: &ThreadPool,
        pl: &mut impl ProgressLog,
    ) -> Levels {
        let num_workers = thread_pool.current_num_threads();
        pl.item_name("node");
        pl.expected_updates(None);
        pl.start(format!(
            "Visiting from {root:?} up to depth {depth} with {num_workers} workers..."
        ));

        let shared = Shared::new(root, depth);
        let source = &self.source;

        thread_pool.scope(|scope| {
            for _ in 0..num_workers {
                scope.spawn(|_| work(source, &shared));
            }
        });

        debug_assert!(shared.detector.is_terminated());
        debug_assert!(shared.queue.is_empty());

        self.failed_lookups = shared.failed_lookups.load(Ordering::Relaxed);
        pl.update_with_count(shared.recorded.load(Ordering::Relaxed));
        pl.done();
        if self.failed_lookups > 0 {
            warn!(
                "{} lookups failed; their nodes contributed no neighbors",
                self.failed_lookups
            );
        }

        shared.buckets.into_levels()
    }
}
