//! Concurrent building blocks of the parallel visit.

mod buckets;
pub use buckets::LevelBuckets;

mod termination;
pub use termination::TerminationDetector;

mod threadpool;
pub use threadpool::Threads;

mod visited;
pub use visited::VisitedSet;

mod work_queue;
pub use work_queue::WorkQueue;
