use rayon::{ThreadPool, ThreadPoolBuilder};

/// Sizing of the thread pool hosting the workers of a parallel visit.
///
/// Every thread of the pool runs exactly one worker, so the size of the pool
/// is the number of workers. Usually built through the
/// [`threads!`](crate::threads) macro or from a worker count with
/// [`Threads::from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threads {
    /// As many workers as rayon chooses (usually the number of cores).
    Default,
    /// Exactly the given (positive) number of workers.
    NumThreads(usize),
}

impl From<usize> for Threads {
    /// Zero workers means [`Threads::Default`].
    fn from(num_workers: usize) -> Self {
        match num_workers {
            0 => Self::Default,
            n => Self::NumThreads(n),
        }
    }
}

impl Threads {
    /// The requested number of workers, if fixed.
    pub fn num_workers(self) -> Option<usize> {
        match self {
            Self::Default | Self::NumThreads(0) => None,
            Self::NumThreads(n) => Some(n),
        }
    }

    fn builder(self) -> ThreadPoolBuilder {
        let builder = ThreadPoolBuilder::new().thread_name(|index| format!("crawl-worker-{index}"));
        match self.num_workers() {
            Some(n) => builder.num_threads(n),
            None => builder,
        }
    }

    /// Builds the pool, panicking if the operating system refuses to spawn
    /// its threads.
    pub fn build(self) -> ThreadPool {
        self.builder().build().unwrap_or_else(|err| {
            panic!("Should be able to build a pool of {self:?} workers: {err}")
        })
    }
}
