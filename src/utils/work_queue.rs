use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

struct State<T> {
    items: VecDeque<T>,
    shut_down: bool,
    /// Consumers currently blocked in `pop`.
    waiting: usize,
}

/// An unbounded, blocking FIFO shared by the workers of a parallel visit.
///
/// Consumers block in [`pop`](WorkQueue::pop) until an item is available or
/// the queue has been [shut down](WorkQueue::shutdown) and drained. The
/// shutdown flag is kept under the same lock as the items, so a consumer
/// cannot check the flag, get preempted, and then sleep through the
/// broadcast.
pub struct WorkQueue<T> {
    state: Mutex<State<T>>,
    available: Condvar,
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WorkQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                items: VecDeque::new(),
                shut_down: false,
                waiting: 0,
            }),
            available: Condvar::new(),
        }
    }

    /// Appends an item and wakes one waiting consumer.
    ///
    /// Items pushed after [`shutdown`](WorkQueue::shutdown) are still
    /// delivered to consumers that call [`pop`](WorkQueue::pop) before the
    /// queue empties.
    pub fn push(&self, item: T) {
        self.state.lock().items.push_back(item);
        self.available.notify_one();
    }

    /// Removes the oldest item, blocking while the queue is empty.
    ///
    /// Returns `None` once the queue has been shut down and there are no
    /// more items.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                return Some(item);
            }
            if state.shut_down {
                return None;
            }
            state.waiting += 1;
            self.available.wait(&mut state);
            state.waiting -= 1;
        }
    }

    /// Marks the queue as shut down and wakes every waiting consumer.
    ///
    /// The flag is permanent.
    pub fn shutdown(&self) {
        self.state.lock().shut_down = true;
        self.available.notify_all();
    }

    pub fn is_shut_down(&self) -> bool {
        self.state.lock().shut_down
    }

    /// The number of consumers blocked waiting for an item.
    pub fn num_waiting(&self) -> usize {
        self.state.lock().waiting
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }
}
