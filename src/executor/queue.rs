//! The blocking FIFO the workers drain.

use crate::task::TaskHandle;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

struct Inner {
    buffer: VecDeque<TaskHandle>,
    closed: bool,
}

/// Unbounded MPMC queue of task handles with a closed flag.
///
/// Closing stops intake immediately but leaves buffered items takeable;
/// `take` only reports the end once the queue is both closed and drained.
pub(crate) struct TaskQueue {
    inner: Mutex<Inner>,
    not_empty: Condvar,
}

impl TaskQueue {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                buffer: VecDeque::new(),
                closed: false,
            }),
            not_empty: Condvar::new(),
        }
    }

    /// Append to the tail and wake one waiter. Returns false (dropping the
    /// handle) if the queue is closed.
    pub(crate) fn put(&self, task: TaskHandle) -> bool {
        let mut inner = self.inner.lock();
        if inner.closed {
            return false;
        }
        inner.buffer.push_back(task);
        self.not_empty.notify_one();
        true
    }

    /// Pop the head, blocking while the queue is open and empty. `None`
    /// means closed and drained: the caller should stop.
    pub(crate) fn take(&self) -> Option<TaskHandle> {
        let mut inner = self.inner.lock();
        while !inner.closed && inner.buffer.is_empty() {
            self.not_empty.wait(&mut inner);
        }
        inner.buffer.pop_front()
    }

    /// Stop intake and wake every waiter.
    pub(crate) fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        self.not_empty.notify_all();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}
