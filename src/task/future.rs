//! `Future<T>`: a task that produces a value.

use crate::error::TaskResult;
use crate::task::{Task, TaskState};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

type Thunk<T> = Box<dyn FnOnce() -> TaskResult<T> + Send + 'static>;

struct ResultCell<T> {
    thunk: Option<Thunk<T>>,
    value: Option<T>,
}

/// A task that captures a computation and its eventual value.
///
/// Created directly with [`Future::new`] and submitted by hand, or through
/// the executor's combinator API ([`invoke`](crate::Executor::invoke) and
/// friends). The computation runs at most once, on a pool worker; any number
/// of handles may then read the outcome through [`get`](Future::get).
pub struct Future<T> {
    state: TaskState,
    cell: Mutex<ResultCell<T>>,
}

impl<T: Send + 'static> Future<T> {
    /// Wrap a computation in an unsubmitted future.
    ///
    /// The computation reports failure by returning a
    /// [`TaskError`](crate::TaskError); a panic inside it is captured by the
    /// executor and recorded the same way.
    pub fn new<F>(f: F) -> Arc<Self>
    where
        F: FnOnce() -> TaskResult<T> + Send + 'static,
    {
        Arc::new(Self {
            state: TaskState::new(),
            cell: Mutex::new(ResultCell {
                thunk: Some(Box::new(f)),
                value: None,
            }),
        })
    }

    /// Wait for the future to finish and return its outcome.
    ///
    /// Returns a clone of the value if the future completed, the captured
    /// error if it failed, or [`TaskError::Canceled`](crate::TaskError) if
    /// it was canceled.
    pub fn get(&self) -> TaskResult<T>
    where
        T: Clone,
    {
        self.state.wait_result()?;
        let cell = self.cell.lock();
        let value = cell
            .value
            .as_ref()
            .expect("completed future holds a value");
        Ok(value.clone())
    }
}

impl<T: Send + 'static> Task for Future<T> {
    fn state(&self) -> &TaskState {
        &self.state
    }

    fn run(&self) -> TaskResult<()> {
        // The thunk runs outside the cell lock: it may wait on peer tasks.
        // Taking it out also makes a second run a no-op.
        let thunk = self.cell.lock().thunk.take();
        let thunk = match thunk {
            Some(thunk) => thunk,
            None => return Ok(()),
        };

        let value = thunk()?;
        self.cell.lock().value = Some(value);
        Ok(())
    }
}

impl<T> fmt::Debug for Future<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Future")
            .field("status", &self.state.status())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use crate::task::TaskStatus;

    #[test]
    fn test_run_stores_the_value() {
        let future = Future::new(|| Ok(7));

        future.run().unwrap();
        future.state().complete();

        assert_eq!(future.get().unwrap(), 7);
        assert_eq!(future.status(), TaskStatus::Completed);
    }

    #[test]
    fn test_run_surfaces_the_error() {
        let future: Arc<Future<i32>> = Future::new(|| Err(TaskError::failed("no value")));

        let err = future.run().unwrap_err();
        assert_eq!(err.to_string(), "no value");
    }

    #[test]
    fn test_second_run_is_a_noop() {
        let future = Future::new(|| Ok(1));

        future.run().unwrap();
        future.run().unwrap();
        future.state().complete();

        assert_eq!(future.get().unwrap(), 1);
    }

    #[test]
    fn test_get_on_canceled_future() {
        let future: Arc<Future<i32>> = Future::new(|| Ok(1));
        future.cancel();

        assert!(matches!(future.get(), Err(TaskError::Canceled)));
        assert!(future.error().is_none());
    }

    #[test]
    fn test_get_clones_for_every_caller() {
        let future = Future::new(|| Ok(vec![1, 2, 3]));
        future.run().unwrap();
        future.state().complete();

        assert_eq!(future.get().unwrap(), vec![1, 2, 3]);
        assert_eq!(future.get().unwrap(), vec![1, 2, 3]);
    }
}
