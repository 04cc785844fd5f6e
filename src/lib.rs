//! Strand - a dependency- and deadline-aware thread pool with composable
//! futures.
//!
//! An [`Executor`] owns a fixed set of worker threads that pull tasks from a
//! shared FIFO queue. A task may declare *readiness conditions* before it is
//! submitted: dependencies (all must finish first), triggers (any one
//! finishing releases it), and a no-earlier-than deadline. Workers re-enqueue
//! tasks whose conditions are not yet met, so dependency graphs execute
//! without any cross-task notification fabric.
//!
//! On top of the pool sits a small futures API: [`Executor::invoke`],
//! [`Executor::then`], [`Executor::when_all`], [`Executor::when_first`] and
//! [`Executor::when_all_before_deadline`] all return [`Future`] handles that
//! can be waited on, chained, and queried for their value.
//!
//! # Quick Start
//!
//! ```
//! use strand::prelude::*;
//!
//! let pool = strand::make_thread_pool(2).unwrap();
//!
//! let doubled = pool.invoke(|| Ok(21 * 2));
//! assert_eq!(doubled.get().unwrap(), 42);
//!
//! let captured = doubled.clone();
//! let tripled = pool.then(&doubled, move || Ok(captured.get()? + 84));
//! assert_eq!(tripled.get().unwrap(), 126);
//! ```
//!
//! # Execution model
//!
//! - Ready tasks are dispatched in FIFO order of their last enqueue.
//! - A task runs at most once; its status moves from `Pending` to exactly one
//!   of `Completed`, `Failed` or `Canceled` and never changes again.
//! - Errors are per-task. A failed dependency does not automatically fail its
//!   dependents; a dependent decides by calling `get()` on it.
//! - [`Task::cancel`] only prevents a task that has not started; it never
//!   preempts a running one.

#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod task;

mod util;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result, TaskError, TaskResult};
pub use executor::{make_thread_pool, Executor};
pub use task::{Future, Task, TaskHandle, TaskState, TaskStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_and_get() {
        let pool = make_thread_pool(2).unwrap();

        let future = pool.invoke(|| Ok(6 * 7));
        assert_eq!(future.get().unwrap(), 42);
        assert!(future.is_completed());
    }

    #[test]
    fn test_then_chains_through_dependency() {
        let pool = make_thread_pool(2).unwrap();

        let first = pool.invoke(|| Ok(1));
        let captured = first.clone();
        let second = pool.then(&first, move || Ok(captured.get()? + 1));

        assert_eq!(second.get().unwrap(), 2);
        assert!(first.is_finished());
    }

    #[test]
    fn test_pool_drop_joins_workers() {
        let pool = make_thread_pool(4).unwrap();

        let futures: Vec<_> = (0..64).map(|i| pool.invoke(move || Ok(i))).collect();
        for (i, future) in futures.iter().enumerate() {
            assert_eq!(future.get().unwrap(), i);
        }

        drop(pool);
    }
}
