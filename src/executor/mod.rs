//! Task execution infrastructure.
//!
//! The [`Executor`] owns a fixed set of worker threads and the shared task
//! queue they drain. Workers re-enqueue tasks whose readiness conditions do
//! not hold yet, so readiness is discovered by polling rather than by a
//! cross-task notification fabric.

mod combinators;
pub mod pool;
pub(crate) mod queue;
mod worker;

pub use pool::{make_thread_pool, Executor};
