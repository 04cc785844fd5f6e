//! The futures API layered on the pool.
//!
//! Every combinator builds a [`Future`], wires its readiness conditions, and
//! submits it. Combined futures read their inputs with `get()`, so an input
//! that failed (or was canceled) fails the combined future with that same
//! error.

use crate::error::{TaskError, TaskResult};
use crate::executor::pool::Executor;
use crate::task::{Future, Task};
use std::sync::Arc;
use std::time::Instant;

impl Executor {
    /// Run `f` on the pool as soon as a worker is free.
    pub fn invoke<T, F>(&self, f: F) -> Arc<Future<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> TaskResult<T> + Send + 'static,
    {
        let future = Future::new(f);
        self.submit(future.clone());
        future
    }

    /// Run `f` once `input` is finished, whatever its outcome.
    ///
    /// `f` typically captures a handle to `input` and reads it with
    /// `get()?`, which forwards an upstream failure into the new future.
    pub fn then<D, T, F>(&self, input: &Arc<D>, f: F) -> Arc<Future<T>>
    where
        D: Task + 'static,
        T: Send + 'static,
        F: FnOnce() -> TaskResult<T> + Send + 'static,
    {
        let future = Future::new(f);
        future.add_dependency(input.clone());
        self.submit(future.clone());
        future
    }

    /// Collect the values of every input, in input order.
    ///
    /// The combined future depends on every input, so it does not run (and
    /// does not occupy a worker) before all of them are finished. The first
    /// input that failed or was canceled fails the combined future with its
    /// error.
    pub fn when_all<T>(&self, all: Vec<Arc<Future<T>>>) -> Arc<Future<Vec<T>>>
    where
        T: Clone + Send + 'static,
    {
        let inputs = all.clone();
        let future = Future::new(move || {
            let mut values = Vec::with_capacity(inputs.len());
            for input in &inputs {
                values.push(input.get()?);
            }
            Ok(values)
        });

        for input in &all {
            future.add_dependency(input.clone());
        }
        self.submit(future.clone());
        future
    }

    /// Return the value of the first input to finish.
    ///
    /// Each input is registered as a trigger, so the combined future becomes
    /// ready exactly when some input finishes; the computation then scans the
    /// inputs in order and takes the first finished one. If that input failed
    /// or was canceled, the combined future fails with its error. With no
    /// inputs at all the combined future fails immediately.
    pub fn when_first<T>(&self, all: Vec<Arc<Future<T>>>) -> Arc<Future<T>>
    where
        T: Clone + Send + 'static,
    {
        let inputs = all.clone();
        let future = Future::new(move || {
            for input in &inputs {
                if input.is_finished() {
                    return input.get();
                }
            }
            Err(TaskError::failed("no input has finished"))
        });

        for input in &all {
            future.add_trigger(input.clone());
        }
        self.submit(future.clone());
        future
    }

    /// Collect the values of the inputs that have finished by `deadline`.
    ///
    /// The combined future is held back until `deadline` and then collects,
    /// in input order, the values of exactly the inputs that are finished at
    /// that moment; stragglers are omitted without being waited on. A
    /// finished input that failed or was canceled fails the combined future
    /// with its error.
    pub fn when_all_before_deadline<T>(
        &self,
        all: Vec<Arc<Future<T>>>,
        deadline: Instant,
    ) -> Arc<Future<Vec<T>>>
    where
        T: Clone + Send + 'static,
    {
        let future = Future::new(move || {
            let mut values = Vec::with_capacity(all.len());
            for input in &all {
                if input.is_finished() {
                    values.push(input.get()?);
                }
            }
            Ok(values)
        });

        future.set_time_trigger(deadline);
        self.submit(future.clone());
        future
    }
}
