//! The executor: worker threads, submission, shutdown.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::executor::queue::TaskQueue;
use crate::executor::worker::Worker;
use crate::task::TaskHandle;
use log::debug;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A fixed-size pool of worker threads executing readiness-gated tasks.
///
/// Workers are spawned at construction and joined by
/// [`wait_shutdown`](Executor::wait_shutdown) or on drop. Submitted tasks
/// run once their dependencies, triggers and deadline allow; unready tasks
/// cycle through the queue until they do.
pub struct Executor {
    queue: Arc<TaskQueue>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Executor {
    /// Spawn a pool according to `config`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let queue = Arc::new(TaskQueue::new());
        let num_threads = config.worker_threads();
        let mut workers = Vec::with_capacity(num_threads);

        for id in 0..num_threads {
            let name = format!("{}-{}", config.thread_name_prefix, id);
            let mut builder = thread::Builder::new().name(name);

            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            let worker_queue = Arc::clone(&queue);
            let handle = builder.spawn(move || Worker::new(id).run(&worker_queue));

            match handle {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    // Let the workers spawned so far drain out and exit.
                    queue.close();
                    return Err(Error::executor(format!("spawn failed: {}", e)));
                }
            }
        }

        debug!("executor started with {} workers", num_threads);

        Ok(Self {
            queue,
            workers: Mutex::new(workers),
        })
    }

    /// Hand a task to the pool.
    ///
    /// A task submitted after [`start_shutdown`](Executor::start_shutdown)
    /// is canceled instead of enqueued. An already-canceled task is dropped.
    /// Submitting a finished task is benign: a worker observes it finished
    /// and discards it without running it again.
    pub fn submit(&self, task: TaskHandle) {
        if task.is_canceled() {
            return;
        }
        if !self.queue.put(Arc::clone(&task)) {
            task.cancel();
        }
    }

    /// Close the queue: no new submissions, workers drain what is left.
    ///
    /// Already-enqueued tasks still run if they can become ready; tasks that
    /// no longer can are canceled as the workers drain them out.
    pub fn start_shutdown(&self) {
        debug!("executor shutting down");
        self.queue.close();
    }

    /// Join all workers. Safe to call more than once.
    pub fn wait_shutdown(&self) {
        let workers = std::mem::take(&mut *self.workers.lock());
        for worker in workers {
            let _ = worker.join();
        }
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        self.start_shutdown();
        self.wait_shutdown();
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("shutdown", &self.queue.is_closed())
            .finish_non_exhaustive()
    }
}

/// Spawn a pool of `num_threads` workers with the default configuration.
pub fn make_thread_pool(num_threads: usize) -> Result<Executor> {
    let config = Config::builder().num_threads(num_threads).build()?;
    Executor::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Future, Task};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_zero_workers_rejected() {
        assert!(make_thread_pool(0).is_err());
    }

    #[test]
    fn test_submit_after_shutdown_cancels() {
        let pool = make_thread_pool(1).unwrap();
        pool.start_shutdown();

        let ran = Arc::new(AtomicUsize::new(0));
        let future = {
            let ran = ran.clone();
            Future::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        };

        pool.submit(future.clone());

        future.wait();
        assert!(future.is_canceled());
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_canceled_task_is_not_enqueued() {
        let pool = make_thread_pool(1).unwrap();

        let ran = Arc::new(AtomicUsize::new(0));
        let future = {
            let ran = ran.clone();
            Future::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        };

        future.cancel();
        pool.submit(future.clone());

        drop(pool);
        assert!(future.is_canceled());
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_resubmitting_finished_task_does_not_rerun_it() {
        let pool = make_thread_pool(2).unwrap();

        let ran = Arc::new(AtomicUsize::new(0));
        let future = {
            let ran = ran.clone();
            Future::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        };

        pool.submit(future.clone());
        future.get().unwrap();

        pool.submit(future.clone());
        drop(pool);

        assert!(future.is_completed());
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_wait_shutdown_is_idempotent() {
        let pool = make_thread_pool(2).unwrap();
        pool.start_shutdown();
        pool.wait_shutdown();
        pool.wait_shutdown();
    }
}
