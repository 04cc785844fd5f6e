// worker thread loop

use crate::error::TaskError;
use crate::executor::queue::TaskQueue;
use crate::task::TaskHandle;
use crate::util::Backoff;
use log::{debug, trace, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

pub(crate) type WorkerId = usize;

pub(crate) struct Worker {
    pub(crate) id: WorkerId,
}

impl Worker {
    pub(crate) fn new(id: WorkerId) -> Self {
        Self { id }
    }

    /// Main loop: take, drop finished, re-enqueue unready, run ready.
    ///
    /// Readiness is monotonic, so a re-enqueued task losing its queue
    /// position is harmless: once ready it stays ready. The back-off keeps a
    /// queue full of unready tasks from spinning a core.
    pub(crate) fn run(&self, queue: &TaskQueue) {
        debug!("worker {} started", self.id);
        let mut backoff = Backoff::new();

        while let Some(task) = queue.take() {
            if task.is_finished() {
                // Canceled before it ran, or submitted again after
                // finishing. Either way it must not run.
                continue;
            }

            if !task.state().can_run() {
                if queue.put(Arc::clone(&task)) {
                    backoff.wait();
                } else {
                    // The queue closed while this task still was not ready;
                    // nothing can make it ready now.
                    trace!("worker {}: canceling unready task at shutdown", self.id);
                    task.cancel();
                }
                continue;
            }

            backoff.reset();
            self.execute(&task);
        }

        debug!("worker {} stopped", self.id);
    }

    /// Run one ready task under the panic boundary and record its outcome.
    fn execute(&self, task: &TaskHandle) {
        match catch_unwind(AssertUnwindSafe(|| task.run())) {
            Ok(Ok(())) => task.state().complete(),
            Ok(Err(err)) => {
                trace!("worker {}: task failed: {}", self.id, err);
                task.state().fail(err);
            }
            Err(payload) => {
                let err = TaskError::from_panic(payload);
                warn!("worker {}: {}", self.id, err);
                task.state().fail(err);
            }
        }
    }
}
