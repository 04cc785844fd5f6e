//! Tasks: the unit of work and its lifecycle.
//!
//! Every task embeds a [`TaskState`] carrying its status, readiness
//! conditions and wait channel; the [`Task`] trait exposes the lifecycle
//! operations on top of it. [`Future`] is the task shape produced by the
//! executor's combinator API, but custom task types work the same way:
//!
//! ```
//! use strand::{Task, TaskResult, TaskState};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! struct Counter {
//!     state: TaskState,
//!     hits: AtomicUsize,
//! }
//!
//! impl Task for Counter {
//!     fn state(&self) -> &TaskState {
//!         &self.state
//!     }
//!
//!     fn run(&self) -> TaskResult<()> {
//!         self.hits.fetch_add(1, Ordering::Relaxed);
//!         Ok(())
//!     }
//! }
//! ```
//!
//! Readiness conditions (`add_dependency`, `add_trigger`,
//! `set_time_trigger`) must be set before the task is submitted; the
//! executor reads them concurrently afterwards.

pub mod future;
pub mod status;

pub use future::Future;
pub use status::TaskStatus;

use crate::error::{TaskError, TaskResult};
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Shared handle to any task.
///
/// Tasks are shared-ownership: the same task may be held by client code, by
/// the queue, and by other tasks that list it as a dependency or trigger.
pub type TaskHandle = Arc<dyn Task>;

/// A unit of work with lifecycle state and readiness conditions.
///
/// Implementors provide [`state`](Task::state) and [`run`](Task::run); the
/// executor invokes `run` at most once, after the readiness conditions hold,
/// and records the outcome. Everything else is provided.
pub trait Task: Send + Sync {
    /// The lifecycle core embedded in this task.
    fn state(&self) -> &TaskState;

    /// Perform the work. Invoked by the executor at most once per task.
    ///
    /// An `Err` return (or a panic, which the executor captures) moves the
    /// task to `Failed`; an `Ok` return moves it to `Completed`.
    fn run(&self) -> TaskResult<()>;

    /// Current status.
    fn status(&self) -> TaskStatus {
        self.state().status()
    }

    /// `run()` finished without an error.
    fn is_completed(&self) -> bool {
        self.status() == TaskStatus::Completed
    }

    /// `run()` returned an error or panicked.
    fn is_failed(&self) -> bool {
        self.status() == TaskStatus::Failed
    }

    /// The task was canceled before it started.
    fn is_canceled(&self) -> bool {
        self.status() == TaskStatus::Canceled
    }

    /// The task completed, failed, or was canceled.
    fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }

    /// The captured error, present iff the task failed.
    fn error(&self) -> Option<TaskError> {
        self.state().error()
    }

    /// Require `dep` to be finished (in any terminal state) before this task
    /// may run. Call before submitting.
    fn add_dependency(&self, dep: TaskHandle) {
        self.state().add_dependency(dep);
    }

    /// Let any one of the registered triggers release this task once it
    /// finishes. Call before submitting.
    fn add_trigger(&self, trigger: TaskHandle) {
        self.state().add_trigger(trigger);
    }

    /// Hold this task back until `at`. Call before submitting.
    fn set_time_trigger(&self, at: Instant) {
        self.state().set_not_before(at);
    }

    /// Cancel the task if it has not started. Running or finished tasks are
    /// unaffected.
    fn cancel(&self) {
        self.state().cancel();
    }

    /// Block until the task reaches a terminal state.
    fn wait(&self) {
        self.state().wait();
    }
}

/// Lifecycle of a task, with the error folded into the failed stage so an
/// error is present exactly when the task failed.
enum Lifecycle {
    Pending,
    Completed,
    Failed(TaskError),
    Canceled,
}

impl Lifecycle {
    fn status(&self) -> TaskStatus {
        match self {
            Lifecycle::Pending => TaskStatus::Pending,
            Lifecycle::Completed => TaskStatus::Completed,
            Lifecycle::Failed(_) => TaskStatus::Failed,
            Lifecycle::Canceled => TaskStatus::Canceled,
        }
    }
}

struct Inner {
    lifecycle: Lifecycle,
    dependencies: Vec<TaskHandle>,
    triggers: Vec<TaskHandle>,
    not_before: Instant,
}

/// Status, readiness conditions, and wait channel of a task.
///
/// One mutex guards all fields; waiters block on the condvar, which is
/// signaled exactly once, at the transition out of `Pending`. The mutex is
/// leaf-level: readiness evaluation reads peer tasks' status through each
/// peer's own lock, so lock acquisition stays acyclic for the dependency
/// DAGs the engine is meant for.
pub struct TaskState {
    inner: Mutex<Inner>,
    finished: Condvar,
}

impl TaskState {
    /// A fresh `Pending` state with no dependencies, no triggers, and a
    /// deadline that is already satisfied.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                lifecycle: Lifecycle::Pending,
                dependencies: Vec::new(),
                triggers: Vec::new(),
                not_before: Instant::now(),
            }),
            finished: Condvar::new(),
        }
    }

    pub(crate) fn status(&self) -> TaskStatus {
        self.inner.lock().lifecycle.status()
    }

    pub(crate) fn error(&self) -> Option<TaskError> {
        match &self.inner.lock().lifecycle {
            Lifecycle::Failed(err) => Some(err.clone()),
            _ => None,
        }
    }

    pub(crate) fn add_dependency(&self, dep: TaskHandle) {
        self.inner.lock().dependencies.push(dep);
    }

    pub(crate) fn add_trigger(&self, trigger: TaskHandle) {
        self.inner.lock().triggers.push(trigger);
    }

    pub(crate) fn set_not_before(&self, at: Instant) {
        self.inner.lock().not_before = at;
    }

    /// The readiness predicate: every dependency finished, deadline passed,
    /// and (if any triggers are registered) at least one trigger finished.
    pub(crate) fn can_run(&self) -> bool {
        let inner = self.inner.lock();

        for dep in &inner.dependencies {
            if !dep.is_finished() {
                return false;
            }
        }

        if Instant::now() < inner.not_before {
            return false;
        }

        if inner.triggers.is_empty() {
            return true;
        }
        inner.triggers.iter().any(|trigger| trigger.is_finished())
    }

    pub(crate) fn cancel(&self) {
        self.transition(Lifecycle::Canceled);
    }

    pub(crate) fn complete(&self) {
        self.transition(Lifecycle::Completed);
    }

    pub(crate) fn fail(&self, err: TaskError) {
        self.transition(Lifecycle::Failed(err));
    }

    /// Move out of `Pending` and release all waiters. A no-op once terminal.
    fn transition(&self, next: Lifecycle) {
        let mut inner = self.inner.lock();
        if inner.lifecycle.status().is_terminal() {
            return;
        }
        inner.lifecycle = next;
        self.finished.notify_all();
    }

    pub(crate) fn wait(&self) {
        let mut inner = self.inner.lock();
        while !inner.lifecycle.status().is_terminal() {
            self.finished.wait(&mut inner);
        }
    }

    /// Wait for a terminal state and report it: `Ok` for completed, the
    /// captured error for failed, [`TaskError::Canceled`] for canceled.
    pub(crate) fn wait_result(&self) -> TaskResult<()> {
        let mut inner = self.inner.lock();
        loop {
            match &inner.lifecycle {
                Lifecycle::Pending => self.finished.wait(&mut inner),
                Lifecycle::Completed => return Ok(()),
                Lifecycle::Failed(err) => return Err(err.clone()),
                Lifecycle::Canceled => return Err(TaskError::Canceled),
            }
        }
    }
}

impl Default for TaskState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskState")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
