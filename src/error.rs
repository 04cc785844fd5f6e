//! Error types.
//!
//! Two separate surfaces: [`Error`] covers setting a pool up (configuration,
//! thread spawning), [`TaskError`] covers the outcome of an individual task.
//! Task errors are cheap to clone because a single failure may be observed by
//! any number of dependents.

use std::any::Any;
use std::sync::Arc;

/// Result type for pool construction and configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or running a pool.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Executor error
    #[error("executor error: {0}")]
    Executor(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create an executor error
    pub fn executor<S: Into<String>>(msg: S) -> Self {
        Error::Executor(msg.into())
    }
}

/// Result type produced by task computations and returned by
/// [`Future::get`](crate::Future::get).
pub type TaskResult<T> = std::result::Result<T, TaskError>;

/// Why a task did not produce a value.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TaskError {
    /// The computation returned an error.
    #[error("{0}")]
    Failed(Arc<str>),

    /// The computation panicked; the payload message is preserved.
    #[error("task panicked: {0}")]
    Panicked(Arc<str>),

    /// The task was canceled before it could run.
    #[error("task canceled")]
    Canceled,
}

impl TaskError {
    /// Create a task error carrying a message.
    pub fn failed<S: Into<String>>(msg: S) -> Self {
        TaskError::Failed(msg.into().into())
    }

    /// Capture a panic payload as a task error.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };

        TaskError::Panicked(message.into())
    }
}
