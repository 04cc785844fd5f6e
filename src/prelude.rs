//! Convenient re-exports for common strand types and traits.
//!
//! This module provides a single import for most use cases:
//! ```
//! use strand::prelude::*;
//! ```

pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Error, Result, TaskError, TaskResult};
pub use crate::executor::{make_thread_pool, Executor};
pub use crate::task::{Future, Task, TaskHandle, TaskStatus};
