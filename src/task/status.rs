//! Task lifecycle stages.

/// Lifecycle stage of a task.
///
/// A task starts `Pending` and moves exactly once to one of the three
/// terminal stages. Terminal stages are frozen; no transition ever leaves
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Not yet run (possibly not yet ready, possibly running right now).
    Pending,
    /// `run()` finished without an error.
    Completed,
    /// `run()` returned an error or panicked.
    Failed,
    /// Canceled before it started.
    Canceled,
}

impl TaskStatus {
    /// True for every stage other than `Pending`.
    pub fn is_terminal(self) -> bool {
        self != TaskStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_is_not_terminal() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(TaskStatus::Canceled.is_terminal());
    }
}
