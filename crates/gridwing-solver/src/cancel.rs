//! Cooperative cancellation for long-running solves.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A shared flag for cancelling a solve or generation in flight.
///
/// The solver checks the token between backtracking steps (once per choice
/// point) and aborts cleanly with an
/// [`Interrupted`](crate::SolveClassification::Interrupted) classification.
/// A partial or inconsistent grid is never published.
///
/// Cloning the token shares the underlying flag, so one clone can be handed
/// to a worker while another stays with the caller.
///
/// # Examples
///
/// ```
/// use gridwing_solver::CancelToken;
///
/// let token = CancelToken::new();
/// let worker_copy = token.clone();
/// assert!(!worker_copy.is_cancelled());
///
/// token.cancel();
/// assert!(worker_copy.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_flag() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());

        clone.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());

        // cancelling again is harmless
        token.cancel();
        assert!(token.is_cancelled());
    }
}
