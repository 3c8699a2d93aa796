//! Cancellation flag for an aggregation run

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked by a run at every request boundary.
///
/// Clones observe the same flag. The inner `Arc<AtomicBool>` can be handed
/// to `signal_hook::flag::register` so SIGINT cancels the run.
#[derive(Debug, Clone, Default)]
pub struct RunToken {
    flag: Arc<AtomicBool>,
}

impl RunToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Raw flag for signal handler registration
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_active() {
        assert!(!RunToken::new().is_cancelled());
    }

    #[test]
    fn clones_share_flag() {
        let token = RunToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn raw_flag_cancels() {
        let token = RunToken::new();
        token.flag().store(true, Ordering::Relaxed);
        assert!(token.is_cancelled());
    }
}
