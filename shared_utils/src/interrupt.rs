//! Ctrl-C tracking.
//!
//! SIGINT reaches the running transcoder through the process group, so the
//! child dies and reports failure on its own. The handler only records that
//! it happened, letting the batch driver stop after the failed file has been
//! cleaned up instead of the whole process dying mid-write.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a process-wide Ctrl-C handler that raises this flag.
    /// Can only succeed once per process.
    pub fn install(&self) -> anyhow::Result<()> {
        let raised = Arc::clone(&self.raised);
        ctrlc::set_handler(move || {
            raised.store(true, Ordering::SeqCst);
        })?;
        Ok(())
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_is_shared_between_clones() {
        let flag = InterruptFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_raised());

        flag.raise();
        assert!(clone.is_raised());
    }
}
