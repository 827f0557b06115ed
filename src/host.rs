//! Test-host binding
//!
//! The single capability through which a failed suite becomes visible to the
//! hosting process.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Receives the end-of-suite failure signal
pub trait TestHost {
    fn fail(&mut self);
}

impl<F: FnMut()> TestHost for F {
    fn fail(&mut self) {
        self()
    }
}

/// Cloneable host that counts failure signals
#[derive(Clone, Debug, Default)]
pub struct FailureLatch {
    signals: Arc<AtomicUsize>,
}

impl FailureLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_failed(&self) -> bool {
        self.signal_count() > 0
    }

    pub fn signal_count(&self) -> usize {
        self.signals.load(Ordering::SeqCst)
    }

    /// Process exit code for the observed suite
    pub fn exit_code(&self) -> i32 {
        if self.is_failed() {
            1
        } else {
            0
        }
    }
}

impl TestHost for FailureLatch {
    fn fail(&mut self) {
        self.signals.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_is_shared_between_clones() {
        let latch = FailureLatch::new();
        let mut host = latch.clone();
        assert_eq!(latch.exit_code(), 0);

        host.fail();
        assert!(latch.is_failed());
        assert_eq!(latch.signal_count(), 1);
        assert_eq!(latch.exit_code(), 1);
    }

    #[test]
    fn test_closure_host() {
        let mut called = false;
        {
            let mut host = || called = true;
            TestHost::fail(&mut host);
        }
        assert!(called);
    }
}
