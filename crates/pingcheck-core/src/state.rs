use std::sync::atomic::{AtomicBool, Ordering};

/// Flags shared between the engine handle, the worker and the timers.
///
/// `running` is set by the worker for the duration of a run and cleared by
/// the abort timer to force the run to wind down.  `abort` suppresses further
/// sends while the run drains outstanding replies.
#[derive(Debug, Default)]
pub struct RunFlags {
    running: AtomicBool,
    abort: AtomicBool,
}

impl RunFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    pub fn abort_requested(&self) -> bool {
        self.abort.load(Ordering::SeqCst)
    }

    pub fn request_abort(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }

    pub fn clear_abort(&self) {
        self.abort.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let flags = RunFlags::new();
        assert!(!flags.is_running());
        assert!(!flags.abort_requested());
    }

    #[test]
    fn test_abort_round_trip() {
        let flags = RunFlags::new();
        flags.request_abort();
        assert!(flags.abort_requested());
        flags.clear_abort();
        assert!(!flags.abort_requested());
    }
}
