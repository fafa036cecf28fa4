use parking_lot::{Condvar, Mutex, MutexGuard};
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// A re-armable one-shot timer backed by a dedicated thread.
///
/// `start` arms the timer to fire once after the configured delay, re-arming
/// an already armed timer restarts the delay.  `cancel` disarms without
/// firing.  The callback runs on the timer thread with no locks held.
#[derive(Clone)]
pub(crate) struct OneShotTimer {
    inner: Arc<TimerInner>,
}

struct TimerInner {
    delay: Duration,
    state: Mutex<TimerState>,
    cond: Condvar,
}

#[derive(Default)]
struct TimerState {
    deadline: Option<Instant>,
    shutdown: bool,
}

impl OneShotTimer {
    pub fn spawn<F>(name: &str, delay: Duration, on_expiry: F) -> io::Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let inner = Arc::new(TimerInner {
            delay,
            state: Mutex::new(TimerState::default()),
            cond: Condvar::new(),
        });
        let worker = Arc::clone(&inner);
        thread::Builder::new()
            .name(format!("timer-{name}"))
            .spawn(move || worker.run(&on_expiry))?;
        Ok(Self { inner })
    }

    /// Arm (or re-arm) the timer.
    pub fn start(&self) {
        let mut state = self.inner.state.lock();
        state.deadline = Some(Instant::now() + self.inner.delay);
        self.inner.cond.notify_all();
    }

    /// Disarm the timer if armed.
    pub fn cancel(&self) {
        let mut state = self.inner.state.lock();
        state.deadline = None;
        self.inner.cond.notify_all();
    }

    /// Stop the timer thread.
    pub fn shutdown(&self) {
        let mut state = self.inner.state.lock();
        state.shutdown = true;
        self.inner.cond.notify_all();
    }
}

impl TimerInner {
    fn run(&self, on_expiry: &dyn Fn()) {
        let mut state = self.state.lock();
        loop {
            if state.shutdown {
                return;
            }
            match state.deadline {
                None => {
                    self.cond.wait(&mut state);
                }
                Some(deadline) => {
                    if Instant::now() >= deadline {
                        state.deadline = None;
                        MutexGuard::unlocked(&mut state, || on_expiry());
                    } else {
                        self.cond.wait_until(&mut state, deadline);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_timer(delay: Duration) -> (OneShotTimer, Arc<AtomicUsize>) {
        let fired = Arc::new(AtomicUsize::new(0));
        let timer = {
            let fired = Arc::clone(&fired);
            OneShotTimer::spawn("test", delay, move || {
                fired.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap()
        };
        (timer, fired)
    }

    #[test]
    fn test_fires_once_after_delay() {
        let (timer, fired) = counter_timer(Duration::from_millis(20));
        timer.start();
        thread::sleep(Duration::from_millis(100));
        assert_eq!(1, fired.load(Ordering::SeqCst));
        timer.shutdown();
    }

    #[test]
    fn test_unarmed_does_not_fire() {
        let (timer, fired) = counter_timer(Duration::from_millis(10));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(0, fired.load(Ordering::SeqCst));
        timer.shutdown();
    }

    #[test]
    fn test_cancel_disarms() {
        let (timer, fired) = counter_timer(Duration::from_millis(50));
        timer.start();
        timer.cancel();
        thread::sleep(Duration::from_millis(150));
        assert_eq!(0, fired.load(Ordering::SeqCst));
        timer.shutdown();
    }

    #[test]
    fn test_restart_rearms() {
        let (timer, fired) = counter_timer(Duration::from_millis(30));
        timer.start();
        thread::sleep(Duration::from_millis(100));
        timer.start();
        thread::sleep(Duration::from_millis(100));
        assert_eq!(2, fired.load(Ordering::SeqCst));
        timer.shutdown();
    }
}
