use crate::clock::SystemTickClock;
use crate::config::PingConfig;
use crate::error::{Error, Result};
use crate::net::socket::Socket;
#[cfg(unix)]
use crate::net::SocketImpl;
use crate::probe::run_probe;
use crate::report::PingEvent;
use crate::state::RunFlags;
use crate::timer::OneShotTimer;
use crossbeam::channel::{bounded, Sender};
use parking_lot::Mutex;
use std::marker::PhantomData;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::instrument;

/// The depth of the start request queue.
const QUEUE_DEPTH: usize = 4;

/// How long after the final echo request before the run begins to stop.
///
/// This is the window in which late replies may still arrive and be counted.
const SOFT_STOP_DELAY: Duration = Duration::from_secs(2);

/// How long after a stop request before the run is forced to end.
const ABORT_DELAY: Duration = Duration::from_secs(1);

/// How long to wait after dequeueing a start request before running.
///
/// Absorbs bursts of repeated start requests, such as a bouncing hardware
/// button.
const DEBOUNCE_DELAY: Duration = Duration::from_millis(20);

/// A ping diagnostic engine.
///
/// The engine owns a worker thread which executes ping runs one at a time
/// and two timers which wind a run down, either after the configured number
/// of echo requests has been sent or on demand via [`Ping::stop`].  Events
/// are published to the handler given at creation from the worker thread.
///
/// The engine is cheap to clone and a clone may be used to stop a run in
/// progress from another thread.  Dropping the last handle shuts the worker
/// and timers down.
pub struct Ping<S: Socket> {
    inner: Arc<PingInner>,
    phantom: PhantomData<fn() -> S>,
}

impl<S: Socket> Clone for Ping<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            phantom: PhantomData,
        }
    }
}

struct PingInner {
    flags: Arc<RunFlags>,
    tx: Sender<StartRequest>,
    config: Arc<Mutex<Option<PingConfig>>>,
    soft_stop: OneShotTimer,
    abort: OneShotTimer,
}

impl Drop for PingInner {
    fn drop(&mut self) {
        self.flags.request_abort();
        self.flags.set_running(false);
        self.soft_stop.shutdown();
        self.abort.shutdown();
    }
}

/// A queued request to begin a run.
struct StartRequest;

#[cfg(unix)]
impl Ping<SocketImpl> {
    /// Create a ping engine which publishes events to the given handler.
    pub fn create<F>(handler: F) -> Result<Self>
    where
        F: Fn(&PingEvent) + Send + 'static,
    {
        Self::create_custom(handler, SOFT_STOP_DELAY, ABORT_DELAY)
    }
}

impl<S: Socket + 'static> Ping<S> {
    /// Create an engine with the given stop timer delays.
    pub(crate) fn create_custom<F>(
        handler: F,
        soft_stop_delay: Duration,
        abort_delay: Duration,
    ) -> Result<Self>
    where
        F: Fn(&PingEvent) + Send + 'static,
    {
        let flags = Arc::new(RunFlags::new());
        let abort = {
            let flags = Arc::clone(&flags);
            OneShotTimer::spawn("ping-abort", abort_delay, move || {
                tracing::debug!("abort timer fired, ending run");
                flags.set_running(false);
            })
            .map_err(Error::SpawnFailed)?
        };
        let soft_stop = {
            let flags = Arc::clone(&flags);
            let abort = abort.clone();
            OneShotTimer::spawn("ping-stop", soft_stop_delay, move || {
                tracing::debug!("soft stop timer fired, draining");
                flags.request_abort();
                abort.start();
            })
            .map_err(Error::SpawnFailed)?
        };
        let (tx, rx) = bounded::<StartRequest>(QUEUE_DEPTH);
        let config = Arc::new(Mutex::new(None::<PingConfig>));
        {
            let flags = Arc::clone(&flags);
            let config = Arc::clone(&config);
            let soft_stop = soft_stop.clone();
            thread::Builder::new()
                .name(String::from("ping"))
                .spawn(move || {
                    let clock = SystemTickClock::default();
                    while let Ok(StartRequest) = rx.recv() {
                        thread::sleep(DEBOUNCE_DELAY);
                        let Some(config) = config.lock().clone() else {
                            continue;
                        };
                        run_probe::<S, _>(&config, &flags, &clock, &soft_stop, &handler);
                    }
                    tracing::debug!("ping worker thread exiting");
                })
                .map_err(Error::SpawnFailed)?;
        }
        Ok(Self {
            inner: Arc::new(PingInner {
                flags,
                tx,
                config,
                soft_stop,
                abort,
            }),
            phantom: PhantomData,
        })
    }

    /// Request a ping run with the given configuration.
    ///
    /// The request is ignored if a run is already in progress and dropped if
    /// the request queue is full.  Otherwise the run begins shortly on the
    /// worker thread.
    #[instrument(skip_all, fields(host = %config.host), level = "debug")]
    pub fn start(&self, config: PingConfig) {
        if self.inner.flags.is_running() {
            tracing::debug!("already running, start request ignored");
            return;
        }
        *self.inner.config.lock() = Some(config);
        if self.inner.tx.try_send(StartRequest).is_err() {
            tracing::debug!("request queue full, start request dropped");
        }
    }

    /// Request the run in progress to stop.
    ///
    /// Further echo requests are suppressed immediately and the run ends
    /// after a short drain window.  Idempotent and harmless when no run is
    /// in progress.
    #[instrument(skip(self), level = "debug")]
    pub fn stop(&self) {
        self.inner.flags.request_abort();
        self.inner.abort.start();
    }

    /// Returns true if a run is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.flags.is_running()
    }
}
