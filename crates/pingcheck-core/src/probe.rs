use crate::clock::{Tick, TickClock, MILLIS_PER_TICK};
use crate::codec::{self, ECHO_PACKET_SIZE, MAX_PACKET_SIZE, PAYLOAD_SIZE};
use crate::config::PingConfig;
use crate::net::socket::Socket;
use crate::report::PingEvent;
use crate::resolve::resolve;
use crate::state::RunFlags;
use crate::stats::Stats;
use crate::timer::OneShotTimer;
use crate::types::Sequence;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::instrument;

/// How long to wait for the socket to become readable per loop iteration.
///
/// One tick, so that send pacing is not delayed by more than the clock can
/// measure.
const READ_TIMEOUT: Duration = Duration::from_millis(MILLIS_PER_TICK as u64);

/// Execute one complete ping run.
///
/// Resolves the target, opens the transport and runs the probe loop to
/// completion, publishing events along the way.  A resolution or transport
/// failure ends the run before any probe is sent.
#[instrument(skip_all, fields(host = %config.host), level = "debug")]
pub(crate) fn run_probe<S: Socket, C: TickClock>(
    config: &PingConfig,
    flags: &RunFlags,
    clock: &C,
    soft_stop: &OneShotTimer,
    publish: &dyn Fn(&PingEvent),
) {
    let (dest, socket) = match resolve::<S>(&config.host) {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::warn!(%err, "ping run could not begin");
            publish(&PingEvent::Failed {
                host: config.host.clone(),
                reason: err.to_string(),
            });
            return;
        }
    };
    publish(&PingEvent::Started {
        host: config.host.clone(),
        addr: dest,
        payload_size: PAYLOAD_SIZE,
    });
    let stats = ProbeRun::new(config, clock, soft_stop, dest, socket).run(flags, publish);
    publish(&PingEvent::Summary(stats));
}

/// The state of a single run of the probe loop.
pub(crate) struct ProbeRun<'a, S, C> {
    config: &'a PingConfig,
    clock: &'a C,
    soft_stop: &'a OneShotTimer,
    dest: IpAddr,
    socket: S,
    stats: Stats,
    last_send: Option<Tick>,
}

impl<'a, S: Socket, C: TickClock> ProbeRun<'a, S, C> {
    pub fn new(
        config: &'a PingConfig,
        clock: &'a C,
        soft_stop: &'a OneShotTimer,
        dest: IpAddr,
        socket: S,
    ) -> Self {
        Self {
            config,
            clock,
            soft_stop,
            dest,
            socket,
            stats: Stats::default(),
            last_send: None,
        }
    }

    /// Run the probe loop until the abort timer clears the running flag.
    ///
    /// Each iteration sends the next echo request if one is due and then
    /// drains any replies which arrived, with a short bounded wait so that
    /// the loop never blocks indefinitely.
    pub fn run(mut self, flags: &RunFlags, publish: &dyn Fn(&PingEvent)) -> Stats {
        flags.clear_abort();
        flags.set_running(true);
        while flags.is_running() {
            if !flags.abort_requested() && self.send_due() {
                self.send_one();
                self.last_send = Some(self.clock.now());
            }
            self.recv_ready(publish);
        }
        self.soft_stop.cancel();
        if let Err(err) = self.socket.shutdown() {
            tracing::debug!(%err, "failed to shutdown socket");
        }
        self.stats
    }

    fn send_due(&self) -> bool {
        self.last_send.map_or(true, |last| {
            u128::from(self.clock.now().since(last)) * u128::from(MILLIS_PER_TICK)
                >= self.config.interval.as_millis()
        })
    }

    /// Send the next echo request unless the configured count is exhausted.
    ///
    /// Once the final request has been sent the soft stop timer is armed to
    /// end the run after the remaining replies have had time to arrive.  A
    /// send failure is logged and not counted.
    fn send_one(&mut self) {
        if self.limit_reached() {
            return;
        }
        let sequence = Sequence(self.stats.sent as u16);
        let mut buf = [0_u8; ECHO_PACKET_SIZE];
        let size = match codec::encode_echo_request(&mut buf, sequence, self.clock.now(), self.dest)
        {
            Ok(size) => size,
            Err(err) => {
                tracing::error!(%err, "failed to encode echo request");
                return;
            }
        };
        match self.socket.send_to(&buf[..size], SocketAddr::new(self.dest, 0)) {
            Ok(()) => {
                self.stats.sent += 1;
                tracing::debug!(sequence = sequence.0, "echo request sent");
                if self.limit_reached() {
                    self.soft_stop.start();
                }
            }
            Err(err) => {
                tracing::debug!(%err, sequence = sequence.0, "failed to send echo request");
            }
        }
    }

    fn limit_reached(&self) -> bool {
        self.config.count != 0 && self.stats.sent >= self.config.count
    }

    /// Drain every reply which is already waiting on the socket.
    fn recv_ready(&mut self, publish: &dyn Fn(&PingEvent)) {
        loop {
            match self.socket.is_readable(READ_TIMEOUT) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    tracing::debug!(%err, "failed to await replies");
                    break;
                }
            }
            let mut buf = [0_u8; MAX_PACKET_SIZE];
            let (len, from) = match self.socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(err) => {
                    tracing::debug!(%err, "failed to receive reply");
                    break;
                }
            };
            let recv = self.clock.now();
            let Some(from) = from else {
                continue;
            };
            if let Some(reply) = codec::decode_echo_reply(&buf[..len], recv, from.ip(), self.dest)
            {
                self.stats.received += 1;
                publish(&PingEvent::Reply(reply));
            }
        }
    }
}
