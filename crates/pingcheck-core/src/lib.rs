//! Pingcheck - An `ICMP` ping diagnostic engine.
//!
//! This crate provides an asynchronous ping engine which probes a target
//! host with `ICMP` echo requests and reports the outcome as a stream of
//! events.  Runs are executed one at a time on a dedicated worker thread
//! and may be started and stopped from any thread via a cheaply cloneable
//! handle.
//!
//! Both `IPv4` and `IPv6` targets are supported, either as literal
//! addresses or as hostnames to be resolved.  Round trip times are measured
//! with a coarse tick clock and reported with tick resolution.
//!
//! Raw `ICMP` sockets are used and so the process typically requires
//! elevated privileges (`CAP_NET_RAW` on Linux).
//!
//! # Example
//!
//! The following example creates an engine which prints each event and
//! starts a run of five probes, one per second:
//!
//! ```no_run
//! # fn main() -> Result<(), pingcheck_core::Error> {
//! use pingcheck_core::{Ping, PingConfig};
//! use std::time::Duration;
//!
//! let ping = Ping::create(|event| println!("{event}"))?;
//! ping.start(PingConfig::new("example.com").count(5));
//! std::thread::sleep(Duration::from_secs(10));
//! # Ok(())
//! # }
//! ```
//!
//! # See Also
//!
//! - [`Ping::create`] - Create an engine with an event handler.
//! - [`Ping::start`] - Request a ping run.
//! - [`Ping::stop`] - Stop the run in progress.
#![warn(clippy::all, clippy::pedantic, rust_2018_idioms)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc
)]
#![deny(unsafe_code)]

mod clock;
mod codec;
mod config;
mod engine;
mod error;
mod net;
mod probe;
mod report;
mod resolve;
mod state;
mod stats;
mod timer;
mod types;

pub use clock::{Rtt, SystemTickClock, Tick, TickClock, MILLIS_PER_TICK, TICKS_PER_SECOND};
pub use codec::{Reply, ECHO_PACKET_SIZE, PAYLOAD_SIZE, PING_ID};
pub use config::{defaults, PingConfig};
pub use engine::Ping;
pub use error::{Error, IoError, IoOperation, IoResult, Result};
pub use net::socket::Socket;
#[cfg(unix)]
pub use net::SocketImpl;
pub use report::PingEvent;
pub use stats::Stats;
pub use types::Sequence;
