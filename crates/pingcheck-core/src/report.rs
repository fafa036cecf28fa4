use crate::codec::Reply;
use crate::stats::Stats;
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::str::FromStr;

/// An event published during a ping run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PingEvent {
    /// The target was resolved and the run is about to begin.
    Started {
        /// The target host as configured.
        host: String,
        /// The resolved address.
        addr: IpAddr,
        /// The echo request payload size in bytes.
        payload_size: usize,
    },
    /// An echo reply was received.
    Reply(Reply),
    /// The run could not begin.
    Failed {
        /// The target host as configured.
        host: String,
        /// A human readable reason.
        reason: String,
    },
    /// The run has ended and these are the final counters.
    Summary(Stats),
}

impl Display for PingEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Started {
                host,
                addr,
                payload_size,
            } => {
                // Don't repeat the address when the target was a literal.
                if IpAddr::from_str(host) == Ok(*addr) {
                    write!(f, "PING {host}: {payload_size} bytes data in ICMP packets")
                } else {
                    write!(
                        f,
                        "PING {host}({addr}): {payload_size} bytes data in ICMP packets"
                    )
                }
            }
            Self::Reply(reply) => {
                write!(
                    f,
                    "{} bytes from {}: icmp_seq={} ttl={} {}",
                    reply.bytes,
                    reply.addr,
                    reply.sequence.0,
                    reply.hops,
                    reply.rtt
                )
            }
            Self::Failed { host, reason } => {
                write!(f, "ping {host} failed: {reason}")
            }
            Self::Summary(stats) => {
                write!(f, "--- ping statistics ---\n{stats}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Rtt;
    use crate::types::Sequence;
    use std::net::Ipv4Addr;

    #[test]
    fn test_display_started_literal() {
        let event = PingEvent::Started {
            host: String::from("10.0.0.1"),
            addr: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            payload_size: 32,
        };
        assert_eq!(
            "PING 10.0.0.1: 32 bytes data in ICMP packets",
            event.to_string()
        );
    }

    #[test]
    fn test_display_started_hostname() {
        let event = PingEvent::Started {
            host: String::from("example.com"),
            addr: IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
            payload_size: 32,
        };
        assert_eq!(
            "PING example.com(93.184.216.34): 32 bytes data in ICMP packets",
            event.to_string()
        );
    }

    #[test]
    fn test_display_reply() {
        let event = PingEvent::Reply(Reply {
            bytes: 32,
            addr: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            sequence: Sequence(3),
            hops: 64,
            rtt: Rtt::Millis(30),
        });
        assert_eq!(
            "32 bytes from 10.0.0.1: icmp_seq=3 ttl=64 rtt=30 ms",
            event.to_string()
        );
    }

    #[test]
    fn test_display_reply_sub_tick() {
        let event = PingEvent::Reply(Reply {
            bytes: 32,
            addr: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            sequence: Sequence(0),
            hops: 64,
            rtt: Rtt::SubTick,
        });
        assert_eq!(
            "32 bytes from 10.0.0.1: icmp_seq=0 ttl=64 rtt<10 ms",
            event.to_string()
        );
    }

    #[test]
    fn test_display_failed() {
        let event = PingEvent::Failed {
            host: String::from("nosuch.invalid"),
            reason: String::from("could not resolve host nosuch.invalid"),
        };
        assert_eq!(
            "ping nosuch.invalid failed: could not resolve host nosuch.invalid",
            event.to_string()
        );
    }

    #[test]
    fn test_display_summary() {
        let event = PingEvent::Summary(Stats {
            sent: 4,
            received: 2,
        });
        assert_eq!(
            "--- ping statistics ---\n4 packets transmitted, 2 received, 2(50%) lost",
            event.to_string()
        );
    }
}
