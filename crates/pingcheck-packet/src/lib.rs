//! Wire format parsing and building for ICMP echo diagnostics.
//!
//! The following packets are supported:
//! - `ICMPv4` echo request & echo reply
//! - `ICMPv6` echo request & echo reply
//! - `IPv4` header (read-only view)
//! - `IPv6` header (read-only view)
//!
//! # Endianness
//!
//! The internal representation is held in network byte order (big-endian) and
//! all accessor methods take and return data in host byte order, converting as
//! necessary for the given architecture.
//!
//! # Example
//!
//! The following example builds an `ICMPv4` echo request packet:
//!
//! ```rust
//! # fn main() -> Result<(), pingcheck_packet::error::Error> {
//! use pingcheck_packet::checksum::icmp_ipv4_checksum;
//! use pingcheck_packet::icmpv4::echo_request::EchoRequestPacket;
//! use pingcheck_packet::icmpv4::{IcmpCode, IcmpType};
//!
//! let mut buf = [0; EchoRequestPacket::minimum_packet_size()];
//! let mut icmp = EchoRequestPacket::new(&mut buf)?;
//! icmp.set_icmp_type(IcmpType::EchoRequest);
//! icmp.set_icmp_code(IcmpCode(0));
//! icmp.set_identifier(1234);
//! icmp.set_sequence(10);
//! icmp.set_checksum(icmp_ipv4_checksum(icmp.packet()));
//! assert_eq!(icmp.packet(), &hex_literal::hex!("08 00 f3 23 04 d2 00 0a"));
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

/// Packet errors.
pub mod error;

/// The Internet checksum.
pub mod checksum;

/// `ICMPv4` echo packets.
pub mod icmpv4;

/// `ICMPv6` echo packets.
pub mod icmpv6;

/// `IPv4` header view.
pub mod ipv4;

/// `IPv6` header view.
pub mod ipv6;

/// The IP packet next layer protocol.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum IpProtocol {
    Icmp,
    IcmpV6,
    Other(u8),
}

impl IpProtocol {
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Icmp => 1,
            Self::IcmpV6 => 58,
            Self::Other(id) => id,
        }
    }
}

impl From<u8> for IpProtocol {
    fn from(id: u8) -> Self {
        match id {
            1 => Self::Icmp,
            58 => Self::IcmpV6,
            p => Self::Other(p),
        }
    }
}

/// Format a payload as a hexadecimal string.
#[must_use]
pub fn fmt_payload(bytes: &[u8]) -> String {
    use itertools::Itertools as _;
    format!("{:02x}", bytes.iter().format(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_protocol() {
        assert_eq!(IpProtocol::Icmp, IpProtocol::from(1));
        assert_eq!(IpProtocol::IcmpV6, IpProtocol::from(58));
        assert_eq!(IpProtocol::Other(17), IpProtocol::from(17));
        assert_eq!(1, IpProtocol::Icmp.id());
        assert_eq!(58, IpProtocol::IcmpV6.id());
        assert_eq!(255, IpProtocol::Other(255).id());
    }

    #[test]
    fn test_fmt_payload() {
        assert_eq!("00 01 0a ff", fmt_payload(&[0x00, 0x01, 0x0a, 0xff]));
    }
}
