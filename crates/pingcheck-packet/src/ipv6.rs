use crate::error::{Error, Result};
use crate::IpProtocol;
use std::fmt::{Debug, Formatter};
use std::net::Ipv6Addr;

const VERSION_OFFSET: usize = 0;
const PAYLOAD_LENGTH_OFFSET: usize = 4;
const NEXT_HEADER_OFFSET: usize = 6;
const HOP_LIMIT_OFFSET: usize = 7;
const SOURCE_OFFSET: usize = 8;
const DESTINATION_OFFSET: usize = 24;

/// A read-only view over an `IPv6` packet.
///
/// The internal representation is held in network byte order (big-endian) and
/// all accessor methods return data in host byte order, converting as
/// necessary for the given architecture.
pub struct Ipv6Packet<'a> {
    buf: &'a [u8],
}

impl<'a> Ipv6Packet<'a> {
    pub fn new_view(packet: &'a [u8]) -> Result<Self> {
        if packet.len() >= Self::minimum_packet_size() {
            Ok(Self { buf: packet })
        } else {
            Err(Error::InsufficientPacketBuffer(
                String::from("Ipv6Packet"),
                Self::minimum_packet_size(),
                packet.len(),
            ))
        }
    }

    #[must_use]
    pub const fn minimum_packet_size() -> usize {
        40
    }

    #[must_use]
    pub fn get_version(&self) -> u8 {
        (self.buf[VERSION_OFFSET] & 0xf0) >> 4
    }

    #[must_use]
    pub fn get_payload_length(&self) -> u16 {
        u16::from_be_bytes([
            self.buf[PAYLOAD_LENGTH_OFFSET],
            self.buf[PAYLOAD_LENGTH_OFFSET + 1],
        ])
    }

    #[must_use]
    pub fn get_next_header(&self) -> IpProtocol {
        IpProtocol::from(self.buf[NEXT_HEADER_OFFSET])
    }

    #[must_use]
    pub fn get_hop_limit(&self) -> u8 {
        self.buf[HOP_LIMIT_OFFSET]
    }

    #[must_use]
    pub fn get_source(&self) -> Ipv6Addr {
        let mut octets = [0_u8; 16];
        octets.copy_from_slice(&self.buf[SOURCE_OFFSET..SOURCE_OFFSET + 16]);
        Ipv6Addr::from(octets)
    }

    #[must_use]
    pub fn get_destination(&self) -> Ipv6Addr {
        let mut octets = [0_u8; 16];
        octets.copy_from_slice(&self.buf[DESTINATION_OFFSET..DESTINATION_OFFSET + 16]);
        Ipv6Addr::from(octets)
    }

    /// The payload after the fixed 40 byte header.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.buf[Self::minimum_packet_size()..]
    }
}

impl Debug for Ipv6Packet<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ipv6Packet")
            .field("version", &self.get_version())
            .field("payload_length", &self.get_payload_length())
            .field("next_header", &self.get_next_header())
            .field("hop_limit", &self.get_hop_limit())
            .field("source", &self.get_source())
            .field("destination", &self.get_destination())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn header(payload_length: u16, next_header: u8, hop_limit: u8) -> [u8; 40] {
        let mut buf = [0_u8; 40];
        buf[0] = 0x60;
        buf[4..6].copy_from_slice(&payload_length.to_be_bytes());
        buf[6] = next_header;
        buf[7] = hop_limit;
        buf[8..24].copy_from_slice(&Ipv6Addr::from_str("fe80::1").unwrap().octets());
        buf[24..40].copy_from_slice(&Ipv6Addr::from_str("fe80::2").unwrap().octets());
        buf
    }

    #[test]
    fn test_view_header() {
        let buf = header(40, 58, 64);
        let packet = Ipv6Packet::new_view(&buf).unwrap();
        assert_eq!(6, packet.get_version());
        assert_eq!(40, packet.get_payload_length());
        assert_eq!(IpProtocol::IcmpV6, packet.get_next_header());
        assert_eq!(64, packet.get_hop_limit());
        assert_eq!(Ipv6Addr::from_str("fe80::1").unwrap(), packet.get_source());
        assert_eq!(
            Ipv6Addr::from_str("fe80::2").unwrap(),
            packet.get_destination()
        );
        assert!(packet.payload().is_empty());
    }

    #[test]
    fn test_payload() {
        let mut buf = [0_u8; 48];
        buf[..40].copy_from_slice(&header(8, 58, 255));
        buf[40] = 0x81;
        let packet = Ipv6Packet::new_view(&buf).unwrap();
        assert_eq!(8, packet.payload().len());
        assert_eq!(0x81, packet.payload()[0]);
    }

    #[test]
    fn test_new_view_insufficient_buffer() {
        const SIZE: usize = Ipv6Packet::minimum_packet_size();
        let buf = [0_u8; SIZE - 1];
        let err = Ipv6Packet::new_view(&buf).unwrap_err();
        assert_eq!(
            Error::InsufficientPacketBuffer(String::from("Ipv6Packet"), SIZE, SIZE - 1),
            err
        );
    }
}
