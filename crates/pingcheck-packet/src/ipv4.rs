use crate::error::{Error, Result};
use crate::IpProtocol;
use std::fmt::{Debug, Formatter};
use std::net::Ipv4Addr;

const VERSION_OFFSET: usize = 0;
const IHL_OFFSET: usize = 0;
const TOTAL_LENGTH_OFFSET: usize = 2;
const TIME_TO_LIVE_OFFSET: usize = 8;
const PROTOCOL_OFFSET: usize = 9;
const SOURCE_OFFSET: usize = 12;
const DESTINATION_OFFSET: usize = 16;

/// A read-only view over an `IPv4` packet.
///
/// The internal representation is held in network byte order (big-endian) and
/// all accessor methods return data in host byte order, converting as
/// necessary for the given architecture.
pub struct Ipv4Packet<'a> {
    buf: &'a [u8],
}

impl<'a> Ipv4Packet<'a> {
    pub fn new_view(packet: &'a [u8]) -> Result<Self> {
        if packet.len() >= Self::minimum_packet_size() {
            Ok(Self { buf: packet })
        } else {
            Err(Error::InsufficientPacketBuffer(
                String::from("Ipv4Packet"),
                Self::minimum_packet_size(),
                packet.len(),
            ))
        }
    }

    #[must_use]
    pub const fn minimum_packet_size() -> usize {
        20
    }

    #[must_use]
    pub fn get_version(&self) -> u8 {
        (self.buf[VERSION_OFFSET] & 0xf0) >> 4
    }

    /// The header length in 32-bit words.
    #[must_use]
    pub fn get_header_length(&self) -> u8 {
        self.buf[IHL_OFFSET] & 0xf
    }

    #[must_use]
    pub fn get_total_length(&self) -> u16 {
        u16::from_be_bytes([self.buf[TOTAL_LENGTH_OFFSET], self.buf[TOTAL_LENGTH_OFFSET + 1]])
    }

    #[must_use]
    pub fn get_ttl(&self) -> u8 {
        self.buf[TIME_TO_LIVE_OFFSET]
    }

    #[must_use]
    pub fn get_protocol(&self) -> IpProtocol {
        IpProtocol::from(self.buf[PROTOCOL_OFFSET])
    }

    #[must_use]
    pub fn get_source(&self) -> Ipv4Addr {
        Ipv4Addr::new(
            self.buf[SOURCE_OFFSET],
            self.buf[SOURCE_OFFSET + 1],
            self.buf[SOURCE_OFFSET + 2],
            self.buf[SOURCE_OFFSET + 3],
        )
    }

    #[must_use]
    pub fn get_destination(&self) -> Ipv4Addr {
        Ipv4Addr::new(
            self.buf[DESTINATION_OFFSET],
            self.buf[DESTINATION_OFFSET + 1],
            self.buf[DESTINATION_OFFSET + 2],
            self.buf[DESTINATION_OFFSET + 3],
        )
    }

    /// The payload after the header, as given by the header length field.
    ///
    /// Returns `None` if the declared header length exceeds the buffer.
    #[must_use]
    pub fn payload(&self) -> Option<&[u8]> {
        let header_bytes = usize::from(self.get_header_length()) * 4;
        self.buf.get(header_bytes..)
    }
}

impl Debug for Ipv4Packet<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ipv4Packet")
            .field("version", &self.get_version())
            .field("header_length", &self.get_header_length())
            .field("total_length", &self.get_total_length())
            .field("ttl", &self.get_ttl())
            .field("protocol", &self.get_protocol())
            .field("source", &self.get_source())
            .field("destination", &self.get_destination())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_view_header() {
        let buf = hex!("45 00 00 3c 1c 46 40 00 40 01 b1 e6 c0 a8 00 68 c0 a8 00 01");
        let packet = Ipv4Packet::new_view(&buf).unwrap();
        assert_eq!(4, packet.get_version());
        assert_eq!(5, packet.get_header_length());
        assert_eq!(60, packet.get_total_length());
        assert_eq!(64, packet.get_ttl());
        assert_eq!(IpProtocol::Icmp, packet.get_protocol());
        assert_eq!(Ipv4Addr::new(192, 168, 0, 104), packet.get_source());
        assert_eq!(Ipv4Addr::new(192, 168, 0, 1), packet.get_destination());
        assert!(packet.payload().unwrap().is_empty());
    }

    #[test]
    fn test_payload_offset() {
        let mut buf = [0_u8; 28];
        buf[0] = 0x45;
        buf[20] = 0xab;
        let packet = Ipv4Packet::new_view(&buf).unwrap();
        assert_eq!(8, packet.payload().unwrap().len());
        assert_eq!(0xab, packet.payload().unwrap()[0]);
    }

    #[test]
    fn test_payload_declared_length_exceeds_buffer() {
        let mut buf = [0_u8; 20];
        buf[0] = 0x4f;
        let packet = Ipv4Packet::new_view(&buf).unwrap();
        assert!(packet.payload().is_none());
    }

    #[test]
    fn test_new_view_insufficient_buffer() {
        const SIZE: usize = Ipv4Packet::minimum_packet_size();
        let buf = [0_u8; SIZE - 1];
        let err = Ipv4Packet::new_view(&buf).unwrap_err();
        assert_eq!(
            Error::InsufficientPacketBuffer(String::from("Ipv4Packet"), SIZE, SIZE - 1),
            err
        );
    }
}
