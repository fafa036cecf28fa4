use std::fmt::{Debug, Formatter};

/// The type of `ICMPv4` packet.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub enum IcmpType {
    EchoRequest,
    EchoReply,
    Other(u8),
}

impl IcmpType {
    #[must_use]
    pub const fn id(&self) -> u8 {
        match self {
            Self::EchoRequest => 8,
            Self::EchoReply => 0,
            Self::Other(id) => *id,
        }
    }
}

impl From<u8> for IcmpType {
    fn from(val: u8) -> Self {
        match val {
            8 => Self::EchoRequest,
            0 => Self::EchoReply,
            id => Self::Other(id),
        }
    }
}

/// The `ICMPv4` code.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct IcmpCode(pub u8);

impl From<u8> for IcmpCode {
    fn from(val: u8) -> Self {
        Self(val)
    }
}

const TYPE_OFFSET: usize = 0;
const CODE_OFFSET: usize = 1;
const CHECKSUM_OFFSET: usize = 2;
const IDENTIFIER_OFFSET: usize = 4;
const SEQUENCE_OFFSET: usize = 6;

pub mod echo_request {
    use super::{
        IcmpCode, IcmpType, CHECKSUM_OFFSET, CODE_OFFSET, IDENTIFIER_OFFSET, SEQUENCE_OFFSET,
        TYPE_OFFSET,
    };
    use crate::error::{Error, Result};
    use crate::fmt_payload;
    use std::fmt::{Debug, Formatter};

    /// Represents an `ICMPv4` `EchoRequest` packet.
    ///
    /// The internal representation is held in network byte order (big-endian)
    /// and all accessor methods take and return data in host byte order,
    /// converting as necessary for the given architecture.
    pub struct EchoRequestPacket<'a> {
        buf: &'a mut [u8],
    }

    impl<'a> EchoRequestPacket<'a> {
        pub fn new(packet: &'a mut [u8]) -> Result<Self> {
            if packet.len() >= Self::minimum_packet_size() {
                Ok(Self { buf: packet })
            } else {
                Err(Error::InsufficientPacketBuffer(
                    String::from("EchoRequestPacket"),
                    Self::minimum_packet_size(),
                    packet.len(),
                ))
            }
        }

        #[must_use]
        pub const fn minimum_packet_size() -> usize {
            8
        }

        #[must_use]
        pub fn get_icmp_type(&self) -> IcmpType {
            IcmpType::from(self.buf[TYPE_OFFSET])
        }

        #[must_use]
        pub fn get_icmp_code(&self) -> IcmpCode {
            IcmpCode::from(self.buf[CODE_OFFSET])
        }

        #[must_use]
        pub fn get_checksum(&self) -> u16 {
            u16::from_be_bytes([self.buf[CHECKSUM_OFFSET], self.buf[CHECKSUM_OFFSET + 1]])
        }

        #[must_use]
        pub fn get_identifier(&self) -> u16 {
            u16::from_be_bytes([self.buf[IDENTIFIER_OFFSET], self.buf[IDENTIFIER_OFFSET + 1]])
        }

        #[must_use]
        pub fn get_sequence(&self) -> u16 {
            u16::from_be_bytes([self.buf[SEQUENCE_OFFSET], self.buf[SEQUENCE_OFFSET + 1]])
        }

        pub fn set_icmp_type(&mut self, val: IcmpType) {
            self.buf[TYPE_OFFSET] = val.id();
        }

        pub fn set_icmp_code(&mut self, val: IcmpCode) {
            self.buf[CODE_OFFSET] = val.0;
        }

        pub fn set_checksum(&mut self, val: u16) {
            self.buf[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&val.to_be_bytes());
        }

        pub fn set_identifier(&mut self, val: u16) {
            self.buf[IDENTIFIER_OFFSET..IDENTIFIER_OFFSET + 2].copy_from_slice(&val.to_be_bytes());
        }

        pub fn set_sequence(&mut self, val: u16) {
            self.buf[SEQUENCE_OFFSET..SEQUENCE_OFFSET + 2].copy_from_slice(&val.to_be_bytes());
        }

        pub fn set_payload(&mut self, vals: &[u8]) {
            let offset = Self::minimum_packet_size();
            self.buf[offset..offset + vals.len()].copy_from_slice(vals);
        }

        #[must_use]
        pub fn packet(&self) -> &[u8] {
            self.buf
        }

        #[must_use]
        pub fn payload(&self) -> &[u8] {
            &self.buf[Self::minimum_packet_size()..]
        }
    }

    impl Debug for EchoRequestPacket<'_> {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("EchoRequestPacket")
                .field("icmp_type", &self.get_icmp_type())
                .field("icmp_code", &self.get_icmp_code())
                .field("checksum", &self.get_checksum())
                .field("identifier", &self.get_identifier())
                .field("sequence", &self.get_sequence())
                .field("payload", &fmt_payload(self.payload()))
                .finish()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use hex_literal::hex;

        #[test]
        fn test_build_echo_request() {
            let mut buf = [0_u8; EchoRequestPacket::minimum_packet_size() + 4];
            let mut packet = EchoRequestPacket::new(&mut buf).unwrap();
            packet.set_icmp_type(IcmpType::EchoRequest);
            packet.set_icmp_code(IcmpCode(0));
            packet.set_identifier(12345);
            packet.set_sequence(3);
            packet.set_payload(&[0xde, 0xad, 0xbe, 0xef]);
            assert_eq!(IcmpType::EchoRequest, packet.get_icmp_type());
            assert_eq!(IcmpCode(0), packet.get_icmp_code());
            assert_eq!(12345, packet.get_identifier());
            assert_eq!(3, packet.get_sequence());
            assert_eq!(&[0xde, 0xad, 0xbe, 0xef], packet.payload());
            assert_eq!(
                &hex!("08 00 00 00 30 39 00 03 de ad be ef"),
                packet.packet()
            );
        }

        #[test]
        fn test_checksum() {
            let mut buf = [0_u8; EchoRequestPacket::minimum_packet_size()];
            let mut packet = EchoRequestPacket::new(&mut buf).unwrap();
            packet.set_checksum(1999);
            assert_eq!(1999, packet.get_checksum());
            assert_eq!([0x07, 0xCF], packet.packet()[2..=3]);
        }

        #[test]
        fn test_new_insufficient_buffer() {
            const SIZE: usize = EchoRequestPacket::minimum_packet_size();
            let mut buf = [0_u8; SIZE - 1];
            let err = EchoRequestPacket::new(&mut buf).unwrap_err();
            assert_eq!(
                Error::InsufficientPacketBuffer(String::from("EchoRequestPacket"), SIZE, SIZE - 1),
                err
            );
        }
    }
}

/// Represents an `ICMPv4` `EchoReply` packet view.
///
/// The internal representation is held in network byte order (big-endian) and
/// all accessor methods return data in host byte order, converting as
/// necessary for the given architecture.
pub struct EchoReplyPacket<'a> {
    buf: &'a [u8],
}

impl<'a> EchoReplyPacket<'a> {
    pub fn new_view(packet: &'a [u8]) -> crate::error::Result<Self> {
        if packet.len() >= Self::minimum_packet_size() {
            Ok(Self { buf: packet })
        } else {
            Err(crate::error::Error::InsufficientPacketBuffer(
                String::from("EchoReplyPacket"),
                Self::minimum_packet_size(),
                packet.len(),
            ))
        }
    }

    #[must_use]
    pub const fn minimum_packet_size() -> usize {
        8
    }

    #[must_use]
    pub fn get_icmp_type(&self) -> IcmpType {
        IcmpType::from(self.buf[TYPE_OFFSET])
    }

    #[must_use]
    pub fn get_icmp_code(&self) -> IcmpCode {
        IcmpCode::from(self.buf[CODE_OFFSET])
    }

    #[must_use]
    pub fn get_checksum(&self) -> u16 {
        u16::from_be_bytes([self.buf[CHECKSUM_OFFSET], self.buf[CHECKSUM_OFFSET + 1]])
    }

    #[must_use]
    pub fn get_identifier(&self) -> u16 {
        u16::from_be_bytes([self.buf[IDENTIFIER_OFFSET], self.buf[IDENTIFIER_OFFSET + 1]])
    }

    #[must_use]
    pub fn get_sequence(&self) -> u16 {
        u16::from_be_bytes([self.buf[SEQUENCE_OFFSET], self.buf[SEQUENCE_OFFSET + 1]])
    }

    #[must_use]
    pub fn packet(&self) -> &[u8] {
        self.buf
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.buf[Self::minimum_packet_size()..]
    }
}

impl Debug for EchoReplyPacket<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EchoReplyPacket")
            .field("icmp_type", &self.get_icmp_type())
            .field("icmp_code", &self.get_icmp_code())
            .field("checksum", &self.get_checksum())
            .field("identifier", &self.get_identifier())
            .field("sequence", &self.get_sequence())
            .field("payload", &crate::fmt_payload(self.payload()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use hex_literal::hex;

    #[test]
    fn test_icmp_type() {
        assert_eq!(IcmpType::EchoRequest, IcmpType::from(8));
        assert_eq!(IcmpType::EchoReply, IcmpType::from(0));
        assert_eq!(IcmpType::Other(11), IcmpType::from(11));
        assert_eq!(8, IcmpType::EchoRequest.id());
        assert_eq!(0, IcmpType::EchoReply.id());
        assert_eq!(255, IcmpType::Other(255).id());
    }

    #[test]
    fn test_view_echo_reply() {
        let buf = hex!("00 00 45 da 30 39 00 02 00 00 01 c8");
        let packet = EchoReplyPacket::new_view(&buf).unwrap();
        assert_eq!(IcmpType::EchoReply, packet.get_icmp_type());
        assert_eq!(IcmpCode(0), packet.get_icmp_code());
        assert_eq!(0x45da, packet.get_checksum());
        assert_eq!(12345, packet.get_identifier());
        assert_eq!(2, packet.get_sequence());
        assert_eq!(&hex!("00 00 01 c8"), packet.payload());
    }

    #[test]
    fn test_new_view_insufficient_buffer() {
        const SIZE: usize = EchoReplyPacket::minimum_packet_size();
        let buf = [0_u8; SIZE - 1];
        let err = EchoReplyPacket::new_view(&buf).unwrap_err();
        assert_eq!(
            Error::InsufficientPacketBuffer(String::from("EchoReplyPacket"), SIZE, SIZE - 1),
            err
        );
    }
}
