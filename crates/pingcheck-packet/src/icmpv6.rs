use std::fmt::{Debug, Formatter};

/// The type of `ICMPv6` packet.
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
            Self::EchoRequest => 128,
            Self::EchoReply => 129,
            Self::Other(id) => *id,
        }
    }
}

impl From<u8> for IcmpType {
    fn from(val: u8) -> Self {
        match val {
            128 => Self::EchoRequest,
            129 => Self::EchoReply,
            id => Self::Other(id),
        }
    }
}

/// The `ICMPv6` code.
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

    /// Represents an `ICMPv6` `EchoRequest` packet.
    ///
    /// The checksum is left to the transport: raw `ICMPv6` sockets compute the
    /// pseudo-header checksum when the packet is sent.
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
            let mut buf = [0_u8; EchoRequestPacket::minimum_packet_size()];
            let mut packet = EchoRequestPacket::new(&mut buf).unwrap();
            packet.set_icmp_type(IcmpType::EchoRequest);
            packet.set_icmp_code(IcmpCode(0));
            packet.set_identifier(12345);
            packet.set_sequence(1);
            assert_eq!(IcmpType::EchoRequest, packet.get_icmp_type());
            assert_eq!(0, packet.get_checksum());
            assert_eq!(&hex!("80 00 00 00 30 39 00 01"), packet.packet());
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

/// Represents an `ICMPv6` `EchoReply` packet view.
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
    use hex_literal::hex;

    #[test]
    fn test_icmp_type() {
        assert_eq!(IcmpType::EchoRequest, IcmpType::from(128));
        assert_eq!(IcmpType::EchoReply, IcmpType::from(129));
        assert_eq!(IcmpType::Other(1), IcmpType::from(1));
        assert_eq!(128, IcmpType::EchoRequest.id());
        assert_eq!(129, IcmpType::EchoReply.id());
    }

    #[test]
    fn test_view_echo_reply() {
        let buf = hex!("81 00 12 34 30 39 00 05 00 00 00 0a");
        let packet = EchoReplyPacket::new_view(&buf).unwrap();
        assert_eq!(IcmpType::EchoReply, packet.get_icmp_type());
        assert_eq!(IcmpCode(0), packet.get_icmp_code());
        assert_eq!(0x1234, packet.get_checksum());
        assert_eq!(12345, packet.get_identifier());
        assert_eq!(5, packet.get_sequence());
        assert_eq!(&hex!("00 00 00 0a"), packet.payload());
    }
}
