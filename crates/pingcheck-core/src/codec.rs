use crate::clock::{Rtt, Tick};
use crate::error::Result;
use crate::types::Sequence;
use pingcheck_packet::checksum::icmp_ipv4_checksum;
use pingcheck_packet::icmpv4;
use pingcheck_packet::icmpv6;
use pingcheck_packet::ipv4::Ipv4Packet;
use pingcheck_packet::ipv6::Ipv6Packet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// The identifier carried by every echo request we send.
///
/// Replies whose identifier differs are not ours and are discarded.
pub const PING_ID: u16 = 12345;

/// The size of the echo request payload in bytes.
pub const PAYLOAD_SIZE: usize = 32;

/// The size of the `ICMP` echo header in bytes.
pub const ECHO_HEADER_SIZE: usize = 8;

/// The size of a complete echo request in bytes.
pub const ECHO_PACKET_SIZE: usize = ECHO_HEADER_SIZE + PAYLOAD_SIZE;

/// The size of the buffer used to receive replies.
pub const MAX_PACKET_SIZE: usize = 256;

/// The filler byte for the payload after the timestamp.
const FILLER: u8 = 0xff;

/// A decoded echo reply which matched an outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    /// The number of `ICMP` payload bytes received.
    pub bytes: usize,
    /// The address the reply was received from.
    pub addr: IpAddr,
    /// The sequence number echoed back by the peer.
    pub sequence: Sequence,
    /// The `TTL` (`IPv4`) or hop limit (`IPv6`) of the reply.
    pub hops: u8,
    /// The measured round trip time.
    pub rtt: Rtt,
}

/// Encode an echo request for the family of `dest` into `buf`.
///
/// The payload starts with the send timestamp in network byte order followed
/// by filler bytes.  For `IPv4` the Internet checksum is computed over the
/// full message, for `IPv6` the checksum is left as zero as it is computed
/// by the kernel over the pseudo-header.
///
/// Returns the number of bytes encoded.
pub fn encode_echo_request(
    buf: &mut [u8; ECHO_PACKET_SIZE],
    sequence: Sequence,
    sent: Tick,
    dest: IpAddr,
) -> Result<usize> {
    let mut payload = [FILLER; PAYLOAD_SIZE];
    payload[..4].copy_from_slice(&sent.0.to_be_bytes());
    match dest {
        IpAddr::V4(_) => {
            let mut packet = icmpv4::echo_request::EchoRequestPacket::new(buf)?;
            packet.set_icmp_type(icmpv4::IcmpType::EchoRequest);
            packet.set_icmp_code(icmpv4::IcmpCode(0));
            packet.set_identifier(PING_ID);
            packet.set_sequence(sequence.0);
            packet.set_payload(&payload);
            let checksum = icmp_ipv4_checksum(packet.packet());
            packet.set_checksum(checksum);
        }
        IpAddr::V6(_) => {
            let mut packet = icmpv6::echo_request::EchoRequestPacket::new(buf)?;
            packet.set_icmp_type(icmpv6::IcmpType::EchoRequest);
            packet.set_icmp_code(icmpv6::IcmpCode(0));
            packet.set_identifier(PING_ID);
            packet.set_sequence(sequence.0);
            packet.set_payload(&payload);
        }
    }
    Ok(ECHO_PACKET_SIZE)
}

/// Decode a received datagram as an echo reply to one of our requests.
///
/// The datagram includes the outer `IP` header, which is stripped according
/// to the family of the target: by the declared header length for `IPv4` and
/// by the fixed 40 byte header for `IPv6`.
///
/// Returns `None` for anything which is not a well-formed echo reply
/// carrying our identifier, including truncated packets, other `ICMP`
/// message types and replies to other processes.
pub fn decode_echo_reply(buf: &[u8], recv: Tick, src: IpAddr, dest: IpAddr) -> Option<Reply> {
    match (src, dest) {
        (IpAddr::V4(src), IpAddr::V4(_)) => decode_ipv4(buf, recv, src),
        (IpAddr::V6(src), IpAddr::V6(_)) => decode_ipv6(buf, recv, src),
        _ => None,
    }
}

fn decode_ipv4(buf: &[u8], recv: Tick, src: Ipv4Addr) -> Option<Reply> {
    let ip = Ipv4Packet::new_view(buf).ok()?;
    let icmp = icmpv4::EchoReplyPacket::new_view(ip.payload()?).ok()?;
    if icmp.get_icmp_type() != icmpv4::IcmpType::EchoReply || icmp.get_identifier() != PING_ID {
        return None;
    }
    reply(
        icmp.payload(),
        recv,
        IpAddr::V4(src),
        Sequence(icmp.get_sequence()),
        ip.get_ttl(),
    )
}

fn decode_ipv6(buf: &[u8], recv: Tick, src: Ipv6Addr) -> Option<Reply> {
    let ip = Ipv6Packet::new_view(buf).ok()?;
    let icmp = icmpv6::EchoReplyPacket::new_view(ip.payload()).ok()?;
    if icmp.get_icmp_type() != icmpv6::IcmpType::EchoReply || icmp.get_identifier() != PING_ID {
        return None;
    }
    reply(
        icmp.payload(),
        recv,
        IpAddr::V6(src),
        Sequence(icmp.get_sequence()),
        ip.get_hop_limit(),
    )
}

fn reply(
    payload: &[u8],
    recv: Tick,
    addr: IpAddr,
    sequence: Sequence,
    hops: u8,
) -> Option<Reply> {
    let sent = Tick(u32::from_be_bytes(payload.get(..4)?.try_into().ok()?));
    Some(Reply {
        bytes: payload.len(),
        addr,
        sequence,
        hops,
        rtt: Rtt::from_tick_delta(recv.since(sent)),
    })
}
