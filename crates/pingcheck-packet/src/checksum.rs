//! The Internet checksum for `ICMP` over IPv4.
//!
//! The `ICMPv6` checksum is not computed here as it covers an IPv6
//! pseudo-header and is filled in by the transport when sending over a raw
//! `ICMPv6` socket.

/// Calculate the checksum for an `IPv4` `ICMP` packet.
///
/// The checksum field of the packet must be zeroed before calling this
/// function.  All 16-bit big-endian words are summed with one's-complement
/// addition, a trailing odd byte is treated as the high byte of a
/// zero-extended word, the accumulated carries are folded back twice and the
/// result is complemented.
#[must_use]
pub fn icmp_ipv4_checksum(data: &[u8]) -> u16 {
    if data.is_empty() {
        return 0;
    }
    finalize_checksum(sum_be_words(data))
}

fn sum_be_words(data: &[u8]) -> u32 {
    let mut sum = 0u32;
    let mut chunks = data.chunks_exact(2);
    for word in chunks.by_ref() {
        sum += u32::from(u16::from_be_bytes([word[0], word[1]]));
    }
    if let [last] = chunks.remainder() {
        sum += u32::from(*last) << 8;
    }
    sum
}

const fn finalize_checksum(mut sum: u32) -> u16 {
    while sum >> 16 != 0 {
        sum = (sum >> 16) + (sum & 0xFFFF);
    }
    !sum as u16
}
