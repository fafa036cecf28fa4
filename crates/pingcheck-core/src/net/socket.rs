use crate::error::IoResult;
use std::net::SocketAddr;
use std::time::Duration;

/// A raw `ICMP` socket abstraction.
#[cfg_attr(test, mockall::automock)]
pub trait Socket
where
    Self: Sized,
{
    /// Create a non-blocking raw socket for `ICMP` over `IPv4`.
    fn new_icmp_socket_ipv4() -> IoResult<Self>;
    /// Create a non-blocking raw socket for `ICMPv6` over `IPv6`.
    fn new_icmp_socket_ipv6() -> IoResult<Self>;
    /// Send a datagram to the given address.
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> IoResult<()>;
    /// Returns true if the socket becomes readable before the timeout.
    fn is_readable(&mut self, timeout: Duration) -> IoResult<bool>;
    /// Receive a datagram along with the sender address, if known.
    fn recv_from(&mut self, buf: &mut [u8]) -> IoResult<(usize, Option<SocketAddr>)>;
    /// Shutdown the socket.
    fn shutdown(&mut self) -> IoResult<()>;
}
