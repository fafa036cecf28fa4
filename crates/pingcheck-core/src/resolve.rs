use crate::error::{Error, Result};
use crate::net::socket::Socket;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use tracing::instrument;

/// Resolve a target host to a single address.
///
/// The host is tried as a literal `IPv4` address, then as a literal `IPv6`
/// address and finally looked up as a hostname, taking the first candidate
/// returned by the resolver.
#[instrument(level = "trace")]
pub fn resolve_target(host: &str) -> Result<IpAddr> {
    if let Ok(addr) = Ipv4Addr::from_str(host) {
        return Ok(IpAddr::V4(addr));
    }
    if let Ok(addr) = Ipv6Addr::from_str(host) {
        return Ok(IpAddr::V6(addr));
    }
    dns_lookup::lookup_host(host)
        .map_err(|_| Error::HostUnresolvable(String::from(host)))?
        .into_iter()
        .next()
        .ok_or_else(|| Error::HostUnresolvable(String::from(host)))
}

/// Open a raw `ICMP` socket matching the family of the target address.
pub fn open_transport<S: Socket>(addr: IpAddr) -> Result<S> {
    match addr {
        IpAddr::V4(_) => S::new_icmp_socket_ipv4(),
        IpAddr::V6(_) => S::new_icmp_socket_ipv6(),
    }
    .map_err(Error::TransportUnavailable)
}

/// Resolve a target host and open a transport for it.
pub fn resolve<S: Socket>(host: &str) -> Result<(IpAddr, S)> {
    let addr = resolve_target(host)?;
    let socket = open_transport(addr)?;
    Ok((addr, socket))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_ipv4() {
        let addr = resolve_target("192.168.1.10").unwrap();
        assert_eq!(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10)), addr);
    }

    #[test]
    fn test_literal_ipv6() {
        let addr = resolve_target("fe80::1").unwrap();
        assert_eq!(IpAddr::V6(Ipv6Addr::from_str("fe80::1").unwrap()), addr);
    }

    #[test]
    fn test_unresolvable() {
        let err = resolve_target("").unwrap_err();
        assert!(matches!(err, Error::HostUnresolvable(_)));
    }
}
