use super::{SocketFactory, TSocket};
use socket2::{Domain, Protocol, Type};
use std::io::{self, Read};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Raw ICMP socket connected to one address, so the kernel only hands us datagrams from it.
///
/// IPv4 raw sockets deliver the IP header in front of the ICMP message, IPv6 raw sockets do not.
/// Raw sockets need root privileges or `CAP_NET_RAW`; without them `connect` fails with
/// `PermissionDenied`.
pub struct RawSocket {
    socket: socket2::Socket,
}

impl RawSocket {
    pub fn connect(ip_addr: IpAddr) -> Result<Self, io::Error> {
        tracing::trace!("creating RawSocket for {}", ip_addr);
        let (domain, protocol) = match ip_addr {
            IpAddr::V4(_) => (Domain::IPV4, Protocol::ICMPV4),
            IpAddr::V6(_) => (Domain::IPV6, Protocol::ICMPV6),
        };
        let socket = socket2::Socket::new(domain, Type::RAW, Some(protocol))?;
        socket.connect(&SocketAddr::new(ip_addr, 0).into())?;
        Ok(RawSocket { socket })
    }
}

impl TSocket for RawSocket {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        self.socket.send(buf)
    }

    fn recv(&self, buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
        self.socket.set_read_timeout(Some(timeout))?;
        (&self.socket).read(buf)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RawSocketFactory;

impl SocketFactory for RawSocketFactory {
    type Socket = RawSocket;

    fn open(&self, ip_addr: IpAddr) -> io::Result<RawSocket> {
        RawSocket::connect(ip_addr)
    }
}
