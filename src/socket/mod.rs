use std::io;
use std::net::IpAddr;
use std::time::Duration;

pub(crate) mod raw_socket;

pub use raw_socket::{RawSocket, RawSocketFactory};

/// One ICMP transport, connected to a single target address.
pub trait TSocket: Send {
    fn send(&self, buf: &[u8]) -> io::Result<usize>;
    /// Blocks for at most `timeout`, which must be non-zero. Expiry surfaces as
    /// `WouldBlock` or `TimedOut` depending on the platform.
    fn recv(&self, buf: &mut [u8], timeout: Duration) -> io::Result<usize>;
}

/// Opens a fresh transport for every echo request.
pub trait SocketFactory: Send + Sync {
    type Socket: TSocket;

    fn open(&self, ip_addr: IpAddr) -> io::Result<Self::Socket>;
}
