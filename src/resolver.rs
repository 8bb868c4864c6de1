use crate::{FailureKind, PingError, PingResult};
use std::net::IpAddr;
use std::sync::Arc;

/// Turns a host identifier from the host list into an address to probe.
pub trait Resolver: Send + Sync {
    fn resolve(&self, host: &str) -> PingResult<IpAddr>;
}

impl<R: Resolver> Resolver for Arc<R> {
    fn resolve(&self, host: &str) -> PingResult<IpAddr> {
        (**self).resolve(host)
    }
}

/// Resolves through the system resolver (`getaddrinfo`).
///
/// Literal addresses are used as they are. For names, the first IPv4 address wins; a name
/// with only IPv6 addresses resolves to the first of those.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, host: &str) -> PingResult<IpAddr> {
        if let Ok(ip_addr) = host.parse::<IpAddr>() {
            return Ok(ip_addr);
        }
        let ips: Vec<IpAddr> = dns_lookup::lookup_host(host).map_err(|e| {
            PingError::new(FailureKind::ResolutionError, format!("could not resolve hostname {host}: {e}"))
        })?;
        ips.iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| ips.first())
            .copied()
            .ok_or_else(|| PingError::new(FailureKind::ResolutionError, format!("no address for hostname {host}")))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::net::{Ipv4Addr, Ipv6Addr};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resolves from a fixed table and counts lookups.
    #[derive(Default)]
    pub(crate) struct ResolverMock {
        table: HashMap<String, IpAddr>,
        lookups: AtomicUsize,
    }

    impl ResolverMock {
        pub(crate) fn with(host: &str, ip_addr: IpAddr) -> Self {
            let mut resolver = Self::default();
            resolver.table.insert(host.to_owned(), ip_addr);
            resolver
        }

        pub(crate) fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    impl Resolver for ResolverMock {
        fn resolve(&self, host: &str) -> PingResult<IpAddr> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.table
                .get(host)
                .copied()
                .ok_or_else(|| PingError::new(FailureKind::ResolutionError, format!("unknown host {host}")))
        }
    }

    #[test]
    fn literal_addresses_resolve_without_lookup() {
        let resolver = SystemResolver;
        assert_eq!(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 7)), resolver.resolve("192.0.2.7").unwrap());
        assert_eq!(IpAddr::V6(Ipv6Addr::LOCALHOST), resolver.resolve("::1").unwrap());
    }

    #[test]
    fn test_lookup_host() {
        let ip = SystemResolver.resolve("localhost").unwrap();

        assert!(ip.is_loopback());
    }

    #[test]
    fn unresolvable_host_is_a_resolution_error() {
        let error = SystemResolver.resolve("does-not-exist.invalid").unwrap_err();
        assert_eq!(FailureKind::ResolutionError, error.kind);
    }
}
