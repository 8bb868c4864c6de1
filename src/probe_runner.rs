use std::io;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::icmp::{strip_ip_header, EchoMessage, IcmpType, SequenceNumber};
use crate::resolver::{Resolver, SystemResolver};
use crate::socket::raw_socket::RawSocketFactory;
use crate::socket::{SocketFactory, TSocket};
use crate::{FailureKind, HostStats, PingResult, ProbeOutcome, SweepConfig};

const PAYLOAD_SIZE: usize = 56;
const RECEIVE_BUFFER_SIZE: usize = 512;

/// Life cycle of one host's probe sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceState {
    Pending,
    Admitted,
    Running,
    /// Every packet was attempted, whatever the mix of replies and losses.
    Completed,
    /// The sequence could not run, e.g. because the host did not resolve.
    Failed(FailureKind),
}

/// What a finished probe sequence reports about its host.
#[derive(Clone, Debug, PartialEq)]
pub struct HostReport {
    pub host: String,
    pub identifier: u16,
    /// Address of the last resolution, `None` if the host never resolved.
    pub ip_addr: Option<IpAddr>,
    pub stats: HostStats,
    pub state: SequenceState,
    pub elapsed: Duration,
}

impl HostReport {
    /// Report for a sequence that could not run at all: every packet counts as lost.
    #[must_use]
    pub fn failed(host: &str, identifier: u16, packet_count: u16, kind: FailureKind) -> Self {
        let mut stats = HostStats::new();
        for _ in 0..packet_count {
            stats.record(&ProbeOutcome::Failure(kind));
        }
        HostReport {
            host: host.to_owned(),
            identifier,
            ip_addr: None,
            stats,
            state: SequenceState::Failed(kind),
            elapsed: Duration::ZERO,
        }
    }
}

/// Runs one host's probe sequence. Only fatal failures are returned as errors; everything
/// else ends up in the report.
pub trait Prober: Send + Sync {
    fn run_probe_sequence(&self, host: &str, packet_count: u16, identifier: u16) -> PingResult<HostReport>;
}

enum ReplyMatch {
    Reply,
    /// Not an answer to the outstanding request; keep waiting.
    Unrelated,
    /// Answers the outstanding request, but not with an echo reply.
    Rejected,
}

fn match_reply(reply: &EchoMessage, request: &EchoMessage) -> ReplyMatch {
    let answers_request = reply.icmp_type.is_echo()
        && reply.identifier() == request.identifier()
        && reply.sequence_number() == request.sequence_number();
    // Raw sockets also see locally addressed requests, including our own.
    if !answers_request || reply.icmp_type == request.icmp_type {
        return ReplyMatch::Unrelated;
    }
    if reply.icmp_type == IcmpType::echo_reply(request.icmp_type.is_v6()) && reply.code == 0 {
        ReplyMatch::Reply
    } else {
        ReplyMatch::Rejected
    }
}

/// Sends echo requests to one host at a time, opening a fresh transport for every request.
pub struct ProbeRunner<F = RawSocketFactory, R = SystemResolver> {
    socket_factory: F,
    resolver: R,
    timeout: Duration,
    interval: Duration,
    payload: [u8; PAYLOAD_SIZE],
}

impl ProbeRunner {
    /// Probes over raw sockets and resolves through the system resolver.
    #[must_use]
    pub fn new(config: &SweepConfig) -> Self {
        Self::with_parts(config, RawSocketFactory, SystemResolver)
    }
}

impl<F, R> ProbeRunner<F, R>
where
    F: SocketFactory,
    R: Resolver,
{
    pub fn with_parts(config: &SweepConfig, socket_factory: F, resolver: R) -> Self {
        let mut payload = [0u8; PAYLOAD_SIZE];
        rand::thread_rng().fill(&mut payload[..]);
        ProbeRunner { socket_factory, resolver, timeout: config.timeout, interval: config.interval, payload }
    }

    /// Probes `host` with `packet_count` echo requests, numbered from 1.
    ///
    /// The host is resolved again before every request. If resolution fails the sequence stops:
    /// the current and all remaining packets count as lost and the state is `Failed`.
    pub fn run_probe_sequence(&self, host: &str, packet_count: u16, identifier: u16) -> PingResult<HostReport> {
        tracing::debug!("probe sequence for {} (identifier {}) start with count {}", host, identifier, packet_count);
        let start_time = Instant::now();
        let mut stats = HostStats::new();
        let mut ip_addr = None;
        let mut state = SequenceState::Completed;

        let mut sequence_numbers = SequenceNumber::first_n(packet_count).peekable();
        while let Some(sequence_number) = sequence_numbers.next() {
            let addr = match self.resolver.resolve(host) {
                Ok(addr) => addr,
                Err(e) => {
                    tracing::warn!("{}", e);
                    let lost = ProbeOutcome::Failure(FailureKind::ResolutionError);
                    stats.record(&lost);
                    sequence_numbers.by_ref().for_each(|_| stats.record(&lost));
                    state = SequenceState::Failed(FailureKind::ResolutionError);
                    break;
                }
            };
            ip_addr = Some(addr);

            let outcome = self.probe_once(addr, identifier, sequence_number)?;
            stats.record(&outcome);
            if let Some(kind) = outcome.failure_kind() {
                tracing::debug!("echo request {} to {} lost: {}", u16::from(sequence_number), host, kind);
            }

            if let ProbeOutcome::Success { elapsed } = outcome {
                let pause = self.interval.saturating_sub(elapsed);
                if !pause.is_zero() && sequence_numbers.peek().is_some() {
                    std::thread::sleep(pause);
                }
            }
        }

        tracing::debug!(
            "probe sequence for {} end: sent {}, received {}, lost {}",
            host,
            stats.sent(),
            stats.received(),
            stats.lost()
        );
        Ok(HostReport { host: host.to_owned(), identifier, ip_addr, stats, state, elapsed: start_time.elapsed() })
    }

    /// One echo exchange. Non-fatal errors become a failed outcome.
    fn probe_once(&self, ip_addr: IpAddr, identifier: u16, sequence_number: SequenceNumber) -> PingResult<ProbeOutcome> {
        match self.exchange_echo(ip_addr, identifier, sequence_number) {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.kind.is_fatal() => {
                tracing::error!("probing {} failed: {}", ip_addr, e);
                Err(e)
            }
            Err(e) => {
                tracing::warn!("probing {} failed: {}", ip_addr, e);
                Ok(ProbeOutcome::Failure(e.kind))
            }
        }
    }

    fn exchange_echo(&self, ip_addr: IpAddr, identifier: u16, sequence_number: SequenceNumber) -> PingResult<ProbeOutcome> {
        let socket = self.socket_factory.open(ip_addr)?;
        let icmp_type = IcmpType::echo_request(ip_addr.is_ipv6());
        let request = EchoMessage::new(icmp_type, identifier, sequence_number.into(), &self.payload);

        let start_time = Instant::now();
        let deadline = start_time + self.timeout;
        socket.send(&request.encode())?;
        tracing::trace!("echo request {} sent to {}", u16::from(sequence_number), ip_addr);

        let mut buf = [0u8; RECEIVE_BUFFER_SIZE];
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(ProbeOutcome::Failure(FailureKind::Timeout));
            }
            let n = match socket.recv(&mut buf, remaining) {
                Ok(n) => n,
                Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                    return Ok(ProbeOutcome::Failure(FailureKind::Timeout));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            let datagram = &buf[..n];
            let icmp = if ip_addr.is_ipv4() { strip_ip_header(datagram) } else { datagram };
            let reply = match EchoMessage::decode(icmp) {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::debug!("ignoring datagram from {}: {}", ip_addr, e);
                    continue;
                }
            };

            match match_reply(&reply, &request) {
                ReplyMatch::Unrelated => {
                    tracing::trace!(
                        "ignoring {:?} (identifier {}, sequence number {})",
                        reply.icmp_type,
                        reply.identifier(),
                        reply.sequence_number()
                    );
                }
                ReplyMatch::Reply => {
                    let elapsed = start_time.elapsed();
                    tracing::trace!("echo reply {} received after {:?}", reply.sequence_number(), elapsed);
                    return Ok(ProbeOutcome::Success { elapsed });
                }
                ReplyMatch::Rejected => {
                    return Ok(ProbeOutcome::Failure(FailureKind::UnexpectedReply {
                        icmp_type: reply.icmp_type.id(),
                        code: reply.code,
                    }));
                }
            }
        }
    }
}

impl<F, R> Prober for ProbeRunner<F, R>
where
    F: SocketFactory,
    R: Resolver,
{
    fn run_probe_sequence(&self, host: &str, packet_count: u16, identifier: u16) -> PingResult<HostReport> {
        ProbeRunner::run_probe_sequence(self, host, packet_count, identifier)
    }
}
