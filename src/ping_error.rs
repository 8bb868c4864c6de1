use std::{error::Error, fmt, io};

pub type GenericError = Box<dyn Error + Send + Sync + 'static>;

pub type PingResult<T> = std::result::Result<T, PingError>;

/// Why a probe, or a whole probe sequence, did not succeed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FailureKind {
    Timeout,
    ResolutionError,
    PermissionDenied,
    TransportError,
    MalformedReply,
    /// A datagram matched our identifier and sequence number but was not an echo reply with code 0.
    UnexpectedReply { icmp_type: u8, code: u8 },
}

impl FailureKind {
    /// Fatal failures end the whole run instead of being counted as a lost packet.
    #[must_use]
    pub fn is_fatal(self) -> bool {
        self == FailureKind::PermissionDenied
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::ResolutionError => write!(f, "cannot resolve host"),
            FailureKind::PermissionDenied => write!(f, "operation not permitted"),
            FailureKind::TransportError => write!(f, "transport error"),
            FailureKind::MalformedReply => write!(f, "malformed reply"),
            FailureKind::UnexpectedReply { icmp_type, code } => {
                write!(f, "unexpected reply (type {icmp_type}, code {code})")
            }
        }
    }
}

#[derive(Debug)]
pub struct PingError {
    pub kind: FailureKind,
    pub message: String,
    // no chained error
}

impl PingError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        PingError { kind, message: message.into() }
    }
}

impl fmt::Display for PingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "PingError")?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl Error for PingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl From<io::Error> for PingError {
    fn from(error: io::Error) -> PingError {
        let kind = match error.kind() {
            io::ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
            _ => FailureKind::TransportError,
        };
        PingError { kind, message: error.to_string() }
    }
}
