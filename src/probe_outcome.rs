use crate::FailureKind;
use std::time::Duration;

/// Result of one timed echo attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProbeOutcome {
    Success { elapsed: Duration },
    Failure(FailureKind),
}

impl ProbeOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    /// Round-trip time in milliseconds, for successful attempts only.
    #[must_use]
    pub fn elapsed_millis(&self) -> Option<f64> {
        match self {
            ProbeOutcome::Success { elapsed } => Some(elapsed.as_secs_f64() * 1000.0),
            ProbeOutcome::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ProbeOutcome::Success { .. } => None,
            ProbeOutcome::Failure(kind) => Some(*kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success() {
        let outcome = ProbeOutcome::Success { elapsed: Duration::from_millis(1500) };
        assert!(outcome.succeeded());
        assert_eq!(Some(1500.0), outcome.elapsed_millis());
        assert_eq!(None, outcome.failure_kind());
    }

    #[test]
    fn failure() {
        let outcome = ProbeOutcome::Failure(FailureKind::Timeout);
        assert!(!outcome.succeeded());
        assert_eq!(None, outcome.elapsed_millis());
        assert_eq!(Some(FailureKind::Timeout), outcome.failure_kind());
    }
}
