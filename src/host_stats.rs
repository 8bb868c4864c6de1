use crate::ProbeOutcome;

/// Loss and latency figures for one host's probe sequence.
///
/// Latency figures are in milliseconds and only exist once at least one reply arrived.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostStats {
    sent: u32,
    received: u32,
    lost: u32,
    min_millis: Option<f64>,
    max_millis: Option<f64>,
    sum_millis: f64,
}

impl HostStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &ProbeOutcome) {
        self.sent += 1;
        if !outcome.succeeded() {
            self.lost += 1;
            return;
        }
        self.received += 1;
        if let Some(millis) = outcome.elapsed_millis() {
            self.sum_millis += millis;
            self.min_millis = Some(self.min_millis.map_or(millis, |min| min.min(millis)));
            self.max_millis = Some(self.max_millis.map_or(millis, |max| max.max(millis)));
        }
    }

    #[must_use]
    pub fn sent(&self) -> u32 {
        self.sent
    }

    #[must_use]
    pub fn received(&self) -> u32 {
        self.received
    }

    #[must_use]
    pub fn lost(&self) -> u32 {
        self.lost
    }

    #[must_use]
    pub fn min_millis(&self) -> Option<f64> {
        self.min_millis
    }

    #[must_use]
    pub fn max_millis(&self) -> Option<f64> {
        self.max_millis
    }

    #[must_use]
    pub fn avg_millis(&self) -> Option<f64> {
        (self.received > 0).then(|| self.sum_millis / f64::from(self.received))
    }

    /// Percentage of sent packets that got no reply; zero when nothing was sent.
    #[must_use]
    pub fn loss_percent(&self) -> f64 {
        if self.sent == 0 {
            0.0
        } else {
            f64::from(self.lost) * 100.0 / f64::from(self.sent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;
    use std::time::Duration;

    fn success(millis: u64) -> ProbeOutcome {
        ProbeOutcome::Success { elapsed: Duration::from_millis(millis) }
    }

    #[test]
    fn empty() {
        let stats = HostStats::new();
        assert_eq!((0, 0, 0), (stats.sent(), stats.received(), stats.lost()));
        assert_eq!(None, stats.min_millis());
        assert_eq!(None, stats.avg_millis());
        assert_eq!(None, stats.max_millis());
        assert!(stats.loss_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn average_covers_successes_only() {
        let mut stats = HostStats::new();
        stats.record(&success(30));
        stats.record(&ProbeOutcome::Failure(FailureKind::Timeout));
        stats.record(&success(10));
        stats.record(&ProbeOutcome::Failure(FailureKind::TransportError));
        stats.record(&success(20));

        assert_eq!((5, 3, 2), (stats.sent(), stats.received(), stats.lost()));
        assert_eq!(Some(10.0), stats.min_millis());
        assert_eq!(Some(20.0), stats.avg_millis());
        assert_eq!(Some(30.0), stats.max_millis());
        assert!((stats.loss_percent() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn first_success_sets_min() {
        let mut stats = HostStats::new();
        stats.record(&ProbeOutcome::Failure(FailureKind::Timeout));
        stats.record(&success(50));
        assert_eq!(Some(50.0), stats.min_millis());
        assert_eq!(Some(50.0), stats.max_millis());
    }

    #[test]
    fn total_loss() {
        let mut stats = HostStats::new();
        for _ in 0..3 {
            stats.record(&ProbeOutcome::Failure(FailureKind::Timeout));
        }
        assert_eq!((3, 0, 3), (stats.sent(), stats.received(), stats.lost()));
        assert_eq!(None, stats.avg_millis());
        assert!((stats.loss_percent() - 100.0).abs() < 1e-9);
    }
}
