use std::time::Duration;

pub const DEFAULT_PACKET_COUNT: u16 = 10;
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    /// Echo requests per host.
    pub packet_count: u16,
    /// Hosts probed at the same time.
    pub concurrency_limit: usize,
    /// How long to wait for each reply.
    pub timeout: Duration,
    /// Target spacing between two sends to the same host.
    pub interval: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            packet_count: DEFAULT_PACKET_COUNT,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SweepConfig::default();
        assert_eq!(10, config.packet_count);
        assert_eq!(10, config.concurrency_limit);
        assert_eq!(Duration::from_secs(3), config.timeout);
        assert_eq!(Duration::from_secs(1), config.interval);
    }
}
