use std::time::Duration;

/// Default values for configuration.
pub mod defaults {
    use std::time::Duration;

    /// The default number of echo requests to send per run.
    pub const DEFAULT_COUNT: u32 = 4;

    /// The default interval between echo requests.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);
}

/// The configuration for a single ping run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingConfig {
    /// The target, either a literal `IPv4` or `IPv6` address or a hostname.
    pub host: String,
    /// The number of echo requests to send, `0` means unbounded.
    pub count: u32,
    /// The interval between echo requests.
    pub interval: Duration,
}

impl PingConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            count: defaults::DEFAULT_COUNT,
            interval: defaults::DEFAULT_INTERVAL,
        }
    }

    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PingConfig::new("example.com");
        assert_eq!("example.com", config.host);
        assert_eq!(4, config.count);
        assert_eq!(Duration::from_millis(1000), config.interval);
    }

    #[test]
    fn test_builder() {
        let config = PingConfig::new("10.0.0.1")
            .count(0)
            .interval(Duration::from_millis(250));
        assert_eq!(0, config.count);
        assert_eq!(Duration::from_millis(250), config.interval);
    }
}
