use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config;

/// Configures HTTP timeout, retry behavior, and extra request headers.
///
/// Builder methods ignore invalid values (zero durations, unparseable
/// header names) and keep the previous setting, so a partially bad
/// configuration degrades to the defaults instead of failing.
#[derive(Clone, Debug)]
pub struct TransportOptions {
    pub(crate) timeout: Duration,
    pub(crate) max_retries: u32,
    pub(crate) backoff: Duration,
    pub(crate) headers: HeaderMap,
    pub(crate) retry_on_network_errors: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: config::DEFAULT_TIMEOUT,
            max_retries: config::DEFAULT_MAX_RETRIES,
            backoff: config::DEFAULT_BACKOFF,
            headers: HeaderMap::new(),
            retry_on_network_errors: false,
        }
    }
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-request timeout. Zero is ignored.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    /// Sets the maximum number of retries after the initial attempt.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the base backoff duration between retries (doubled per
    /// attempt). Zero is ignored.
    pub fn backoff(mut self, backoff: Duration) -> Self {
        if !backoff.is_zero() {
            self.backoff = backoff;
        }
        self
    }

    /// Adds a header sent with every request, overriding the defaults on
    /// collision (including `Authorization`). Names or values that are not
    /// valid HTTP header tokens are ignored.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name),
            HeaderValue::try_from(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Extends retry eligibility to connection-level failures and
    /// timeouts.
    ///
    /// The upstream SDK retries only on 429/5xx statuses and surfaces
    /// transport failures immediately, even though those are often the
    /// transient ones. Off by default to preserve that behavior.
    pub fn retry_on_network_errors(mut self, enabled: bool) -> Self {
        self.retry_on_network_errors = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::TransportOptions;
    use crate::config;

    #[test]
    fn zero_durations_keep_defaults() {
        let opts = TransportOptions::new()
            .timeout(Duration::ZERO)
            .backoff(Duration::ZERO);
        assert_eq!(opts.timeout, config::DEFAULT_TIMEOUT);
        assert_eq!(opts.backoff, config::DEFAULT_BACKOFF);
    }

    #[test]
    fn valid_values_override_defaults() {
        let opts = TransportOptions::new()
            .timeout(Duration::from_secs(10))
            .max_retries(0)
            .backoff(Duration::from_millis(25));
        assert_eq!(opts.timeout, Duration::from_secs(10));
        assert_eq!(opts.max_retries, 0);
        assert_eq!(opts.backoff, Duration::from_millis(25));
    }

    #[test]
    fn invalid_header_name_is_ignored() {
        let opts = TransportOptions::new().header("bad header\n", "x");
        assert!(opts.headers.is_empty());
    }

    #[test]
    fn later_header_wins() {
        let opts = TransportOptions::new()
            .header("X-Correlation-ID", "one")
            .header("X-Correlation-ID", "two");
        assert_eq!(opts.headers.len(), 1);
        assert_eq!(opts.headers["X-Correlation-ID"], "two");
    }
}
