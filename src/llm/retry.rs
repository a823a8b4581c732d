// AgriMind: Retry policy for gateway calls
// Exponential backoff with jitter; permanent errors (auth, bad request)
// fail immediately instead of burning retries.

use std::time::Duration;

/// Configuration for retry behavior with exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try.
    pub max_retries: u32,
    /// Base delay between retries (multiplied exponentially).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (caps exponential growth).
    pub max_delay_ms: u64,
    /// Jitter factor (0.0 to 1.0) to add randomness to delays.
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
            max_delay_ms: 5000,
            jitter_factor: 0.2,
        }
    }
}

impl RetryConfig {
    /// No retries; the first failure is final.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 0,
            max_delay_ms: 0,
            jitter_factor: 0.0,
        }
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let exponential_delay = self.base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
        let capped_delay = exponential_delay.min(self.max_delay_ms);

        // Jitter prevents synchronized retries from concurrent runs
        let jitter_range = (capped_delay as f64 * self.jitter_factor) as u64;
        let jitter = if jitter_range > 0 {
            fastrand::u64(0..jitter_range)
        } else {
            0
        };

        Duration::from_millis(capped_delay + jitter)
    }
}

/// Error classification for determining retry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// May succeed on retry (network issues, rate limits, 5xx).
    Transient,
    /// Won't succeed on retry (auth failures, invalid requests).
    Permanent,
    /// Unclassified; treated as transient with limited retries.
    Unknown,
}

impl ErrorKind {
    /// Classify an error from its string representation, which is what
    /// anyhow::Error exposes across the reqwest seam.
    pub fn classify(error: &anyhow::Error) -> Self {
        let error_str = error.to_string().to_lowercase();

        if error_str.contains("timeout")
            || error_str.contains("timed out")
            || error_str.contains("connection")
            || error_str.contains("network")
            || error_str.contains("temporarily")
            || error_str.contains("service unavailable")
            || error_str.contains("502")
            || error_str.contains("503")
            || error_str.contains("504")
        {
            return Self::Transient;
        }

        if error_str.contains("rate limit")
            || error_str.contains("too many requests")
            || error_str.contains("429")
            || error_str.contains("quota")
        {
            return Self::Transient;
        }

        if error_str.contains("500") || error_str.contains("internal server error") {
            return Self::Transient;
        }

        if error_str.contains("unauthorized")
            || error_str.contains("401")
            || error_str.contains("403")
            || error_str.contains("forbidden")
            || error_str.contains("invalid api key")
            || error_str.contains("authentication")
        {
            return Self::Permanent;
        }

        if error_str.contains("bad request")
            || error_str.contains("400")
            || error_str.contains("not found")
            || error_str.contains("404")
        {
            return Self::Permanent;
        }

        Self::Unknown
    }

    pub fn should_retry(&self) -> bool {
        matches!(self, Self::Transient | Self::Unknown)
    }
}
