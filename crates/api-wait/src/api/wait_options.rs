// Options for wait_for_api()
//
// Serializable so test suites can keep wait settings alongside other fixtures.

use crate::error::{Error, Result};
use crate::{DEFAULT_API_TIMEOUT_MS, DEFAULT_MAX_ATTEMPTS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options for an API wait
///
/// Passing `None` to [`wait_for_api`](crate::wait_for_api) is the same as
/// passing `WaitForApiOptions::default()`: 10 seconds per attempt, 2 attempts.
///
/// # Example
///
/// ```ignore
/// use api_wait::WaitForApiOptions;
/// use std::time::Duration;
///
/// let options = WaitForApiOptions::new()
///     .timeout(Duration::from_secs(5))
///     .max_attempts(4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaitForApiOptions {
    /// Wall-clock budget for a single observation attempt, in milliseconds
    pub timeout_ms: u64,

    /// Total attempts, including the first
    pub max_attempts: u32,
}

impl WaitForApiOptions {
    /// Creates options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the total number of attempts
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Per-attempt timeout as a Duration
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(Error::InvalidArgument(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidArgument(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WaitForApiOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_API_TIMEOUT_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
