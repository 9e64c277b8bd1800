// Error types for api-wait

use thiserror::Error;

/// Result type alias for api-wait operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while waiting for an API response
#[derive(Debug, Error)]
pub enum Error {
    /// No matching response arrived within a single attempt's window
    ///
    /// Recovered locally by the retry loop. Only seen by callers as the
    /// source of [`Error::MaxAttemptsReached`].
    #[error("No {method} response from '{endpoint}' within {timeout_ms}ms")]
    ObservationTimeout {
        endpoint: String,
        method: String,
        timeout_ms: u64,
    },

    /// All attempts were used up without observing a matching response
    ///
    /// This is the only error the retry loop lets through to the caller.
    /// The failure of the final attempt is kept as the source.
    #[error("Max attempts reached: no matching response from '{endpoint}' after {attempts} attempt(s)")]
    MaxAttemptsReached {
        endpoint: String,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    /// Failure reported by the browser driver behind a session
    #[error("Driver error: {0}")]
    Driver(String),

    /// Generic timeout reported by the browser driver
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Target was closed (browser, context, or page)
    ///
    /// Typically surfaces when the page navigates away or closes while a
    /// response wait is still pending.
    #[error("Target closed: Cannot perform operation on closed {target_type}. {context}")]
    TargetClosed {
        target_type: String,
        context: String,
    },

    /// Response feed was dropped while a wait was pending
    #[error("Channel closed unexpectedly")]
    ChannelClosed,

    /// Invalid argument provided to method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true if this error is the terminal retry-exhaustion error.
    pub fn is_max_attempts_reached(&self) -> bool {
        matches!(self, Error::MaxAttemptsReached { .. })
    }
}
