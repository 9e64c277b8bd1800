// wait_for_api - wait for an API response with bounded retries
//
// Each attempt races the session's response wait against a timer. A failed
// attempt is probed for diagnostics, possibly logged, and followed by a page
// reload so the page fires its requests again. Only the exhausted loop reports
// an error to the caller.

use crate::api::WaitForApiOptions;
use crate::error::{Error, Result};
use crate::protocol::{ApiMatcher, Response};
use crate::session::Session;
use std::time::Duration;

/// Failed attempts numbered above this are logged at WARN.
///
/// Fixed, not derived from `max_attempts`.
pub const FAILURE_LOG_THRESHOLD: u32 = 2;

/// Status reported in logs when the diagnostic probe itself fails
pub const PROBE_UNAVAILABLE: &str = "unavailable";

/// Result of a single observation attempt
#[derive(Debug)]
enum AttemptOutcome {
    Success(Response),
    TimedOut,
    ObservationError(Error),
}

/// Waits for a response matching `matcher`, reloading the page between attempts.
///
/// Attempt `n` waits up to `options.timeout_ms` for a matching response. On a
/// miss, the endpoint is probed with a direct request for its live status,
/// a warning is logged once `n > FAILURE_LOG_THRESHOLD`, and, if attempts
/// remain, the session is reloaded before attempt `n + 1`.
///
/// A response with status 204 No Content counts as a match whatever status
/// was requested (see [`ApiMatcher`]).
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if the endpoint is empty, or the timeout or
///   attempt count is zero
/// - [`Error::MaxAttemptsReached`] once every attempt has failed; its source is
///   the final attempt's timeout or driver error
///
/// # Example
///
/// ```ignore
/// use api_wait::{wait_for_api, ApiMatcher, HttpMethod, StatusCode, WaitForApiOptions};
///
/// let matcher = ApiMatcher::new("/api/locations", StatusCode::Ok, HttpMethod::Get);
/// let response = wait_for_api(&session, &matcher, None).await?;
/// assert_eq!(response.status(), 200);
///
/// let options = WaitForApiOptions::new().max_attempts(4);
/// let created = wait_for_api(
///     &session,
///     &ApiMatcher::new("/api/orders", StatusCode::Created, HttpMethod::Post),
///     Some(options),
/// )
/// .await?;
/// ```
pub async fn wait_for_api<S>(
    session: &S,
    matcher: &ApiMatcher,
    options: Option<WaitForApiOptions>,
) -> Result<Response>
where
    S: Session + ?Sized,
{
    matcher.validate()?;
    let options = options.unwrap_or_default();
    options.validate()?;

    let max_attempts = options.max_attempts;
    let timeout = options.attempt_timeout();
    let mut attempt = 1;

    loop {
        tracing::debug!(
            attempt,
            max_attempts,
            endpoint = matcher.endpoint(),
            method = %matcher.method(),
            "Waiting for API response"
        );

        let failure = match observe(session, matcher, timeout).await {
            AttemptOutcome::Success(response) => return Ok(response),
            AttemptOutcome::TimedOut => Error::ObservationTimeout {
                endpoint: matcher.endpoint().to_string(),
                method: matcher.method().to_string(),
                timeout_ms: options.timeout_ms,
            },
            AttemptOutcome::ObservationError(e) => e,
        };

        let probed_status = probe_status(session, matcher).await;

        if attempt > FAILURE_LOG_THRESHOLD {
            tracing::warn!(
                attempt,
                max_attempts,
                endpoint = matcher.endpoint(),
                expected_status = %matcher.status(),
                probed_status = %probed_status,
                error = %failure,
                "API wait attempt failed"
            );
        }

        if attempt >= max_attempts {
            return Err(Error::MaxAttemptsReached {
                endpoint: matcher.endpoint().to_string(),
                attempts: max_attempts,
                source: Box::new(failure),
            });
        }

        tracing::debug!(
            attempt,
            endpoint = matcher.endpoint(),
            "Reloading page before retry"
        );
        if let Err(e) = session.reload().await {
            tracing::warn!(attempt, error = %e, "Reload before retry failed");
        }

        attempt += 1;
    }
}

/// Races one response wait against the attempt timer.
///
/// On timeout the pending wait is dropped, so a response arriving later has
/// no effect on this or any following attempt.
async fn observe<S>(session: &S, matcher: &ApiMatcher, timeout: Duration) -> AttemptOutcome
where
    S: Session + ?Sized,
{
    match tokio::time::timeout(timeout, session.observe_response(matcher.predicate())).await {
        Ok(Ok(response)) => AttemptOutcome::Success(response),
        Ok(Err(e)) => AttemptOutcome::ObservationError(e),
        Err(_) => AttemptOutcome::TimedOut,
    }
}

/// Fetches the endpoint's live status for log messages. Never fails.
async fn probe_status<S>(session: &S, matcher: &ApiMatcher) -> String
where
    S: Session + ?Sized,
{
    match session
        .direct_request(matcher.endpoint(), matcher.method())
        .await
    {
        Ok(response) => response.status_line(),
        Err(e) => {
            tracing::debug!(endpoint = matcher.endpoint(), error = %e, "Status probe failed");
            PROBE_UNAVAILABLE.to_string()
        }
    }
}
