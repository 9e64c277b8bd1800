// ApiMatcher - criteria a response must meet to satisfy an API wait

use crate::error::{Error, Result};
use crate::protocol::{HttpMethod, Response, StatusCode};
use std::sync::Arc;

/// Predicate handed to [`Session::observe_response`](crate::Session::observe_response)
pub type ResponsePredicate = Arc<dyn Fn(&Response) -> bool + Send + Sync>;

/// What an API wait is looking for
///
/// A response matches when all of the following hold:
/// - its URL contains `endpoint`
/// - its method equals `method`
/// - its status equals `status`, **or** is 204 No Content
///
/// A 204 is accepted whatever status was requested. Endpoints that answer an
/// expected 200 with an empty 204 still count as having responded.
///
/// # Example
///
/// ```ignore
/// use api_wait::{ApiMatcher, HttpMethod, StatusCode};
///
/// let matcher = ApiMatcher::new("/api/locations", StatusCode::Ok, HttpMethod::Get);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiMatcher {
    endpoint: String,
    status: StatusCode,
    method: HttpMethod,
}

impl ApiMatcher {
    /// Creates a matcher for `method` requests to URLs containing `endpoint`
    pub fn new(endpoint: impl Into<String>, status: StatusCode, method: HttpMethod) -> Self {
        Self {
            endpoint: endpoint.into(),
            status,
            method,
        }
    }

    /// URL substring to look for
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Expected status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Expected request method
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Checks a single response against the matching rule
    pub fn matches(&self, response: &Response) -> bool {
        response.url().contains(&self.endpoint)
            && response.method().eq_ignore_ascii_case(self.method.as_str())
            && (response.status() == self.status.as_u16()
                || response.status() == StatusCode::NoContent.as_u16())
    }

    /// The matching rule as a shareable predicate
    pub fn predicate(&self) -> ResponsePredicate {
        let matcher = self.clone();
        Arc::new(move |response: &Response| matcher.matches(response))
    }

    /// An empty endpoint would match every URL
    pub(crate) fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::InvalidArgument(
                "endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locations() -> ApiMatcher {
        ApiMatcher::new("/api/locations", StatusCode::Ok, HttpMethod::Get)
    }

    #[test]
    fn test_matches_url_method_and_status() {
        let matcher = locations();
        assert!(matcher.matches(&Response::new(
            "https://app.test/api/locations?page=2",
            "GET",
            200
        )));
    }

    #[test]
    fn test_rejects_wrong_url_method_or_status() {
        let matcher = locations();
        assert!(!matcher.matches(&Response::new("https://app.test/api/users", "GET", 200)));
        assert!(!matcher.matches(&Response::new("https://app.test/api/locations", "POST", 200)));
        assert!(!matcher.matches(&Response::new("https://app.test/api/locations", "GET", 500)));
    }

    #[test]
    fn test_no_content_matches_any_requested_status() {
        let response = Response::new("https://app.test/api/locations", "GET", 204);
        for status in StatusCode::ALL {
            let matcher = ApiMatcher::new("/api/locations", status, HttpMethod::Get);
            assert!(matcher.matches(&response), "204 should satisfy {}", status);
        }
    }

    #[test]
    fn test_no_content_still_needs_url_and_method() {
        let matcher = locations();
        assert!(!matcher.matches(&Response::new("https://app.test/other", "GET", 204)));
        assert!(!matcher.matches(&Response::new("https://app.test/api/locations", "PUT", 204)));
    }

    #[test]
    fn test_method_comparison_ignores_case() {
        let matcher = locations();
        assert!(matcher.matches(&Response::new("/api/locations", "get", 200)));
    }

    #[test]
    fn test_predicate_applies_rule() {
        let predicate = locations().predicate();
        assert!(predicate(&Response::new("/api/locations", "GET", 200)));
        assert!(!predicate(&Response::new("/api/locations", "GET", 404)));
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let matcher = ApiMatcher::new("", StatusCode::Ok, HttpMethod::Get);
        assert!(matches!(matcher.validate(), Err(Error::InvalidArgument(_))));
        assert!(locations().validate().is_ok());
    }
}
