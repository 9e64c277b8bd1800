// Response - a network response observed in the browser session
//
// Drivers build these from whatever their network events carry. Status and
// method stay raw here: a page can produce codes and verbs outside the closed
// sets the waiter matches against.

use std::collections::HashMap;

/// Network response observed by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// URL of the response
    pub url: String,
    /// HTTP method of the request that produced the response
    pub method: String,
    /// HTTP status code
    pub status: u16,
    /// HTTP status text
    pub status_text: String,
    /// Response headers
    pub headers: HashMap<String, String>,
}

impl Response {
    /// Creates a response with empty status text and no headers
    pub fn new(url: impl Into<String>, method: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            status,
            status_text: String::new(),
            headers: HashMap::new(),
        }
    }

    /// Sets the status text
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Adds a response header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the URL of the response
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the request method
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the HTTP status text
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Returns whether the response was successful (status 200-299)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the response headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Human-readable status, e.g. `"404 Not Found"` or just `"404"`
    pub fn status_line(&self) -> String {
        if self.status_text.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.status_text)
        }
    }
}
