// ResponseFeed - fan-out of observed responses to pending waits
//
// Driver adapters usually learn about responses through an event callback
// (a page "response" event, a CDP Network.responseReceived message). Publishing
// those into a feed gives them an `observe_response` implementation for free.
//
// # Example
//
// ```ignore
// use api_wait::{ApiMatcher, HttpMethod, Response, ResponseFeed, StatusCode};
//
// let feed = ResponseFeed::new();
// let matcher = ApiMatcher::new("/api/locations", StatusCode::Ok, HttpMethod::Get);
// let wait = feed.wait_for(matcher.predicate());
//
// // from the driver's event handler:
// feed.publish(Response::new("https://app.test/api/locations", "GET", 200));
//
// let response = wait.await?;
// ```

use crate::error::Error;
use crate::protocol::{Response, ResponsePredicate};
use crate::session::SessionFuture;
use tokio::sync::broadcast;

/// Number of responses buffered per pending wait before it starts lagging
pub const DEFAULT_FEED_CAPACITY: usize = 256;

/// Broadcast hub for responses observed in a page
#[derive(Debug, Clone)]
pub struct ResponseFeed {
    sender: broadcast::Sender<Response>,
}

impl ResponseFeed {
    /// Creates a feed with [`DEFAULT_FEED_CAPACITY`]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FEED_CAPACITY)
    }

    /// Creates a feed buffering up to `capacity` responses per waiter
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a response to every pending wait.
    ///
    /// Returns how many waits received it. Responses published while nobody
    /// waits are dropped.
    pub fn publish(&self, response: Response) -> usize {
        self.sender.send(response).unwrap_or(0)
    }

    /// Number of waits currently pending
    pub fn waiter_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Waits for the first response published from now on that satisfies `predicate`.
    ///
    /// Subscribes before returning, so a response published between this call
    /// and the first poll is not missed. The future never times out on its
    /// own; it fails with [`Error::ChannelClosed`] once every clone of the
    /// feed has been dropped.
    pub fn wait_for(&self, predicate: ResponsePredicate) -> SessionFuture<'static, Response> {
        let mut receiver = self.sender.subscribe();
        Box::pin(async move {
            loop {
                match receiver.recv().await {
                    Ok(response) if predicate(&response) => return Ok(response),
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Response wait lagged behind the feed");
                    }
                    Err(broadcast::error::RecvError::Closed) => return Err(Error::ChannelClosed),
                }
            }
        })
    }
}

impl Default for ResponseFeed {
    fn default() -> Self {
        Self::new()
    }
}
