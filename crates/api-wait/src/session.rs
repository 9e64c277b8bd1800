// Session - the browser-driver capabilities an API wait relies on
//
// The waiter never talks to a browser itself. Whatever drives the page
// (a Playwright binding, a CDP client, a test double) implements this trait.

use crate::error::Result;
use crate::protocol::{HttpMethod, Response, ResponsePredicate};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`Session`] operations
pub type SessionFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// A live browser-driven page
pub trait Session: Send + Sync {
    /// Waits for the next network response satisfying `predicate`.
    ///
    /// Each call starts a fresh wait. The returned future has no timeout of
    /// its own and may stay pending forever. Callers race it against a timer
    /// and drop it when they lose interest, so implementations must tolerate
    /// being dropped mid-wait.
    fn observe_response(&self, predicate: ResponsePredicate) -> SessionFuture<'_, Response>;

    /// Reloads the current page, resolving once the reload has settled.
    fn reload(&self) -> SessionFuture<'_, ()>;

    /// Issues a request to `url` outside the page's normal flow.
    fn direct_request<'a>(&'a self, url: &'a str, method: HttpMethod)
    -> SessionFuture<'a, Response>;
}

impl<S: Session + ?Sized> Session for Arc<S> {
    fn observe_response(&self, predicate: ResponsePredicate) -> SessionFuture<'_, Response> {
        (**self).observe_response(predicate)
    }

    fn reload(&self) -> SessionFuture<'_, ()> {
        (**self).reload()
    }

    fn direct_request<'a>(
        &'a self,
        url: &'a str,
        method: HttpMethod,
    ) -> SessionFuture<'a, Response> {
        (**self).direct_request(url, method)
    }
}
