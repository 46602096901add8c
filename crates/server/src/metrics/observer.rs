//! Response body adapter that reports a request once its response is finished.
//!
//! "Finished" means the body has yielded its last frame to the transport, the
//! body was empty to begin with, or the response is one whose body the server
//! never transmits (HEAD, 1xx, 204, 304). Bodies that error, or that are dropped
//! while data is still pending (client went away), are never reported.

use axum::{
    body::Body,
    http::{Method, StatusCode},
};
use bytes::Bytes;
use http_body::{Body as HttpBody, Frame, SizeHint};
use std::{
    pin::Pin,
    task::{Context, Poll},
};

use super::RequestCounter;

/// Whether the transport drops this response's body without sending it.
pub fn body_is_discarded(method: &Method, status: StatusCode) -> bool {
    method == Method::HEAD
        || status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED
}

/// Labels of a single request, waiting for its response to finish.
pub struct Completion {
    counter: RequestCounter,
    method: String,
    route: String,
    status: u16,
}

impl Completion {
    pub fn new(counter: RequestCounter, method: String, route: String, status: u16) -> Self {
        Self {
            counter,
            method,
            route,
            status,
        }
    }

    fn record(self) {
        self.counter
            .increment(&self.method, &self.route, self.status);
    }
}

/// Wraps a response body and fires its [`Completion`] at most once.
pub struct ObservedBody {
    inner: Body,
    completion: Option<Completion>,
    /// Release counts as completion: the headers were the whole response.
    discarded: bool,
}

impl ObservedBody {
    pub fn new(inner: Body, completion: Completion, discarded: bool) -> Self {
        Self {
            inner,
            completion: Some(completion),
            discarded,
        }
    }

    fn complete(&mut self) {
        if let Some(completion) = self.completion.take() {
            completion.record();
        }
    }
}

impl HttpBody for ObservedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_frame(cx);

        match &polled {
            Poll::Ready(None) => this.complete(),
            Poll::Ready(Some(Ok(_))) if this.inner.is_end_stream() => this.complete(),
            Poll::Ready(Some(Err(_))) => this.completion = None,
            _ => {}
        }

        polled
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for ObservedBody {
    fn drop(&mut self) {
        // Bodies with nothing to send may be released without ever being polled.
        if self.discarded || self.inner.is_end_stream() {
            self.complete();
        }
    }
}
