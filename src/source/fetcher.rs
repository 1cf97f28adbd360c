//! Background request dispatch.
//!
//! Spawns each API call as a tokio task and forwards the outcome through an
//! unbounded channel so the synchronous UI loop can pick it up without
//! blocking. Every request reports back exactly once, even if the API call
//! panics.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

use super::{FetchError, PostApi};
use crate::data::{Comment, Post};

/// A finished request.
#[derive(Debug)]
pub enum FetchEvent {
    /// Outcome of `GET /posts`.
    Posts(Result<Vec<Post>, FetchError>),
    /// Outcome of `GET /posts/{post_id}/comments`, tagged with the id it was
    /// requested for.
    Comments {
        post_id: u64,
        result: Result<Vec<Comment>, FetchError>,
    },
}

/// Dispatches requests onto a tokio runtime and collects their results.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use postview::{Fetcher, HttpApi};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let api = Arc::new(HttpApi::builder().build().unwrap());
/// let mut fetcher = Fetcher::new(api, rt.handle().clone());
///
/// // Nothing requested yet
/// assert!(fetcher.poll().is_none());
/// ```
#[derive(Debug)]
pub struct Fetcher {
    api: Arc<dyn PostApi>,
    runtime: Handle,
    tx: mpsc::UnboundedSender<FetchEvent>,
    rx: mpsc::UnboundedReceiver<FetchEvent>,
    in_flight: usize,
}

impl Fetcher {
    /// Create a fetcher that runs requests on `runtime`.
    pub fn new(api: Arc<dyn PostApi>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            runtime,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Description of the underlying API.
    pub fn description(&self) -> &str {
        self.api.description()
    }

    /// Number of requests that have not reported back yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start fetching the post collection.
    pub fn request_posts(&mut self) {
        debug!("requesting posts");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.in_flight += 1;
        self.runtime.spawn(async move {
            let call = tokio::spawn(async move { api.fetch_posts().await });
            let result = call.await.unwrap_or_else(|e| Err(e.into()));
            // Receiver only goes away on shutdown
            let _ = tx.send(FetchEvent::Posts(result));
        });
    }

    /// Start fetching the comments of `post_id`.
    pub fn request_comments(&mut self, post_id: u64) {
        debug!(post_id, "requesting comments");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.in_flight += 1;
        self.runtime.spawn(async move {
            let call = tokio::spawn(async move { api.fetch_comments(post_id).await });
            let result = call.await.unwrap_or_else(|e| Err(e.into()));
            let _ = tx.send(FetchEvent::Comments { post_id, result });
        });
    }

    /// Take the next finished request, if any. Never blocks.
    pub fn poll(&mut self) -> Option<FetchEvent> {
        let event = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(event)
    }

    /// Wait for the next finished request.
    ///
    /// Returns `None` only if nothing is in flight.
    pub async fn recv(&mut self) -> Option<FetchEvent> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.rx.recv().await?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(event)
    }
}
