//! Data source abstraction for fetching posts and comments.
//!
//! The UI never awaits a request itself. [`Fetcher`] spawns each request
//! onto the tokio runtime and the main loop drains finished results with
//! [`Fetcher::poll`], the same way it polls for terminal input.
//!
//! ```text
//! App::select_post ──▶ Fetcher::request_comments ──▶ tokio task ──▶ PostApi
//!                                                          │
//! App::poll_fetches ◀── Fetcher::poll ◀── mpsc channel ◀───┘
//! ```

mod error;
mod fetcher;
mod http;

pub use error::FetchError;
pub use fetcher::{FetchEvent, Fetcher};
pub use http::{HttpApi, HttpApiBuilder, DEFAULT_BASE_URL};

use std::fmt::Debug;

use async_trait::async_trait;

use crate::data::{Comment, Post};

/// Trait for the read-only posts API.
///
/// Implementations perform a single request per call: no retries and no
/// caching. Failures are returned to the caller, which decides how to report
/// them.
///
/// # Example
///
/// ```no_run
/// use postview::{HttpApi, PostApi};
///
/// # tokio_test::block_on(async {
/// let api = HttpApi::builder().build().unwrap();
/// let posts = api.fetch_posts().await.unwrap_or_default();
/// println!("Got {} posts", posts.len());
/// # });
/// ```
#[async_trait]
pub trait PostApi: Send + Sync + Debug {
    /// Fetch the whole post collection, in server order.
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError>;

    /// Fetch the comments belonging to `post_id`.
    async fn fetch_comments(&self, post_id: u64) -> Result<Vec<Comment>, FetchError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;
}
