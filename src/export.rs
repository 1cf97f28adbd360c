//! Non-interactive page export used by `--dump`.
//!
//! ```json
//! {
//!   "search": "qui",
//!   "page": 2,
//!   "total_pages": 3,
//!   "filtered": 25,
//!   "posts": [{ "userId": 1, "id": 11, "title": "...", "body": "..." }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::data::{PageView, Post};
use crate::source::PostApi;

/// One page of search results, as printed by `--dump`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageExport {
    pub search: String,
    pub page: usize,
    pub total_pages: usize,
    pub filtered: usize,
    pub posts: Vec<Post>,
}

impl PageExport {
    pub fn from_view(view: &PageView<'_>, search: &str) -> Self {
        Self {
            search: search.to_string(),
            page: view.page,
            total_pages: view.total_pages,
            filtered: view.filtered,
            posts: view.posts.iter().map(|p| (*p).clone()).collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Fetch the posts once and cut out `page` of the ones matching `search`.
///
/// A failed fetch is logged and exported as an empty page.
pub async fn export_page(
    api: &dyn PostApi,
    search: &str,
    page: usize,
    per_page: usize,
) -> PageExport {
    let posts = match api.fetch_posts().await {
        Ok(posts) => {
            info!(count = posts.len(), "loaded posts");
            posts
        }
        Err(e) => {
            error!(error = %e, "failed to fetch posts");
            Vec::new()
        }
    };

    let view = PageView::build(&posts, search, per_page, page);
    PageExport::from_view(&view, search)
}
