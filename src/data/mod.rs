//! Data models and derived views over fetched posts.
//!
//! ## Submodules
//!
//! - [`post`]: Wire models ([`Post`], [`Comment`]) as returned by the API
//! - [`view`]: Pure functions for search filtering and pagination
//!
//! ## Data Flow
//!
//! ```text
//! Vec<Post> (fetched once)
//!        │
//!        ▼
//! filter_posts(term)      ──▶ ordered subsequence
//!        │
//!        ▼
//! PageView::build(page)   ──▶ visible slice + page count
//! ```

pub mod post;
pub mod view;

pub use post::{Comment, Post};
pub use view::{clamp_page, filter_posts, page_count, paginate, PageView};
