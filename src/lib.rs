//! # postview
//!
//! A terminal UI and library for browsing blog posts served by a
//! JSONPlaceholder-style REST API.
//!
//! Posts are fetched once at start-up. The list can be searched by title
//! (case-insensitive substring) and is paged client-side. Opening a post
//! fetches its comments.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (filter, │    │(render) │    │         │ │
//! │  └────┬────┘    │  pages)  │    └─────────┘    └─────────┘ │
//! │       │         └──────────┘                               │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── Fetcher ◀── PostApi (HttpApi)               │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, search, paging and selection
//! - **[`source`]**: [`PostApi`] trait, the reqwest-backed [`HttpApi`], and the
//!   background [`Fetcher`]
//! - **[`data`]**: [`Post`]/[`Comment`] models and the pure filter/paginate functions
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]**: Layered configuration (defaults, file, env, CLI)
//! - **[`export`]**: JSON page export behind `--dump`
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Browse the public JSONPlaceholder API
//! postview
//!
//! # Point at another server, 5 posts per page
//! postview --base-url http://localhost:3000 --per-page 5
//!
//! # Print page 2 of the posts matching "qui" and exit
//! postview --dump --search qui --page 2
//! ```
//!
//! ### As a library
//!
//! ```
//! use postview::data::{filter_posts, paginate, Post};
//!
//! let posts = vec![
//!     Post { id: 1, title: "Hello World".into(), body: String::new(), user_id: 1 },
//!     Post { id: 2, title: "Goodbye".into(), body: String::new(), user_id: 1 },
//! ];
//!
//! let matching = filter_posts(&posts, "hello");
//! assert_eq!(paginate(&matching, 10, 1).len(), 1);
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod export;
pub mod logging;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use data::{Comment, PageView, Post};
pub use source::{FetchError, FetchEvent, Fetcher, HttpApi, PostApi};
