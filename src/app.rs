//! Application state and interaction logic.

use std::time::{Duration, Instant};

use ratatui::layout::{Position, Rect};
use tracing::{debug, error, info};

use crate::data::{clamp_page, page_count, PageView};
use crate::data::{Comment, Post};
use crate::source::{FetchEvent, Fetcher};
use crate::ui::Theme;

/// Which screen is showing.
///
/// Derived from whether a post is selected; there is no other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Searchable, paginated list of posts.
    List,
    /// One post with its comments.
    Detail,
}

impl View {
    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::List => "Posts",
            View::Detail => "Post",
        }
    }
}

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    fetcher: Fetcher,
    pub posts: Vec<Post>,
    pub posts_loading: bool,

    // Search
    pub search_text: String,
    pub search_active: bool,

    // Pagination
    pub current_page: usize,
    pub posts_per_page: usize,
    /// Cursor row within the current page.
    pub selected_row: usize,

    // Detail
    pub selected_post: Option<Post>,
    pub comments: Vec<Comment>,
    pub comments_loading: bool,
    pub detail_scroll: u16,

    // UI
    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,
    /// Inner area of the post table on the last frame, if one was drawn.
    pub list_area: Option<Rect>,
    /// Index of the first post row the table showed on the last frame.
    pub list_offset: usize,
}

impl App {
    /// Create the app and start fetching posts.
    ///
    /// The theme is picked from the terminal background.
    pub fn new(fetcher: Fetcher, posts_per_page: usize) -> Self {
        Self::with_theme(fetcher, posts_per_page, Theme::auto_detect())
    }

    /// Create the app with an explicit theme and start fetching posts.
    pub fn with_theme(mut fetcher: Fetcher, posts_per_page: usize, theme: Theme) -> Self {
        fetcher.request_posts();
        Self {
            running: true,
            show_help: false,
            fetcher,
            posts: Vec::new(),
            posts_loading: true,
            search_text: String::new(),
            search_active: false,
            current_page: 1,
            posts_per_page: posts_per_page.max(1),
            selected_row: 0,
            selected_post: None,
            comments: Vec::new(),
            comments_loading: false,
            detail_scroll: 0,
            theme,
            status_message: None,
            list_area: None,
            list_offset: 0,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.fetcher.description()
    }

    /// The screen to draw.
    pub fn view(&self) -> View {
        if self.selected_post.is_some() {
            View::Detail
        } else {
            View::List
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    // ----- Fetch results -----

    /// Apply every request that has finished since the last call.
    ///
    /// Returns true if anything changed.
    pub fn poll_fetches(&mut self) -> bool {
        let mut changed = false;
        while let Some(event) = self.fetcher.poll() {
            self.apply_fetch(event);
            changed = true;
        }
        changed
    }

    /// Wait for one outstanding request and apply it.
    ///
    /// Returns false if nothing was in flight.
    pub async fn wait_for_fetch(&mut self) -> bool {
        match self.fetcher.recv().await {
            Some(event) => {
                self.apply_fetch(event);
                true
            }
            None => false,
        }
    }

    /// Fold a finished request into the state.
    ///
    /// Failures are logged and leave the target collection empty. Comments
    /// for a post that is no longer selected are dropped.
    pub fn apply_fetch(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Posts(result) => {
                self.posts_loading = false;
                match result {
                    Ok(posts) => {
                        info!(count = posts.len(), "loaded posts");
                        self.posts = posts;
                    }
                    Err(e) => {
                        error!(error = %e, "failed to fetch posts");
                        self.posts.clear();
                    }
                }
                self.clamp_paging();
            }
            FetchEvent::Comments { post_id, result } => {
                if self.selected_post.as_ref().map(|p| p.id) != Some(post_id) {
                    debug!(post_id, "discarding comments for deselected post");
                    return;
                }
                self.comments_loading = false;
                match result {
                    Ok(comments) => {
                        info!(post_id, count = comments.len(), "loaded comments");
                        self.comments = comments;
                    }
                    Err(e) => {
                        error!(post_id, error = %e, "failed to fetch comments");
                        self.comments.clear();
                    }
                }
            }
        }
    }

    // ----- Derived view -----

    /// The filtered, paginated slice to draw.
    pub fn page_view(&self) -> PageView<'_> {
        PageView::build(
            &self.posts,
            &self.search_text,
            self.posts_per_page,
            self.current_page,
        )
    }

    /// Page count for the current search.
    pub fn total_pages(&self) -> usize {
        page_count(self.page_view().filtered, self.posts_per_page)
    }

    fn visible_count(&self) -> usize {
        self.page_view().posts.len()
    }

    fn clamp_paging(&mut self) {
        self.current_page = clamp_page(self.current_page, self.total_pages());
        self.selected_row = self.selected_row.min(self.visible_count().saturating_sub(1));
    }

    fn reset_paging(&mut self) {
        self.current_page = 1;
        self.selected_row = 0;
    }

    // ----- Search -----

    /// Enter search input mode (starts capturing keystrokes).
    pub fn start_search(&mut self) {
        self.search_active = true;
    }

    /// Leave search input mode, keeping the text.
    pub fn stop_search(&mut self) {
        self.search_active = false;
    }

    /// Clear the search text and leave input mode.
    pub fn clear_search(&mut self) {
        self.search_text.clear();
        self.search_active = false;
        self.reset_paging();
    }

    /// Append a character to the search text.
    pub fn search_push(&mut self, c: char) {
        self.search_text.push(c);
        self.reset_paging();
    }

    /// Remove the last character from the search text.
    pub fn search_pop(&mut self) {
        self.search_text.pop();
        self.reset_paging();
    }

    /// Replace the search text.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.reset_paging();
    }

    // ----- Pagination -----

    /// Jump to a 1-based page. Out-of-range pages are ignored.
    ///
    /// Returns true if the page exists.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() {
            return false;
        }
        self.current_page = page;
        self.selected_row = 0;
        true
    }

    pub fn next_page(&mut self) {
        let page = clamp_page(self.current_page + 1, self.total_pages());
        if page != self.current_page {
            self.current_page = page;
            self.selected_row = 0;
        }
    }

    pub fn prev_page(&mut self) {
        let page = clamp_page(self.current_page.saturating_sub(1), self.total_pages());
        if page != self.current_page {
            self.current_page = page;
            self.selected_row = 0;
        }
    }

    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn last_page(&mut self) {
        let last = self.total_pages();
        self.go_to_page(last);
    }

    // ----- Row cursor -----

    /// Move the cursor down by n rows, stopping at the last row.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.visible_count().saturating_sub(1);
        self.selected_row = (self.selected_row + n).min(max);
    }

    /// Move the cursor up by n rows, stopping at the first row.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_row = self.selected_row.saturating_sub(n);
    }

    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    // ----- Selection -----

    /// Show `post` and start fetching its comments.
    pub fn select_post(&mut self, post: Post) {
        let post_id = post.id;
        debug!(post_id, "selecting post");
        self.selected_post = Some(post);
        self.comments.clear();
        self.comments_loading = true;
        self.detail_scroll = 0;
        self.search_active = false;
        self.fetcher.request_comments(post_id);
    }

    /// Open the post on the given row of the current page.
    ///
    /// Returns false if the row is empty.
    pub fn view_row(&mut self, row: usize) -> bool {
        let Some(post) = self.page_view().posts.get(row).map(|p| (*p).clone()) else {
            return false;
        };
        self.selected_row = row;
        self.select_post(post);
        true
    }

    /// Row of the current page drawn at a screen position.
    ///
    /// Uses the table geometry recorded by the last frame. Positions outside
    /// the table body map to nothing.
    pub fn list_row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area?;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        Some(self.list_offset + usize::from(row - area.y))
    }

    /// Open the post under the cursor.
    pub fn view_selected(&mut self) -> bool {
        self.view_row(self.selected_row)
    }

    /// Return to the list. Clears the comments without touching the network.
    pub fn close_post(&mut self) {
        self.selected_post = None;
        self.comments.clear();
        self.comments_loading = false;
        self.detail_scroll = 0;
    }

    // ----- Detail scrolling -----

    pub fn scroll_down(&mut self, n: u16) {
        self.detail_scroll = self.detail_scroll.saturating_add(n);
    }

    pub fn scroll_up(&mut self, n: u16) {
        self.detail_scroll = self.detail_scroll.saturating_sub(n);
    }

    // ----- Misc -----

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
