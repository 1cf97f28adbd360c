//! Search filtering and pagination over the fetched posts.
//!
//! Everything here is pure and recomputed on every frame from the current
//! post collection, search term and page number.

use super::post::Post;

/// Return the posts whose title contains `term`, ignoring case.
///
/// Relative order is preserved. An empty term matches every post.
pub fn filter_posts<'a>(posts: &'a [Post], term: &str) -> Vec<&'a Post> {
    if term.is_empty() {
        return posts.iter().collect();
    }
    let needle = term.to_lowercase();
    posts
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect()
}

/// Number of pages needed to show `total` items, `per_page` at a time.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Slice out the 1-based `page` of `items`.
///
/// Pages past the end, page 0, and a zero page size all give an empty slice.
pub fn paginate<T>(items: &[T], per_page: usize, page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Keep `page` within `[1, total_pages]`, treating zero pages as one.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Everything the list view needs to draw one page.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    /// Posts visible on this page, in display order.
    pub posts: Vec<&'a Post>,
    /// 1-based page being shown.
    pub page: usize,
    /// `ceil(filtered / per_page)`; zero when nothing matches.
    pub total_pages: usize,
    /// Posts matching the search term across all pages.
    pub filtered: usize,
    /// Position of `posts[0]` within the filtered collection.
    pub first_index: usize,
}

impl<'a> PageView<'a> {
    /// Filter `posts` by `term` and cut out `page`.
    pub fn build(posts: &'a [Post], term: &str, per_page: usize, page: usize) -> Self {
        let filtered = filter_posts(posts, term);
        let total_pages = page_count(filtered.len(), per_page);
        let visible = paginate(&filtered, per_page, page).to_vec();
        Self {
            first_index: page.saturating_sub(1).saturating_mul(per_page),
            filtered: filtered.len(),
            posts: visible,
            page,
            total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
