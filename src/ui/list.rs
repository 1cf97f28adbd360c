//! Post list view rendering.
//!
//! Search box on top, the current page of matching posts in the middle,
//! and the page selector strip underneath.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;

/// Height of the search box, borders included.
const SEARCH_HEIGHT: u16 = 3;

/// Most page numbers shown in the strip at once.
const MAX_PAGE_SLOTS: usize = 9;

/// Render the list view.
///
/// Records where the post rows landed so mouse clicks can be mapped back.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(SEARCH_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    render_search(frame, app, chunks[0]);
    render_posts(frame, app, chunks[1]);
    render_page_strip(frame, app, chunks[2]);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let content = if app.search_active {
        Line::from(vec![
            Span::raw(app.search_text.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if app.search_text.is_empty() {
        Line::from(Span::styled("Search by title  (press /)", app.theme.muted))
    } else {
        Line::from(vec![
            Span::raw(app.search_text.clone()),
            Span::styled("  [c:clear]", app.theme.muted),
        ])
    };

    let border = if app.search_active {
        app.theme.highlight
    } else {
        app.theme.border
    };

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(border));

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_posts(frame: &mut Frame, app: &mut App, area: Rect) {
    let view = app.page_view();

    let title = if view.total_pages > 0 {
        format!(
            " Posts ({}/{}) [page {}/{}] ",
            view.filtered,
            app.posts.len(),
            view.page,
            view.total_pages
        )
    } else {
        format!(" Posts ({}/{}) ", view.filtered, app.posts.len())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if view.is_empty() {
        let message = if app.posts_loading {
            "Loading posts...".to_string()
        } else if !app.search_text.is_empty() && view.filtered == 0 {
            format!("No posts match \"{}\"", app.search_text)
        } else {
            "No posts".to_string()
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(format!("  {}", message), app.theme.muted)),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = view
        .posts
        .iter()
        .map(|post| {
            Row::new(vec![
                Cell::from(format!("#{}", post.id)).style(app.theme.muted),
                Cell::from(post.title.clone()),
                Cell::from("[View]").style(Style::default().fg(app.theme.highlight)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_row.min(view.posts.len() - 1)));
    let inner = table_inner(area);

    frame.render_stateful_widget(table, area, &mut state);

    app.list_area = Some(inner);
    app.list_offset = state.offset();
}

/// Body of the bordered post table.
fn table_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

fn render_page_strip(frame: &mut Frame, app: &App, area: Rect) {
    let total = app.total_pages();
    if total == 0 {
        return;
    }

    let pages = visible_pages(app.current_page, total, MAX_PAGE_SLOTS);
    let mut spans = vec![Span::styled("‹ ", app.theme.page_inactive)];

    if pages.first().is_some_and(|&p| p > 1) {
        spans.push(Span::styled("… ", app.theme.page_inactive));
    }
    for page in &pages {
        let style = if *page == app.current_page {
            app.theme.page_active
        } else {
            app.theme.page_inactive
        };
        spans.push(Span::styled(format!(" {} ", page), style));
    }
    if pages.last().is_some_and(|&p| p < total) {
        spans.push(Span::styled(" …", app.theme.page_inactive));
    }
    spans.push(Span::styled(" ›", app.theme.page_inactive));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Pick which page numbers to show: a window of at most `max_slots` pages
/// kept around `current`.
pub fn visible_pages(current: usize, total: usize, max_slots: usize) -> Vec<usize> {
    if total == 0 || max_slots == 0 {
        return Vec::new();
    }
    if total <= max_slots {
        return (1..=total).collect();
    }
    let half = max_slots / 2;
    let start = current
        .saturating_sub(half)
        .max(1)
        .min(total + 1 - max_slots);
    (start..start + max_slots).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_pages_all_fit() {
        assert_eq!(visible_pages(1, 3, 9), vec![1, 2, 3]);
        assert!(visible_pages(1, 0, 9).is_empty());
    }

    #[test]
    fn test_visible_pages_window_follows_current() {
        assert_eq!(visible_pages(1, 20, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(10, 20, 5), vec![8, 9, 10, 11, 12]);
        assert_eq!(visible_pages(20, 20, 5), vec![16, 17, 18, 19, 20]);
    }
}
