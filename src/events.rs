use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// Rows moved by PageUp/PageDown in the detail view.
const SCROLL_PAGE: u16 = 10;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.view() == View::Detail {
        handle_detail_input(app, key);
        return;
    }

    // If search input is active, handle text input
    if app.search_active {
        handle_search_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('q') => app.quit(),

        // Cursor within the page
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),

        // Pages
        KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => app.prev_page(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => app.next_page(),
        KeyCode::Home => app.first_page(),
        KeyCode::End => app.last_page(),
        KeyCode::Char(c @ '1'..='9') => {
            let page = c.to_digit(10).unwrap_or(1) as usize;
            if !app.go_to_page(page) {
                app.set_status_message(format!("No page {}", page));
            }
        }

        // Open the post under the cursor
        KeyCode::Enter | KeyCode::Char('v') => {
            app.view_selected();
        }

        // Search
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('c') => {
            if !app.search_text.is_empty() {
                app.clear_search();
            }
        }

        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle key input while a post is open
fn handle_detail_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('c') | KeyCode::Char('q') => {
            app.close_post();
        }
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(SCROLL_PAGE),
        KeyCode::PageDown => app.scroll_down(SCROLL_PAGE),
        KeyCode::Home => app.detail_scroll = 0,
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
}

/// Handle key input while search is active
fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm or leave, keeping the text
        KeyCode::Enter | KeyCode::Esc => app.stop_search(),

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_search();
        }

        KeyCode::Backspace => {
            app.search_pop();
            if app.search_text.is_empty() {
                app.stop_search();
            }
        }

        KeyCode::Char(c) => app.search_push(c),

        _ => {}
    }
}

/// Handle mouse events
///
/// Clicks are resolved against the table drawn on the last frame. Nothing
/// reacts while the help overlay covers the screen.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.show_help {
        return;
    }

    match (app.view(), mouse.kind) {
        (View::List, MouseEventKind::ScrollUp) => app.select_prev(),
        (View::List, MouseEventKind::ScrollDown) => app.select_next(),
        (View::Detail, MouseEventKind::ScrollUp) => app.scroll_up(1),
        (View::Detail, MouseEventKind::ScrollDown) => app.scroll_down(1),

        // Click a row to open it
        (View::List, MouseEventKind::Down(MouseButton::Left)) => {
            if let Some(row) = app.list_row_at(mouse.column, mouse.row) {
                app.view_row(row);
            }
        }

        // Right-click goes back
        (View::Detail, MouseEventKind::Down(MouseButton::Right)) => app.close_post(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{numbered, FakeApi};
    use crate::source::{FetchEvent, Fetcher};
    use crate::ui::Theme;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click_at(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn click(row: u16) -> MouseEvent {
        click_at(10, row)
    }

    /// Draw one frame so the table geometry is recorded.
    fn draw(app: &mut App, width: u16, height: u16) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| crate::ui::render(frame, app)).unwrap();
    }

    fn loaded(rt: &tokio::runtime::Runtime, n: u64) -> App {
        let fetcher = Fetcher::new(Arc::new(FakeApi::default()), rt.handle().clone());
        let mut app = App::with_theme(fetcher, 10, Theme::dark());
        app.apply_fetch(FetchEvent::Posts(Ok(numbered(n))));
        app
    }

    #[test]
    fn test_typing_search() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded(&rt, 25);
        app.go_to_page(2);

        handle_key_event(&mut app, key(KeyCode::Char('/')));
        assert!(app.search_active);

        for c in "ber 2".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.search_text, "ber 2");
        assert_eq!(app.current_page, 1);
        // 'q' is text while typing
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.running);
        handle_key_event(&mut app, key(KeyCode::Backspace));

        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(!app.search_active);
        assert_eq!(app.search_text, "ber 2");

        handle_key_event(&mut app, key(KeyCode::Char('c')));
        assert!(app.search_text.is_empty());
    }

    #[test]
    fn test_ctrl_c_clears_search() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded(&rt, 5);
        app.start_search();
        app.search_push('x');

        handle_key_event(&mut app, ctrl('c'));
        assert!(app.search_text.is_empty());
        assert!(!app.search_active);
        assert!(app.running);
    }

    #[test]
    fn test_paging_keys() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded(&rt, 25);

        handle_key_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.current_page, 2);
        handle_key_event(&mut app, key(KeyCode::End));
        assert_eq!(app.current_page, 3);
        handle_key_event(&mut app, key(KeyCode::Char('1')));
        assert_eq!(app.current_page, 1);
        handle_key_event(&mut app, key(KeyCode::Char('7')));
        assert_eq!(app.current_page, 1);
        assert!(app.get_status_message().is_some());
    }

    #[test]
    fn test_enter_opens_and_esc_closes() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded(&rt, 25);

        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.view(), View::Detail);
        assert_eq!(app.selected_post.as_ref().map(|p| p.id), Some(2));

        handle_key_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.detail_scroll, 1);

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.view(), View::List);
        assert!(app.comments.is_empty());
    }

    #[test]
    fn test_help_swallows_next_key() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded(&rt, 5);

        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_click_row_opens_post() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded(&rt, 25);
        app.go_to_page(2);
        draw(&mut app, 80, 24);

        // Search box border
        handle_mouse_event(&mut app, click(4));
        assert_eq!(app.view(), View::List);

        handle_mouse_event(&mut app, click(7));
        assert_eq!(app.selected_post.as_ref().map(|p| p.id), Some(13));
    }

    #[test]
    fn test_click_outside_table_opens_nothing() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded(&rt, 25);
        // 80x15: rows 5-11 hold posts, 12 is the bottom border, 13 the page strip
        draw(&mut app, 80, 15);

        handle_mouse_event(&mut app, click(13));
        assert_eq!(app.view(), View::List);
        handle_mouse_event(&mut app, click(12));
        assert_eq!(app.view(), View::List);
        handle_mouse_event(&mut app, click_at(0, 7));
        assert_eq!(app.view(), View::List);
        assert!(app.selected_post.is_none());
    }

    #[test]
    fn test_click_follows_table_scroll() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded(&rt, 25);
        // Cursor on the last post of the page; only 7 rows fit
        app.select_next_n(9);
        draw(&mut app, 80, 15);
        assert_eq!(app.list_offset, 3);

        handle_mouse_event(&mut app, click(5));
        assert_eq!(app.selected_post.as_ref().map(|p| p.id), Some(4));
    }

    #[test]
    fn test_click_ignored_under_help() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded(&rt, 25);
        draw(&mut app, 80, 24);
        app.toggle_help();

        handle_mouse_event(&mut app, click(7));
        assert_eq!(app.view(), View::List);
        assert!(app.show_help);
    }
}
