//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`list`]: Search box, current page of posts, and page selector strip
//! - [`detail`]: Selected post with its comments
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ list::render  or  detail::render     │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod common;
pub mod detail;
pub mod list;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};

/// Minimum terminal width for a usable display.
pub const MIN_WIDTH: u16 = 40;
/// Minimum terminal height for a usable display.
pub const MIN_HEIGHT: u16 = 10;

/// Draw one frame.
///
/// Geometry of the post table is stored on `app` for mouse hit-testing and
/// cleared whenever no table is on screen.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.list_area = None;
    app.list_offset = 0;

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let y = area.height.saturating_sub(2) / 2;
        let centered = Rect::new(0, y, area.width, area.height.min(2));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Min(6),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);

    match app.view() {
        View::List => list::render(frame, app, chunks[1]),
        View::Detail => detail::render(frame, app, chunks[1]),
    }

    common::render_status_bar(frame, app, chunks[2]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
