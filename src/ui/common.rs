//! Common UI components shared across views.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar.
///
/// Displays: title, current view, source, and how many posts are loaded.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let count = if app.posts_loading {
        Span::raw("Loading...")
    } else {
        Span::styled(
            format!("{} posts", app.posts.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )
    };

    let line = Line::from(vec![
        Span::styled(" POSTVIEW ", app.theme.header),
        Span::raw("│ "),
        Span::raw(app.view().label()),
        Span::raw(" │ "),
        Span::styled(app.source_description().to_string(), app.theme.muted),
        Span::raw(" │ "),
        count,
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows a temporary status message if one is set, otherwise the
/// controls available in the current mode.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.view() {
        View::List if app.search_active => "Type to search | Enter:apply Esc:done Ctrl+C:clear",
        View::List => "/:search ←→:page ↑↓:select Enter:view c:clear ?:help q:quit",
        View::Detail => "↑↓:scroll Esc:close ?:help",
    };

    let paragraph =
        Paragraph::new(format!(" {}", controls)).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Post list"),
        Line::from("  /           Search titles"),
        Line::from("  c           Clear search"),
        Line::from("  ↑/↓ j/k     Move cursor"),
        Line::from("  ←/→ h/l     Previous/next page"),
        Line::from("  1-9         Go to page"),
        Line::from("  Home/End    First/last page"),
        Line::from("  Enter v     View post"),
        Line::from(""),
        section(" Post detail"),
        Line::from("  ↑/↓ j/k     Scroll comments"),
        Line::from("  Esc c       Close"),
        Line::from(""),
        section(" General"),
        Line::from("  ?           Toggle help"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 23u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
