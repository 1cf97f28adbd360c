//! Post detail rendering.
//!
//! Shows the selected post's title and body, followed by its comments.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// Render the detail view for the selected post.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref post) = app.selected_post else {
        return;
    };

    let chunks = Layout::vertical([Constraint::Percentage(35), Constraint::Min(5)]).split(area);

    // ===== POST =====
    let post_lines = vec![
        Line::from(Span::styled(
            post.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("post #{} by user {}", post.id, post.user_id),
            app.theme.muted,
        )),
        Line::from(""),
        Line::from(post.body.clone()),
    ];

    let post_block = Block::default()
        .title(" Post [Esc:close] ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(
        Paragraph::new(post_lines)
            .block(post_block)
            .wrap(Wrap { trim: false }),
        chunks[0],
    );

    // ===== COMMENTS =====
    let comments_block = Block::default()
        .title(format!(" Comments ({}) ", app.comments.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.comments.is_empty() {
        let message = if app.comments_loading {
            "Loading comments..."
        } else {
            "No comments"
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(format!("  {}", message), app.theme.muted)),
        ])
        .block(comments_block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let mut lines = Vec::with_capacity(app.comments.len() * 4);
    for comment in &app.comments {
        lines.push(Line::from(vec![
            Span::styled(comment.name.clone(), app.theme.header),
            Span::styled(format!("  <{}>", comment.email), app.theme.muted),
        ]));
        lines.push(Line::from(comment.body.clone()));
        lines.push(Line::from(""));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(comments_block)
            .wrap(Wrap { trim: false })
            .scroll((app.detail_scroll, 0)),
        chunks[1],
    );
}
