//! Notification and error rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::config::Theme;
use crate::state::{Notification, NotificationLevel};

/// Render a notification popup.
pub fn render_notification(
    frame: &mut Frame,
    area: Rect,
    notification: &Notification,
    theme: &Theme,
) {
    frame.render_widget(Clear, area);

    let (border_color, icon) = match notification.level {
        NotificationLevel::Info => (theme.primary, "ℹ"),
        NotificationLevel::Success => (theme.success, "✓"),
        NotificationLevel::Warning => (theme.warning, "⚠"),
        NotificationLevel::Error => (theme.error, "✗"),
    };

    let content = Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().fg(border_color)),
        Span::raw(notification.message.as_str()),
    ]);

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().fg(theme.foreground));

    frame.render_widget(paragraph, area);
}

/// Render the page-level error line.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    if area.height == 0 {
        return;
    }

    let content = Line::from(vec![
        Span::styled(
            "✗ Error: ",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ),
        Span::raw(error),
    ]);

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error)),
        )
        .style(Style::default().fg(theme.foreground));

    frame.render_widget(paragraph, area);
}
