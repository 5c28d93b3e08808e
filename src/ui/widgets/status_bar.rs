//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::Theme;
use crate::state::{InputMode, Store};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Whether any request the user is waiting on is in flight.
    fn busy(store: &Store) -> bool {
        store.list.sweepstakes.is_loading()
            || store.app.searching
            || store.form.submitting
            || store.detail.as_ref().is_some_and(|d| {
                d.sweepstake.is_loading() || d.history.is_loading() || d.refreshing
            })
    }

    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        if area.height == 0 {
            return;
        }

        let connection_status = if store.app.connected {
            Span::styled("● Connected", Style::default().fg(theme.success))
        } else {
            Span::styled("○ Disconnected", Style::default().fg(theme.error))
        };

        let mode = match store.app.input_mode {
            InputMode::Normal => Span::styled(" NORMAL ", Style::default().fg(theme.muted)),
            InputMode::Insert => Span::styled(
                " INSERT ",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
        };

        let loading = if Self::busy(store) {
            Span::styled(
                " Loading... ",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(theme.muted));

        let left_content = vec![
            Span::styled(
                " Sweepy ",
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            connection_status,
            Span::raw(" | "),
            Span::styled(
                store.app.current_view.title(),
                Style::default().fg(theme.foreground),
            ),
            Span::raw(" |"),
            mode,
            loading,
        ];

        let status_line = Line::from(left_content);

        // Pad so the help hint sits on the right edge
        let left_len = status_line.width();
        let right_len = help_hint.width();
        let padding = (area.width as usize).saturating_sub(left_len + right_len);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding)));
        full_line.push(help_hint);

        let paragraph = Paragraph::new(Line::from(full_line));

        frame.render_widget(paragraph, area);
    }
}
