//! Find-by-ID form.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::config::Theme;
use crate::state::{InputMode, Store};

/// Search form widget.
pub struct SearchForm;

impl SearchForm {
    /// Render the search form.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let app = &store.app;
        let editing = app.input_mode == InputMode::Insert;

        let outer = Block::default()
            .title(" Find Sweepstake ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Length(1), // Status
                Constraint::Min(0),
            ])
            .split(inner);

        let border = if editing { theme.primary } else { theme.border };
        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(theme.foreground))
            .block(
                Block::default()
                    .title(" Sweepstake ID ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        frame.render_widget(input, chunks[0]);

        if editing {
            let x = chunks[0].x + 1 + app.cursor_position as u16;
            let max_x = chunks[0].right().saturating_sub(2);
            frame.set_cursor_position(Position::new(x.min(max_x), chunks[0].y + 1));
        }

        let status = if app.searching {
            Line::from(Span::styled(
                "Searching...",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else if editing {
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(theme.primary)),
                Span::styled(" search  ", Style::default().fg(theme.muted)),
                Span::styled("Esc", Style::default().fg(theme.primary)),
                Span::styled(" stop editing", Style::default().fg(theme.muted)),
            ])
        } else {
            Line::from(vec![
                Span::styled("i", Style::default().fg(theme.primary)),
                Span::styled(" edit", Style::default().fg(theme.muted)),
            ])
        };
        frame.render_widget(Paragraph::new(status), chunks[1]);
    }
}
