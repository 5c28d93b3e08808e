//! Sweepstake list widget for the home view.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use crate::config::Theme;
use crate::format::truncate;
use crate::state::{Phase, Store};

/// Shown in place of an empty list.
pub const EMPTY_MESSAGE: &str = "No sweepstakes available. Please create one.";

/// Sweepstake list widget.
pub struct SweepstakeList;

impl SweepstakeList {
    /// Render the sweepstake list.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let list = &store.list;
        let sweepstakes = list.items();

        let block = Block::default()
            .title(format!(" Sweepstakes ({}) ", sweepstakes.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));

        match &list.sweepstakes {
            Phase::Idle | Phase::Loading => {
                render_message(frame, area, block, "Loading...", theme.warning);
                return;
            }
            Phase::Failed(failure) => {
                render_message(frame, area, block, &failure.message, theme.error);
                return;
            }
            Phase::Loaded(items) if items.is_empty() => {
                render_message(frame, area, block, EMPTY_MESSAGE, theme.muted);
                return;
            }
            _ => {}
        }

        let header_cells = ["ID", "Name", "No. Participants", "Status"].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = sweepstakes.iter().map(|sweepstake| {
            let status_style = if sweepstake.active {
                Style::default().fg(theme.success)
            } else {
                Style::default().fg(theme.muted)
            };

            let cells = vec![
                Cell::from(sweepstake.id.as_str()).style(Style::default().fg(theme.muted)),
                Cell::from(truncate(&sweepstake.name, 50)),
                Cell::from(sweepstake.participants.len().to_string()),
                Cell::from(sweepstake.status_label()).style(status_style),
            ];

            Row::new(cells).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Min(20),
                Constraint::Length(18),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(block)
        .style(Style::default().fg(theme.foreground))
        .row_highlight_style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(list.selected_index);

        frame.render_stateful_widget(table, area, &mut state);
    }
}

fn render_message(
    frame: &mut Frame,
    area: Rect,
    block: Block<'_>,
    message: &str,
    color: Color,
) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(color),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::projection::tests::sample_sweepstake;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    fn draw(store: &Store) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|frame| SweepstakeList::render(frame, frame.area(), store, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    #[test]
    fn test_empty_list_prompts_creation() {
        let mut store = store();
        store.list.set_loaded(Vec::new());
        assert!(draw(&store).contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_rows_show_count_and_status() {
        let mut store = store();
        store.list.set_loaded(vec![sample_sweepstake(false)]);
        let screen = draw(&store);
        assert!(screen.contains("No. Participants"));
        assert!(screen.contains("abc"));
        assert!(screen.contains("Active"));
    }
}
