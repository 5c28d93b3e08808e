//! Sweepstake detail view: header, participant and leaderboard tables,
//! and the probability chart.

use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
};

use super::super::layout::centered_rect;
use super::history_chart::HistoryChartWidget;
use super::sortable_table::{TableView, render_sortable_table};
use crate::config::Theme;
use crate::format::time_ago;
use crate::state::projection::{assignment_columns, assignment_rows};
use crate::state::table::SortableTable;
use crate::state::{DetailState, DetailTab, Phase, Sweepstake};

/// Detail view widget.
pub struct SweepstakeDetail;

impl SweepstakeDetail {
    /// Render the open sweepstake.
    pub fn render(frame: &mut Frame, area: Rect, detail: &DetailState, theme: &Theme) {
        let sweepstake = match &detail.sweepstake {
            Phase::Loaded(sweepstake) => sweepstake,
            Phase::Failed(failure) => {
                render_placeholder(frame, area, &detail.sweepstake_id, &failure.message, theme);
                return;
            }
            Phase::Idle | Phase::Loading => {
                render_placeholder(frame, area, &detail.sweepstake_id, "Loading...", theme);
                return;
            }
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Header
                Constraint::Length(1), // Tabs
                Constraint::Min(6),    // Table
                Constraint::Percentage(40),
            ])
            .split(area);

        render_header(frame, chunks[0], detail, sweepstake, theme);
        render_tabs(frame, chunks[1], detail.tab, theme);

        match detail.tab {
            DetailTab::Participants => render_participants(frame, chunks[2], detail, theme),
            DetailTab::Leaderboard => {
                let order = detail.leaderboard_order();
                let view = TableView {
                    title: format!("Leaderboard ({})", order.len()),
                    selected: Some(detail.selected_row).filter(|_| !order.is_empty()),
                    show_cursor: true,
                    marker: None,
                };
                render_sortable_table(
                    frame,
                    chunks[2],
                    &detail.leaderboard_table,
                    &detail.leaderboard_rows,
                    &order,
                    view,
                    theme,
                );
            }
        }

        HistoryChartWidget::render(frame, chunks[3], &detail.history, theme);

        if detail.confirm_close {
            render_close_prompt(frame, area, sweepstake, theme);
        }
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, id: &str, message: &str, theme: &Theme) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(theme.muted),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(format!(" Sweepstake {id} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(paragraph, area);
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    detail: &DetailState,
    sweepstake: &Sweepstake,
    theme: &Theme,
) {
    let label = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.foreground);
    let status_style = if sweepstake.active {
        Style::default().fg(theme.success)
    } else {
        Style::default().fg(theme.error)
    };

    let mut refresh = vec![
        Span::styled("Last refresh: ", label),
        Span::styled(time_ago(sweepstake.updated_at, Utc::now()), value),
    ];
    if detail.refreshing {
        refresh.push(Span::styled(
            "  refreshing...",
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(
                sweepstake.name.as_str(),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" (ID: {})", sweepstake.id), label),
        ]),
        Line::from(vec![
            Span::styled("Competition: ", label),
            Span::styled(sweepstake.competition.as_deref().unwrap_or("-"), value),
            Span::styled("   Method: ", label),
            Span::styled(sweepstake.method.label(), value),
        ]),
        Line::from(vec![
            Span::styled("Participants: ", label),
            Span::styled(sweepstake.participants.len().to_string(), value),
            Span::styled("   Status: ", label),
            Span::styled(sweepstake.status_label(), status_style),
        ]),
        Line::from(refresh),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, area: Rect, current: DetailTab, theme: &Theme) {
    let selected: usize = match current {
        DetailTab::Participants => 0,
        DetailTab::Leaderboard => 1,
    };
    let widget = Tabs::new([DetailTab::Participants.title(), DetailTab::Leaderboard.title()])
        .select(selected)
        .style(Style::default().fg(theme.muted))
        .highlight_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(widget, area);
}

/// Participant table with the expanded participant's runners below it.
fn render_participants(frame: &mut Frame, area: Rect, detail: &DetailState, theme: &Theme) {
    let order = detail.participant_order();
    let expanded_index = detail.expanded_index();
    let expanded = detail.expanded_row();

    let (table_area, nested_area) = if expanded.is_some() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let marker = |index: usize| {
        if expanded_index == Some(index) {
            "▾"
        } else {
            "▸"
        }
    };
    let view = TableView {
        title: format!("Participants ({})", order.len()),
        selected: Some(detail.selected_row).filter(|_| !order.is_empty()),
        show_cursor: true,
        marker: Some(&marker),
    };
    render_sortable_table(
        frame,
        table_area,
        &detail.participant_table,
        &detail.participant_rows,
        &order,
        view,
        theme,
    );

    if let (Some(participant), Some(nested_area)) = (expanded, nested_area) {
        let tournament = detail.is_tournament();
        let rows = assignment_rows(participant, tournament);
        let table = SortableTable::new(assignment_columns(tournament));
        let order: Vec<usize> = (0..rows.len()).collect();
        render_sortable_table(
            frame,
            nested_area,
            &table,
            &rows,
            &order,
            TableView::titled(format!("{}'s runners", participant.name)),
            theme,
        );
    }
}

fn render_close_prompt(frame: &mut Frame, area: Rect, sweepstake: &Sweepstake, theme: &Theme) {
    let popup_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(format!("Close \"{}\"?", sweepstake.name)),
        Line::from(Span::styled(
            "Odds will stop updating.",
            Style::default().fg(theme.muted),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::raw(" close   "),
            Span::styled("any other key", Style::default().fg(theme.primary)),
            Span::raw(" cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Close sweepstake ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.warning)),
        )
        .style(Style::default().fg(theme.foreground));
    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::projection::tests::sample_sweepstake;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(detail: &DetailState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| SweepstakeDetail::render(frame, frame.area(), detail, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_header_and_participants() {
        let mut detail = DetailState::new("abc");
        detail.set_sweepstake(sample_sweepstake(true));

        let screen = draw(&detail);
        assert!(screen.contains("Office Open (ID: abc)"));
        assert!(screen.contains("Last refresh: "));
        assert!(screen.contains("Participants (3)"));
        assert!(!screen.contains("'s runners"));
    }

    #[test]
    fn test_expanded_participant_shows_runners() {
        let mut detail = DetailState::new("abc");
        detail.set_sweepstake(sample_sweepstake(true));
        detail.toggle_expanded();

        let screen = draw(&detail);
        // Bob has the highest equity and is listed first
        assert!(screen.contains("Bob's runners"));
        assert!(screen.contains("Scottie"));
    }

    #[test]
    fn test_loading_placeholder() {
        let detail = DetailState::new("abc");
        let screen = draw(&detail);
        assert!(screen.contains("Sweepstake abc"));
        assert!(screen.contains("Loading..."));
    }
}
