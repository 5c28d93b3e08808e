//! Create-sweepstake form and market picker.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::super::layout::centered_rect;
use crate::config::Theme;
use crate::state::{CreateFormState, FormField, InputMode, MIN_PARTICIPANTS, Phase, Picker, Store};

/// Create form widget.
pub struct CreateForm;

impl CreateForm {
    /// Render the create form, and the picker on top of it when open.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let form = &store.form;
        let editing = store.app.input_mode == InputMode::Insert;

        let title = if form.submitting {
            " Create Sweepstake (submitting...) "
        } else {
            " Create Sweepstake "
        };
        let outer = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Market ID
                Constraint::Length(3), // Name
                Constraint::Length(3), // Method and longshots
                Constraint::Length(3), // Competition
                Constraint::Min(3),    // Participants
                Constraint::Length(1), // Hints
            ])
            .split(inner);

        let text_fields = [
            (FormField::MarketId, "Market ID", &form.market_id, chunks[0]),
            (FormField::Name, "Name", &form.name, chunks[1]),
            (FormField::Competition, "Competition (optional)", &form.competition, chunks[3]),
        ];
        for (field, label, value, area) in text_fields {
            let focused = form.focus == field;
            render_text_field(frame, area, label, value, focused, theme);
            if focused && editing {
                place_cursor(frame, area, value);
            }
        }

        let choices = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);
        render_method(frame, choices[0], form, theme);
        render_longshots(frame, choices[1], form, theme);
        render_participants(frame, chunks[4], form, editing, theme);
        render_hints(frame, chunks[5], editing, theme);

        if let Some(picker) = &form.picker {
            render_picker(frame, area, picker, theme);
        }
    }
}

fn field_block<'a>(label: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused { theme.primary } else { theme.border };
    Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let paragraph = Paragraph::new(value)
        .style(Style::default().fg(theme.foreground))
        .block(field_block(label, focused, theme));
    frame.render_widget(paragraph, area);
}

/// Cursor at the end of `value` inside a bordered box.
fn place_cursor(frame: &mut Frame, area: Rect, value: &str) {
    let x = area.x + 1 + value.chars().count() as u16;
    let max_x = area.right().saturating_sub(2);
    frame.set_cursor_position(Position::new(x.min(max_x), area.y + 1));
}

fn render_method(frame: &mut Frame, area: Rect, form: &CreateFormState, theme: &Theme) {
    let focused = form.focus == FormField::Method;
    let label = form.method.label();
    let line = if focused {
        Line::from(vec![
            Span::styled("◀ ", Style::default().fg(theme.muted)),
            Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(theme.muted)),
        ])
    } else {
        Line::from(Span::styled(label, Style::default().fg(theme.foreground)))
    };
    let paragraph = Paragraph::new(line).block(field_block("Method", focused, theme));
    frame.render_widget(paragraph, area);
}

fn render_longshots(frame: &mut Frame, area: Rect, form: &CreateFormState, theme: &Theme) {
    let focused = form.focus == FormField::IgnoreLongshots;
    let (mark, style) = if form.ignore_longshots {
        ("[x] ", Style::default().fg(theme.accent))
    } else {
        ("[ ] ", Style::default().fg(theme.muted))
    };
    let line = Line::from(vec![
        Span::styled(mark, style),
        Span::styled("skip unlayable runners", Style::default().fg(theme.foreground)),
    ]);
    let paragraph = Paragraph::new(line).block(field_block("Ignore longshots", focused, theme));
    frame.render_widget(paragraph, area);
}

fn render_participants(
    frame: &mut Frame,
    area: Rect,
    form: &CreateFormState,
    editing: bool,
    theme: &Theme,
) {
    let focused_index = match form.focus {
        FormField::Participant(i) => Some(i),
        _ => None,
    };
    let filled = form.participant_names().len();
    let count_style = if filled < MIN_PARTICIPANTS {
        Style::default().fg(theme.warning)
    } else {
        Style::default().fg(theme.success)
    };

    let items: Vec<ListItem> = form
        .participants
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let text = if name.is_empty() && focused_index != Some(i) {
                Span::styled("(empty)", Style::default().fg(theme.muted))
            } else {
                Span::styled(name.as_str(), Style::default().fg(theme.foreground))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(theme.muted)),
                text,
            ]))
        })
        .collect();

    let block = field_block("Participants", focused_index.is_some(), theme).title_bottom(
        Line::from(Span::styled(
            format!(" {filled} named, {MIN_PARTICIPANTS} needed "),
            count_style,
        ))
        .right_aligned(),
    );
    let inner = block.inner(area);

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.selection));
    let mut state = ListState::default();
    state.select(focused_index);
    frame.render_stateful_widget(list, area, &mut state);

    if editing
        && let Some(i) = focused_index
        && let Some(name) = form.participants.get(i)
    {
        // Rows scroll once the focused entry passes the bottom edge
        let row = (i as u16).min(inner.height.saturating_sub(1));
        let x = inner.x + 4 + name.chars().count() as u16;
        frame.set_cursor_position(Position::new(
            x.min(inner.right().saturating_sub(1)),
            inner.y + row,
        ));
    }
}

fn render_hints(frame: &mut Frame, area: Rect, editing: bool, theme: &Theme) {
    let key = Style::default().fg(theme.primary);
    let text = Style::default().fg(theme.muted);
    let spans = if editing {
        vec![
            Span::styled("Tab", key),
            Span::styled(" next  ", text),
            Span::styled("Ctrl+e", key),
            Span::styled(" pick market  ", text),
            Span::styled("Ctrl+n/d", key),
            Span::styled(" add/remove  ", text),
            Span::styled("Ctrl+s", key),
            Span::styled(" create  ", text),
            Span::styled("Esc", key),
            Span::styled(" stop editing", text),
        ]
    } else {
        vec![
            Span::styled("i", key),
            Span::styled(" edit  ", text),
            Span::styled("Ctrl+s", key),
            Span::styled(" create", text),
        ]
    };
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_picker(frame: &mut Frame, area: Rect, picker: &Picker, theme: &Theme) {
    let popup_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup_area);

    let (title, labels, notice): (String, Vec<String>, _) = match picker {
        Picker::EventTypes { options, .. } => (
            " Choose an event type ".to_string(),
            options
                .loaded()
                .map(|types| types.iter().map(|t| t.name.clone()).collect())
                .unwrap_or_default(),
            phase_message(options),
        ),
        Picker::Markets {
            event_type,
            options,
            ..
        } => (
            format!(" {} markets ", event_type.name),
            options
                .loaded()
                .map(|markets| {
                    markets
                        .iter()
                        .map(|m| format!("{} · {}", m.competition_name, m.market_name))
                        .collect()
                })
                .unwrap_or_default(),
            phase_message(options),
        ),
    };

    let block = Block::default()
        .title(title)
        .title_bottom(Line::from(" Enter select · Esc cancel ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    if let Some((message, failed)) = notice {
        let color = if failed { theme.error } else { theme.warning };
        let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(color)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, popup_area);
        return;
    }

    let items: Vec<ListItem> = labels.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(block)
        .style(Style::default().fg(theme.foreground))
        .highlight_style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    state.select(Some(picker.selected()).filter(|_| !picker.is_empty()));
    frame.render_stateful_widget(list, popup_area, &mut state);
}

/// Text to show instead of the options, and whether it is a failure.
fn phase_message<T>(phase: &Phase<Vec<T>>) -> Option<(String, bool)> {
    match phase {
        Phase::Idle | Phase::Loading => Some(("Loading...".to_string(), false)),
        Phase::Failed(failure) => Some((failure.message.clone(), true)),
        Phase::Loaded(items) if items.is_empty() => Some(("Nothing available".to_string(), false)),
        Phase::Loaded(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EventType;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    fn draw(store: &Store) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| CreateForm::render(frame, frame.area(), store, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_form_and_picker() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.form.name = "Office Open".to_string();
        store.form.participants = vec!["Alice".to_string()];

        let screen = draw(&store);
        assert!(screen.contains("Office Open"));
        assert!(screen.contains("1 named, 2 needed"));
        assert!(screen.contains("[ ] skip unlayable runners"));

        store.form.ignore_longshots = true;
        assert!(draw(&store).contains("[x] skip unlayable runners"));

        store.form.picker = Some(Picker::EventTypes {
            options: Phase::Loaded(vec![EventType {
                id: "7".to_string(),
                name: "Horse Racing".to_string(),
            }]),
            selected: 0,
        });
        assert!(draw(&store).contains("Horse Racing"));
    }
}
