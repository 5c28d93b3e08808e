//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::Theme;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", "Move down"),
            ("k/↑", "Move up"),
            ("Home", "Go to top"),
            ("End", "Go to bottom"),
            ("Enter", "Open / expand"),
            ("Esc", "Back"),
        ],
    ),
    (
        "Views",
        &[
            ("1", "Sweepstakes"),
            ("2", "Create sweepstake"),
            ("3", "Find by ID"),
        ],
    ),
    (
        "Sweepstake",
        &[
            ("Tab", "Participants / leaderboard"),
            ("h/l", "Move column cursor"),
            ("s", "Sort by column"),
            ("r", "Refresh odds"),
            ("x", "Close sweepstake"),
        ],
    ),
    (
        "Create form",
        &[
            ("i", "Start editing"),
            ("Tab", "Next field"),
            ("←/→", "Change method / longshots"),
            ("Ctrl+e", "Pick a market"),
            ("Ctrl+n", "Add participant"),
            ("Ctrl+d", "Remove participant"),
            ("Ctrl+s", "Submit"),
        ],
    ),
    ("General", &[("?", "Toggle help"), ("q", "Quit")]),
];

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = centered_rect(60, 90, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let heading = Style::default()
            .fg(theme.warning)
            .add_modifier(Modifier::BOLD);
        let key = Style::default().fg(theme.primary);

        let mut help_text = Vec::new();
        for (i, (title, bindings)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(Span::styled(*title, heading)));
            for (keys, description) in *bindings {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {keys:<8}"), key),
                    Span::raw(*description),
                ]));
            }
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.warning)),
            )
            .style(Style::default().fg(theme.foreground));

        frame.render_widget(help, popup_area);
    }
}
