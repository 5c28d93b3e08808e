//! Tab bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::Theme;
use crate::state::{Store, View};

/// Tab bar widget.
pub struct TabBar;

impl TabBar {
    /// Render the tab bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let current = store.app.current_view;
        let mut spans = vec![Span::raw(" ")];

        for (i, view) in View::TABS.iter().enumerate() {
            spans.push(Span::styled(
                format!("[{}] ", i + 1),
                Style::default().fg(theme.muted),
            ));
            spans.push(Span::styled(view.title(), Self::tab_style(*view == current, theme)));
            spans.push(Span::raw("  "));
        }

        // The detail tab only exists while a sweepstake is open
        if let Some(detail) = &store.detail {
            let label = detail
                .sweepstake
                .loaded()
                .map_or_else(|| detail.sweepstake_id.clone(), |s| s.name.clone());
            spans.push(Span::styled("[Esc] ", Style::default().fg(theme.muted)));
            spans.push(Span::styled(
                crate::format::truncate(&label, 30),
                Self::tab_style(current == View::Detail, theme),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn tab_style(selected: bool, theme: &Theme) -> Style {
        if selected {
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.foreground)
        }
    }
}
