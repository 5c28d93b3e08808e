//! UI rendering using ratatui.
//!
//! Rendering is a pure function of the store: nothing here mutates state.

mod layout;
mod widgets;

pub use layout::{Layout, centered_rect};
pub use widgets::{
    CHART_PALETTE, CreateForm, EMPTY_MESSAGE, HelpPanel, HistoryChartWidget, SearchForm, StatusBar,
    SweepstakeDetail, SweepstakeList, TabBar, TableView, render_sortable_table, series_color,
};

use crate::config::Theme;
use crate::state::{Store, View};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store, theme: &Theme, show_status_bar: bool) {
        let layout = Layout::new(frame.area(), show_status_bar, store.app.error.is_some());

        StatusBar::render(frame, layout.status_area, store, theme);
        TabBar::render(frame, layout.tab_area, store, theme);

        if let Some(error) = &store.app.error {
            widgets::render_error(frame, layout.error_area, error, theme);
        }

        // Render main content based on current view
        match store.app.current_view {
            View::Home => SweepstakeList::render(frame, layout.main_area, store, theme),
            View::Create => CreateForm::render(frame, layout.main_area, store, theme),
            View::Search => SearchForm::render(frame, layout.main_area, store, theme),
            View::Detail => match &store.detail {
                Some(detail) => SweepstakeDetail::render(frame, layout.main_area, detail, theme),
                None => SweepstakeList::render(frame, layout.main_area, store, theme),
            },
        }

        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), theme);
        }

        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Action;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    fn draw(store: &Store) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| Ui::render(frame, store, &Theme::default(), true))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_error_slot_and_tabs() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.reduce(Action::SetView(View::Search));
        store.app.error = Some("Could not find sweepstake missing-id: not found".to_string());

        let screen = draw(&store);
        assert!(screen.contains("[1] Sweepstakes"));
        assert!(screen.contains("Find Sweepstake"));
        assert!(screen.contains("missing-id"));
    }

    #[test]
    fn test_help_overlay() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.reduce(Action::ToggleHelp);
        assert!(draw(&store).contains("Move down"));
    }
}
