//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top). Zero-height when the status bar is hidden.
    pub status_area: Rect,
    /// Tab bar area.
    pub tab_area: Rect,
    /// Page-level error line. Zero-height when there is no error.
    pub error_area: Rect,
    /// Main content area.
    pub main_area: Rect,
    /// Notification area (overlaid).
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, show_status_bar: bool, show_error: bool) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(u16::from(show_status_bar)), // Status bar
                Constraint::Length(1),                           // Tab bar
                Constraint::Length(if show_error { 3 } else { 0 }),
                Constraint::Min(0), // Main content
            ])
            .split(area);

        // Bottom-right corner, clear of the tables
        let width = (area.width / 2).max(20).min(area.width);
        let height = 3.min(area.height);
        let notification_area = Rect {
            x: area.x + area.width - width,
            y: area.y + area.height - height,
            width,
            height,
        };

        Self {
            status_area: chunks[0],
            tab_area: chunks[1],
            error_area: chunks[2],
            main_area: chunks[3],
            notification_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_optional_rows_collapse() {
        let area = Rect::new(0, 0, 80, 24);

        let bare = Layout::new(area, false, false);
        assert_eq!(bare.status_area.height, 0);
        assert_eq!(bare.error_area.height, 0);
        assert_eq!(bare.main_area.height, 23);

        let full = Layout::new(area, true, true);
        assert_eq!(full.status_area.height, 1);
        assert_eq!(full.error_area.height, 3);
        assert_eq!(full.main_area.height, 19);
    }

    #[test]
    fn test_notification_fits_small_terminals() {
        let area = Rect::new(0, 0, 10, 2);
        let layout = Layout::new(area, true, false);
        assert!(layout.notification_area.width <= area.width);
        assert!(layout.notification_area.height <= area.height);
    }
}
