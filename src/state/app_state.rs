//! Application-level state.

use super::Notification;
use std::time::Instant;

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Create,
    Search,
    Detail,
}

impl View {
    /// Views reachable from the tab bar. Detail is only entered by opening
    /// a sweepstake.
    pub const TABS: [View; 3] = [View::Home, View::Create, View::Search];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Sweepstakes",
            Self::Create => "Create",
            Self::Search => "Find",
            Self::Detail => "Detail",
        }
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keys go to the focused text field.
    Insert,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Generation of the current view activation. Results tagged with an
    /// older epoch are dropped.
    pub epoch: u64,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Page-level error message.
    pub error: Option<String>,
    /// Whether the last request reached the backend.
    pub connected: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Search input.
    pub input_buffer: String,
    /// Cursor position in input buffer, in chars.
    pub cursor_position: usize,
    /// A search lookup is in flight.
    pub searching: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new view activation and return its epoch.
    pub fn next_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// Check if in an input mode.
    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Insert
    }

    /// Clear the input buffer.
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Add a character at the cursor.
    pub fn push_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_position);
        self.input_buffer.insert(at, c);
        self.cursor_position += 1;
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_offset(self.cursor_position);
            self.input_buffer.remove(at);
        }
    }

    /// Move cursor left.
    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Drop the notification once its time is up.
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.input_buffer
            .char_indices()
            .nth(chars)
            .map_or(self.input_buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_editing_multibyte() {
        let mut app = AppState::new();
        for c in "añb".chars() {
            app.push_char(c);
        }
        app.cursor_left();
        app.pop_char();
        assert_eq!(app.input_buffer, "ab");
        assert_eq!(app.cursor_position, 1);

        app.cursor_right();
        app.cursor_right();
        assert_eq!(app.cursor_position, 2);

        app.clear_input();
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_epoch_is_monotonic() {
        let mut app = AppState::new();
        let first = app.next_epoch();
        assert!(app.next_epoch() > first);
    }
}
