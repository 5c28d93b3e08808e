//! Event handler for processing input events.

use super::InputEvent;
use super::input::Key;
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, FormField, InputMode, Store, View};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use futures::StreamExt;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
    /// Terminal input, opened on first read.
    events: Option<EventStream>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone)]
struct StoreSnapshot {
    input_mode: InputMode,
    current_view: View,
    show_help: bool,
    picker_open: bool,
    choice_focused: bool,
    confirm_close: bool,
}

impl EventHandler {
    /// Create a new event handler with the given key bindings.
    pub fn new(keybindings: KeyBindings) -> Self {
        Self {
            keybindings,
            store_snapshot: None,
            events: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
            show_help: store.app.show_help,
            picker_open: store.form.picker.is_some(),
            choice_focused: !store.form.focus.is_text(),
            confirm_close: store.detail.as_ref().is_some_and(|d| d.confirm_close),
        });
    }

    /// Get the next action from user input.
    ///
    /// Waits on crossterm's async event stream, so it never blocks the
    /// runtime and can be raced against other branches of `select!`.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        let event = self
            .events
            .get_or_insert_with(EventStream::new)
            .next()
            .await;
        match event {
            Some(Ok(CrosstermEvent::Key(key))) => Ok(self.handle_key(key)),
            Some(Ok(CrosstermEvent::Mouse(mouse))) => Ok(self.handle_mouse(mouse)),
            // Terminal will automatically redraw
            Some(Ok(_)) => Ok(None),
            Some(Err(e)) => Err(e.into()),
            None => Err(crate::Error::channel("terminal input closed")),
        }
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot.as_ref()?;
        let input = InputEvent::from(key);

        if input.matches("Ctrl+c") {
            return Some(Action::Quit);
        }

        if snapshot.show_help {
            return Some(Action::ToggleHelp);
        }

        if snapshot.confirm_close {
            return Some(if input.matches(&self.keybindings.confirm) {
                Action::ConfirmClose
            } else {
                Action::CancelClose
            });
        }

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(input, snapshot),
            InputMode::Insert => match snapshot.current_view {
                View::Create => self.handle_create_insert(input, snapshot),
                _ => self.handle_search_insert(input),
            },
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(&self, input: InputEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let keys = &self.keybindings;

        // Global shortcuts
        if input.matches(&keys.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&keys.help) {
            return Some(Action::ToggleHelp);
        }

        // View switching
        if input.matches(&keys.home) {
            return Some(Action::SetView(View::Home));
        }
        if input.matches(&keys.create) {
            return Some(Action::SetView(View::Create));
        }
        if input.matches(&keys.search) {
            return Some(Action::SetView(View::Search));
        }

        // Navigation
        if input.matches(&keys.up) || input.key == Key::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&keys.down) || input.key == Key::Down {
            return Some(Action::ScrollDown);
        }
        match input.key {
            Key::PageUp => return Some(Action::PageUp),
            Key::PageDown => return Some(Action::PageDown),
            Key::Home => return Some(Action::GoToTop),
            Key::End => return Some(Action::GoToBottom),
            _ => {}
        }

        // View-specific actions
        match snapshot.current_view {
            View::Home => self.handle_home_view(input),
            View::Detail => self.handle_detail_view(input),
            View::Create | View::Search => {
                if input.matches(&keys.edit) || input.matches(&keys.select) {
                    Some(Action::SetInputMode(InputMode::Insert))
                } else if snapshot.current_view == View::Create && input.matches(&keys.submit) {
                    Some(Action::SubmitCreate)
                } else if input.matches(&keys.back) {
                    Some(Action::SetView(View::Home))
                } else {
                    None
                }
            }
        }
    }

    fn handle_home_view(&self, input: InputEvent) -> Option<Action> {
        let keys = &self.keybindings;

        if input.matches(&keys.select) {
            return Some(Action::OpenSelected);
        }
        if input.matches(&keys.refresh) {
            return Some(Action::SetView(View::Home));
        }
        if input.matches(&keys.back) {
            return Some(Action::ClearError);
        }

        None
    }

    fn handle_detail_view(&self, input: InputEvent) -> Option<Action> {
        let keys = &self.keybindings;

        if input.matches(&keys.back) {
            return Some(Action::SetView(View::Home));
        }
        if input.matches(&keys.refresh) {
            return Some(Action::RefreshSweepstake);
        }
        if input.matches(&keys.close) {
            return Some(Action::RequestClose);
        }
        if input.matches(&keys.switch_tab) {
            return Some(Action::SwitchDetailTab);
        }
        if input.matches(&keys.select) {
            return Some(Action::ToggleExpand);
        }
        if input.matches(&keys.sort) {
            return Some(Action::SortFocusedColumn);
        }

        match input.key {
            Key::Left | Key::Char('h') => Some(Action::FocusPrevColumn),
            Key::Right | Key::Char('l') => Some(Action::FocusNextColumn),
            _ => None,
        }
    }

    fn handle_search_insert(&self, input: InputEvent) -> Option<Action> {
        match input.key {
            Key::Escape => Some(Action::SetInputMode(InputMode::Normal)),
            Key::Enter => Some(Action::SubmitSearch),
            Key::Backspace => Some(Action::DeleteChar),
            Key::Left => Some(Action::CursorLeft),
            Key::Right => Some(Action::CursorRight),
            _ => input.text().map(Action::InputChar),
        }
    }

    fn handle_create_insert(&self, input: InputEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let keys = &self.keybindings;

        if snapshot.picker_open {
            return match input.key {
                Key::Up => Some(Action::ScrollUp),
                Key::Down => Some(Action::ScrollDown),
                Key::Enter => Some(Action::PickerSelect),
                Key::Escape => Some(Action::ClosePicker),
                _ => None,
            };
        }

        if input.matches(&keys.picker) {
            return Some(Action::OpenPicker);
        }
        if input.matches(&keys.add_participant) {
            return Some(Action::FormAddParticipant);
        }
        if input.matches(&keys.remove_participant) {
            return Some(Action::FormRemoveParticipant);
        }
        if input.matches(&keys.submit) {
            return Some(Action::SubmitCreate);
        }

        match input.key {
            Key::Escape => Some(Action::SetInputMode(InputMode::Normal)),
            Key::Enter => Some(Action::SubmitCreate),
            Key::Tab | Key::Down => Some(Action::FormNextField),
            Key::BackTab | Key::Up => Some(Action::FormPrevField),
            Key::Backspace => Some(Action::DeleteChar),
            Key::Left if snapshot.choice_focused => Some(Action::FormCycleChoice(false)),
            Key::Right | Key::Char(' ') if snapshot.choice_focused => {
                Some(Action::FormCycleChoice(true))
            }
            _ => input.text().map(Action::InputChar),
        }
    }
}
