//! State management for Sweepy.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. The reducer never
//! performs I/O: actions that need the backend return an [`Effect`] which
//! the app runs on a background task. Results come back as actions tagged
//! with the epoch of the view activation that asked for them.

mod app_state;
mod detail_state;
mod form_state;
mod history;
mod list_state;
mod phase;
pub mod projection;
mod sweepstake;
pub mod table;

pub use app_state::{AppState, InputMode, View};
pub use detail_state::{DetailState, DetailTab};
pub use form_state::{CreateFormState, FormField, MIN_PARTICIPANTS, Picker};
pub use history::{ChartSeries, HistoryChart};
pub use list_state::SweepstakeListState;
pub use phase::{Failure, FailureKind, Phase};
pub use sweepstake::{
    AllocationMethod, Assignment, CreateSweepstakeRequest, EventType, HistoryPoint, MarketInfo,
    Participant, ParticipantHistory, Sweepstake, SweepstakeHistory,
};

use crate::error::Result;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Result of a background operation, as carried by actions.
pub type Outcome<T> = std::result::Result<T, Failure>;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    OpenSweepstake(String),
    OpenSelected,
    SetInputMode(InputMode),

    // Text input
    InputChar(char),
    DeleteChar,
    CursorLeft,
    CursorRight,
    SubmitSearch,

    // Create form
    FormNextField,
    FormPrevField,
    FormCycleChoice(bool),
    FormAddParticipant,
    FormRemoveParticipant,
    SubmitCreate,
    OpenPicker,
    PickerSelect,
    ClosePicker,

    // Detail
    RefreshSweepstake,
    RequestClose,
    ConfirmClose,
    CancelClose,
    SwitchDetailTab,
    ToggleExpand,
    SortFocusedColumn,
    FocusNextColumn,
    FocusPrevColumn,

    // Results
    SweepstakesLoaded {
        epoch: u64,
        result: Outcome<Vec<Sweepstake>>,
    },
    SweepstakeLoaded {
        epoch: u64,
        result: Outcome<Sweepstake>,
    },
    LookupCompleted {
        epoch: u64,
        result: Outcome<Sweepstake>,
    },
    HistoryLoaded {
        epoch: u64,
        request: u64,
        result: Outcome<SweepstakeHistory>,
    },
    SweepstakeRefreshed {
        epoch: u64,
        result: Outcome<Sweepstake>,
    },
    SweepstakeCreated {
        epoch: u64,
        result: Outcome<Sweepstake>,
    },
    SweepstakeClosed {
        epoch: u64,
        result: Outcome<()>,
    },
    EventTypesLoaded {
        epoch: u64,
        result: Outcome<Vec<EventType>>,
    },
    MarketsLoaded {
        epoch: u64,
        event_type: String,
        result: Outcome<Vec<MarketInfo>>,
    },

    // UI actions
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,
    Tick,

    // Error handling
    SetError(String),
    ClearError,

    // Quit
    Quit,
}

impl Action {
    /// Epoch of a result action, `None` for user actions.
    pub fn epoch(&self) -> Option<u64> {
        match self {
            Self::SweepstakesLoaded { epoch, .. }
            | Self::SweepstakeLoaded { epoch, .. }
            | Self::LookupCompleted { epoch, .. }
            | Self::HistoryLoaded { epoch, .. }
            | Self::SweepstakeRefreshed { epoch, .. }
            | Self::SweepstakeCreated { epoch, .. }
            | Self::SweepstakeClosed { epoch, .. }
            | Self::EventTypesLoaded { epoch, .. }
            | Self::MarketsLoaded { epoch, .. } => Some(*epoch),
            _ => None,
        }
    }
}

/// Backend work requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadSweepstakes { epoch: u64, include_closed: bool },
    /// Fetch a sweepstake, then its history as `request`.
    LoadSweepstake { epoch: u64, id: String, request: u64 },
    LoadHistory { epoch: u64, id: String, request: u64 },
    LookupSweepstake { epoch: u64, id: String },
    /// Refresh a sweepstake, then re-fetch its history as `request`.
    RefreshSweepstake { epoch: u64, id: String, request: u64 },
    CloseSweepstake { epoch: u64, id: String },
    CreateSweepstake {
        epoch: u64,
        request: CreateSweepstakeRequest,
    },
    LoadEventTypes { epoch: u64 },
    LoadMarkets { epoch: u64, event_type: String },
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    pub created_at: Instant,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    fn with_level(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration_secs,
            created_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Error, 10)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= Duration::from_secs(self.duration_secs)
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Home view.
    pub list: SweepstakeListState,
    /// Create view.
    pub form: CreateFormState,
    /// Detail view, present while a sweepstake is open.
    pub detail: Option<DetailState>,
    /// Whether the home list asks for closed sweepstakes too.
    include_closed: bool,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::new(),
            list: SweepstakeListState::default(),
            form: CreateFormState::default(),
            detail: None,
            include_closed: false,
            action_tx,
        }
    }

    /// List closed sweepstakes on the home view as well.
    pub fn with_include_closed(mut self, include_closed: bool) -> Self {
        self.include_closed = include_closed;
        self
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state, returning any backend work it needs.
    pub fn reduce(&mut self, action: Action) -> Option<Effect> {
        if let Some(epoch) = action.epoch()
            && epoch != self.app.epoch
        {
            debug!(epoch, current = self.app.epoch, "dropping stale result");
            return None;
        }

        match action {
            // Navigation
            Action::SetView(view) => return self.enter_view(view),
            Action::OpenSweepstake(id) => return Some(self.open_sweepstake(id)),
            Action::OpenSelected => {
                let id = self.list.selected().map(|s| s.id.clone())?;
                return Some(self.open_sweepstake(id));
            }
            Action::SetInputMode(mode) => self.app.input_mode = mode,

            // Text input
            Action::InputChar(c) => match self.app.current_view {
                View::Search => self.app.push_char(c),
                View::Create => self.form.push_char(c),
                _ => {}
            },
            Action::DeleteChar => match self.app.current_view {
                View::Search => self.app.pop_char(),
                View::Create => self.form.pop_char(),
                _ => {}
            },
            Action::CursorLeft => self.app.cursor_left(),
            Action::CursorRight => self.app.cursor_right(),
            Action::SubmitSearch => return self.submit_search(),

            // Create form
            Action::FormNextField => self.form.focus_next(),
            Action::FormPrevField => self.form.focus_previous(),
            Action::FormCycleChoice(forward) => self.form.cycle_choice(forward),
            Action::FormAddParticipant => self.form.add_participant(),
            Action::FormRemoveParticipant => self.form.remove_focused_participant(),
            Action::SubmitCreate => return self.submit_create(),
            Action::OpenPicker => {
                self.form.picker = Some(Picker::EventTypes {
                    options: Phase::Loading,
                    selected: 0,
                });
                return Some(Effect::LoadEventTypes {
                    epoch: self.app.epoch,
                });
            }
            Action::PickerSelect => return self.picker_select(),
            Action::ClosePicker => self.form.picker = None,

            // Detail
            Action::RefreshSweepstake => return self.request_refresh(),
            Action::RequestClose => {
                if let Some(detail) = self.detail.as_mut()
                    && detail.is_active()
                {
                    detail.confirm_close = true;
                }
            }
            Action::ConfirmClose => {
                let detail = self.detail.as_mut()?;
                if !detail.confirm_close {
                    return None;
                }
                detail.confirm_close = false;
                return Some(Effect::CloseSweepstake {
                    epoch: self.app.epoch,
                    id: detail.sweepstake_id.clone(),
                });
            }
            Action::CancelClose => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.confirm_close = false;
                }
            }
            Action::SwitchDetailTab => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.switch_tab();
                }
            }
            Action::ToggleExpand => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.toggle_expanded();
                }
            }
            Action::SortFocusedColumn => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.sort_focused();
                }
            }
            Action::FocusNextColumn => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.active_table_mut().focus_next_column();
                }
            }
            Action::FocusPrevColumn => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.active_table_mut().focus_previous_column();
                }
            }

            // Results
            Action::SweepstakesLoaded { result, .. } => {
                self.observe(&result, "load sweepstakes");
                match result {
                    Ok(sweepstakes) => self.list.set_loaded(sweepstakes),
                    Err(failure) => self.list.sweepstakes = Phase::Failed(failure),
                }
            }
            Action::SweepstakeLoaded { result, .. } => {
                self.observe(&result, "load sweepstake");
                let detail = self.detail.as_mut()?;
                match result {
                    Ok(sweepstake) => {
                        detail.set_sweepstake(sweepstake);
                        detail.history = Phase::Loading;
                    }
                    Err(failure) => detail.sweepstake = Phase::Failed(failure),
                }
            }
            Action::LookupCompleted { result, .. } => {
                self.observe(&result, "look up sweepstake");
                self.app.searching = false;
                if let Ok(sweepstake) = result {
                    return Some(self.show_sweepstake(sweepstake));
                }
            }
            Action::HistoryLoaded {
                request, result, ..
            } => {
                let detail = self.detail.as_mut()?;
                let chart = result.map(|h| HistoryChart::from_history(&h));
                if !detail.settle_history(request, chart.clone()) {
                    debug!(request, "dropping superseded history");
                    return None;
                }
                self.observe(&chart, "load history");
            }
            Action::SweepstakeRefreshed { result, .. } => {
                self.observe(&result, "refresh sweepstake");
                let detail = self.detail.as_mut()?;
                detail.refreshing = false;
                if let Ok(sweepstake) = result {
                    info!(id = %sweepstake.id, "sweepstake refreshed");
                    detail.set_sweepstake(sweepstake);
                    detail.history = Phase::Loading;
                    self.app.notification = Some(Notification::success("Sweepstake refreshed"));
                }
            }
            Action::SweepstakeCreated { result, .. } => {
                self.observe(&result, "create sweepstake");
                self.form.submitting = false;
                if let Ok(sweepstake) = result {
                    info!(id = %sweepstake.id, "sweepstake created");
                    self.form.reset();
                    self.app.notification = Some(Notification::success(format!(
                        "Created sweepstake {}",
                        sweepstake.name
                    )));
                    return Some(self.show_sweepstake(sweepstake));
                }
            }
            Action::SweepstakeClosed { result, .. } => {
                self.observe(&result, "close sweepstake");
                if result.is_ok()
                    && let Some(detail) = self.detail.as_mut()
                {
                    info!(id = %detail.sweepstake_id, "sweepstake closed");
                    detail.mark_closed();
                    self.app.notification = Some(Notification::success("Sweepstake closed"));
                }
            }
            Action::EventTypesLoaded { result, .. } => {
                self.observe(&result, "load event types");
                if let Some(Picker::EventTypes { options, selected }) = self.form.picker.as_mut() {
                    options.settle(result);
                    *selected = 0;
                }
            }
            Action::MarketsLoaded {
                event_type, result, ..
            } => {
                self.observe(&result, &format!("load markets for event type {event_type}"));
                if let Some(Picker::Markets {
                    event_type: shown,
                    options,
                    selected,
                }) = self.form.picker.as_mut()
                    && shown.id == event_type
                {
                    options.settle(result);
                    *selected = 0;
                }
            }

            // UI actions
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::PageUp => self.scroll(-10),
            Action::PageDown => self.scroll(10),
            Action::GoToTop => self.go_to_top(),
            Action::GoToBottom => self.go_to_bottom(),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }
            Action::Tick => self.app.expire_notification(Instant::now()),

            // Error handling
            Action::SetError(error) => {
                self.app.error = Some(error);
            }
            Action::ClearError => {
                self.app.error = None;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }

        None
    }

    /// Record the outcome of a request: connection status and error slot.
    fn observe<T>(&mut self, result: &Outcome<T>, what: &str) {
        match result {
            Ok(_) => {
                self.app.connected = true;
            }
            Err(failure) => {
                warn!(kind = ?failure.kind, "{what} failed: {}", failure.message);
                if failure.kind == FailureKind::Transport {
                    self.app.connected = false;
                }
                self.app.error = Some(failure.message.clone());
            }
        }
    }

    fn enter_view(&mut self, view: View) -> Option<Effect> {
        if view == View::Detail && self.detail.is_none() {
            return None;
        }
        let epoch = self.app.next_epoch();
        info!(?view, epoch, "entering view");
        self.app.current_view = view;
        self.app.error = None;
        self.app.searching = false;
        self.app.input_mode = match view {
            View::Create | View::Search => InputMode::Insert,
            View::Home | View::Detail => InputMode::Normal,
        };
        if view != View::Detail {
            self.detail = None;
        }

        match view {
            View::Home => {
                self.list.sweepstakes = Phase::Loading;
                Some(Effect::LoadSweepstakes {
                    epoch,
                    include_closed: self.include_closed,
                })
            }
            View::Create => {
                self.form.picker = None;
                self.form.submitting = false;
                None
            }
            View::Search => {
                self.app.clear_input();
                None
            }
            View::Detail => {
                let detail = self.detail.as_mut()?;
                detail.sweepstake = Phase::Loading;
                detail.history = Phase::Idle;
                Some(Effect::LoadSweepstake {
                    epoch,
                    id: detail.sweepstake_id.clone(),
                    request: detail.next_history_request(),
                })
            }
        }
    }

    fn activate_detail(&mut self, detail: DetailState) -> u64 {
        let epoch = self.app.next_epoch();
        info!(id = %detail.sweepstake_id, epoch, "opening sweepstake");
        self.app.current_view = View::Detail;
        self.app.input_mode = InputMode::Normal;
        self.app.error = None;
        self.app.searching = false;
        self.app.clear_input();
        self.detail = Some(detail);
        epoch
    }

    fn open_sweepstake(&mut self, id: String) -> Effect {
        let mut detail = DetailState::new(id.clone());
        let request = detail.next_history_request();
        let epoch = self.activate_detail(detail);
        Effect::LoadSweepstake { epoch, id, request }
    }

    /// Open the detail view on an already fetched sweepstake.
    fn show_sweepstake(&mut self, sweepstake: Sweepstake) -> Effect {
        let id = sweepstake.id.clone();
        let mut detail = DetailState::new(id.clone());
        detail.set_sweepstake(sweepstake);
        detail.history = Phase::Loading;
        let request = detail.next_history_request();
        let epoch = self.activate_detail(detail);
        Effect::LoadHistory { epoch, id, request }
    }

    fn submit_search(&mut self) -> Option<Effect> {
        if self.app.current_view != View::Search || self.app.searching {
            return None;
        }
        let id = self.app.input_buffer.trim();
        if id.is_empty() {
            return None;
        }
        let id = id.to_string();
        self.app.searching = true;
        self.app.error = None;
        Some(Effect::LookupSweepstake {
            epoch: self.app.epoch,
            id,
        })
    }

    fn submit_create(&mut self) -> Option<Effect> {
        if self.form.submitting {
            return None;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.form.submitting = true;
                self.app.error = None;
                Some(Effect::CreateSweepstake {
                    epoch: self.app.epoch,
                    request,
                })
            }
            Err(e) => {
                self.app.error = Some(Failure::from_error(&e, "create sweepstake").message);
                None
            }
        }
    }

    fn picker_select(&mut self) -> Option<Effect> {
        match self.form.picker.as_ref()? {
            Picker::EventTypes { options, selected } => {
                let event_type = options.loaded()?.get(*selected)?.clone();
                let id = event_type.id.clone();
                self.form.picker = Some(Picker::Markets {
                    event_type,
                    options: Phase::Loading,
                    selected: 0,
                });
                Some(Effect::LoadMarkets {
                    epoch: self.app.epoch,
                    event_type: id,
                })
            }
            Picker::Markets {
                options, selected, ..
            } => {
                let market = options.loaded()?.get(*selected)?.clone();
                self.form.apply_market(&market);
                self.form.picker = None;
                None
            }
        }
    }

    fn request_refresh(&mut self) -> Option<Effect> {
        let detail = self.detail.as_mut()?;
        if detail.refreshing || detail.sweepstake.loaded().is_none() {
            return None;
        }
        if !detail.is_active() {
            self.app.notification = Some(Notification::warning(
                "Closed sweepstakes cannot be refreshed",
            ));
            return None;
        }
        detail.refreshing = true;
        Some(Effect::RefreshSweepstake {
            epoch: self.app.epoch,
            id: detail.sweepstake_id.clone(),
            request: detail.next_history_request(),
        })
    }

    fn scroll(&mut self, delta: i32) {
        match self.app.current_view {
            View::Home => self.list.scroll(delta),
            View::Detail => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.scroll(delta);
                }
            }
            View::Create => {
                if let Some(picker) = self.form.picker.as_mut() {
                    picker.scroll(delta);
                }
            }
            View::Search => {}
        }
    }

    fn go_to_top(&mut self) {
        match self.app.current_view {
            View::Home => self.list.scroll(i32::MIN / 2),
            View::Detail => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.go_to_top();
                }
            }
            _ => {}
        }
    }

    fn go_to_bottom(&mut self) {
        match self.app.current_view {
            View::Home => self.list.scroll(i32::MAX / 2),
            View::Detail => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.go_to_bottom();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::state::projection::tests::sample_sweepstake;
    use pretty_assertions::assert_eq;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    fn not_found(id: &str) -> Failure {
        Failure::from_error(
            &Error::not_found(format!("sweepstake {id}")),
            &format!("load sweepstake {id}"),
        )
    }

    #[test]
    fn test_dispatch_reaches_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let store = Store::new(tx);
        store.dispatch(Action::Quit).unwrap();
        assert!(matches!(rx.try_recv(), Ok(Action::Quit)));

        drop(rx);
        assert!(store.dispatch(Action::Tick).is_err());
    }

    #[test]
    fn test_home_entry_loads_list() {
        let mut store = store().with_include_closed(true);
        let effect = store.reduce(Action::SetView(View::Home));
        assert_eq!(
            effect,
            Some(Effect::LoadSweepstakes {
                epoch: 1,
                include_closed: true
            })
        );
        assert!(store.list.sweepstakes.is_loading());

        store.reduce(Action::SweepstakesLoaded {
            epoch: 1,
            result: Ok(vec![sample_sweepstake(false)]),
        });
        assert_eq!(store.list.items().len(), 1);
        assert!(store.app.connected);

        let effect = store.reduce(Action::OpenSelected);
        assert_eq!(
            effect,
            Some(Effect::LoadSweepstake {
                epoch: 2,
                id: "abc".to_string(),
                request: 1,
            })
        );
        assert_eq!(store.app.current_view, View::Detail);
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut store = store();
        store.reduce(Action::OpenSweepstake("abc".to_string()));
        let stale = store.app.epoch;
        store.reduce(Action::SetView(View::Search));

        store.reduce(Action::SweepstakeLoaded {
            epoch: stale,
            result: Err(not_found("abc")),
        });
        assert_eq!(store.app.error, None);
        assert_eq!(store.app.current_view, View::Search);
    }

    #[test]
    fn test_detail_failure_fills_error_slot() {
        let mut store = store();
        store.reduce(Action::OpenSweepstake("missing-id".to_string()));
        let epoch = store.app.epoch;

        store.reduce(Action::SweepstakeLoaded {
            epoch,
            result: Err(not_found("missing-id")),
        });

        assert!(store.app.error.as_deref().unwrap().contains("missing-id"));
        let detail = store.detail.as_ref().unwrap();
        assert_eq!(
            detail.sweepstake.failure().map(|f| f.kind),
            Some(FailureKind::NotFound)
        );
    }

    #[test]
    fn test_search_success_opens_detail() {
        let mut store = store();
        store.reduce(Action::SetView(View::Search));
        for c in "  abc ".chars() {
            store.reduce(Action::InputChar(c));
        }
        let epoch = store.app.epoch;
        let effect = store.reduce(Action::SubmitSearch);
        assert_eq!(
            effect,
            Some(Effect::LookupSweepstake {
                epoch,
                id: "abc".to_string()
            })
        );
        // in flight, second submit is ignored
        assert_eq!(store.reduce(Action::SubmitSearch), None);

        let effect = store.reduce(Action::LookupCompleted {
            epoch,
            result: Ok(sample_sweepstake(false)),
        });
        assert_eq!(
            effect,
            Some(Effect::LoadHistory {
                epoch: epoch + 1,
                id: "abc".to_string(),
                request: 1,
            })
        );
        assert_eq!(store.app.current_view, View::Detail);
        let detail = store.detail.as_ref().unwrap();
        assert!(detail.sweepstake.loaded().is_some());
        assert!(detail.history.is_loading());
    }

    #[test]
    fn test_search_failure_stays_on_search() {
        let mut store = store();
        store.reduce(Action::SetView(View::Search));
        let epoch = store.app.epoch;
        store.reduce(Action::LookupCompleted {
            epoch,
            result: Err(Failure::new(FailureKind::Transport, "Could not look up x")),
        });
        assert_eq!(store.app.current_view, View::Search);
        assert!(!store.app.connected);
        assert!(!store.app.searching);
        assert!(store.app.error.is_some());
    }

    #[test]
    fn test_invalid_form_never_submits() {
        let mut store = store();
        store.reduce(Action::SetView(View::Create));
        assert_eq!(store.reduce(Action::SubmitCreate), None);
        assert!(store.app.error.as_deref().unwrap().contains("market ID"));
        assert!(!store.form.submitting);
    }

    #[test]
    fn test_create_submits_filtered_names() {
        let mut store = store();
        store.reduce(Action::SetView(View::Create));
        store.form.market_id = "1.234".to_string();
        store.form.name = "Office".to_string();
        store.form.participants = vec![
            String::new(),
            "Alice".to_string(),
            "  ".to_string(),
            "Bob".to_string(),
        ];

        let Some(Effect::CreateSweepstake { request, .. }) = store.reduce(Action::SubmitCreate)
        else {
            panic!("expected a create request");
        };
        assert_eq!(request.participant_names, vec!["Alice", "Bob"]);
        assert!(store.form.submitting);

        let epoch = store.app.epoch;
        let effect = store.reduce(Action::SweepstakeCreated {
            epoch,
            result: Ok(sample_sweepstake(false)),
        });
        assert!(matches!(effect, Some(Effect::LoadHistory { .. })));
        assert_eq!(store.form, CreateFormState::default());
        assert_eq!(store.app.current_view, View::Detail);
    }

    #[test]
    fn test_picker_flow() {
        let mut store = store();
        store.reduce(Action::SetView(View::Create));
        let epoch = store.app.epoch;
        assert_eq!(
            store.reduce(Action::OpenPicker),
            Some(Effect::LoadEventTypes { epoch })
        );
        store.reduce(Action::EventTypesLoaded {
            epoch,
            result: Ok(vec![
                EventType {
                    id: "1".to_string(),
                    name: "Soccer".to_string(),
                },
                EventType {
                    id: "3".to_string(),
                    name: "Golf".to_string(),
                },
            ]),
        });
        store.reduce(Action::ScrollDown);
        assert_eq!(
            store.reduce(Action::PickerSelect),
            Some(Effect::LoadMarkets {
                epoch,
                event_type: "3".to_string()
            })
        );

        // markets for another event type are ignored
        store.reduce(Action::MarketsLoaded {
            epoch,
            event_type: "1".to_string(),
            result: Ok(Vec::new()),
        });
        assert_eq!(store.form.picker.as_ref().map(Picker::len), Some(0));

        store.reduce(Action::MarketsLoaded {
            epoch,
            event_type: "3".to_string(),
            result: Ok(vec![MarketInfo {
                market_id: "1.999".to_string(),
                market_name: "Winner".to_string(),
                event_name: Some("The Open".to_string()),
                competition_name: "The Open".to_string(),
            }]),
        });
        assert_eq!(store.reduce(Action::PickerSelect), None);
        assert!(store.form.picker.is_none());
        assert_eq!(store.form.market_id, "1.999");
    }

    #[test]
    fn test_refresh_keeps_sweepstake_on_history_failure() {
        let mut store = store();
        store.reduce(Action::OpenSweepstake("abc".to_string()));
        let epoch = store.app.epoch;
        store.reduce(Action::SweepstakeLoaded {
            epoch,
            result: Ok(sample_sweepstake(true)),
        });

        assert_eq!(
            store.reduce(Action::RefreshSweepstake),
            Some(Effect::RefreshSweepstake {
                epoch,
                id: "abc".to_string(),
                request: 2,
            })
        );
        assert_eq!(store.reduce(Action::RefreshSweepstake), None);

        store.reduce(Action::SweepstakeRefreshed {
            epoch,
            result: Ok(sample_sweepstake(true)),
        });
        store.reduce(Action::HistoryLoaded {
            epoch,
            request: 2,
            result: Err(Failure::new(FailureKind::ServerFault, "history down")),
        });

        let detail = store.detail.as_ref().unwrap();
        assert!(detail.sweepstake.loaded().is_some());
        assert!(detail.history.failure().is_some());
        assert!(!detail.refreshing);
        assert_eq!(store.app.error.as_deref(), Some("history down"));
    }

    #[test]
    fn test_late_initial_history_does_not_overwrite_refresh() {
        let mut store = store();
        let Effect::LoadSweepstake { request: initial, .. } =
            store.reduce(Action::OpenSweepstake("abc".to_string())).unwrap()
        else {
            panic!("expected a load");
        };
        let epoch = store.app.epoch;
        store.reduce(Action::SweepstakeLoaded {
            epoch,
            result: Ok(sample_sweepstake(false)),
        });

        let Some(Effect::RefreshSweepstake { request: refresh, .. }) =
            store.reduce(Action::RefreshSweepstake)
        else {
            panic!("expected a refresh");
        };
        store.reduce(Action::SweepstakeRefreshed {
            epoch,
            result: Ok(sample_sweepstake(false)),
        });

        let newer = SweepstakeHistory {
            participants: vec![ParticipantHistory {
                name: "Alice".to_string(),
                history: vec![HistoryPoint {
                    timestamp: chrono::Utc::now(),
                    probability: rust_decimal::Decimal::ONE,
                }],
            }],
        };
        store.reduce(Action::HistoryLoaded {
            epoch,
            request: refresh,
            result: Ok(newer.clone()),
        });
        // the first load's answer shows up last
        store.reduce(Action::HistoryLoaded {
            epoch,
            request: initial,
            result: Err(Failure::new(FailureKind::Transport, "late failure")),
        });

        let detail = store.detail.as_ref().unwrap();
        assert_eq!(
            detail.history.loaded(),
            Some(&HistoryChart::from_history(&newer))
        );
        assert_eq!(store.app.error, None);
    }

    #[test]
    fn test_close_requires_confirmation() {
        let mut store = store();
        store.reduce(Action::OpenSweepstake("abc".to_string()));
        let epoch = store.app.epoch;
        store.reduce(Action::SweepstakeLoaded {
            epoch,
            result: Ok(sample_sweepstake(false)),
        });

        assert_eq!(store.reduce(Action::ConfirmClose), None);
        store.reduce(Action::RequestClose);
        assert_eq!(
            store.reduce(Action::ConfirmClose),
            Some(Effect::CloseSweepstake {
                epoch,
                id: "abc".to_string()
            })
        );

        store.reduce(Action::SweepstakeClosed {
            epoch,
            result: Ok(()),
        });
        let detail = store.detail.as_ref().unwrap();
        assert!(!detail.is_active());

        // closed sweepstakes are not refreshed
        assert_eq!(store.reduce(Action::RefreshSweepstake), None);
        assert_eq!(
            store.app.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Warning)
        );
    }

    #[test]
    fn test_leaving_detail_discards_it() {
        let mut store = store();
        store.reduce(Action::OpenSweepstake("abc".to_string()));
        store.reduce(Action::SetView(View::Home));
        assert!(store.detail.is_none());
        assert_eq!(store.reduce(Action::SetView(View::Detail)), None);
        assert_eq!(store.app.current_view, View::Home);
    }

    #[test]
    fn test_notification_expiry() {
        let mut notification = Notification::info("hi");
        assert!(!notification.is_expired(Instant::now()));
        notification.duration_secs = 0;
        assert!(notification.is_expired(Instant::now()));
    }
}
