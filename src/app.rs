//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, background requests and rendering.

use crate::api::{ApiClient, SweepstakeApi};
use crate::config::{Config, Theme};
use crate::error::Result;
use crate::events::EventHandler;
use crate::operations;
use crate::state::{Action, Effect, Store, View};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Requests in flight for the current view activation.
#[derive(Default)]
struct Tasks {
    epoch: u64,
    handles: Vec<JoinHandle<()>>,
}

impl Tasks {
    /// Abort everything started under an older epoch.
    fn retire(&mut self, epoch: u64) {
        if epoch == self.epoch {
            self.handles.retain(|h| !h.is_finished());
            return;
        }
        let aborted = self.handles.iter().filter(|h| !h.is_finished()).count();
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        if aborted > 0 {
            debug!(aborted, from = self.epoch, to = epoch, "aborted stale requests");
        }
        self.epoch = epoch;
    }
}

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action sender handed to background requests.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Backend client.
    api: Arc<dyn SweepstakeApi>,
    tasks: Tasks,
    /// Resolved colors.
    theme: Theme,
    /// Configuration.
    config: Config,
    /// When the open sweepstake was last auto-refreshed.
    last_auto_refresh: Instant,
}

impl App {
    /// Create a new application talking to the configured backend.
    pub fn new(config: Config) -> Result<Self> {
        let api = Arc::new(ApiClient::new(config.api.clone())?);
        Self::with_api(config, api)
    }

    /// Create a new application with the given backend.
    pub fn with_api(config: Config, api: Arc<dyn SweepstakeApi>) -> Result<Self> {
        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if config.ui.mouse_support {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let store = Store::new(action_tx.clone()).with_include_closed(config.api.include_closed);
        let event_handler = EventHandler::new(config.keybindings.clone());
        let theme = Theme::from(&config.theme);

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_tx,
            action_rx,
            api,
            tasks: Tasks::default(),
            theme,
            config,
            last_auto_refresh: Instant::now(),
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        info!(base_url = %self.config.api.base_url, "starting");
        self.handle_action(Action::SetView(View::Home));

        let mut tick = tokio::time::interval(Duration::from_millis(self.config.ui.tick_rate_ms.max(1)));

        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            let show_status_bar = self.config.ui.show_status_bar;
            self.terminal.draw(|frame| {
                Ui::render(frame, &self.store, &self.theme, show_status_bar);
            })?;

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action);
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                _ = tick.tick() => {
                    self.handle_action(Action::Tick);
                    self.auto_refresh();
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        self.tasks.retire(u64::MAX);
        info!("shutting down");
        Ok(())
    }

    /// Reduce an action and start whatever backend work it asks for.
    fn handle_action(&mut self, action: Action) {
        let effect = self.store.reduce(action);
        self.tasks.retire(self.store.app.epoch);
        if let Some(effect) = effect {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        debug!(?effect, "starting request");
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        let handle = tokio::spawn(operations::run(api, effect, tx));
        self.tasks.handles.push(handle);
    }

    /// Periodically refresh an open, active sweepstake.
    fn auto_refresh(&mut self) {
        let secs = self.config.ui.auto_refresh_secs;
        if secs == 0 || self.store.app.current_view != View::Detail {
            self.last_auto_refresh = Instant::now();
            return;
        }
        if self.last_auto_refresh.elapsed() >= Duration::from_secs(secs) {
            self.last_auto_refresh = Instant::now();
            if self.store.detail.as_ref().is_some_and(|d| d.is_active()) {
                self.handle_action(Action::RefreshSweepstake);
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_retire_aborts_older_epoch() {
        let mut tasks = Tasks::default();
        tasks.retire(1);
        tasks
            .handles
            .push(tokio::spawn(std::future::pending::<()>()));

        // same epoch keeps running requests
        tasks.retire(1);
        assert_eq!(tasks.handles.len(), 1);

        tasks.retire(2);
        assert!(tasks.handles.is_empty());
        assert_eq!(tasks.epoch, 2);
    }
}
