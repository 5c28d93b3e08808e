//! Home view: the list of sweepstakes.

use super::phase::Phase;
use super::sweepstake::Sweepstake;
use chrono::{DateTime, Utc};

/// State for the sweepstakes list.
#[derive(Debug, Default)]
pub struct SweepstakeListState {
    pub sweepstakes: Phase<Vec<Sweepstake>>,
    pub selected_index: Option<usize>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl SweepstakeListState {
    /// Loaded sweepstakes, or an empty slice.
    pub fn items(&self) -> &[Sweepstake] {
        self.sweepstakes.loaded().map_or(&[], Vec::as_slice)
    }

    /// The highlighted sweepstake.
    pub fn selected(&self) -> Option<&Sweepstake> {
        self.selected_index.and_then(|i| self.items().get(i))
    }

    /// Store a fresh list, keeping the selection inside its bounds.
    pub fn set_loaded(&mut self, sweepstakes: Vec<Sweepstake>) {
        self.selected_index = if sweepstakes.is_empty() {
            None
        } else {
            Some(self.selected_index.unwrap_or(0).min(sweepstakes.len() - 1))
        };
        self.sweepstakes = Phase::Loaded(sweepstakes);
        self.last_updated = Some(Utc::now());
    }

    /// Move the selection by `delta`, clamped.
    pub fn scroll(&mut self, delta: i32) {
        let len = self.items().len();
        if len == 0 {
            self.selected_index = None;
            return;
        }
        let current = self.selected_index.unwrap_or(0) as i32;
        self.selected_index = Some((current + delta).clamp(0, len as i32 - 1) as usize);
    }
}
