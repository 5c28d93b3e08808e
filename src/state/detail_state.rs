//! Detail view: one sweepstake with its tables and history.

use super::history::HistoryChart;
use super::Outcome;
use super::phase::Phase;
use super::projection::{
    LeaderboardRow, ParticipantRow, leaderboard_columns, leaderboard_rows, participant_columns,
    participant_rows,
};
use super::sweepstake::Sweepstake;
use super::table::SortableTable;

/// Which table the detail view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Participants,
    Leaderboard,
}

impl DetailTab {
    pub fn toggle(self) -> Self {
        match self {
            Self::Participants => Self::Leaderboard,
            Self::Leaderboard => Self::Participants,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Participants => "Participants",
            Self::Leaderboard => "Leaderboard",
        }
    }
}

/// State for the detail view.
///
/// Projected rows are rebuilt whenever the sweepstake changes; the two
/// table instances keep their sort across refreshes.
#[derive(Debug)]
pub struct DetailState {
    /// Identifier being shown.
    pub sweepstake_id: String,
    pub sweepstake: Phase<Sweepstake>,
    pub history: Phase<HistoryChart>,
    pub tab: DetailTab,
    pub participant_table: SortableTable,
    pub leaderboard_table: SortableTable,
    pub participant_rows: Vec<ParticipantRow>,
    pub leaderboard_rows: Vec<LeaderboardRow>,
    /// Highlighted row, in display order of the active table.
    pub selected_row: usize,
    /// Expanded participant, by name so it survives re-projection.
    pub expanded: Option<String>,
    /// A refresh request is in flight.
    pub refreshing: bool,
    /// Last history request issued for this view.
    history_requested: u64,
    /// Request whose history is on screen; older answers are ignored.
    history_shown: u64,
    /// Waiting for the user to confirm closing.
    pub confirm_close: bool,
}

impl DetailState {
    pub fn new(sweepstake_id: impl Into<String>) -> Self {
        Self {
            sweepstake_id: sweepstake_id.into(),
            sweepstake: Phase::Loading,
            history: Phase::Idle,
            tab: DetailTab::default(),
            participant_table: SortableTable::new(participant_columns()),
            leaderboard_table: SortableTable::new(leaderboard_columns(false)),
            participant_rows: Vec::new(),
            leaderboard_rows: Vec::new(),
            selected_row: 0,
            expanded: None,
            refreshing: false,
            history_requested: 0,
            history_shown: 0,
            confirm_close: false,
        }
    }

    /// Show a freshly fetched sweepstake.
    pub fn set_sweepstake(&mut self, sweepstake: Sweepstake) {
        self.sweepstake_id = sweepstake.id.clone();
        self.participant_rows = participant_rows(&sweepstake);
        self.leaderboard_rows = leaderboard_rows(&sweepstake);
        self.leaderboard_table
            .set_columns(leaderboard_columns(sweepstake.is_tournament()));
        if self
            .expanded
            .as_deref()
            .is_some_and(|name| !self.participant_rows.iter().any(|r| r.name == name))
        {
            self.expanded = None;
        }
        self.selected_row = self.selected_row.min(self.row_count().saturating_sub(1));
        self.sweepstake = Phase::Loaded(sweepstake);
    }

    /// Number the next history fetch so late answers can be told apart.
    pub fn next_history_request(&mut self) -> u64 {
        self.history_requested += 1;
        self.history_requested
    }

    /// Settle the chart with the answer to `request`, unless a newer
    /// request has already been shown.
    pub fn settle_history(&mut self, request: u64, result: Outcome<HistoryChart>) -> bool {
        if request <= self.history_shown {
            return false;
        }
        self.history_shown = request;
        self.history.settle(result);
        true
    }

    /// Whether scores are shown.
    pub fn is_tournament(&self) -> bool {
        self.sweepstake.loaded().is_some_and(Sweepstake::is_tournament)
    }

    /// Whether refresh and close are allowed.
    pub fn is_active(&self) -> bool {
        self.sweepstake.loaded().is_some_and(|s| s.active)
    }

    pub fn active_table(&self) -> &SortableTable {
        match self.tab {
            DetailTab::Participants => &self.participant_table,
            DetailTab::Leaderboard => &self.leaderboard_table,
        }
    }

    pub fn active_table_mut(&mut self) -> &mut SortableTable {
        match self.tab {
            DetailTab::Participants => &mut self.participant_table,
            DetailTab::Leaderboard => &mut self.leaderboard_table,
        }
    }

    /// Rows in the active table.
    pub fn row_count(&self) -> usize {
        match self.tab {
            DetailTab::Participants => self.participant_rows.len(),
            DetailTab::Leaderboard => self.leaderboard_rows.len(),
        }
    }

    /// Participant rows in display order, as indices into `participant_rows`.
    pub fn participant_order(&self) -> Vec<usize> {
        self.participant_table.sorted_indices(&self.participant_rows)
    }

    /// Leaderboard rows in display order.
    pub fn leaderboard_order(&self) -> Vec<usize> {
        self.leaderboard_table.sorted_indices(&self.leaderboard_rows)
    }

    /// Index into `participant_rows` of the expanded participant.
    pub fn expanded_index(&self) -> Option<usize> {
        let name = self.expanded.as_deref()?;
        self.participant_rows.iter().position(|r| r.name == name)
    }

    pub fn expanded_row(&self) -> Option<&ParticipantRow> {
        self.expanded_index().map(|i| &self.participant_rows[i])
    }

    pub fn switch_tab(&mut self) {
        self.tab = self.tab.toggle();
        self.selected_row = 0;
    }

    pub fn scroll(&mut self, delta: i32) {
        let max = self.row_count().saturating_sub(1) as i32;
        self.selected_row = (self.selected_row as i32 + delta).clamp(0, max) as usize;
    }

    pub fn go_to_top(&mut self) {
        self.selected_row = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.selected_row = self.row_count().saturating_sub(1);
    }

    /// Expand the highlighted participant, or collapse it if already open.
    /// Only one participant is expanded at a time.
    pub fn toggle_expanded(&mut self) {
        if self.tab != DetailTab::Participants {
            return;
        }
        let Some(&index) = self.participant_order().get(self.selected_row) else {
            return;
        };
        let name = &self.participant_rows[index].name;
        self.expanded = if self.expanded.as_ref() == Some(name) {
            None
        } else {
            Some(name.clone())
        };
    }

    /// Sort the active table by its focused header.
    pub fn sort_focused(&mut self) -> bool {
        self.active_table_mut().sort_focused()
    }

    /// Mark the shown sweepstake closed.
    pub fn mark_closed(&mut self) {
        if let Some(sweepstake) = self.sweepstake.loaded_mut() {
            sweepstake.active = false;
        }
        self.confirm_close = false;
    }
}
