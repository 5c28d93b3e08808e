//! Row projections of a sweepstake for the participant and leaderboard tables.

use super::sweepstake::{Assignment, Participant, Sweepstake};
use super::table::{CellValue, Column, TableRow};
use crate::format::{percentify_probability, stringify_score};
use rust_decimal::Decimal;
use std::cmp::Ordering;

fn format_probability(value: Option<&CellValue>) -> String {
    percentify_probability(value.and_then(CellValue::as_decimal))
}

fn format_score(value: Option<&CellValue>) -> String {
    stringify_score(value.and_then(CellValue::as_integer))
}

/// One participant in the participant table.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRow {
    pub name: String,
    pub equity: Decimal,
    pub assignments: Vec<Assignment>,
}

impl TableRow for ParticipantRow {
    fn cell(&self, key: &str) -> Option<CellValue> {
        match key {
            "name" => Some(self.name.as_str().into()),
            "equity" => Some(self.equity.into()),
            _ => None,
        }
    }
}

impl From<&Participant> for ParticipantRow {
    fn from(participant: &Participant) -> Self {
        Self {
            name: participant.name.clone(),
            equity: participant.equity,
            assignments: participant.assignments.clone(),
        }
    }
}

/// One assignment in the nested table under an expanded participant.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRow {
    pub runner: String,
    pub probability: Decimal,
    pub score: Option<i64>,
}

impl TableRow for AssignmentRow {
    fn cell(&self, key: &str) -> Option<CellValue> {
        match key {
            "runner" => Some(self.runner.as_str().into()),
            "probability" => Some(self.probability.into()),
            "score" => self.score.map(CellValue::from),
            _ => None,
        }
    }
}

/// One runner in the flattened leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub participant: String,
    pub player: String,
    pub probability: Decimal,
    /// Absent entirely for sweepstakes without a tournament.
    pub score: Option<i64>,
}

impl TableRow for LeaderboardRow {
    fn cell(&self, key: &str) -> Option<CellValue> {
        match key {
            "participant" => Some(self.participant.as_str().into()),
            "player" => Some(self.player.as_str().into()),
            "probability" => Some(self.probability.into()),
            "score" => self.score.map(CellValue::from),
            _ => None,
        }
    }
}

/// Participants sorted by equity, highest first.
pub fn participant_rows(sweepstake: &Sweepstake) -> Vec<ParticipantRow> {
    let mut rows: Vec<ParticipantRow> = sweepstake
        .participants
        .iter()
        .map(ParticipantRow::from)
        .collect();
    rows.sort_by(|a, b| b.equity.cmp(&a.equity));
    rows
}

/// Columns of the participant table.
pub fn participant_columns() -> Vec<Column> {
    vec![
        Column::new("name", true),
        Column::new("equity", true).with_formatter(format_probability),
    ]
}

/// Assignments of one participant, in backend order.
///
/// Scores are dropped unless the sweepstake is a tournament.
pub fn assignment_rows(participant: &ParticipantRow, tournament: bool) -> Vec<AssignmentRow> {
    participant
        .assignments
        .iter()
        .map(|a| AssignmentRow {
            runner: a.name.clone(),
            probability: a.implied_probability,
            score: if tournament { a.score } else { None },
        })
        .collect()
}

/// Columns of the nested assignment table. Not sortable.
pub fn assignment_columns(tournament: bool) -> Vec<Column> {
    let mut columns = vec![
        Column::new("runner", false),
        Column::new("probability", false).with_formatter(format_probability),
    ];
    if tournament {
        columns.push(Column::new("score", false).with_formatter(format_score));
    }
    columns
}

/// Every assignment of every participant, sorted by score ascending.
///
/// Unscored runners sort after scored ones.
pub fn leaderboard_rows(sweepstake: &Sweepstake) -> Vec<LeaderboardRow> {
    let tournament = sweepstake.is_tournament();
    let mut rows: Vec<LeaderboardRow> = sweepstake
        .participants
        .iter()
        .flat_map(|p| {
            p.assignments.iter().map(move |a| LeaderboardRow {
                participant: p.name.clone(),
                player: a.name.clone(),
                probability: a.implied_probability,
                score: if tournament { a.score } else { None },
            })
        })
        .collect();

    rows.sort_by(|a, b| match (a.score, b.score) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows
}

/// Columns of the leaderboard; `score` only for tournaments.
pub fn leaderboard_columns(tournament: bool) -> Vec<Column> {
    let mut columns = vec![
        Column::new("participant", true),
        Column::new("player", true),
        Column::new("probability", true).with_formatter(format_probability),
    ];
    if tournament {
        columns.push(Column::new("score", true).with_formatter(format_score));
    }
    columns
}
