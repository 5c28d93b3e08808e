//! Sweepstake domain types as served by the backend.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Allocation strategy selector.
///
/// Opaque to the front end: the backend owns what each method does,
/// we only carry the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationMethod {
    Random,
    #[default]
    Tiered,
    Staggered,
    Fair,
}

impl AllocationMethod {
    /// All methods in selector order.
    pub const ALL: [AllocationMethod; 4] = [
        AllocationMethod::Random,
        AllocationMethod::Tiered,
        AllocationMethod::Staggered,
        AllocationMethod::Fair,
    ];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Tiered => "tiered",
            Self::Staggered => "staggered",
            Self::Fair => "fair",
        }
    }

    /// Label shown in the create form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Tiered => "Tiered",
            Self::Staggered => "Staggered",
            Self::Fair => "Fairest",
        }
    }

    /// The next method in selector order, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// The previous method in selector order, wrapping around.
    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for AllocationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A sweepstake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweepstake {
    /// Backend-issued identifier (string or number on the wire).
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Betting market the sweepstake was drawn from.
    #[serde(default)]
    pub market_id: String,
    /// Allocation method used to assign runners.
    pub method: AllocationMethod,
    /// Competition label.
    #[serde(default)]
    pub competition: Option<String>,
    /// Linked tournament; when present, assignments carry scores.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub tournament_id: Option<String>,
    /// Creation timestamp.
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last refresh timestamp.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    /// Whether the sweepstake is still open.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Participants in backend order.
    #[serde(default)]
    pub participants: Vec<Participant>,
}

fn default_active() -> bool {
    true
}

impl Sweepstake {
    /// Whether scores are meaningful for this sweepstake.
    pub fn is_tournament(&self) -> bool {
        self.tournament_id.is_some()
    }

    /// Human-readable status.
    pub fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Closed" }
    }

    /// Total number of runner assignments across all participants.
    pub fn assignment_count(&self) -> usize {
        self.participants.iter().map(|p| p.assignments.len()).sum()
    }
}

/// An entrant holding a share of the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    /// Fractional share of the pool, 0..=1.
    pub equity: Decimal,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

/// A participant's link to one runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Runner/player name.
    #[serde(alias = "runner_name")]
    pub name: String,
    /// Win probability, 0..=1.
    pub implied_probability: Decimal,
    /// Tournament score relative to par, if known.
    #[serde(default)]
    pub score: Option<i64>,
}

/// Probability history for every participant of a sweepstake.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepstakeHistory {
    #[serde(default)]
    pub participants: Vec<ParticipantHistory>,
}

/// One participant's probability time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantHistory {
    pub name: String,
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
}

/// A single probability sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub probability: Decimal,
}

/// An event type offered by the odds provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
}

/// An outright market for an event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketInfo {
    pub market_id: String,
    pub market_name: String,
    #[serde(default)]
    pub event_name: Option<String>,
    pub competition_name: String,
}

/// Body of a create-sweepstake request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSweepstakeRequest {
    pub market_id: String,
    pub method: AllocationMethod,
    pub name: String,
    pub participant_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition: Option<String>,
    #[serde(default)]
    pub ignore_longshots: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Accept identifiers sent as either JSON strings or numbers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// Parse an RFC 3339 timestamp, or a naive ISO 8601 one taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
        None => Ok(None),
    }
}
