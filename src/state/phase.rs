//! Per-view loading phases.

use crate::error::Error;

/// What went wrong, as far as the UI cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Validation,
    Transport,
    ServerFault,
    Decode,
    Other,
}

impl From<&Error> for FailureKind {
    fn from(error: &Error) -> Self {
        match error {
            Error::NotFound { .. } => Self::NotFound,
            Error::Validation(_) => Self::Validation,
            Error::Transport(_) => Self::Transport,
            Error::ServerFault { .. } => Self::ServerFault,
            Error::Decode { .. } => Self::Decode,
            _ => Self::Other,
        }
    }
}

/// A failed operation with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Describe `error` for the user. `action` is what was attempted,
    /// e.g. "load sweepstake abc123"; it always appears in the message.
    pub fn from_error(error: &Error, action: &str) -> Self {
        let kind = FailureKind::from(error);
        let message = match error {
            Error::NotFound { .. } => format!("Could not {action}: not found"),
            Error::Validation(detail) => format!("Could not {action}: {detail}"),
            Error::Transport(_) => format!("Could not {action}: server unreachable"),
            Error::ServerFault { status, .. } => {
                format!("Could not {action}: server error ({status})")
            }
            Error::Decode { .. } => format!("Could not {action}: unexpected response"),
            _ => format!("Could not {action}"),
        };
        Self { kind, message }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Loading state of one piece of view data.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(Failure),
}

impl<T> Default for Phase<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Phase<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Settle the phase from an operation result.
    pub fn settle(&mut self, result: Result<T, Failure>) {
        *self = match result {
            Ok(value) => Self::Loaded(value),
            Err(failure) => Self::Failed(failure),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_action() {
        let action = "load sweepstake missing-id";
        let errors = [
            Error::not_found("sweepstake missing-id"),
            Error::validation("Invalid sweepstake ID format"),
            Error::transport("connection refused"),
            Error::ServerFault {
                status: 500,
                detail: String::new(),
            },
            Error::decode("GET /api/sweepstakes/missing-id", "missing field"),
        ];

        let failures: Vec<Failure> = errors.iter().map(|e| Failure::from_error(e, action)).collect();
        for failure in &failures {
            assert!(failure.message.contains("missing-id"));
        }

        let kinds: Vec<FailureKind> = failures.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FailureKind::NotFound,
                FailureKind::Validation,
                FailureKind::Transport,
                FailureKind::ServerFault,
                FailureKind::Decode,
            ]
        );

        // every kind reads differently
        let mut messages: Vec<&str> = failures.iter().map(|f| f.message.as_str()).collect();
        messages.dedup();
        assert_eq!(messages.len(), 5);
    }

    #[test]
    fn test_phase_settle() {
        let mut phase: Phase<u32> = Phase::default();
        assert_eq!(phase, Phase::Idle);

        phase = Phase::Loading;
        assert!(phase.is_loading());

        phase.settle(Ok(7));
        assert_eq!(phase.loaded(), Some(&7));

        phase.settle(Err(Failure::new(FailureKind::Other, "nope")));
        assert_eq!(phase.failure().map(|f| f.message.as_str()), Some("nope"));
        assert_eq!(phase.loaded(), None);
    }
}
