//! View-state containers, one per screen.
//!
//! Each container owns a local copy of the entity collections its screen
//! renders, plus transient UI state (search text, filters, drafts). The
//! local copy is patched from mutation responses, never re-derived from
//! request payloads.

pub mod issue_detail;
pub mod project_detail;
pub mod project_list;

use std::fmt;

use crate::error::BacklogError;

pub use issue_detail::{IssueDetail, IssueDetailScreen};
pub use project_detail::{ProjectDetail, ProjectDetailScreen};
pub use project_list::ProjectListScreen;

/// Failure classes surfaced to the user. Each class renders a distinct
/// message; raw technical strings never reach rendering directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Server,
    Validation,
    Network,
}

/// A classified load or mutation failure with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenError {
    pub kind: FailureKind,
    pub message: String,
}

impl ScreenError {
    pub fn classify(err: &BacklogError) -> Self {
        match err {
            BacklogError::NotFound(resource) => Self {
                kind: FailureKind::NotFound,
                message: format!(
                    "{} not found. It may have been deleted.",
                    capitalize(resource)
                ),
            },
            BacklogError::Server(status) => Self {
                kind: FailureKind::Server,
                message: format!("The server reported an error (HTTP {status}). Try again later."),
            },
            BacklogError::Validation { message, .. } => Self {
                kind: FailureKind::Validation,
                message: format!("The server rejected the request: {message}"),
            },
            BacklogError::Network(_) => Self {
                kind: FailureKind::Network,
                message: "Could not reach the server. Check your connection and retry.".to_string(),
            },
            other => Self {
                kind: FailureKind::Network,
                message: format!("Something went wrong: {other}"),
            },
        }
    }
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<BacklogError> for ScreenError {
    fn from(err: BacklogError) -> Self {
        Self::classify(&err)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Per-screen load state machine: `Loading -> Ready | Failed`, with
/// `Failed -> Loading` on retry.
#[derive(Debug, Clone, Default)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(ScreenError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ScreenError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Monotonic activation counter guarding against late-arriving loads.
///
/// A screen bumps its generation each time it (re)activates; a load
/// result is applied only if no newer activation happened while the
/// request was outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    pub fn next(&mut self) -> Generation {
        self.0 += 1;
        *self
    }

    pub fn is_current(&self, token: Generation) -> bool {
        *self == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_classification_messages_are_distinct() {
        let not_found = ScreenError::classify(&BacklogError::NotFound("project".to_string()));
        let server = ScreenError::classify(&BacklogError::Server(503));
        let validation = ScreenError::classify(&BacklogError::Validation {
            status: 422,
            message: "name is required".to_string(),
        });
        let network = ScreenError::classify(&BacklogError::Network("refused".to_string()));

        assert_eq!(not_found.kind, FailureKind::NotFound);
        assert!(not_found.message.contains("Project not found"));
        assert_eq!(server.kind, FailureKind::Server);
        assert!(server.message.contains("503"));
        assert_eq!(validation.kind, FailureKind::Validation);
        assert!(validation.message.contains("name is required"));
        assert_eq!(network.kind, FailureKind::Network);

        let messages = [
            &not_found.message,
            &server.message,
            &validation.message,
            &network.message,
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_generation_discards_stale_tokens() {
        let mut generation = Generation::default();
        let first = generation.next();
        assert!(generation.is_current(first));

        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
