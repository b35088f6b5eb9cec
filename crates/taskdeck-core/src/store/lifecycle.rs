// ── Action lifecycle ──
//
// Every asynchronous store operation walks an explicit state machine:
// idle -> pending -> fulfilled | rejected. The state is data, not
// middleware -- stores record it beside their snapshots and views read
// it to drive spinners and error banners.

use serde::Serialize;

/// Lifecycle of one asynchronous operation family within a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum ActionState {
    /// Never dispatched (or reset by a cache clear).
    #[default]
    Idle,
    /// Dispatched; the network call has not completed.
    Pending,
    /// Last dispatch completed successfully.
    Fulfilled,
    /// Last dispatch failed; carries the user-displayable message.
    Rejected(String),
}

impl ActionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The failure message, if the last dispatch was rejected.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(ActionState::default(), ActionState::Idle);
        assert!(!ActionState::Idle.is_pending());
    }

    #[test]
    fn rejected_carries_message() {
        let state = ActionState::Rejected("boom".into());
        assert_eq!(state.error(), Some("boom"));
        assert!(ActionState::Fulfilled.error().is_none());
    }
}
