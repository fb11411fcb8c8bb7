//! Report dialog state machine.
//!
//! Defines a pure state transition function for the two-step report flow
//! (pick a reason, confirm, submit).

use serde::{Deserialize, Serialize};

use super::reason::ReportReason;

/// Report flow state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportState {
    /// Reason list.
    #[default]
    Selecting,
    /// Confirm screen for the picked reason.
    ///
    /// `error` is set when the last submission failed.
    Confirming {
        reason: ReportReason,
        error: Option<ReportFailure>,
    },
    /// Report call in flight.
    Submitting { reason: ReportReason },
}

/// Wizard step as seen by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStep {
    Selecting,
    Confirming,
}

impl ReportState {
    /// Submitting is still the confirm step, with the submit button disabled.
    pub fn step(&self) -> ReportStep {
        match self {
            ReportState::Selecting => ReportStep::Selecting,
            ReportState::Confirming { .. } | ReportState::Submitting { .. } => {
                ReportStep::Confirming
            }
        }
    }

    pub fn selected_reason(&self) -> Option<ReportReason> {
        match self {
            ReportState::Selecting => None,
            ReportState::Confirming { reason, .. } | ReportState::Submitting { reason } => {
                Some(*reason)
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, ReportState::Submitting { .. })
    }

    pub fn error(&self) -> Option<&ReportFailure> {
        match self {
            ReportState::Confirming { error, .. } => error.as_ref(),
            _ => None,
        }
    }
}

/// A failed report call, kept on the confirm screen so the user can retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFailure {
    pub message: String,
}

impl ReportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Events that drive the report flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportEvent {
    /// User picks a reason from the list.
    SelectReason { reason: ReportReason },
    /// User navigates back to the reason list, discarding the selection.
    Back,
    /// User dismisses the dialog.
    Cancel,
    /// User presses "Submit Report".
    Submit,
    /// The report call resolved.
    ReportSucceeded,
    /// The report call rejected.
    ReportFailed { failure: ReportFailure },
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportAction {
    /// Call the host's report function once.
    InvokeReport { reason: ReportReason },
    /// Tell the host the dialog closed.
    NotifyClosed,
    /// Hand the failure to the observability sink.
    LogFailure {
        reason: ReportReason,
        failure: ReportFailure,
    },
}

/// Pure report state machine.
pub struct ReportStateMachine;

impl ReportStateMachine {
    pub fn transition(state: ReportState, event: ReportEvent) -> (ReportState, Vec<ReportAction>) {
        match (state, event) {
            (ReportState::Selecting, ReportEvent::SelectReason { reason }) => (
                ReportState::Confirming {
                    reason,
                    error: None,
                },
                Vec::new(),
            ),
            (_, ReportEvent::Cancel) => (ReportState::Selecting, vec![ReportAction::NotifyClosed]),
            (ReportState::Confirming { .. }, ReportEvent::Back)
            | (ReportState::Submitting { .. }, ReportEvent::Back) => {
                (ReportState::Selecting, Vec::new())
            }
            (ReportState::Confirming { reason, .. }, ReportEvent::Submit) => (
                ReportState::Submitting { reason },
                vec![ReportAction::InvokeReport { reason }],
            ),
            (ReportState::Submitting { .. }, ReportEvent::ReportSucceeded) => {
                (ReportState::Selecting, vec![ReportAction::NotifyClosed])
            }
            (ReportState::Submitting { reason }, ReportEvent::ReportFailed { failure }) => (
                ReportState::Confirming {
                    reason,
                    error: Some(failure.clone()),
                },
                vec![ReportAction::LogFailure { reason, failure }],
            ),
            (state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?state, event = ?_event, "report event ignored in current state");
                (state, Vec::new())
            }
        }
    }
}
