//! Report dialog controller.
//!
//! Drives [`ReportStateMachine`] for one report target and executes the
//! resulting actions against the host's report function and close callback.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, info_span, Instrument};

use hk_core::ports::{DialogHostPort, ReportPort};
use hk_core::report::{
    ReasonParseError, ReportAction, ReportEvent, ReportFailure, ReportReason, ReportState,
    ReportStateMachine, ReportSummary, ReportTarget,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportWorkflowError {
    #[error("report dialog is not open")]
    DialogClosed,

    #[error("a reason can only be picked from the reason list")]
    NotSelecting,

    #[error("no report reason selected")]
    NoReasonSelected,

    #[error("invalid report reason: {0}")]
    InvalidReason(#[from] ReasonParseError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Report accepted; the dialog closed and reset.
    Submitted,
    /// Report call failed; the dialog stays on the confirm step for a retry.
    Failed(ReportFailure),
    /// A submission is already in flight; nothing was sent.
    AlreadySubmitting,
    /// The dialog was closed or went back while the call was in flight.
    Discarded,
}

struct Dialog {
    open: bool,
    state: ReportState,
    /// Bumped whenever the user moves away from an in-flight submission, so
    /// its late outcome is dropped instead of applied to a newer one.
    epoch: u64,
}

pub struct ReportWorkflow {
    target: ReportTarget,
    reporter: Arc<dyn ReportPort>,
    host: Arc<dyn DialogHostPort>,
    dialog: Mutex<Dialog>,
}

impl ReportWorkflow {
    pub fn new(
        target: ReportTarget,
        reporter: Arc<dyn ReportPort>,
        host: Arc<dyn DialogHostPort>,
    ) -> Self {
        Self {
            target,
            reporter,
            host,
            dialog: Mutex::new(Dialog {
                open: false,
                state: ReportState::Selecting,
                epoch: 0,
            }),
        }
    }

    pub fn target(&self) -> &ReportTarget {
        &self.target
    }

    pub fn title(&self) -> String {
        self.target.title()
    }

    /// Open the dialog on the reason list. No-op if already open.
    pub async fn open(&self) {
        let mut dialog = self.dialog.lock().await;
        if dialog.open {
            return;
        }
        dialog.open = true;
        dialog.state = ReportState::Selecting;
        dialog.epoch += 1;
        debug!(target_user = %self.target.target_username, "report dialog opened");
    }

    pub async fn is_open(&self) -> bool {
        self.dialog.lock().await.open
    }

    pub async fn state(&self) -> ReportState {
        self.dialog.lock().await.state.clone()
    }

    /// Confirm screen summary, once a reason has been picked.
    pub async fn summary(&self) -> Option<ReportSummary> {
        let dialog = self.dialog.lock().await;
        if !dialog.open {
            return None;
        }
        dialog
            .state
            .selected_reason()
            .map(|reason| self.target.summary(reason))
    }

    pub async fn select_reason(&self, reason: ReportReason) -> Result<(), ReportWorkflowError> {
        let mut dialog = self.dialog.lock().await;
        if !dialog.open {
            return Err(ReportWorkflowError::DialogClosed);
        }
        if dialog.state != ReportState::Selecting {
            return Err(ReportWorkflowError::NotSelecting);
        }
        Self::apply(&mut dialog, ReportEvent::SelectReason { reason });
        Ok(())
    }

    /// Select a reason by its display string, as sent by a host UI.
    pub async fn select_reason_str(&self, raw: &str) -> Result<(), ReportWorkflowError> {
        let reason: ReportReason = raw.parse()?;
        self.select_reason(reason).await
    }

    /// Back to the reason list, discarding the selected reason.
    pub async fn back(&self) {
        let mut dialog = self.dialog.lock().await;
        if !dialog.open {
            return;
        }
        Self::apply(&mut dialog, ReportEvent::Back);
        dialog.epoch += 1;
    }

    /// Dismiss the dialog: reset, then notify the host.
    ///
    /// An in-flight report call is not stopped; its outcome is discarded.
    pub async fn cancel(&self) {
        let actions = {
            let mut dialog = self.dialog.lock().await;
            let actions = Self::apply(&mut dialog, ReportEvent::Cancel);
            dialog.open = false;
            dialog.epoch += 1;
            actions
        };
        self.run_side_effects(actions);
    }

    pub async fn close(&self) {
        self.cancel().await
    }

    /// Submit the selected reason through the host's report function.
    ///
    /// At most one call is in flight per dialog; a submit while submitting
    /// returns [`SubmitOutcome::AlreadySubmitting`] without calling the host.
    pub async fn submit(&self) -> Result<SubmitOutcome, ReportWorkflowError> {
        let (reason, epoch) = {
            let mut dialog = self.dialog.lock().await;
            if !dialog.open {
                return Err(ReportWorkflowError::DialogClosed);
            }
            match dialog.state {
                ReportState::Selecting => return Err(ReportWorkflowError::NoReasonSelected),
                ReportState::Submitting { .. } => {
                    debug!("report already submitting, ignoring submit");
                    return Ok(SubmitOutcome::AlreadySubmitting);
                }
                ReportState::Confirming { .. } => {}
            }

            let actions = Self::apply(&mut dialog, ReportEvent::Submit);
            let Some(reason) = actions.iter().find_map(|action| match action {
                ReportAction::InvokeReport { reason } => Some(*reason),
                _ => None,
            }) else {
                return Ok(SubmitOutcome::AlreadySubmitting);
            };
            dialog.epoch += 1;
            (reason, dialog.epoch)
        };

        let span = info_span!(
            "usecase.report_workflow.submit",
            reason = %reason,
            kind = self.target.kind.label(),
            target_user = %self.target.target_username,
        );

        let outcome = async {
            info!("Submitting report");
            let result = self.reporter.report(reason).await;

            let (outcome, actions) = {
                let mut dialog = self.dialog.lock().await;
                if !dialog.open || dialog.epoch != epoch {
                    debug!(succeeded = result.is_ok(), "report outcome discarded, dialog moved on");
                    return SubmitOutcome::Discarded;
                }
                match result {
                    Ok(()) => {
                        let actions = Self::apply(&mut dialog, ReportEvent::ReportSucceeded);
                        dialog.open = false;
                        dialog.epoch += 1;
                        info!("Report submitted");
                        (SubmitOutcome::Submitted, actions)
                    }
                    Err(err) => {
                        let failure = ReportFailure::new(err.to_string());
                        let actions = Self::apply(
                            &mut dialog,
                            ReportEvent::ReportFailed {
                                failure: failure.clone(),
                            },
                        );
                        (SubmitOutcome::Failed(failure), actions)
                    }
                }
            };
            self.run_side_effects(actions);
            outcome
        }
        .instrument(span)
        .await;

        Ok(outcome)
    }

    fn apply(dialog: &mut Dialog, event: ReportEvent) -> Vec<ReportAction> {
        let state = std::mem::take(&mut dialog.state);
        let (next, actions) = ReportStateMachine::transition(state, event);
        dialog.state = next;
        actions
    }

    // Called with the dialog lock released.
    fn run_side_effects(&self, actions: Vec<ReportAction>) {
        for action in actions {
            match action {
                ReportAction::NotifyClosed => self.host.on_close(),
                ReportAction::LogFailure { reason, failure } => error!(
                    reason = %reason,
                    target_user = %self.target.target_username,
                    error = %failure.message,
                    "Report failed"
                ),
                ReportAction::InvokeReport { .. } => {}
            }
        }
    }
}
