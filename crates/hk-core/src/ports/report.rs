use async_trait::async_trait;
use thiserror::Error;

use crate::report::ReportReason;

/// Failure reported by the host's report function. Opaque to the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("report failed: {0}")]
pub struct ReportError(pub String);

/// Host-supplied report function (`onReport`).
#[async_trait]
pub trait ReportPort: Send + Sync {
    async fn report(&self, reason: ReportReason) -> Result<(), ReportError>;
}

/// Host callback fired after the report dialog closes (`onClose`).
pub trait DialogHostPort: Send + Sync {
    fn on_close(&self);
}
