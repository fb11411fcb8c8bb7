use std::fmt;

use serde::{Deserialize, Serialize};

use super::reason::ReportReason;

/// What is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    User,
    Post,
}

impl ReportKind {
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::User => "User",
            ReportKind::Post => "Post",
        }
    }
}

/// The user or post a report dialog was opened for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTarget {
    pub kind: ReportKind,
    pub target_username: String,
    pub target_permlink: Option<String>,
}

impl ReportTarget {
    pub fn user(username: impl Into<String>) -> Self {
        Self {
            kind: ReportKind::User,
            target_username: username.into(),
            target_permlink: None,
        }
    }

    pub fn post(username: impl Into<String>, permlink: impl Into<String>) -> Self {
        Self {
            kind: ReportKind::Post,
            target_username: username.into(),
            target_permlink: Some(permlink.into()),
        }
    }

    /// Title of the dialog, e.g. `Report Post`.
    pub fn title(&self) -> String {
        format!("Report {}", self.kind.label())
    }

    /// Build the confirm screen summary for `reason`.
    pub fn summary(&self, reason: ReportReason) -> ReportSummary {
        let post = match self.kind {
            ReportKind::Post => self.target_permlink.clone().filter(|p| !p.is_empty()),
            ReportKind::User => None,
        };
        ReportSummary {
            kind: self.kind,
            target: format!("@{}", self.target_username),
            post,
            reason,
        }
    }
}

/// Data shown on the confirm step before a report is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub kind: ReportKind,
    /// Target username, `@`-prefixed.
    pub target: String,
    /// Post permlink; only present for post reports.
    pub post: Option<String>,
    pub reason: ReportReason,
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Type: {}", self.kind.label())?;
        writeln!(f, "Target: {}", self.target)?;
        if let Some(post) = &self.post {
            writeln!(f, "Post: {}", post)?;
        }
        write!(f, "Reason: {}", self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_summary_omits_post_line() {
        let target = ReportTarget {
            kind: ReportKind::User,
            target_username: "alice".into(),
            target_permlink: Some("ignored".into()),
        };
        let summary = target.summary(ReportReason::Spam);

        assert_eq!(summary.target, "@alice");
        assert_eq!(summary.post, None);
        assert_eq!(summary.to_string(), "Type: User\nTarget: @alice\nReason: Spam");
    }

    #[test]
    fn post_summary_includes_permlink() {
        let target = ReportTarget::post("bob", "my-first-post");
        let summary = target.summary(ReportReason::Doxxing);

        assert_eq!(target.title(), "Report Post");
        assert_eq!(summary.post.as_deref(), Some("my-first-post"));
        assert!(summary.to_string().contains("Post: my-first-post"));
    }
}
