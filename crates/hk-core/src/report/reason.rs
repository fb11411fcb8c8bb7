//! Report reasons.
//!
//! The string forms are part of the wire contract with moderation backends
//! and must stay byte-for-byte stable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Closed set of reasons a user can pick when reporting a user or a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportReason {
    Spam,
    Harassment,
    HateSpeech,
    Violence,
    IntellectualProperty,
    SelfHarm,
    NonConsensualImagery,
    Doxxing,
    MinorSafety,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReasonParseError {
    #[error("report reason must not be empty")]
    Empty,
    #[error("unknown report reason: {0}")]
    Unknown(String),
}

impl ReportReason {
    /// All reasons, in the order they are presented to the user.
    pub const ALL: [ReportReason; 10] = [
        ReportReason::Spam,
        ReportReason::Harassment,
        ReportReason::HateSpeech,
        ReportReason::Violence,
        ReportReason::IntellectualProperty,
        ReportReason::SelfHarm,
        ReportReason::NonConsensualImagery,
        ReportReason::Doxxing,
        ReportReason::MinorSafety,
        ReportReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Spam => "Spam",
            ReportReason::Harassment => "Harassment or bullying",
            ReportReason::HateSpeech => "Hate speech",
            ReportReason::Violence => "Violence or dangerous organizations",
            ReportReason::IntellectualProperty => "Intellectual property violation",
            ReportReason::SelfHarm => "Self-harm",
            ReportReason::NonConsensualImagery => "Non-consensual intimate images",
            ReportReason::Doxxing => "Doxxing",
            ReportReason::MinorSafety => "Minor safety",
            ReportReason::Other => "Other",
        }
    }
}

impl fmt::Display for ReportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportReason {
    type Err = ReasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ReasonParseError::Empty);
        }
        ReportReason::ALL
            .iter()
            .copied()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| ReasonParseError::Unknown(s.to_string()))
    }
}

impl Serialize for ReportReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReportReason {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_strings_match_backend_contract() {
        let strings: Vec<&str> = ReportReason::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(
            strings,
            vec![
                "Spam",
                "Harassment or bullying",
                "Hate speech",
                "Violence or dangerous organizations",
                "Intellectual property violation",
                "Self-harm",
                "Non-consensual intimate images",
                "Doxxing",
                "Minor safety",
                "Other",
            ]
        );
    }

    #[test]
    fn parse_rejects_empty_and_unknown() {
        assert_eq!("".parse::<ReportReason>(), Err(ReasonParseError::Empty));
        assert_eq!(
            "spam".parse::<ReportReason>(),
            Err(ReasonParseError::Unknown("spam".to_string()))
        );
        assert_eq!(
            "Hate speech".parse::<ReportReason>(),
            Ok(ReportReason::HateSpeech)
        );
    }

    #[test]
    fn serde_uses_display_strings() {
        let json = serde_json::to_string(&ReportReason::MinorSafety).expect("serialize");
        assert_eq!(json, "\"Minor safety\"");

        let parsed: ReportReason = serde_json::from_str("\"Self-harm\"").expect("deserialize");
        assert_eq!(parsed, ReportReason::SelfHarm);

        assert!(serde_json::from_str::<ReportReason>("\"Bogus\"").is_err());
    }
}
