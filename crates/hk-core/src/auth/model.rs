//! Authentication domain models.
//!
//! Field names serialize in camelCase so persisted sessions and host payloads
//! keep the shape the widget's JavaScript hosts already produce.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw result of a Hive login, handed to the host's authenticate callback.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveAuthResult {
    pub provider: String,
    /// Hash produced by the Hive challenge signature.
    pub challenge: String,
    pub public_key: String,
    pub username: String,
    /// Timestamp the challenge was signed at.
    pub proof: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_posting_key: Option<String>,
    /// Only present for private key logins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_active_key: Option<String>,
}

/// Token issued by the host's backend, usually returned as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerAuthResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ServerAuthResponse {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// An authenticated identity, persisted (encrypted) across sessions.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedInUser {
    pub username: String,
    pub provider: String,
    pub challenge: String,
    pub public_key: String,
    pub proof: String,
    /// Raw response string from the host's authenticate callback.
    pub server_response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_posting_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_active_key: Option<String>,
}

impl LoggedInUser {
    pub fn from_auth_result(result: HiveAuthResult, server_response: String) -> Self {
        Self {
            username: result.username,
            provider: result.provider,
            challenge: result.challenge,
            public_key: result.public_key,
            proof: result.proof,
            server_response,
            private_posting_key: result.private_posting_key,
            private_active_key: result.private_active_key,
        }
    }

    /// Parse the stored server response, if the host returned JSON.
    pub fn server_auth(&self) -> Option<ServerAuthResponse> {
        ServerAuthResponse::parse(&self.server_response).ok()
    }
}

fn redacted(key: &Option<String>) -> &'static str {
    if key.is_some() {
        "Some([REDACTED])"
    } else {
        "None"
    }
}

impl fmt::Debug for HiveAuthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HiveAuthResult")
            .field("provider", &self.provider)
            .field("challenge", &self.challenge)
            .field("public_key", &self.public_key)
            .field("username", &self.username)
            .field("proof", &self.proof)
            .field("private_posting_key", &redacted(&self.private_posting_key))
            .field("private_active_key", &redacted(&self.private_active_key))
            .finish()
    }
}

impl fmt::Debug for LoggedInUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggedInUser")
            .field("username", &self.username)
            .field("provider", &self.provider)
            .field("challenge", &self.challenge)
            .field("public_key", &self.public_key)
            .field("proof", &self.proof)
            .field("server_response", &"[REDACTED]")
            .field("private_posting_key", &redacted(&self.private_posting_key))
            .field("private_active_key", &redacted(&self.private_active_key))
            .finish()
    }
}
