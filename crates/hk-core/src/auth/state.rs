//! Authentication store state.
//!
//! `current_user` is a username reference into `logged_in_users`; the
//! mutators below keep it pointing at an existing entry or `None`.

use serde::{Deserialize, Serialize};

use super::model::LoggedInUser;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    current_user: Option<String>,
    logged_in_users: Vec<LoggedInUser>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub hive_auth_payload: Option<String>,
}

impl AuthState {
    pub fn current_user(&self) -> Option<&LoggedInUser> {
        let username = self.current_user.as_deref()?;
        self.find(username)
    }

    pub fn current_username(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Logged-in users in insertion order; the most recently added is last.
    pub fn logged_in_users(&self) -> &[LoggedInUser] {
        &self.logged_in_users
    }

    pub fn find(&self, username: &str) -> Option<&LoggedInUser> {
        self.logged_in_users.iter().find(|u| u.username == username)
    }

    /// Add a user, replacing an existing entry with the same username in place.
    pub fn upsert_user(&mut self, user: LoggedInUser) {
        match self
            .logged_in_users
            .iter_mut()
            .find(|u| u.username == user.username)
        {
            Some(existing) => *existing = user,
            None => self.logged_in_users.push(user),
        }
    }

    /// Make `user` the current identity, adding it to the collection if needed.
    pub fn set_current(&mut self, user: Option<LoggedInUser>) {
        match user {
            Some(user) => {
                let username = user.username.clone();
                self.upsert_user(user);
                self.current_user = Some(username);
            }
            None => self.current_user = None,
        }
    }

    /// Remove `username`. If it was current, the most recent remaining user
    /// is promoted, or current is cleared when none remain.
    ///
    /// Returns whether an entry was removed.
    pub fn remove_user(&mut self, username: &str) -> bool {
        let before = self.logged_in_users.len();
        self.logged_in_users.retain(|u| u.username != username);
        let removed = self.logged_in_users.len() != before;

        if self.current_user.as_deref() == Some(username) {
            self.current_user = self.logged_in_users.last().map(|u| u.username.clone());
        }
        removed
    }

    pub fn clear_users(&mut self) {
        self.logged_in_users.clear();
        self.current_user = None;
    }

    /// The subset of state written to encrypted storage.
    pub fn to_persisted(&self) -> PersistedSession {
        PersistedSession {
            current_user: self.current_user.clone(),
            logged_in_users: self.logged_in_users.clone(),
        }
    }

    /// Replace users and current with a persisted session.
    ///
    /// A current reference that names no stored user is dropped.
    pub fn restore(&mut self, session: PersistedSession) {
        self.logged_in_users = session.logged_in_users;
        self.current_user = session
            .current_user
            .filter(|name| self.logged_in_users.iter().any(|u| &u.username == name));
    }
}

/// Persisted part of the auth store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub current_user: Option<String>,
    pub logged_in_users: Vec<LoggedInUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, response: &str) -> LoggedInUser {
        LoggedInUser {
            username: name.into(),
            provider: "keychain".into(),
            challenge: "c".into(),
            public_key: "STM".into(),
            proof: "1".into(),
            server_response: response.into(),
            private_posting_key: None,
            private_active_key: None,
        }
    }

    #[test]
    fn upsert_replaces_in_place_and_appends_new() {
        let mut state = AuthState::default();
        state.upsert_user(user("alice", "a1"));
        state.upsert_user(user("bob", "b1"));
        state.upsert_user(user("alice", "a2"));

        let names: Vec<&str> = state
            .logged_in_users()
            .iter()
            .map(|u| u.username.as_str())
            .collect();
        assert_eq!(names, vec!["alice", "bob"]);
        assert_eq!(state.find("alice").map(|u| u.server_response.as_str()), Some("a2"));
    }

    #[test]
    fn set_current_adds_missing_user() {
        let mut state = AuthState::default();
        state.set_current(Some(user("carol", "c")));

        assert_eq!(state.current_username(), Some("carol"));
        assert_eq!(state.logged_in_users().len(), 1);

        state.set_current(None);
        assert_eq!(state.current_user(), None);
        assert_eq!(state.logged_in_users().len(), 1);
    }

    #[test]
    fn removing_current_promotes_most_recent() {
        let mut state = AuthState::default();
        state.upsert_user(user("alice", "a"));
        state.upsert_user(user("bob", "b"));
        state.set_current(Some(user("carol", "c")));

        assert!(state.remove_user("carol"));
        assert_eq!(state.current_username(), Some("bob"));

        assert!(state.remove_user("alice"));
        assert_eq!(state.current_username(), Some("bob"));

        assert!(state.remove_user("bob"));
        assert_eq!(state.current_username(), None);
        assert!(!state.remove_user("bob"));
    }

    #[test]
    fn restore_drops_dangling_current() {
        let mut state = AuthState::default();
        state.restore(PersistedSession {
            current_user: Some("ghost".into()),
            logged_in_users: vec![user("alice", "a")],
        });

        assert_eq!(state.current_user(), None);
        assert_eq!(state.logged_in_users().len(), 1);
    }

    #[test]
    fn persisted_session_excludes_transient_fields() {
        let mut state = AuthState::default();
        state.set_current(Some(user("alice", "a")));
        state.is_loading = true;
        state.error = Some("boom".into());

        let json = serde_json::to_value(state.to_persisted()).expect("serialize");
        assert_eq!(json["currentUser"], "alice");
        assert!(json.get("error").is_none());
        assert!(json.get("isLoading").is_none());
    }
}
