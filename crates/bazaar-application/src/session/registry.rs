use bazaar_core::catalog::{AuthoringSession, OptionFields, SessionKey};
use bazaar_core::error::{BazaarError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory table of authoring sessions, keyed by the initiating actor.
///
/// Holds at most one session per actor. Every compound operation (check and
/// remove, append) happens under a single write lock so interleaved handlers
/// never observe a half-applied step.
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionKey, AuthoringSession>>>,
}

impl SessionRegistry {
    /// Creates a new empty SessionRegistry.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Stores a session, replacing any session the same actor already had.
    ///
    /// # Returns
    ///
    /// The replaced session, if there was one.
    pub async fn start(&self, session: AuthoringSession) -> Option<AuthoringSession> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.key, session)
    }

    /// Appends an option to the draft of `key`.
    ///
    /// # Returns
    ///
    /// The new option count, or `SessionNotFound` if no session exists.
    pub async fn push_option(
        &self,
        key: &SessionKey,
        fields: OptionFields,
        now: DateTime<Utc>,
    ) -> Result<usize> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(key)
            .ok_or_else(|| BazaarError::session_not_found(key))?;
        Ok(session.push_option(fields, now))
    }

    /// Removes the session of `key` so it can be committed.
    ///
    /// A session without options is left in place and `EmptyBundle` is
    /// returned. Only one caller can ever take a given session.
    pub async fn take_for_finalize(&self, key: &SessionKey) -> Result<AuthoringSession> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(key) {
            None => Err(BazaarError::session_not_found(key)),
            Some(session) if session.option_count() == 0 => Err(BazaarError::EmptyBundle),
            Some(_) => sessions
                .remove(key)
                .ok_or_else(|| BazaarError::session_not_found(key)),
        }
    }

    /// Puts a previously taken session back, unless the actor started a new one meanwhile.
    ///
    /// # Returns
    ///
    /// `true` if the session was restored.
    pub async fn restore(&self, session: AuthoringSession) -> bool {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.key) {
            return false;
        }
        sessions.insert(session.key, session);
        true
    }

    /// Gets a copy of the session of `key`.
    pub async fn get(&self, key: &SessionKey) -> Option<AuthoringSession> {
        let sessions = self.sessions.read().await;
        sessions.get(key).cloned()
    }

    /// Removes the session of `key`.
    ///
    /// # Returns
    ///
    /// `true` if a session was removed.
    pub async fn evict(&self, key: &SessionKey) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(key).is_some()
    }

    /// Removes every session idle for longer than `ttl`, measured against `now`.
    ///
    /// # Returns
    ///
    /// The keys of the removed sessions.
    pub async fn sweep_expired(&self, ttl: Duration, now: DateTime<Utc>) -> Vec<SessionKey> {
        let Some(cutoff) = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_sub_signed(ttl))
        else {
            return Vec::new();
        };

        let mut sessions = self.sessions.write().await;
        let expired: Vec<SessionKey> = sessions
            .values()
            .filter(|s| s.is_idle_since(cutoff))
            .map(|s| s.key)
            .collect();
        for key in &expired {
            sessions.remove(key);
        }
        expired
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
