//! In-memory session store
//!
//! All state transitions happen inside a single write-lock critical section,
//! so concurrent verify/consume/resend/sweep calls on the same session are
//! linearizable. Callers never hold the lock across collaborator I/O.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::otp_session::{OtpSession, SessionId};
use crate::errors::{OtpError, OtpResult};

use super::cleanup::CleanupResult;

/// Session identifier to session map shared by the manager and the sweeper
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, OtpSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session, replacing any entry with the same identifier
    pub async fn insert(&self, session: OtpSession) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.session_id.clone(), session);
    }

    /// Snapshot of a session
    pub async fn get(&self, session_id: &SessionId) -> Option<OtpSession> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    pub async fn remove(&self, session_id: &SessionId) -> Option<OtpSession> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id)
    }

    /// Remove a session only if it has not been verified
    pub async fn remove_if_pending(&self, session_id: &SessionId) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get(session_id) {
            Some(session) if !session.verified => {
                sessions.remove(session_id);
                true
            }
            _ => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Run one verification attempt against a stored session
    ///
    /// Returns a snapshot of the verified session. Evicting errors remove
    /// the session before the lock is released.
    pub async fn verify(
        &self,
        session_id: &SessionId,
        code: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> OtpResult<OtpSession> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(session_id).ok_or(OtpError::NotFound)?;

        match session.verify(code, now, max_attempts) {
            Ok(()) => Ok(session.clone()),
            Err(error) => {
                if error.evicts_session() {
                    sessions.remove(session_id);
                }
                Err(error)
            }
        }
    }

    /// Take ownership of a consumable session
    ///
    /// On success the session is removed, so at most one caller can claim
    /// it. A claim that is not completed must be handed back with
    /// [`SessionStore::restore`].
    pub async fn claim(
        &self,
        session_id: &SessionId,
        phone: &str,
        now: DateTime<Utc>,
        consume_window: Duration,
    ) -> OtpResult<OtpSession> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get(session_id).ok_or(OtpError::NotFound)?;

        match session.check_consumable(phone, now, consume_window) {
            Ok(()) => sessions.remove(session_id).ok_or(OtpError::NotFound),
            Err(error) => {
                if error.evicts_session() {
                    sessions.remove(session_id);
                }
                Err(error)
            }
        }
    }

    /// Put back a claimed session whose downstream action failed
    pub async fn restore(&self, session: OtpSession) {
        self.insert(session).await;
    }

    /// Delete every session that can no longer succeed
    ///
    /// Pending sessions go once their verification deadline passes; verified
    /// sessions go once their consume window closes.
    pub async fn sweep(&self, now: DateTime<Utc>, consume_window: Duration) -> CleanupResult {
        let mut sessions = self.sessions.write().await;
        let mut result = CleanupResult::default();

        sessions.retain(|_, session| {
            if session.verified {
                if session.consume_window_closed_at(now, consume_window) {
                    result.expired_verified += 1;
                    return false;
                }
            } else if session.is_expired_at(now) {
                result.expired_pending += 1;
                return false;
            }
            true
        });

        result
    }

    /// Shift a stored session's timestamps into the past
    #[cfg(test)]
    pub(crate) async fn backdate(&self, session_id: &SessionId, by: Duration) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.backdate(by);
                true
            }
            None => false,
        }
    }
}
