//! OTP session manager implementation

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use otp_shared::utils::phone::{format_indian_mobile, mask_phone_number};
use tracing::{error, info, warn};

use crate::domain::entities::otp_session::{OtpSession, SessionId, SessionState};
use crate::errors::{OtpError, OtpResult};

use super::cleanup::{CleanupHandle, CleanupResult, SessionCleanupService};
use super::config::OtpSessionConfig;
use super::store::SessionStore;
use super::traits::{FormRelayTrait, OtpDeliveryTrait};
use super::types::{CreatedSession, FormSubmission, SessionView, VerifiedPhone};

/// Owns the OTP session lifecycle: issue, verify, consume, expire
pub struct OtpSessionManager<D: OtpDeliveryTrait, R: FormRelayTrait> {
    /// Delivery channel for codes
    delivery: Arc<D>,
    /// Downstream consumer of verified submissions
    relay: Arc<R>,
    /// Live sessions, shared with the cleanup task
    store: Arc<SessionStore>,
    /// Service configuration
    config: OtpSessionConfig,
}

impl<D: OtpDeliveryTrait, R: FormRelayTrait> OtpSessionManager<D, R> {
    /// Create a new session manager with an empty store
    pub fn new(delivery: Arc<D>, relay: Arc<R>, config: OtpSessionConfig) -> Self {
        Self {
            delivery,
            relay,
            store: Arc::new(SessionStore::new()),
            config,
        }
    }

    /// Issue a code to a phone number and open a pending session
    ///
    /// The phone number is normalized to `+91XXXXXXXXXX` first. If delivery
    /// fails no session is created.
    pub async fn create(&self, phone_number: &str) -> OtpResult<CreatedSession> {
        let phone = canonical_phone(phone_number)?;
        self.issue(phone, false).await
    }

    /// Issue a fresh code, discarding a previous unverified session
    ///
    /// A referenced session that is already verified is left alone.
    pub async fn resend(
        &self,
        phone_number: &str,
        previous: Option<&SessionId>,
    ) -> OtpResult<CreatedSession> {
        let phone = canonical_phone(phone_number)?;

        if let Some(previous) = previous {
            if self.store.remove_if_pending(previous).await {
                info!(
                    phone = %mask_phone_number(&phone),
                    session_id = %previous,
                    event = "otp_session_replaced",
                    "Discarded previous OTP session before resend"
                );
            }
        }

        self.issue(phone, true).await
    }

    async fn issue(&self, phone: String, is_resend: bool) -> OtpResult<CreatedSession> {
        let session = OtpSession::issued_at(phone, self.config.session_ttl(), is_resend, Utc::now());
        let masked_phone = mask_phone_number(&session.phone);

        // Delivery happens before the session becomes visible
        let message_id = self
            .delivery
            .send_code(&session.phone, session.code())
            .await
            .map_err(|reason| {
                error!(
                    phone = %masked_phone,
                    error = %reason,
                    event = "otp_delivery_failed",
                    "Failed to deliver OTP"
                );
                OtpError::DeliveryFailed { reason }
            })?;

        let created = CreatedSession {
            session_id: session.session_id.clone(),
            phone: session.phone.clone(),
            expires_at: session.expires_at,
            is_resend,
            message_id,
            debug_code: self
                .config
                .expose_code
                .then(|| session.code().to_string()),
        };

        self.store.insert(session).await;

        info!(
            phone = %masked_phone,
            session_id = %created.session_id,
            message_id = %created.message_id,
            is_resend,
            event = "otp_session_created",
            "OTP sent and session created"
        );

        // Opportunistic sweep so the store stays bounded between timer runs
        self.sweep_expired().await;

        Ok(created)
    }

    /// Check a code against a pending session
    ///
    /// Three failed attempts, or an attempt after the deadline, delete the
    /// session; the client must start over.
    pub async fn verify(&self, session_id: &SessionId, code: &str) -> OtpResult<VerifiedPhone> {
        let now = Utc::now();

        match self
            .store
            .verify(session_id, code, now, self.config.max_attempts)
            .await
        {
            Ok(session) => {
                info!(
                    phone = %mask_phone_number(&session.phone),
                    session_id = %session_id,
                    event = "otp_verified_success",
                    "Phone number verified"
                );
                Ok(VerifiedPhone {
                    session_id: session.session_id,
                    phone: session.phone,
                    verified_at: session.verified_at.unwrap_or(now),
                })
            }
            Err(error) => {
                warn!(
                    session_id = %session_id,
                    error_code = error.code(),
                    event = "otp_verification_failed",
                    "OTP verification failed"
                );
                Err(error)
            }
        }
    }

    /// Run `action` once for a verified session, then retire the session
    ///
    /// The session is claimed before `action` runs, so concurrent consumers
    /// see [`OtpError::NotFound`]. If `action` fails the session is put back
    /// and can be consumed again within its window.
    pub async fn consume<F, Fut, T>(
        &self,
        session_id: &SessionId,
        phone_number: &str,
        action: F,
    ) -> OtpResult<T>
    where
        F: FnOnce(VerifiedPhone) -> Fut,
        Fut: Future<Output = OtpResult<T>>,
    {
        let phone = canonical_phone(phone_number)?;

        let session = self
            .store
            .claim(session_id, &phone, Utc::now(), self.config.consume_window())
            .await
            .map_err(|error| {
                warn!(
                    session_id = %session_id,
                    error_code = error.code(),
                    event = "otp_consume_rejected",
                    "Session cannot be consumed"
                );
                error
            })?;

        let verified = VerifiedPhone {
            session_id: session.session_id.clone(),
            phone: session.phone.clone(),
            verified_at: session.verified_at.unwrap_or(session.created_at),
        };

        match action(verified).await {
            Ok(value) => {
                info!(
                    phone = %mask_phone_number(&session.phone),
                    session_id = %session_id,
                    event = "otp_session_consumed",
                    "Verified session consumed"
                );
                Ok(value)
            }
            Err(error) => {
                self.store.restore(session).await;
                warn!(
                    session_id = %session_id,
                    error_code = error.code(),
                    event = "otp_consume_failed",
                    "Downstream action failed; session retained"
                );
                Err(error)
            }
        }
    }

    /// Relay a form submission for a verified session
    ///
    /// The phone number in `submission` must match the verified one; the
    /// relayed copy carries the canonical number and a fresh timestamp.
    pub async fn submit_form(
        &self,
        session_id: &SessionId,
        submission: FormSubmission,
    ) -> OtpResult<FormSubmission> {
        let relay = Arc::clone(&self.relay);
        let phone_number = submission.phone.clone();

        self.consume(session_id, &phone_number, |verified| async move {
            let submission = FormSubmission {
                phone: verified.phone,
                submitted_at: Utc::now(),
                ..submission
            };

            relay.submit(&submission).await.map_err(|reason| {
                error!(
                    phone = %mask_phone_number(&submission.phone),
                    error = %reason,
                    event = "form_relay_failed",
                    "Failed to relay form submission"
                );
                OtpError::RelayFailed { reason }
            })?;

            Ok(submission)
        })
        .await
    }

    /// Non-sensitive view of a live session
    ///
    /// Sessions past their deadline report [`OtpError::NotFound`] even if the
    /// sweeper has not removed them yet.
    pub async fn inspect(&self, session_id: &SessionId) -> OtpResult<SessionView> {
        let session = self
            .store
            .get(session_id)
            .await
            .ok_or(OtpError::NotFound)?;

        match session.state_at(Utc::now(), self.config.consume_window()) {
            SessionState::Expired => Err(OtpError::NotFound),
            _ => Ok(SessionView::from_session(&session)),
        }
    }

    /// Remove every session that can no longer succeed
    pub async fn sweep_expired(&self) -> CleanupResult {
        self.store
            .sweep(Utc::now(), self.config.consume_window())
            .await
    }

    /// Number of sessions currently held, expired or not
    pub async fn active_sessions(&self) -> usize {
        self.store.len().await
    }

    /// Spawn the periodic sweeper over this manager's store
    pub fn start_cleanup(&self) -> Option<CleanupHandle> {
        let service = Arc::new(SessionCleanupService::new(
            Arc::clone(&self.store),
            self.config.cleanup.clone(),
            self.config.consume_window(),
        ));
        service.start_background_task()
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }
}

fn canonical_phone(phone_number: &str) -> OtpResult<String> {
    format_indian_mobile(phone_number).ok_or(OtpError::InvalidPhoneFormat)
}
