//! OTP verification routes

use std::sync::Arc;

use otp_core::{FormRelayTrait, OtpDeliveryTrait, OtpSessionManager};

pub mod resend_otp;
pub mod send_otp;
pub mod session;
pub mod submit_form;
pub mod verify_otp;

pub use resend_otp::resend_otp;
pub use send_otp::send_otp;
pub use session::get_session;
pub use submit_form::submit_form;
pub use verify_otp::verify_otp;

/// Application state that holds shared services
pub struct AppState<D, R>
where
    D: OtpDeliveryTrait,
    R: FormRelayTrait,
{
    pub manager: Arc<OtpSessionManager<D, R>>,
}

impl<D, R> AppState<D, R>
where
    D: OtpDeliveryTrait,
    R: FormRelayTrait,
{
    pub fn new(manager: Arc<OtpSessionManager<D, R>>) -> Self {
        Self { manager }
    }
}
