use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::{FormRelayTrait, OtpDeliveryTrait, SessionId};
use otp_shared::phone::mask_phone_number;
use otp_shared::ApiResponse;

use super::AppState;
use crate::dto::{OtpSentResponse, ResendOtpRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/resend-otp
///
/// Issues a fresh code under a new session id. When `sessionId` names an
/// unverified session it is discarded first.
pub async fn resend_otp<D, R>(
    state: web::Data<AppState<D, R>>,
    request: web::Json<ResendOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    D: OtpDeliveryTrait + 'static,
    R: FormRelayTrait + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    tracing::info!(
        phone = %mask_phone_number(&request.phone_number),
        replaces_session = request.session_id.is_some(),
        "Processing resend-otp request"
    );

    let previous = request.session_id.map(SessionId::from);
    let created = state
        .manager
        .resend(&request.phone_number, previous.as_ref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "OTP resent successfully",
        OtpSentResponse::from(created),
    )))
}
