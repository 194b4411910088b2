use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::{FormRelayTrait, OtpDeliveryTrait, SessionId};
use otp_shared::ApiResponse;

use super::AppState;
use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/verify-otp
///
/// # Request Body
///
/// ```json
/// { "sessionId": "3f6c...e1", "otpCode": "123456" }
/// ```
///
/// A wrong code answers 400 `INVALID_CODE` with `details.remainingAttempts`.
/// The last allowed wrong attempt answers `TOO_MANY_ATTEMPTS` and the session
/// is gone.
pub async fn verify_otp<D, R>(
    state: web::Data<AppState<D, R>>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    D: OtpDeliveryTrait + 'static,
    R: FormRelayTrait + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let session_id = SessionId::from(request.session_id);
    let verified = state.manager.verify(&session_id, &request.otp_code).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Phone number verified successfully",
        VerifyOtpResponse {
            phone_number: verified.phone,
            verified_at: verified.verified_at,
        },
    )))
}
