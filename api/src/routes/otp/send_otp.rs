use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::{FormRelayTrait, OtpDeliveryTrait};
use otp_shared::phone::mask_phone_number;
use otp_shared::ApiResponse;

use super::AppState;
use crate::dto::{OtpSentResponse, SendOtpRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/send-otp
///
/// Sends a verification code to an Indian mobile number and opens a session.
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "9876543210" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "OTP sent successfully",
///     "sessionId": "3f6c...e1",
///     "expiresAt": "2025-08-14T10:10:00Z",
///     "timestamp": "2025-08-14T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 `VALIDATION_ERROR` / `PHONE_INVALID`
/// - 502 `DELIVERY_FAILED`
pub async fn send_otp<D, R>(
    state: web::Data<AppState<D, R>>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    D: OtpDeliveryTrait + 'static,
    R: FormRelayTrait + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    tracing::info!(
        phone = %mask_phone_number(&request.phone_number),
        "Processing send-otp request"
    );

    let created = state.manager.create(&request.phone_number).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "OTP sent successfully",
        OtpSentResponse::from(created),
    )))
}
