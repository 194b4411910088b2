use actix_web::{web, HttpResponse};

use otp_core::{FormRelayTrait, OtpDeliveryTrait, OtpError, SessionId};
use otp_shared::ApiResponse;

use super::AppState;
use crate::dto::SessionStatusResponse;
use crate::handlers::ApiError;

/// Handler for GET /api/session/{sessionId}
///
/// Reports a live session with the phone number masked. Unknown and expired
/// sessions answer 404.
pub async fn get_session<D, R>(
    state: web::Data<AppState<D, R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    D: OtpDeliveryTrait + 'static,
    R: FormRelayTrait + 'static,
{
    let session_id = SessionId::from(path.into_inner());

    let view = state
        .manager
        .inspect(&session_id)
        .await
        .map_err(|error| match error {
            OtpError::NotFound => ApiError::SessionNotFound,
            other => ApiError::Otp(other),
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Session found",
        SessionStatusResponse { session: view },
    )))
}
