use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::{FormRelayTrait, FormSubmission, OtpDeliveryTrait, SessionId};
use otp_shared::phone::mask_phone_number;
use otp_shared::ApiResponse;

use super::AppState;
use crate::dto::{SubmitFormRequest, SubmitFormResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/submit-form
///
/// Relays the form for a verified session whose phone number matches. The
/// session is retired once the relay accepts the submission; a relay failure
/// answers 502 and leaves the session usable for a retry.
pub async fn submit_form<D, R>(
    state: web::Data<AppState<D, R>>,
    request: web::Json<SubmitFormRequest>,
) -> Result<HttpResponse, ApiError>
where
    D: OtpDeliveryTrait + 'static,
    R: FormRelayTrait + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    tracing::info!(
        phone = %mask_phone_number(&request.phone_number),
        "Processing submit-form request"
    );

    let submission = FormSubmission::new(
        request.trimmed_name(),
        request.normalized_email(),
        request.phone_number.clone(),
    );
    let session_id = SessionId::from(request.session_id);

    let relayed = state.manager.submit_form(&session_id, submission).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Form submitted successfully",
        SubmitFormResponse {
            submitted_at: relayed.submitted_at,
        },
    )))
}
