//! Route table and shared handlers
//!
//! [`configure`] registers every endpoint on an `App` or `ServiceConfig`,
//! so the binary and the integration tests build the same application.

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};

use otp_core::{FormRelayTrait, OtpDeliveryTrait};
use otp_shared::{error_codes, ErrorResponse};

use crate::handlers::ApiError;
use crate::routes::otp::{get_session, resend_otp, send_otp, submit_form, verify_otp};

/// Register the OTP routes, health check and JSON body limits
///
/// The caller provides `web::Data<AppState<D, R>>`.
pub fn configure<D, R>(max_payload_size: usize) -> impl FnOnce(&mut web::ServiceConfig)
where
    D: OtpDeliveryTrait + 'static,
    R: FormRelayTrait + 'static,
{
    move |cfg| {
        cfg.app_data(json_config(max_payload_size))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .route("/send-otp", web::post().to(send_otp::<D, R>))
                    .route("/verify-otp", web::post().to(verify_otp::<D, R>))
                    .route("/resend-otp", web::post().to(resend_otp::<D, R>))
                    .route("/submit-form", web::post().to(submit_form::<D, R>))
                    .route("/session/{session_id}", web::get().to(get_session::<D, R>)),
            )
            .default_service(web::route().to(not_found));
    }
}

/// JSON extractor settings; malformed bodies answer in the error envelope
pub fn json_config(max_payload_size: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(|err: JsonPayloadError, req: &HttpRequest| {
            tracing::debug!(path = %req.path(), error = %err, "Rejected request body");
            ApiError::Payload(err.to_string()).into()
        })
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "status": "healthy",
        "message": "Server is running",
        "service": "otp-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
