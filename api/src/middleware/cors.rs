//! CORS middleware configuration for browser clients.
//!
//! The verification form is usually served from a different origin than the
//! API. Allowed origins come from [`CorsConfig`]; `*` enables any origin and
//! is meant for development only.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use otp_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// Only the methods and headers the OTP endpoints use are allowed. With an
/// empty origin list no cross-origin request is accepted.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("Configuring CORS to allow any origin");
        // Wildcard origins cannot be combined with credentials
        return cors.allow_any_origin();
    }

    for origin in &config.allowed_origins {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
