//! HTTP adapter for the OTP gateway
//!
//! Exposes the session manager over JSON endpoints:
//! - `POST /api/send-otp`, `POST /api/resend-otp`
//! - `POST /api/verify-otp`
//! - `POST /api/submit-form`
//! - `GET /api/session/{sessionId}`

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::configure;
pub use routes::otp::AppState;
