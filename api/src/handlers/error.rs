//! Mapping from domain and request errors to HTTP responses
//!
//! All error bodies share the `ErrorResponse` envelope:
//!
//! ```json
//! {
//!     "success": false,
//!     "error": "INVALID_CODE",
//!     "message": "Invalid OTP. 2 attempts remaining.",
//!     "details": { "remainingAttempts": 2 },
//!     "timestamp": "2025-08-14T10:00:00Z"
//! }
//! ```

use std::collections::BTreeMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use otp_core::OtpError;
use otp_shared::{error_codes, ErrorResponse, IntoErrorResponse};

const INVALID_REQUEST_MESSAGE: &str = "Invalid request data";

/// Errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body fields failed validation
    #[error("Request validation failed")]
    Validation(#[from] ValidationErrors),

    /// Body could not be parsed as JSON
    #[error("Malformed request body: {0}")]
    Payload(String),

    /// Session lookup by id found nothing live
    #[error("Session not found")]
    SessionNotFound,

    #[error(transparent)]
    Otp(#[from] OtpError),
}

impl ApiError {
    /// Field name to messages, sorted by field name
    fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
        errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (to_camel_case(&field), messages)
            })
            .collect()
    }
}

impl IntoErrorResponse for ApiError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            Self::Validation(errors) => {
                let fields = Self::field_errors(errors);
                let message = fields
                    .values()
                    .flat_map(|messages| messages.first())
                    .next()
                    .cloned()
                    .unwrap_or_else(|| INVALID_REQUEST_MESSAGE.to_string());
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message)
                    .add_detail("fields", fields)
            }
            Self::Payload(_) => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, INVALID_REQUEST_MESSAGE)
            }
            Self::SessionNotFound => {
                ErrorResponse::new(error_codes::SESSION_NOT_FOUND, "Session not found")
            }
            Self::Otp(error) => error.to_error_response(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Payload(_) => StatusCode::BAD_REQUEST,
            Self::SessionNotFound => StatusCode::NOT_FOUND,
            Self::Otp(error) if error.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Otp(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = self.to_error_response();

        if status.is_server_error() {
            tracing::error!(
                status = status.as_u16(),
                error_code = %body.error,
                error = %self,
                "Request failed upstream"
            );
        } else {
            tracing::debug!(
                status = status.as_u16(),
                error_code = %body.error,
                "Request rejected"
            );
        }

        HttpResponse::build(status).json(body)
    }
}

/// `phone_number` -> `phoneNumber`, matching the request body names
fn to_camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 2, message = "Name too short"))]
        display_name: String,
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Otp(OtpError::InvalidCode {
                remaining_attempts: 2
            })
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Otp(OtpError::NotFound).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::SessionNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Otp(OtpError::DeliveryFailed {
                reason: "timeout".to_string()
            })
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Payload("EOF".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_validation_response_lists_fields() {
        let errors = Probe {
            display_name: "x".to_string(),
        }
        .validate()
        .unwrap_err();

        let response = ApiError::from(errors).to_error_response();
        assert_eq!(response.error, "VALIDATION_ERROR");
        assert_eq!(response.message, "Name too short");
        let details = response.details.unwrap();
        assert_eq!(
            details["fields"]["displayName"],
            serde_json::json!(["Name too short"])
        );
    }

    #[test]
    fn test_upstream_reason_not_exposed() {
        let response = ApiError::Otp(OtpError::DeliveryFailed {
            reason: "MSG91 returned HTTP 401".to_string(),
        })
        .to_error_response();
        assert_eq!(response.error, "DELIVERY_FAILED");
        assert!(!response.message.contains("401"));
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("phone_number"), "phoneNumber");
        assert_eq!(to_camel_case("session_id"), "sessionId");
        assert_eq!(to_camel_case("name"), "name");
    }
}
