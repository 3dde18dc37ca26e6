//! The reference validator.
//!
//! Checks that the `message` query parameter of a GET request equals the
//! configured message, echoing the received value back as a param either
//! way. Use this as a template when writing a real provider.

use axum::http::{Method, StatusCode};
use tracing::{info, warn};

use crate::config::DummyConfig;
use crate::outcome::{ValidationOutcome, param};
use crate::request::IncomingRequest;

/// Validate one request against the configured message.
///
/// Reduced pipeline: method check, then an exact match of the `message`
/// query parameter. No IP restriction and no JSON body.
pub fn validate(request: &IncomingRequest, config: &DummyConfig) -> ValidationOutcome {
    if request.method != Method::GET {
        warn!("wrong method: expected GET, got {}", request.method);
        return ValidationOutcome::failure(
            StatusCode::METHOD_NOT_ALLOWED,
            format!(
                "Payload validation failed: Wrong method, GET expected, got {}.",
                request.method
            ),
        );
    }

    let Some(message) = request.query.get("message") else {
        return ValidationOutcome::failure(
            StatusCode::BAD_REQUEST,
            "Payload validation failed: missing query parameter: message",
        );
    };

    if *message == config.message {
        info!("message matched");
        ValidationOutcome::success(
            format!("Payload validated. Message: {}", message),
            vec![param("message", message)],
        )
    } else {
        warn!("message mismatch");
        ValidationOutcome {
            status: StatusCode::FORBIDDEN,
            message: format!("Payload validation failed. Message: {}", message),
            params: vec![param("message", message)],
        }
    }
}
