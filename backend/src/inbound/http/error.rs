//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into consistent `{"error": …}` responses.
//! Duplicate usernames surface as 400 rather than 409 because the public API
//! has always reported them alongside other registration validation failures.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(REDACTED_MESSAGE);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        if let Some(api_error) = err.as_error::<Self>() {
            return api_error.clone();
        }
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(REDACTED_MESSAGE)
    }
}

/// Turn JSON extractor failures into the API's 400 error body.
///
/// Registered through [`actix_web::web::JsonConfig::error_handler`] so a
/// malformed body never reaches a handler and never produces Actix's
/// plain-text default.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = if matches!(err, JsonPayloadError::ContentType) {
        "expected a JSON body"
    } else {
        "invalid JSON body"
    };
    let source = actix_web::Error::from(err);
    debug!(error = %source, "rejected request body");
    Error::invalid_request(message).into()
}

/// Turn path extractor failures (for example a non-numeric id) into 404.
///
/// A path segment that cannot name a row is treated like a row the caller
/// does not own.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let source = actix_web::Error::from(err);
    debug!(error = %source, "rejected path parameter");
    Error::not_found("resource not found").into()
}

#[cfg(test)]
mod tests;
