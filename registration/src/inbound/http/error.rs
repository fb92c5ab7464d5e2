//! Status mapping for domain errors leaving the HTTP adapter.
//!
//! Rule violations answer `412 Precondition Failed` with every violation in
//! `details.violations`. Undecodable payloads answer 400, unknown resources
//! 404. Internal failures answer 500 with a fixed message so storage details
//! never reach clients.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias returned by every registration handler.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::PRECONDITION_FAILED,
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body sent to the client: internal errors keep only their trace id.
fn client_view(err: &Error) -> Cow<'_, Error> {
    if err.code() != ErrorCode::InternalError {
        return Cow::Borrowed(err);
    }
    let opaque = Error::internal(INTERNAL_MESSAGE);
    Cow::Owned(match err.trace_id() {
        Some(id) => opaque.with_trace_id(id),
        None => opaque,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::ValidationFailed => {
                warn!(trace_id = ?self.trace_id(), details = ?self.details(), "registration payload rejected");
            }
            ErrorCode::InternalError => {
                error!(trace_id = ?self.trace_id(), message = %self.message(), "registration request failed");
            }
            _ => {}
        }

        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id));
        }
        response.json(&*client_view(self))
    }
}
