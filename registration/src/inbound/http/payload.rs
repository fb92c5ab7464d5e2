//! Request decoding helpers for inbound HTTP adapters.
//!
//! Bodies that are not JSON at all, or whose shape cannot be decoded into a
//! registration payload, are rejected with `400 invalid_request`. Everything
//! that decodes is handed to the domain, where rule violations answer 412.

use actix_web::web;
use serde_json::json;

use crate::domain::{Error, UserId};

/// Request payload decoding error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadErrorCode {
    MalformedBody,
    InvalidPath,
    InvalidUserId,
}

impl PayloadErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedBody => "malformed_body",
            Self::InvalidPath => "invalid_path",
            Self::InvalidUserId => "invalid_user_id",
        }
    }
}

/// JSON extractor configuration mapping decode failures to domain errors.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request("request body could not be decoded")
            .with_details(json!({
                "code": PayloadErrorCode::MalformedBody.as_str(),
                "reason": err.to_string(),
            }))
            .into()
    })
}

/// Path extractor configuration mapping malformed segments to domain errors.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        Error::invalid_request("path parameters could not be decoded")
            .with_details(json!({
                "code": PayloadErrorCode::InvalidPath.as_str(),
                "reason": err.to_string(),
            }))
            .into()
    })
}

/// Convert a raw path segment into a [`UserId`].
pub(crate) fn user_id_from_path(raw: u64) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "id",
            "value": raw,
            "code": PayloadErrorCode::InvalidUserId.as_str(),
        }))
    })
}
