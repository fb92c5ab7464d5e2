//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the JSON shape of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The payload violates one or more registration rules.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// The request body or path could not be decoded.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message. Validation failures list every violation under
/// `details.violations`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "validation_failed")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "payload failed validation")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "6f1f7b4e-1c2d-4a5b-8c9d-0e1f2a3b4c5d")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    #[schema(example = json!({
        "violations": [
            {"field": "addresses[0].street2", "code": "too_short", "message": "street2 must be at least 5 characters"}
        ]
    }))]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Address`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Address, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AddressSchema {
    /// First street line. Required.
    #[schema(example = "37 rue Jean Moulin")]
    street1: Option<String>,
    /// Second street line; at least 5 characters when present.
    #[schema(example = "Bâtiment B", min_length = 5)]
    street2: Option<String>,
    /// Postal code. Required.
    #[schema(example = "33140")]
    postal_code: Option<String>,
    /// City. Required.
    #[schema(example = "Villenave d'Ornon")]
    city: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Credentials`].
///
/// `password` is write-only and never returned.
#[derive(ToSchema)]
#[schema(as = crate::domain::Credentials)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CredentialsSchema {
    /// Login handle.
    #[schema(example = "foo@bar.com")]
    login: Option<String>,
    /// Secret accepted on input only.
    #[schema(write_only, example = "s3cret")]
    password: Option<String>,
}

/// OpenAPI schema for [`crate::domain::UserDraft`].
///
/// Every field is nullable at the decoding level; the registration rules
/// decide which ones are mandatory and answer 412 otherwise.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserDraft, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserDraftSchema {
    /// Absent on creation, required on update. Non-positive values name no user.
    #[schema(example = 1)]
    id: Option<i64>,
    /// Given name. Required, not blank.
    #[schema(example = "Frédéric")]
    first_name: Option<String>,
    /// Family name.
    #[schema(example = "Camblor")]
    last_name: Option<String>,
    /// Birth date, at least 18 years before today. Required.
    #[schema(value_type = Option<String>, format = Date, example = "1983-06-29")]
    birth_date: Option<String>,
    /// Contact numbers; at least one non-blank entry. Required.
    #[schema(example = json!(["0123456789"]))]
    phone_numbers: Option<Vec<String>>,
    /// Postal addresses; `null` and `[]` are both accepted.
    addresses: Option<Vec<AddressSchema>>,
    /// Login credentials.
    credentials: Option<CredentialsSchema>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Registered user with its repository-assigned identifier.
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(example = 1, minimum = 1)]
    id: u64,
    /// Given name.
    #[schema(example = "Frédéric")]
    first_name: String,
    /// Family name.
    #[schema(example = "Camblor")]
    last_name: Option<String>,
    /// Birth date.
    #[schema(value_type = String, format = Date, example = "1983-06-29")]
    birth_date: String,
    /// Contact numbers.
    phone_numbers: Vec<String>,
    /// Postal addresses.
    addresses: Option<Vec<AddressSchema>>,
    /// Login credentials without the password.
    credentials: Option<CredentialsSchema>,
}
