//! Domain primitives, registration rules and use-cases.
//!
//! Purpose: keep registration semantics free of transport and storage
//! concerns. Inbound adapters hand raw [`UserDraft`] payloads to the
//! [`ports::UserRegistration`] port; outbound adapters implement
//! [`ports::UserRepository`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserProfile, UserDraft, Address, Credentials, UserId: data model.
//! - validation: the composable rule set.
//! - RegistrationService: the driving port implementation.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod registration_service;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::registration_service::{AddressBatchPolicy, RegistrationService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Address, Credentials, User, UserDraft, UserId, UserProfile, UserValidationError,
};
pub use self::validation::{Operation, Violation, ViolationCode, Violations};
