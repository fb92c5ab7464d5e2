//! User registration service library.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the data model, the
//! registration rule set and the use-cases; [`inbound::http`] adapts them to
//! Actix Web; [`outbound::memory`] stores users in process memory.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
