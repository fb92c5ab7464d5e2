//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the registration endpoints, the health probes and the
//! schema wrappers from [`crate::inbound::http::schemas`], which describe the
//! domain types without coupling them to utoipa.
//!
//! Swagger UI serves the document in debug builds.

use crate::inbound::http::schemas::{
    AddressSchema, CredentialsSchema, ErrorCodeSchema, ErrorSchema, UserDraftSchema, UserSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registration API",
        description = "Register and maintain users. Payloads that violate a registration rule answer 412 Precondition Failed."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::put_addresses,
        crate::inbound::http::users::put_address_list,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        UserDraftSchema,
        AddressSchema,
        CredentialsSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "User registration and maintenance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
