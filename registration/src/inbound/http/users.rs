//! Registration API handlers.
//!
//! ```text
//! POST /users                  Register a new user
//! PUT  /users/registered       Update a registered user
//! GET  /users/{id}             Fetch a registered user
//! PUT  /users/{id}/addresses   Replace addresses from a bare batch
//! PUT  /users/{id}/addressList Same as above, alternate path
//! ```
//!
//! Handlers only decode and encode; every rule lives behind the
//! [`crate::domain::ports::UserRegistration`] port.

use actix_web::{get, post, put, web};

use crate::domain::{Address, User, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::user_id_from_path;
use crate::inbound::http::schemas::{AddressSchema, ErrorSchema, UserDraftSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Register a new user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserDraftSchema,
    responses(
        (status = 200, description = "Registered user with its assigned id", body = UserSchema),
        (status = 400, description = "Body could not be decoded", body = ErrorSchema),
        (status = 412, description = "Payload violates registration rules", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserDraft>,
) -> ApiResult<web::Json<User>> {
    let user = state.registration.register(payload.into_inner()).await?;
    Ok(web::Json(user))
}

/// Update a registered user; the payload must carry a known `id`.
#[utoipa::path(
    put,
    path = "/users/registered",
    request_body = UserDraftSchema,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Body could not be decoded", body = ErrorSchema),
        (status = 412, description = "Missing or unknown id, or rule violation", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/registered")]
pub async fn update_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserDraft>,
) -> ApiResult<web::Json<User>> {
    let user = state.registration.update(payload.into_inner()).await?;
    Ok(web::Json(user))
}

/// Fetch a registered user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User identifier", minimum = 1)),
    responses(
        (status = 200, description = "Registered user", body = UserSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Unknown id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<User>> {
    let id = user_id_from_path(path.into_inner())?;
    let user = state.registration.find(id).await?;
    Ok(web::Json(user))
}

async fn replace_addresses(
    state: &HttpState,
    raw_id: u64,
    batch: Vec<Address>,
) -> ApiResult<web::Json<Vec<Address>>> {
    let id = user_id_from_path(raw_id)?;
    let accepted = state.registration.replace_addresses(id, batch).await?;
    Ok(web::Json(accepted))
}

/// Replace a user's addresses from a bare array.
///
/// Elements are not validated unless strict address batches are enabled.
#[utoipa::path(
    put,
    path = "/users/{id}/addresses",
    params(("id" = u64, Path, description = "User identifier", minimum = 1)),
    request_body = [AddressSchema],
    responses(
        (status = 200, description = "Batch as accepted", body = [AddressSchema]),
        (status = 400, description = "Body or id could not be decoded", body = ErrorSchema),
        (status = 412, description = "Strict mode only: invalid element or unknown id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "replaceAddresses"
)]
#[put("/users/{id}/addresses")]
pub async fn put_addresses(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    payload: web::Json<Vec<Address>>,
) -> ApiResult<web::Json<Vec<Address>>> {
    replace_addresses(&state, path.into_inner(), payload.into_inner()).await
}

/// Replace a user's addresses from a bare list.
///
/// Behaves exactly like `PUT /users/{id}/addresses`.
#[utoipa::path(
    put,
    path = "/users/{id}/addressList",
    params(("id" = u64, Path, description = "User identifier", minimum = 1)),
    request_body = [AddressSchema],
    responses(
        (status = 200, description = "Batch as accepted", body = [AddressSchema]),
        (status = 400, description = "Body or id could not be decoded", body = ErrorSchema),
        (status = 412, description = "Strict mode only: invalid element or unknown id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "replaceAddressList"
)]
#[put("/users/{id}/addressList")]
pub async fn put_address_list(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    payload: web::Json<Vec<Address>>,
) -> ApiResult<web::Json<Vec<Address>>> {
    replace_addresses(&state, path.into_inner(), payload.into_inner()).await
}
