//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod payload;
pub mod schemas;
pub mod state;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register the user endpoints and their extractor configuration.
///
/// Health probes and documentation are wired by the binary, which owns
/// their state.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use registration::inbound::http::configure_users;
///
/// let _app = App::new().configure(configure_users);
/// ```
pub fn configure_users(cfg: &mut web::ServiceConfig) {
    cfg.app_data(payload::json_config())
        .app_data(payload::path_config())
        .service(users::register_user)
        .service(users::update_user)
        .service(users::get_user)
        .service(users::put_addresses)
        .service(users::put_address_list);
}
