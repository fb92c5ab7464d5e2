//! Runtime settings loaded via OrthoConfig.
//!
//! Values layer as defaults, then configuration files, then `REGISTRATION_*`
//! environment variables, then command-line flags.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::AddressBatchPolicy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Configuration values for the registration service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRATION")]
pub struct RegistrationSettings {
    /// Interface the HTTP listener binds to.
    pub host: Option<String>,
    /// TCP port the HTTP listener binds to.
    pub port: Option<u16>,
    /// Validate bare address batches instead of accepting them unchecked.
    #[ortho_config(default = false)]
    pub strict_address_batches: bool,
}

impl RegistrationSettings {
    /// Return the configured host, falling back to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 8080.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Address suitable for `HttpServer::bind`.
    #[must_use]
    pub fn bind_target(&self) -> (String, u16) {
        (self.host().to_owned(), self.port())
    }

    /// Policy applied to `PUT /users/{id}/addresses` and `addressList`.
    #[must_use]
    pub const fn address_batch_policy(&self) -> AddressBatchPolicy {
        AddressBatchPolicy::from_strict_flag(self.strict_address_batches)
    }
}
