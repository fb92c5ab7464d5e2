//! HTTP server configuration object and helpers.

use registration::config::RegistrationSettings;
use registration::domain::AddressBatchPolicy;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) address_batches: AddressBatchPolicy,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: (String, u16)) -> Self {
        Self {
            bind_addr,
            address_batches: AddressBatchPolicy::Unchecked,
        }
    }

    /// Choose how bare address batches are treated.
    #[must_use]
    pub fn with_address_batches(mut self, policy: AddressBatchPolicy) -> Self {
        self.address_batches = policy;
        self
    }
}

impl From<&RegistrationSettings> for ServerConfig {
    fn from(settings: &RegistrationSettings) -> Self {
        Self::new(settings.bind_target()).with_address_batches(settings.address_batch_policy())
    }
}
