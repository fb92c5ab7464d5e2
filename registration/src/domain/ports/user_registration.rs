//! Driving port for registration use-cases.
//!
//! Inbound adapters call this port with raw payloads; validation, identifier
//! resolution and persistence all happen behind it. HTTP handler tests can
//! substitute a double instead of wiring a repository.

use async_trait::async_trait;

use crate::domain::{Address, Error, User, UserDraft, UserId};

/// Domain use-case port for registering and maintaining users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Validate a new user in create mode and store it.
    async fn register(&self, draft: UserDraft) -> Result<User, Error>;

    /// Validate an existing user in update mode and overwrite it.
    async fn update(&self, draft: UserDraft) -> Result<User, Error>;

    /// Fetch a registered user.
    async fn find(&self, id: UserId) -> Result<User, Error>;

    /// Replace the address list of a user from a bare batch.
    ///
    /// Returns the batch as accepted. Whether elements are validated depends
    /// on how the implementation was configured.
    async fn replace_addresses(
        &self,
        id: UserId,
        addresses: Vec<Address>,
    ) -> Result<Vec<Address>, Error>;
}
