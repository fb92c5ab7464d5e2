//! Registration service implementing the [`UserRegistration`] driving port.
//!
//! Every mutation runs the registration rule set first, evaluated as of the
//! injected clock's current UTC date. Identifier resolution on update is
//! folded into the same violation list, so a caller only ever sees one
//! validation failure carrying every problem.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{UserPersistenceError, UserRegistration, UserRepository};
use crate::domain::validation::{
    Operation, RuleContext, RuleSet, Violation, ViolationCode, Violations, address_batch_rules,
    user_rules,
};
use crate::domain::{Address, Error, User, UserDraft, UserId};

/// How bare address batches are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddressBatchPolicy {
    /// Accept batches without looking at their elements or the target id.
    #[default]
    Unchecked,
    /// Apply the address rules to every element and require a known id.
    Strict,
}

impl AddressBatchPolicy {
    /// Map the `strict_address_batches` setting onto a policy.
    #[must_use]
    pub const fn from_strict_flag(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Unchecked }
    }
}

/// Registration use-cases backed by a [`UserRepository`].
pub struct RegistrationService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    address_batches: AddressBatchPolicy,
    user_rules: RuleSet<UserDraft>,
    batch_rules: RuleSet<Vec<Address>>,
}

impl<R> RegistrationService<R> {
    /// Create a service that leaves address batches unchecked.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use registration::domain::RegistrationService;
    /// use registration::outbound::memory::InMemoryUserRepository;
    ///
    /// let service = RegistrationService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            address_batches: AddressBatchPolicy::default(),
            user_rules: user_rules(),
            batch_rules: address_batch_rules(),
        }
    }

    /// Choose how bare address batches are treated.
    #[must_use]
    pub fn with_address_batches(mut self, policy: AddressBatchPolicy) -> Self {
        self.address_batches = policy;
        self
    }

    fn context(&self, operation: Operation) -> RuleContext {
        RuleContext::new(operation, self.clock.utc().date_naive())
    }
}

fn unknown_user(id: impl fmt::Display) -> Violation {
    Violation::new(
        "id",
        ViolationCode::UnknownUser,
        format!("no registered user with id {id}"),
    )
}

fn map_persistence_error(err: UserPersistenceError) -> Error {
    error!(error = %err, "user repository failure");
    Error::internal(format!("user repository failure: {err}"))
}

impl<R: UserRepository> RegistrationService<R> {
    async fn lookup(&self, id: UserId) -> Result<Option<User>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R: UserRepository> UserRegistration for RegistrationService<R> {
    async fn register(&self, draft: UserDraft) -> Result<User, Error> {
        let context = self.context(Operation::Create);
        self.user_rules.validate(&draft, &context)?;
        let (_, profile) = draft.into_profile()?;

        let user = self
            .repository
            .insert(profile)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn update(&self, draft: UserDraft) -> Result<User, Error> {
        let context = self.context(Operation::Update);
        let mut violations = self.user_rules.collect(&draft, &context);
        if let Some(raw) = draft.id {
            let known = match UserId::try_from(raw) {
                Ok(id) => self.lookup(id).await?.is_some(),
                Err(_) => false,
            };
            if !known {
                violations.push(unknown_user(raw));
            }
        }
        violations.into_result()?;

        let (raw_id, profile) = draft.into_profile()?;
        let id = raw_id
            .and_then(|raw| UserId::try_from(raw).ok())
            .ok_or_else(|| Violations::from(Violation::required("id")))?;
        let user = User::new(id, profile);
        let updated = self
            .repository
            .update(&user)
            .await
            .map_err(map_persistence_error)?;
        if !updated {
            return Err(Violations::from(unknown_user(id)).into());
        }
        info!(user_id = %id, "user updated");
        Ok(user)
    }

    async fn find(&self, id: UserId) -> Result<User, Error> {
        self.lookup(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }

    async fn replace_addresses(
        &self,
        id: UserId,
        addresses: Vec<Address>,
    ) -> Result<Vec<Address>, Error> {
        let existing = self.lookup(id).await?;

        if self.address_batches == AddressBatchPolicy::Strict {
            let context = self.context(Operation::Update);
            let mut violations = self.batch_rules.collect(&addresses, &context);
            if existing.is_none() {
                violations.push(unknown_user(id));
            }
            violations.into_result()?;
        }

        match existing {
            Some(mut user) => {
                user.profile_mut().set_addresses(addresses.clone());
                let stored = self
                    .repository
                    .update(&user)
                    .await
                    .map_err(map_persistence_error)?;
                if stored {
                    info!(user_id = %id, count = addresses.len(), "addresses replaced");
                } else {
                    debug!(user_id = %id, "user vanished before its addresses were stored");
                }
            }
            None => {
                debug!(user_id = %id, "address batch for unknown user left unattached");
            }
        }
        Ok(addresses)
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
