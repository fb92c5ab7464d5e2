//! User registration data model.
//!
//! Inbound payloads arrive as [`UserDraft`], where every field is optional so
//! that missing values reach the validation layer instead of failing
//! deserialisation. Once the rule set accepts a draft it is converted into a
//! [`UserProfile`], and the repository stores it as a [`User`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{Violation, Violations};

/// Validation errors returned when building a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifiers start at one.
    #[error("user id must be a positive integer")]
    NotPositive,
}

/// Stable user identifier assigned by the repository on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct UserId(u64);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Errors
    /// Returns [`UserValidationError::NotPositive`] for `0`.
    pub const fn new(id: u64) -> Result<Self, UserValidationError> {
        if id == 0 {
            return Err(UserValidationError::NotPositive);
        }
        Ok(Self(id))
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for u64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<u64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map_err(|_| UserValidationError::NotPositive)
            .and_then(Self::new)
    }
}

/// Postal address attached to a user.
///
/// Constraints live in the address rule set; this type only carries data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// First street line. Required.
    pub street1: Option<String>,
    /// Optional second street line; when present it must be long enough.
    pub street2: Option<String>,
    /// Postal code. Required.
    pub postal_code: Option<String>,
    /// City. Required.
    pub city: Option<String>,
}

/// Login credentials supplied at registration.
///
/// The password is write-only: it is accepted on input but never serialised.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Credentials {
    /// Login handle, usually an e-mail address.
    pub login: Option<String>,
    /// Secret; omitted from every serialised representation.
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Unvalidated registration payload as submitted by clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    /// Absent on creation, required on update.
    ///
    /// Kept as the submitted integer so that `0` or a negative value reaches
    /// the rule set and is reported as an unknown user.
    pub id: Option<i64>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Calendar birth date, `YYYY-MM-DD`.
    pub birth_date: Option<NaiveDate>,
    /// Contact numbers.
    pub phone_numbers: Option<Vec<String>>,
    /// Postal addresses; `null` and `[]` are both accepted.
    pub addresses: Option<Vec<Address>>,
    /// Login credentials.
    pub credentials: Option<Credentials>,
}

impl UserDraft {
    /// Split the draft into its identifier and validated profile.
    ///
    /// Only presence is checked here; run the registration rule set first so
    /// every other constraint is reported alongside.
    ///
    /// # Errors
    /// Returns a `required` violation for each missing mandatory field.
    pub fn into_profile(self) -> Result<(Option<i64>, UserProfile), Violations> {
        let Self {
            id,
            first_name,
            last_name,
            birth_date,
            phone_numbers,
            addresses,
            credentials,
        } = self;

        match (first_name, birth_date, phone_numbers) {
            (Some(first_name), Some(birth_date), Some(phone_numbers)) => Ok((
                id,
                UserProfile {
                    first_name,
                    last_name,
                    birth_date,
                    phone_numbers,
                    addresses,
                    credentials,
                },
            )),
            (first_name, birth_date, phone_numbers) => {
                let mut violations = Violations::default();
                if first_name.is_none() {
                    violations.push(Violation::required("firstName"));
                }
                if birth_date.is_none() {
                    violations.push(Violation::required("birthDate"));
                }
                if phone_numbers.is_none() {
                    violations.push(Violation::required("phoneNumbers"));
                }
                Err(violations)
            }
        }
    }
}

/// Validated user fields, independent of any stored identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    first_name: String,
    last_name: Option<String>,
    birth_date: NaiveDate,
    phone_numbers: Vec<String>,
    addresses: Option<Vec<Address>>,
    credentials: Option<Credentials>,
}

impl UserProfile {
    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name, if supplied.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Calendar birth date.
    #[must_use]
    pub const fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Contact numbers; never empty once validated.
    #[must_use]
    pub fn phone_numbers(&self) -> &[String] {
        &self.phone_numbers
    }

    /// Postal addresses, preserving the `null` / `[]` distinction.
    #[must_use]
    pub fn addresses(&self) -> Option<&[Address]> {
        self.addresses.as_deref()
    }

    /// Login credentials, if supplied.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Replace the stored address list.
    pub fn set_addresses(&mut self, addresses: Vec<Address>) {
        self.addresses = Some(addresses);
    }
}

/// Registered user.
///
/// ## Invariants
/// - `id` was assigned by the repository.
/// - `profile` passed the registration rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    #[serde(flatten)]
    profile: UserProfile,
}

impl User {
    /// Build a stored user from its identifier and validated profile.
    #[must_use]
    pub const fn new(id: UserId, profile: UserProfile) -> Self {
        Self { id, profile }
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Validated user fields.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Mutable access for adapters replacing part of the profile.
    pub const fn profile_mut(&mut self) -> &mut UserProfile {
        &mut self.profile
    }
}
