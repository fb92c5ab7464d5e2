//! Registration rule set.
//!
//! Field constraints are plain values: each [`Rule`] inspects a subject and
//! pushes zero or more [`Violation`]s, and a [`RuleSet`] evaluates every rule
//! in order without short-circuiting. Nested entities are validated by
//! lifting a rule set over each element of a collection with [`each`].
//!
//! ```text
//! firstName     required, not blank
//! birthDate     required, in the past, at least 18 years ago
//! phoneNumbers  required, not empty, at least one non-blank entry
//! addresses     optional; every element checked with the address rules
//! id            absent on create, present on update
//! ```

use chrono::{Months, NaiveDate};
use serde_json::{Value, json};

use super::{Address, Error, UserDraft};

/// Minimum age, in whole years, accepted at registration.
pub const ADULT_AGE_YEARS: u32 = 18;
/// Minimum length of `street2` when it is supplied.
pub const STREET2_MIN_CHARS: usize = 5;

/// Mode the payload is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// A new user; the identifier must be absent.
    Create,
    /// An existing user; the identifier must be present.
    Update,
}

/// Inputs shared by every rule during one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    operation: Operation,
    today: NaiveDate,
}

impl RuleContext {
    /// Build a context evaluating `operation` as of `today`.
    #[must_use]
    pub const fn new(operation: Operation, today: NaiveDate) -> Self {
        Self { operation, today }
    }

    /// Mode being validated.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Evaluation date used by the birth date rules.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Machine-readable violation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationCode {
    /// The field is missing or `null`.
    Required,
    /// The field is present but only whitespace.
    Blank,
    /// A date is today or later.
    NotInPast,
    /// The birth date is less than [`ADULT_AGE_YEARS`] ago.
    Underage,
    /// A collection has no usable entries.
    Empty,
    /// A string is shorter than its minimum length.
    TooShort,
    /// The field must not be supplied for this operation.
    MustBeAbsent,
    /// The identifier does not refer to a registered user.
    UnknownUser,
}

impl ViolationCode {
    /// Stable wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Blank => "blank",
            Self::NotInPast => "not_in_past",
            Self::Underage => "underage",
            Self::Empty => "empty",
            Self::TooShort => "too_short",
            Self::MustBeAbsent => "must_be_absent",
            Self::UnknownUser => "unknown_user",
        }
    }
}

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    field: String,
    code: ViolationCode,
    message: String,
}

impl Violation {
    /// Build a violation for `field`.
    pub fn new(field: impl Into<String>, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    /// Shorthand for a missing required field.
    pub fn required(field: impl Into<String>) -> Self {
        let name: String = field.into();
        let message = format!("missing required field: {name}");
        Self::new(name, ViolationCode::Required, message)
    }

    /// Dotted path of the offending field, e.g. `addresses[0].street2`.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Failure category.
    #[must_use]
    pub const fn code(&self) -> ViolationCode {
        self.code
    }

    /// Human-readable explanation.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    fn nested_under(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }

    fn to_json(&self) -> Value {
        json!({
            "field": self.field,
            "code": self.code.as_str(),
            "message": self.message,
        })
    }
}

/// Ordered collection of violations produced by one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Record a violation.
    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Append every violation from `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Whether no rule failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded violations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    /// Returns the collection itself when at least one rule failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<Violation> for Violations {
    fn from(value: Violation) -> Self {
        Self(vec![value])
    }
}

impl From<Violations> for Error {
    fn from(value: Violations) -> Self {
        let violations: Vec<Value> = value.iter().map(Violation::to_json).collect();
        Self::validation_failed("payload failed validation")
            .with_details(json!({ "violations": violations }))
    }
}

/// A single constraint over `T`.
pub trait Rule<T>: Send + Sync {
    /// Inspect `subject` and record any violations.
    fn check(&self, subject: &T, context: &RuleContext, violations: &mut Violations);
}

impl<T, F> Rule<T> for F
where
    F: Fn(&T, &RuleContext, &mut Violations) + Send + Sync,
{
    fn check(&self, subject: &T, context: &RuleContext, violations: &mut Violations) {
        self(subject, context, violations);
    }
}

/// Ordered list of rules evaluated together.
pub struct RuleSet<T> {
    rules: Vec<Box<dyn Rule<T>>>,
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> std::fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl<T: 'static> RuleSet<T> {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule, builder style.
    #[must_use]
    pub fn with(mut self, rule: impl Rule<T> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Evaluate every rule and collect the violations.
    pub fn collect(&self, subject: &T, context: &RuleContext) -> Violations {
        let mut violations = Violations::default();
        for rule in &self.rules {
            rule.check(subject, context, &mut violations);
        }
        violations
    }

    /// Evaluate every rule.
    ///
    /// # Errors
    /// Returns all violations when at least one rule failed.
    pub fn validate(&self, subject: &T, context: &RuleContext) -> Result<(), Violations> {
        self.collect(subject, context).into_result()
    }
}

/// Require an optional field to be present.
pub fn required<T, V: ?Sized>(field: &'static str, get: fn(&T) -> Option<&V>) -> impl Rule<T> {
    move |subject: &T, _context: &RuleContext, violations: &mut Violations| {
        if get(subject).is_none() {
            violations.push(Violation::required(field));
        }
    }
}

/// Require a string field to be present and not blank.
pub fn not_blank<T>(field: &'static str, get: fn(&T) -> Option<&str>) -> impl Rule<T> {
    move |subject: &T, _context: &RuleContext, violations: &mut Violations| match get(subject) {
        None => violations.push(Violation::required(field)),
        Some(value) if value.trim().is_empty() => violations.push(Violation::new(
            field,
            ViolationCode::Blank,
            format!("{field} must not be blank"),
        )),
        Some(_) => {}
    }
}

/// When the field is present, require at least `min` characters.
pub fn min_chars<T>(field: &'static str, min: usize, get: fn(&T) -> Option<&str>) -> impl Rule<T> {
    move |subject: &T, _context: &RuleContext, violations: &mut Violations| {
        if get(subject).is_some_and(|value| value.chars().count() < min) {
            violations.push(Violation::new(
                field,
                ViolationCode::TooShort,
                format!("{field} must be at least {min} characters"),
            ));
        }
    }
}

/// Require a list to be present with at least one non-blank entry.
pub fn non_empty_strings<T>(field: &'static str, get: fn(&T) -> Option<&[String]>) -> impl Rule<T> {
    move |subject: &T, _context: &RuleContext, violations: &mut Violations| match get(subject) {
        None => violations.push(Violation::required(field)),
        Some(values) if values.iter().all(|value| value.trim().is_empty()) => {
            violations.push(Violation::new(
                field,
                ViolationCode::Empty,
                format!("{field} must contain at least one entry"),
            ));
        }
        Some(_) => {}
    }
}

/// Require a date strictly before the evaluation date.
pub fn in_the_past<T>(field: &'static str, get: fn(&T) -> Option<NaiveDate>) -> impl Rule<T> {
    move |subject: &T, context: &RuleContext, violations: &mut Violations| {
        if get(subject).is_some_and(|date| date >= context.today()) {
            violations.push(Violation::new(
                field,
                ViolationCode::NotInPast,
                format!("{field} must be in the past"),
            ));
        }
    }
}

/// Require a birth date at least `years` before the evaluation date.
///
/// 29 February birthdays reach the age on 28 February in common years.
pub fn at_least_years_ago<T>(
    field: &'static str,
    years: u32,
    get: fn(&T) -> Option<NaiveDate>,
) -> impl Rule<T> {
    move |subject: &T, context: &RuleContext, violations: &mut Violations| {
        let Some(date) = get(subject) else {
            return;
        };
        let adult = date
            .checked_add_months(Months::new(years.saturating_mul(12)))
            .is_some_and(|coming_of_age| coming_of_age <= context.today());
        if !adult {
            violations.push(Violation::new(
                field,
                ViolationCode::Underage,
                format!("{field} must be at least {years} years ago"),
            ));
        }
    }
}

/// Validate every element of a collection field with `rules`.
///
/// Violation paths are qualified as `field[index].inner`.
pub fn each<T, E: 'static>(
    field: &'static str,
    get: fn(&T) -> Option<&[E]>,
    rules: RuleSet<E>,
) -> impl Rule<T> {
    move |subject: &T, context: &RuleContext, violations: &mut Violations| {
        let Some(items) = get(subject) else {
            return;
        };
        for (index, item) in items.iter().enumerate() {
            let prefix = format!("{field}[{index}]");
            for violation in rules.collect(item, context).0 {
                violations.push(violation.nested_under(&prefix));
            }
        }
    }
}

fn identifier_matches_operation(
    draft: &UserDraft,
    context: &RuleContext,
    violations: &mut Violations,
) {
    match (context.operation(), draft.id) {
        (Operation::Create, Some(_)) => violations.push(Violation::new(
            "id",
            ViolationCode::MustBeAbsent,
            "id must be absent when registering a new user",
        )),
        (Operation::Update, None) => violations.push(Violation::required("id")),
        _ => {}
    }
}

/// Constraints applied to a single address.
#[must_use]
pub fn address_rules() -> RuleSet<Address> {
    RuleSet::new()
        .with(required("street1", |address: &Address| {
            address.street1.as_deref()
        }))
        .with(min_chars("street2", STREET2_MIN_CHARS, |address: &Address| {
            address.street2.as_deref()
        }))
        .with(required("postalCode", |address: &Address| {
            address.postal_code.as_deref()
        }))
        .with(required("city", |address: &Address| address.city.as_deref()))
}

/// Constraints applied to a registration payload.
#[must_use]
pub fn user_rules() -> RuleSet<UserDraft> {
    RuleSet::new()
        .with(identifier_matches_operation)
        .with(not_blank("firstName", |draft: &UserDraft| {
            draft.first_name.as_deref()
        }))
        .with(required("birthDate", |draft: &UserDraft| {
            draft.birth_date.as_ref()
        }))
        .with(in_the_past("birthDate", |draft: &UserDraft| draft.birth_date))
        .with(at_least_years_ago(
            "birthDate",
            ADULT_AGE_YEARS,
            |draft: &UserDraft| draft.birth_date,
        ))
        .with(non_empty_strings("phoneNumbers", |draft: &UserDraft| {
            draft.phone_numbers.as_deref()
        }))
        .with(each("addresses", |draft: &UserDraft| draft.addresses.as_deref(), address_rules()))
}

/// Constraints applied to a bare address batch when strict mode is enabled.
#[must_use]
pub fn address_batch_rules() -> RuleSet<Vec<Address>> {
    RuleSet::new().with(each(
        "addresses",
        |batch: &Vec<Address>| Some(batch.as_slice()),
        address_rules(),
    ))
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
