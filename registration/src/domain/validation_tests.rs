//! Rule-level coverage for the registration constraints.

use super::*;
use crate::domain::Credentials;
use chrono::Days;
use rstest::{fixture, rstest};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn today() -> NaiveDate {
    date(2024, 3, 15)
}

fn create() -> RuleContext {
    RuleContext::new(Operation::Create, today())
}

fn well_formed_address() -> Address {
    Address {
        street1: Some("37 rue Jean Moulin".to_owned()),
        street2: None,
        postal_code: Some("33140".to_owned()),
        city: Some("Villenave d'Ornon".to_owned()),
    }
}

#[fixture]
fn draft() -> UserDraft {
    UserDraft {
        id: None,
        first_name: Some("Frédéric".to_owned()),
        last_name: Some("Camblor".to_owned()),
        birth_date: Some(date(1983, 6, 29)),
        phone_numbers: Some(vec!["0123456789".to_owned()]),
        addresses: Some(Vec::new()),
        credentials: Some(Credentials {
            login: Some("foo@bar.com".to_owned()),
            password: Some("bar".to_owned()),
        }),
    }
}

fn codes_for(violations: &Violations, field: &str) -> Vec<ViolationCode> {
    violations
        .iter()
        .filter(|violation| violation.field() == field)
        .map(Violation::code)
        .collect()
}

#[rstest]
fn well_formed_draft_is_accepted(draft: UserDraft) {
    assert_eq!(user_rules().validate(&draft, &create()), Ok(()));
}

#[rstest]
fn null_addresses_are_accepted(mut draft: UserDraft) {
    draft.addresses = None;
    assert!(user_rules().collect(&draft, &create()).is_empty());
}

#[rstest]
#[case(None, ViolationCode::Required)]
#[case(Some("   "), ViolationCode::Blank)]
fn first_name_must_be_present(
    mut draft: UserDraft,
    #[case] first_name: Option<&str>,
    #[case] expected: ViolationCode,
) {
    draft.first_name = first_name.map(str::to_owned);
    let violations = user_rules().collect(&draft, &create());
    assert_eq!(codes_for(&violations, "firstName"), [expected]);
}

#[rstest]
#[case(None, ViolationCode::Required)]
#[case(Some(Vec::new()), ViolationCode::Empty)]
#[case(Some(vec![String::new(), " ".to_owned()]), ViolationCode::Empty)]
fn phone_numbers_must_have_an_entry(
    mut draft: UserDraft,
    #[case] phone_numbers: Option<Vec<String>>,
    #[case] expected: ViolationCode,
) {
    draft.phone_numbers = phone_numbers;
    let violations = user_rules().collect(&draft, &create());
    assert_eq!(codes_for(&violations, "phoneNumbers"), [expected]);
}

#[rstest]
fn missing_birth_date_is_reported_once(mut draft: UserDraft) {
    draft.birth_date = None;
    let violations = user_rules().collect(&draft, &create());
    assert_eq!(codes_for(&violations, "birthDate"), [ViolationCode::Required]);
}

#[rstest]
fn future_birth_date_is_not_in_past_and_underage(mut draft: UserDraft) {
    draft.birth_date = today().checked_add_days(Days::new(1));
    let violations = user_rules().collect(&draft, &create());
    assert_eq!(
        codes_for(&violations, "birthDate"),
        [ViolationCode::NotInPast, ViolationCode::Underage]
    );
}

#[rstest]
#[case(date(2006, 3, 15), true)]
#[case(date(2006, 3, 13), true)]
#[case(date(2006, 3, 16), false)]
#[case(date(2007, 3, 15), false)]
fn adult_boundary_is_eighteen_calendar_years(
    mut draft: UserDraft,
    #[case] birth_date: NaiveDate,
    #[case] accepted: bool,
) {
    draft.birth_date = Some(birth_date);
    let violations = user_rules().collect(&draft, &create());
    assert_eq!(violations.is_empty(), accepted, "{violations:?}");
}

#[rstest]
fn leap_day_birthday_comes_of_age_on_the_last_day_of_february(mut draft: UserDraft) {
    draft.birth_date = Some(date(2004, 2, 29));
    let eve = RuleContext::new(Operation::Create, date(2022, 2, 27));
    let birthday = RuleContext::new(Operation::Create, date(2022, 2, 28));

    assert!(!user_rules().collect(&draft, &eve).is_empty());
    assert!(user_rules().collect(&draft, &birthday).is_empty());
}

#[rstest]
#[case(None, true)]
#[case(Some("A long street 2"), true)]
#[case(Some("abcde"), true)]
#[case(Some("aaa"), false)]
fn street2_is_null_or_at_least_five_chars(
    mut draft: UserDraft,
    #[case] street2: Option<&str>,
    #[case] accepted: bool,
) {
    let mut address = well_formed_address();
    address.street2 = street2.map(str::to_owned);
    draft.addresses = Some(vec![address]);

    let violations = user_rules().collect(&draft, &create());
    assert_eq!(violations.is_empty(), accepted);
    if !accepted {
        assert_eq!(
            codes_for(&violations, "addresses[0].street2"),
            [ViolationCode::TooShort]
        );
    }
}

#[rstest]
fn empty_address_reports_every_required_field(mut draft: UserDraft) {
    draft.addresses = Some(vec![well_formed_address(), Address::default()]);
    let violations = user_rules().collect(&draft, &create());
    let fields: Vec<_> = violations.iter().map(Violation::field).collect();
    assert_eq!(
        fields,
        [
            "addresses[1].street1",
            "addresses[1].postalCode",
            "addresses[1].city"
        ]
    );
}

#[rstest]
#[case(Operation::Create, Some(1), Some(ViolationCode::MustBeAbsent))]
#[case(Operation::Create, Some(0), Some(ViolationCode::MustBeAbsent))]
#[case(Operation::Create, None, None)]
#[case(Operation::Update, None, Some(ViolationCode::Required))]
#[case(Operation::Update, Some(1), None)]
fn identifier_depends_on_operation(
    mut draft: UserDraft,
    #[case] operation: Operation,
    #[case] id: Option<i64>,
    #[case] expected: Option<ViolationCode>,
) {
    draft.id = id;
    let violations = user_rules().collect(&draft, &RuleContext::new(operation, today()));
    assert_eq!(codes_for(&violations, "id"), expected.into_iter().collect::<Vec<_>>());
}

#[rstest]
fn every_rule_is_evaluated() {
    let violations = user_rules().collect(&UserDraft::default(), &create());
    let fields: Vec<_> = violations.iter().map(Violation::field).collect();
    assert_eq!(fields, ["firstName", "birthDate", "phoneNumbers"]);
}

#[rstest]
fn batch_rules_index_each_element() {
    let batch = vec![Address::default(), well_formed_address()];
    let violations = address_batch_rules().collect(&batch, &create());
    assert_eq!(violations.len(), 3);
    assert!(violations
        .iter()
        .all(|violation| violation.field().starts_with("addresses[0].")));
}

#[rstest]
fn violations_become_validation_failed_errors(mut draft: UserDraft) {
    draft.first_name = None;
    let violations = user_rules().collect(&draft, &create());
    let error = Error::from(violations);

    assert_eq!(error.code(), crate::domain::ErrorCode::ValidationFailed);
    let details = error.details().expect("details attached");
    assert_eq!(
        details.pointer("/violations/0/field").and_then(Value::as_str),
        Some("firstName")
    );
    assert_eq!(
        details.pointer("/violations/0/code").and_then(Value::as_str),
        Some("required")
    );
}
