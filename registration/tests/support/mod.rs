//! Shared helpers for the registration HTTP contract tests.
//!
//! Integration tests compile as separate crates, so the in-process app
//! builder and the payload builders live here instead of being copied into
//! every suite.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{Days, Months, NaiveDate};
use serde_json::{Value, json};

use registration::Trace;
use registration::domain::{AddressBatchPolicy, RegistrationService, TRACE_ID_HEADER};
use registration::inbound::http::configure_users;
use registration::inbound::http::state::HttpState;
use registration::outbound::memory::InMemoryUserRepository;
use registration::test_support::SettableClock;

/// Evaluation date pinned for every contract test.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
}

/// `today` minus whole years, then minus `days`.
pub fn years_and_days_ago(years: u32, days: u64) -> NaiveDate {
    today()
        .checked_sub_months(Months::new(years * 12))
        .and_then(|date| date.checked_sub_days(Days::new(days)))
        .expect("date in range")
}

/// Build the production route table over a fresh in-memory repository.
pub fn test_app(
    policy: AddressBatchPolicy,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let service = RegistrationService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(SettableClock::at_noon(today())),
    )
    .with_address_batches(policy);
    App::new()
        .app_data(web::Data::new(HttpState::new(Arc::new(service))))
        .wrap(Trace)
        .configure(configure_users)
}

/// A payload every rule accepts.
pub fn user_json() -> Value {
    json!({
        "firstName": "Frédéric",
        "lastName": "Camblor",
        "birthDate": "1983-06-29",
        "phoneNumbers": ["0123456789"],
        "addresses": [],
        "credentials": { "login": "foo@bar.com", "password": "bar" }
    })
}

/// A complete address with the given second street line.
pub fn address_json(street2: Option<&str>) -> Value {
    json!({
        "street1": "37 rue Jean Moulin",
        "street2": street2,
        "postalCode": "33140",
        "city": "Villenave d'Ornon"
    })
}

/// Captured response parts.
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

impl Reply {
    /// Fields named in `details.violations`, in evaluation order.
    pub fn violated_fields(&self) -> Vec<String> {
        self.body
            .pointer("/details/violations")
            .and_then(Value::as_array)
            .map(|violations| {
                violations
                    .iter()
                    .filter_map(|violation| violation.get("field").and_then(Value::as_str))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Send `request` and decode the JSON body when there is one.
pub async fn send<S>(app: &S, request: test::TestRequest) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    Reply {
        status,
        trace_id,
        body,
    }
}

/// `POST /users` with `payload`.
pub fn create(payload: &Value) -> test::TestRequest {
    test::TestRequest::post().uri("/users").set_json(payload)
}

/// `PUT /users/registered` with `payload`.
pub fn update(payload: &Value) -> test::TestRequest {
    test::TestRequest::put()
        .uri("/users/registered")
        .set_json(payload)
}
