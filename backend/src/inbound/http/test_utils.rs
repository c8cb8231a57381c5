//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use super::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use super::state::HttpState;
use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{AccountService, PasswordHash, RosterService};
use crate::outbound::memory::InMemoryRosterStore;

/// Session middleware with a fresh key and the `Secure` flag off for plain
/// HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
    .middleware()
}

/// Extract the session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Reversible stand-in for Argon2 so handler tests stay fast.
pub struct PlaintextHasher;

impl PasswordHasher for PlaintextHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("plain${password}")))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        Ok(hash.as_str().strip_prefix("plain$") == Some(password))
    }
}

/// Handler state over a fresh in-memory store, returned alongside the store
/// so tests can inspect what was written.
pub fn memory_state() -> (HttpState, Arc<InMemoryRosterStore>) {
    let store = Arc::new(InMemoryRosterStore::new());
    let state = HttpState::from_services(
        AccountService::new(store.clone(), Arc::new(PlaintextHasher)),
        RosterService::new(store.clone(), store.clone()),
    );
    (state, store)
}

/// Full HTTP surface over `state` behind a test session middleware.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .configure(super::configure)
}

/// Register `username` with a fixed password, log in, and return the session
/// cookie.
pub async fn sign_up(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
) -> Cookie<'static> {
    let credentials = json!({ "username": username, "password": "hunter2" });
    let register = actix_test::TestRequest::post()
        .uri("/api/register")
        .set_json(&credentials)
        .to_request();
    let res = actix_test::call_service(app, register).await;
    assert!(res.status().is_success(), "registration failed: {}", res.status());

    let login = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(&credentials)
        .to_request();
    let res = actix_test::call_service(app, login).await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    session_cookie(&res)
}

/// Decode a JSON response body.
pub async fn json_body(res: ServiceResponse) -> Value {
    let bytes = actix_test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("JSON response body")
}
