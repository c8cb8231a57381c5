//! Shared harness for the HTTP integration suites.

use std::sync::Arc;

use actix_http::Request;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test as actix_test, web};
use serde_json::{Value, json};

use roster::domain::ports::{PasswordHashError, PasswordHasher};
use roster::domain::{AccountService, PasswordHash, RosterService};
use roster::inbound::http::health::HealthState;
use roster::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use roster::inbound::http::state::HttpState;
use roster::outbound::memory::InMemoryRosterStore;
use roster::server::{AppDependencies, build_app};

pub const PASSWORD: &str = "correct horse";

/// Cheap reversible hasher; Argon2 has its own unit coverage.
struct PlaintextHasher;

impl PasswordHasher for PlaintextHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("plain${password}")))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        Ok(hash.as_str().strip_prefix("plain$") == Some(password))
    }
}

/// Application under test plus the store it writes to.
pub struct Harness<S> {
    pub app: S,
    pub store: Arc<InMemoryRosterStore>,
}

pub async fn harness()
-> Harness<impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>> {
    let store = Arc::new(InMemoryRosterStore::new());
    let http_state = HttpState::from_services(
        AccountService::new(store.clone(), Arc::new(PlaintextHasher)),
        RosterService::new(store.clone(), store.clone()),
    );
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    let app = actix_test::init_service(build_app(AppDependencies {
        health_state,
        http_state: web::Data::new(http_state),
        session: SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        },
    }))
    .await;
    Harness { app, store }
}

pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

pub async fn send(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    req: actix_test::TestRequest,
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse {
    let req = match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    };
    actix_test::call_service(app, req.to_request()).await
}

pub async fn body(res: ServiceResponse) -> Value {
    let bytes = actix_test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Register and log in, returning the session cookie.
pub async fn sign_up(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
) -> Cookie<'static> {
    let credentials = json!({ "username": username, "password": PASSWORD });
    let res = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/register")
            .set_json(&credentials),
        None,
    )
    .await;
    assert_eq!(res.status().as_u16(), 201, "register {username}");

    let res = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(&credentials),
        None,
    )
    .await;
    assert_eq!(res.status().as_u16(), 200, "login {username}");
    session_cookie(&res).expect("login sets a session cookie")
}

/// Create a class and return its id.
pub async fn create_class(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    name: &str,
) -> i64 {
    let res = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/classes")
            .set_json(json!({ "name": name })),
        Some(cookie),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200, "create class {name}");
    body(res).await["id"].as_i64().expect("class id")
}
