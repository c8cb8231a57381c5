//! Account handlers: registration and the session lifecycle.
//!
//! ```text
//! POST /api/register {"username":"ada","password":"secret"}
//! POST /api/login    {"username":"ada","password":"secret"}
//! POST /api/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::account_service::INVALID_CREDENTIALS;
use crate::domain::{Credentials, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Credentials body shared by registration and login.
///
/// Both fields are optional at the wire level so a missing field yields the
/// API's own error message instead of a deserialisation failure.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CredentialsRequest {
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

impl CredentialsRequest {
    fn parse(&self) -> Result<Credentials, crate::domain::CredentialsValidationError> {
        Credentials::try_from_parts(self.username.as_deref(), self.password.as_deref())
    }
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing fields or username taken", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = payload
        .parse()
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    state.registration.register(&credentials).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("registered")))
}

/// Authenticate and establish a session.
///
/// Malformed credentials are rejected with the same error as a wrong
/// password.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (
            status = 200,
            description = "Logged in",
            body = MessageResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let credentials = payload
        .parse()
        .map_err(|_| Error::unauthorized(INVALID_CREDENTIALS))?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.sign_in(user_id)?;
    Ok(web::Json(MessageResponse::new("logged in")))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "No active session", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = session.require_user_id()?;
    session.sign_out();
    info!(%user_id, "user logged out");
    Ok(web::Json(MessageResponse::new("logged out")))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{json_body, memory_state, sign_up, test_app};

    #[actix_web::test]
    async fn register_creates_exactly_one_user() {
        let (state, store) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(json!({"username": "ada", "password": "pw"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(json_body(res).await, json!({"message": "registered"}));
        assert_eq!(store.user_count(), 1);
    }

    #[actix_web::test]
    async fn duplicate_registration_is_a_bad_request() {
        let (state, store) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let body = json!({"username": "ada", "password": "pw"});

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(&body)
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(&body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await["error"], "username already exists");
        assert_eq!(store.user_count(), 1);
    }

    #[rstest]
    #[case(json!({"username": "ada"}))]
    #[case(json!({"password": "pw"}))]
    #[case(json!({"username": null, "password": "pw"}))]
    #[case(json!({"username": "   ", "password": "pw"}))]
    #[case(json!({"username": "ada", "password": ""}))]
    #[actix_web::test]
    async fn register_requires_both_fields(#[case] body: Value) {
        let (state, store) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(res).await["error"],
            "username and password are required"
        );
        assert_eq!(store.user_count(), 0);
    }

    #[actix_web::test]
    async fn malformed_json_is_a_bad_request() {
        let (state, _) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await["error"], "invalid JSON body");
    }

    #[actix_web::test]
    async fn login_sets_a_session_cookie() {
        let (state, _) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let cookie = sign_up(&app, "ada").await;

        assert!(!cookie.value().is_empty());
    }

    #[rstest]
    #[case(json!({"username": "ada", "password": "wrong"}))]
    #[case(json!({"username": "grace", "password": "hunter2"}))]
    #[case(json!({"username": "", "password": ""}))]
    #[actix_web::test]
    async fn failed_logins_share_one_error_shape(#[case] body: Value) {
        let (state, _) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        sign_up(&app, "ada").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/login")
                .set_json(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().next().is_none());
        let body = json_body(res).await;
        assert_eq!(body["error"], "invalid username or password");
        assert_eq!(body["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn logout_requires_a_session() {
        let (state, _) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/api/logout").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(res).await["error"], "login required");
    }

    #[actix_web::test]
    async fn logout_ends_the_session() {
        let (state, _) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = sign_up(&app, "ada").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cleared = crate::inbound::http::test_utils::session_cookie(&res);
        assert_eq!(json_body(res).await, json!({"message": "logged out"}));

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/classes")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
