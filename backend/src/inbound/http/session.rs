//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as signing a user in or out.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::error;

use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Message returned to callers without a usable session.
pub const LOGIN_REQUIRED: &str = "login required";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start a fresh session for `user_id`.
    ///
    /// The session is renewed first so a cookie issued before login never
    /// carries the authenticated identity.
    pub fn sign_in(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop every value in the session and expire the cookie.
    pub fn sign_out(&self) {
        self.0.purge();
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A value that does not decode as an id is logged and treated as absent.
    pub fn user_id(&self) -> Option<UserId> {
        match self.0.get::<i32>(USER_ID_KEY) {
            Ok(id) => id.map(UserId::new),
            Err(error) => {
                tracing::warn!("invalid user id in session cookie: {error}");
                None
            }
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()
            .ok_or_else(|| Error::unauthorized(LOGIN_REQUIRED))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// The signed-in user behind a request.
///
/// List this extractor before any `Path` or `Json` parameter: a request
/// without a live session fails with `401` before its path or body is
/// looked at. The id is confirmed against the account store, so a cookie
/// naming a deleted account is cleared and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser(UserId);

impl SessionUser {
    pub fn id(self) -> UserId {
        self.0
    }
}

impl FromRequest for SessionUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let claimed = session.require_user_id()?;
            let Some(state) = state else {
                error!("HttpState missing from app data");
                return Err(Error::internal("handler state not configured").into());
            };
            match state.login.session_user(claimed).await? {
                Some(id) => Ok(Self(id)),
                None => {
                    session.sign_out();
                    Err(Error::unauthorized(LOGIN_REQUIRED).into())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::{
        json_body, memory_state, session_cookie, sign_up, test_session_middleware,
    };

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/sign-in",
                web::get().to(|session: SessionContext| async move {
                    session.sign_in(UserId::new(42))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/whoami",
                web::get().to(|session: SessionContext| async move {
                    let id = session.require_user_id()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                }),
            )
            .route(
                "/sign-out",
                web::get().to(|session: SessionContext| async move {
                    session.sign_out();
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/tamper",
                web::get().to(|session: Session| async move {
                    session
                        .insert(USER_ID_KEY, "not-a-number")
                        .expect("insert tampered id");
                    HttpResponse::Ok()
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = test::init_service(session_test_app()).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/sign-in").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "42");
    }

    #[actix_web::test]
    async fn missing_user_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_user_id_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/tamper").to_request()).await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn sign_out_expires_the_cookie() {
        let app = test::init_service(session_test_app()).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/sign-in").to_request())
            .await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/sign-out").cookie(cookie).to_request(),
        )
        .await;
        let removal = session_cookie(&res);
        assert_eq!(removal.value(), "");

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(removal).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    fn session_user_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .configure(crate::inbound::http::configure)
            .route(
                "/forge/{id}",
                web::get().to(|session: SessionContext, path: web::Path<i32>| async move {
                    session.sign_in(UserId::new(path.into_inner()))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
    }

    #[actix_web::test]
    async fn session_user_accepts_a_registered_account() {
        let (state, _) = memory_state();
        let app = test::init_service(session_user_app(state)).await;
        let cookie = sign_up(&app, "ada").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/classes")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn session_for_a_vanished_account_is_rejected_and_cleared() {
        let (state, store) = memory_state();
        let app = test::init_service(session_user_app(state)).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/forge/42").to_request()).await;
        let stale = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/classes")
                .cookie(stale)
                .set_json(serde_json::json!({"name": "Maths"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(session_cookie(&res).value(), "");
        assert_eq!(json_body(res).await["error"], LOGIN_REQUIRED);
        assert_eq!(store.user_count(), 0);
        assert_eq!(store.class_count(), 0);
    }
}
