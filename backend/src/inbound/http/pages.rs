//! Page shells for the browser client.
//!
//! The HTML is static and embedded at compile time; all data is fetched by
//! the client through the JSON API.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get};

use crate::inbound::http::session::SessionContext;

const LOGIN_PAGE: &str = include_str!("../../../templates/login.html");
const REGISTER_PAGE: &str = include_str!("../../../templates/register.html");
const DASHBOARD_PAGE: &str = include_str!("../../../templates/dashboard.html");

fn html(page: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page)
}

fn redirect_to_login(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((header::LOCATION, "/login"))
        .finish()
}

#[get("/")]
pub async fn index() -> HttpResponse {
    redirect_to_login(StatusCode::FOUND)
}

#[get("/login")]
pub async fn login_page() -> HttpResponse {
    html(LOGIN_PAGE)
}

#[get("/register")]
pub async fn register_page() -> HttpResponse {
    html(REGISTER_PAGE)
}

/// Dashboard shell; visitors without a session are sent to the login page.
#[get("/dashboard")]
pub async fn dashboard_page(session: SessionContext) -> HttpResponse {
    if session.user_id().is_some() {
        html(DASHBOARD_PAGE)
    } else {
        redirect_to_login(StatusCode::SEE_OTHER)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test as actix_test;
    use rstest::rstest;

    use crate::inbound::http::test_utils::{memory_state, sign_up, test_app};

    #[rstest]
    #[case("/", StatusCode::FOUND)]
    #[case("/dashboard", StatusCode::SEE_OTHER)]
    #[actix_web::test]
    async fn anonymous_visitors_are_sent_to_login(#[case] uri: &str, #[case] status: StatusCode) {
        let (state, _) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(res.status(), status);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/login")
        );
    }

    #[rstest]
    #[case("/login", "Log in")]
    #[case("/register", "Create an account")]
    #[actix_web::test]
    async fn public_pages_render(#[case] uri: &str, #[case] heading: &str) {
        let (state, _) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("text/html; charset=utf-8")
        );
        let body = actix_test::read_body(res).await;
        assert!(String::from_utf8_lossy(&body).contains(heading));
    }

    #[actix_web::test]
    async fn dashboard_renders_for_signed_in_users() {
        let (state, _) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = sign_up(&app, "ada").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = actix_test::read_body(res).await;
        assert!(String::from_utf8_lossy(&body).contains("My classes"));
    }
}
