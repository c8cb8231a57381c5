//! HTTP inbound adapter exposing the JSON API and the page shells.

pub mod accounts;
pub mod classes;
pub mod error;
pub mod health;
pub mod pages;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Numeric path id as extracted. Handlers surface a rejection only after the
/// caller has been authenticated.
pub(crate) type IdPath = Result<web::Path<i32>, actix_web::Error>;

/// JSON body as extracted. Handlers surface a rejection only after the
/// caller has been authenticated and, for existing resources, after the
/// ownership lookup.
pub(crate) type JsonBody<T> = Result<web::Json<T>, actix_web::Error>;

/// Register the JSON API under `/api` and the page routes at the root.
///
/// Handlers expect [`state::HttpState`] as app data and a session middleware
/// wrapping the app; health probes and API docs are wired separately.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(
            web::scope("/api")
                .service(accounts::register)
                .service(accounts::login)
                .service(accounts::logout)
                .service(classes::list_classes)
                .service(classes::create_class)
                .service(classes::update_class)
                .service(classes::delete_class)
                .service(students::list_students)
                .service(students::create_student)
                .service(students::update_student)
                .service(students::delete_student),
        )
        .service(pages::index)
        .service(pages::login_page)
        .service(pages::register_page)
        .service(pages::dashboard_page);
}
