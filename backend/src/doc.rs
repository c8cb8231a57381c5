//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every JSON endpoint plus the health probes, the
//! schema wrappers for domain errors, and the session cookie security
//! scheme. Swagger UI serves it in debug builds and `openapi-dump` prints it
//! for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::accounts::CredentialsRequest;
use crate::inbound::http::classes::{ClassRequest, ClassResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, MessageResponse};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::students::{StudentRequest, StudentResponse};

/// Adds the session cookie security scheme.
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Encrypted session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the roster API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "Roster API",
        description = "Session-authenticated management of classes and their students."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::classes::list_classes,
        crate::inbound::http::classes::create_class,
        crate::inbound::http::classes::update_class,
        crate::inbound::http::classes::delete_class,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MessageResponse,
        CredentialsRequest,
        ClassRequest,
        ClassResponse,
        StudentRequest,
        StudentResponse
    )),
    tags(
        (name = "accounts", description = "Registration and session lifecycle"),
        (name = "classes", description = "Classes owned by the signed-in user"),
        (name = "students", description = "Students within the user's classes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
