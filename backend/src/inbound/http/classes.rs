//! Class handlers.
//!
//! ```text
//! GET    /api/classes
//! POST   /api/classes        {"name":"Year 7 Maths"}
//! PUT    /api/classes/{id}   {"name":"Year 8 Maths"}
//! DELETE /api/classes/{id}
//! ```
//!
//! Every handler resolves the caller from the session first; classes owned
//! by someone else are indistinguishable from classes that do not exist.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ClassId, Classroom};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::session::SessionUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{IdPath, JsonBody};

/// Body for creating or renaming a class.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ClassRequest {
    #[schema(example = "Year 7 Maths")]
    pub name: Option<String>,
}

/// Class as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ClassResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Year 7 Maths")]
    pub name: String,
}

impl From<Classroom> for ClassResponse {
    fn from(class: Classroom) -> Self {
        Self {
            id: class.id().get(),
            name: class.name().as_str().to_owned(),
        }
    }
}

/// List the caller's classes in ascending id order.
#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "Classes owned by the caller", body = [ClassResponse]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["classes"],
    operation_id = "listClasses"
)]
#[get("/classes")]
pub async fn list_classes(
    state: web::Data<HttpState>,
    user: SessionUser,
) -> ApiResult<web::Json<Vec<ClassResponse>>> {
    let classes = state.classes_query.list_classes(user.id()).await?;
    Ok(web::Json(classes.into_iter().map(ClassResponse::from).collect()))
}

/// Create a class owned by the caller.
#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = ClassRequest,
    responses(
        (status = 200, description = "Class created", body = ClassResponse),
        (status = 400, description = "Name missing or blank", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["classes"],
    operation_id = "createClass"
)]
#[post("/classes")]
pub async fn create_class(
    state: web::Data<HttpState>,
    user: SessionUser,
    payload: JsonBody<ClassRequest>,
) -> ApiResult<web::Json<ClassResponse>> {
    let ClassRequest { name } = payload?.into_inner();
    let class = state.classes.create_class(user.id(), name).await?;
    Ok(web::Json(class.into()))
}

/// Rename one of the caller's classes.
#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    params(("id" = i32, Path, description = "Class identifier")),
    request_body = ClassRequest,
    responses(
        (status = 200, description = "Class renamed", body = ClassResponse),
        (status = 400, description = "Name missing or blank", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such class for this user", body = ErrorSchema)
    ),
    tags = ["classes"],
    operation_id = "updateClass"
)]
#[put("/classes/{id}")]
pub async fn update_class(
    state: web::Data<HttpState>,
    user: SessionUser,
    path: IdPath,
    payload: JsonBody<ClassRequest>,
) -> ApiResult<web::Json<ClassResponse>> {
    let id = ClassId::new(path?.into_inner());
    let ClassRequest { name } = match payload {
        Ok(body) => body.into_inner(),
        Err(rejected) => {
            state.classes_query.find_class(user.id(), id).await?;
            return Err(rejected.into());
        }
    };
    let class = state.classes.rename_class(user.id(), id, name).await?;
    Ok(web::Json(class.into()))
}

/// Delete one of the caller's classes together with its students.
#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    params(("id" = i32, Path, description = "Class identifier")),
    responses(
        (status = 200, description = "Class deleted", body = MessageResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such class for this user", body = ErrorSchema)
    ),
    tags = ["classes"],
    operation_id = "deleteClass"
)]
#[delete("/classes/{id}")]
pub async fn delete_class(
    state: web::Data<HttpState>,
    user: SessionUser,
    path: IdPath,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .classes
        .delete_class(user.id(), ClassId::new(path?.into_inner()))
        .await?;
    Ok(web::Json(MessageResponse::new("deleted")))
}
