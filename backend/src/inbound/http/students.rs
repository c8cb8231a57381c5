//! Student handlers.
//!
//! ```text
//! GET    /api/classes/{id}/students
//! POST   /api/classes/{id}/students  {"name":"Lin","age":12}
//! PUT    /api/students/{id}          {"name":"Lin","age":"13"}
//! DELETE /api/students/{id}
//! ```
//!
//! Students are reachable only through a class the caller owns.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{ClassId, Student, StudentId, StudentInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::session::SessionUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{IdPath, JsonBody};
use crate::inbound::http::validation::age_input;

/// Body for adding or replacing a student.
///
/// `age` accepts an integer or a string holding one.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct StudentRequest {
    #[schema(example = "Lin")]
    pub name: Option<String>,
    #[schema(value_type = Option<Object>, example = 12)]
    pub age: Option<Value>,
}

impl From<StudentRequest> for StudentInput {
    fn from(request: StudentRequest) -> Self {
        Self {
            name: request.name,
            age: age_input(request.age),
        }
    }
}

/// Student as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct StudentResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Lin")]
    pub name: String,
    #[schema(example = 12)]
    pub age: i32,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id().get(),
            name: student.name().as_str().to_owned(),
            age: student.age().get(),
        }
    }
}

/// List the students of one of the caller's classes.
#[utoipa::path(
    get,
    path = "/api/classes/{id}/students",
    params(("id" = i32, Path, description = "Class identifier")),
    responses(
        (status = 200, description = "Students in the class", body = [StudentResponse]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such class for this user", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/classes/{id}/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
    user: SessionUser,
    path: IdPath,
) -> ApiResult<web::Json<Vec<StudentResponse>>> {
    let students = state
        .students_query
        .list_students(user.id(), ClassId::new(path?.into_inner()))
        .await?;
    Ok(web::Json(
        students.into_iter().map(StudentResponse::from).collect(),
    ))
}

/// Add a student to one of the caller's classes.
#[utoipa::path(
    post,
    path = "/api/classes/{id}/students",
    params(("id" = i32, Path, description = "Class identifier")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student added", body = StudentResponse),
        (status = 400, description = "Missing fields or non-numeric age", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such class for this user", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/classes/{id}/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    user: SessionUser,
    path: IdPath,
    payload: JsonBody<StudentRequest>,
) -> ApiResult<web::Json<StudentResponse>> {
    let class_id = ClassId::new(path?.into_inner());
    let request = match payload {
        Ok(body) => body.into_inner(),
        Err(rejected) => {
            state.classes_query.find_class(user.id(), class_id).await?;
            return Err(rejected.into());
        }
    };
    let student = state
        .students
        .add_student(user.id(), class_id, request.into())
        .await?;
    Ok(web::Json(student.into()))
}

/// Replace the name and age of a student the caller can reach.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student identifier")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Missing fields or non-numeric age", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such student for this user", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    user: SessionUser,
    path: IdPath,
    payload: JsonBody<StudentRequest>,
) -> ApiResult<web::Json<StudentResponse>> {
    let id = StudentId::new(path?.into_inner());
    let request = match payload {
        Ok(body) => body.into_inner(),
        Err(rejected) => {
            state.students_query.find_student(user.id(), id).await?;
            return Err(rejected.into());
        }
    };
    let student = state
        .students
        .update_student(user.id(), id, request.into())
        .await?;
    Ok(web::Json(student.into()))
}

/// Remove a student the caller can reach.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such student for this user", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    user: SessionUser,
    path: IdPath,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .students
        .delete_student(user.id(), StudentId::new(path?.into_inner()))
        .await?;
    Ok(web::Json(MessageResponse::new("deleted")))
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
