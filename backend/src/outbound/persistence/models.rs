//! Internal Diesel row structs.
//!
//! These never leave the persistence module. Conversions back into domain
//! types re-run domain validation so a hand-edited row cannot smuggle an
//! invalid value past the type invariants.

use diesel::prelude::*;

use crate::domain::{
    Age, ClassId, ClassName, Classroom, PasswordHash, Student, StudentDraft, StudentId,
    StudentName, User, UserId, Username,
};

use super::schema::{classes, students, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(&row.username)
            .map_err(|err| format!("stored user {} is invalid: {err}", row.id))?;
        Ok(User::new(
            UserId::new(row.id),
            username,
            PasswordHash::new(row.password_hash),
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = classes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClassRow {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = classes)]
pub(crate) struct NewClassRow<'a> {
    pub user_id: i32,
    pub name: &'a str,
}

impl TryFrom<ClassRow> for Classroom {
    type Error = String;

    fn try_from(row: ClassRow) -> Result<Self, Self::Error> {
        let name = ClassName::new(&row.name)
            .map_err(|err| format!("stored class {} is invalid: {err}", row.id))?;
        Ok(Classroom::new(
            ClassId::new(row.id),
            UserId::new(row.user_id),
            name,
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i32,
    pub class_id: i32,
    pub name: String,
    pub age: i32,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentFields<'a> {
    pub name: &'a str,
    pub age: i32,
}

impl<'a> From<&'a StudentDraft> for StudentFields<'a> {
    fn from(draft: &'a StudentDraft) -> Self {
        Self {
            name: draft.name().as_str(),
            age: draft.age().get(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub class_id: i32,
    #[diesel(embed)]
    pub fields: StudentFields<'a>,
}

impl TryFrom<StudentRow> for Student {
    type Error = String;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let name = StudentName::new(&row.name)
            .map_err(|err| format!("stored student {} is invalid: {err}", row.id))?;
        Ok(Student::new(
            StudentId::new(row.id),
            ClassId::new(row.class_id),
            StudentDraft::new(name, Age::new(row.age)),
        ))
    }
}
