//! PostgreSQL-backed `StudentRepository`.
//!
//! Reads join `students` to `classes` and filter on `classes.user_id`.
//! Mutations restrict `students.class_id` to the owner's classes with a
//! subquery so the ownership check and the write are one statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RosterPersistenceError, StudentRepository};
use crate::domain::{ClassId, Student, StudentDraft, StudentId, UserId};

use super::diesel_error_mapping::{roster_diesel_error, roster_pool_error};
use super::models::{NewStudentRow, StudentFields, StudentRow};
use super::pool::DbPool;
use super::schema::{classes, students};

/// Diesel-backed implementation of the [`StudentRepository`] port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_student(row: StudentRow) -> Result<Student, RosterPersistenceError> {
    Student::try_from(row).map_err(RosterPersistenceError::query)
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list_in_class(
        &self,
        owner: UserId,
        class_id: ClassId,
    ) -> Result<Vec<Student>, RosterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(roster_pool_error)?;

        let rows: Vec<StudentRow> = students::table
            .inner_join(classes::table)
            .filter(students::class_id.eq(class_id.get()))
            .filter(classes::user_id.eq(owner.get()))
            .order(students::id.asc())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(roster_diesel_error)?;

        rows.into_iter().map(into_student).collect()
    }

    async fn create(
        &self,
        class_id: ClassId,
        draft: &StudentDraft,
    ) -> Result<Student, RosterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(roster_pool_error)?;
        let row = NewStudentRow {
            class_id: class_id.get(),
            fields: StudentFields::from(draft),
        };

        let inserted: StudentRow = diesel::insert_into(students::table)
            .values(&row)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(roster_diesel_error)?;

        into_student(inserted)
    }

    async fn find_owned(
        &self,
        owner: UserId,
        id: StudentId,
    ) -> Result<Option<Student>, RosterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(roster_pool_error)?;

        let row: Option<StudentRow> = students::table
            .inner_join(classes::table)
            .filter(students::id.eq(id.get()))
            .filter(classes::user_id.eq(owner.get()))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(roster_diesel_error)?;

        row.map(into_student).transpose()
    }

    async fn update_owned(
        &self,
        owner: UserId,
        id: StudentId,
        draft: &StudentDraft,
    ) -> Result<Option<Student>, RosterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(roster_pool_error)?;

        let owned_classes = classes::table
            .filter(classes::user_id.eq(owner.get()))
            .select(classes::id);
        let target = students::table
            .filter(students::id.eq(id.get()))
            .filter(students::class_id.eq_any(owned_classes));
        let row: Option<StudentRow> = diesel::update(target)
            .set(StudentFields::from(draft))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(roster_diesel_error)?;

        row.map(into_student).transpose()
    }

    async fn delete_owned(
        &self,
        owner: UserId,
        id: StudentId,
    ) -> Result<bool, RosterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(roster_pool_error)?;

        let owned_classes = classes::table
            .filter(classes::user_id.eq(owner.get()))
            .select(classes::id);
        let target = students::table
            .filter(students::id.eq(id.get()))
            .filter(students::class_id.eq_any(owned_classes));
        let affected = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(roster_diesel_error)?;

        Ok(affected > 0)
    }
}
