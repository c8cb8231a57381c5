//! PostgreSQL-backed `ClassroomRepository`.
//!
//! Each method is a single statement whose `WHERE` clause pairs the class id
//! with `user_id`, so ownership is enforced by the database rather than by a
//! read-then-write sequence.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ClassroomRepository, RosterPersistenceError};
use crate::domain::{ClassId, ClassName, Classroom, UserId};

use super::diesel_error_mapping::{roster_diesel_error, roster_pool_error};
use super::models::{ClassRow, NewClassRow};
use super::pool::DbPool;
use super::schema::classes;

/// Diesel-backed implementation of the [`ClassroomRepository`] port.
#[derive(Clone)]
pub struct DieselClassroomRepository {
    pool: DbPool,
}

impl DieselClassroomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_classroom(row: ClassRow) -> Result<Classroom, RosterPersistenceError> {
    Classroom::try_from(row).map_err(RosterPersistenceError::query)
}

#[async_trait]
impl ClassroomRepository for DieselClassroomRepository {
    async fn list_owned(&self, owner: UserId) -> Result<Vec<Classroom>, RosterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(roster_pool_error)?;

        let rows: Vec<ClassRow> = classes::table
            .filter(classes::user_id.eq(owner.get()))
            .order(classes::id.asc())
            .select(ClassRow::as_select())
            .load(&mut conn)
            .await
            .map_err(roster_diesel_error)?;

        rows.into_iter().map(into_classroom).collect()
    }

    async fn create(
        &self,
        owner: UserId,
        name: &ClassName,
    ) -> Result<Classroom, RosterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(roster_pool_error)?;
        let row = NewClassRow {
            user_id: owner.get(),
            name: name.as_str(),
        };

        let inserted: ClassRow = diesel::insert_into(classes::table)
            .values(&row)
            .returning(ClassRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(roster_diesel_error)?;

        into_classroom(inserted)
    }

    async fn find_owned(
        &self,
        owner: UserId,
        id: ClassId,
    ) -> Result<Option<Classroom>, RosterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(roster_pool_error)?;

        let row: Option<ClassRow> = classes::table
            .filter(classes::id.eq(id.get()))
            .filter(classes::user_id.eq(owner.get()))
            .select(ClassRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(roster_diesel_error)?;

        row.map(into_classroom).transpose()
    }

    async fn rename_owned(
        &self,
        owner: UserId,
        id: ClassId,
        name: &ClassName,
    ) -> Result<Option<Classroom>, RosterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(roster_pool_error)?;

        let target = classes::table
            .filter(classes::id.eq(id.get()))
            .filter(classes::user_id.eq(owner.get()));
        let row: Option<ClassRow> = diesel::update(target)
            .set(classes::name.eq(name.as_str()))
            .returning(ClassRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(roster_diesel_error)?;

        row.map(into_classroom).transpose()
    }

    async fn delete_owned(
        &self,
        owner: UserId,
        id: ClassId,
    ) -> Result<bool, RosterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(roster_pool_error)?;

        let target = classes::table
            .filter(classes::id.eq(id.get()))
            .filter(classes::user_id.eq(owner.get()));
        // Students go with the class via ON DELETE CASCADE.
        let affected = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(roster_diesel_error)?;

        Ok(affected > 0)
    }
}
