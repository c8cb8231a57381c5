//! Port for student persistence.
//!
//! Students have no owner column; adapters scope them through the parent
//! class (`classes.user_id`) in a single statement.

use async_trait::async_trait;

use crate::domain::{ClassId, Student, StudentDraft, StudentId, UserId};

use super::RosterPersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Students of `class_id`, ascending by id, provided `owner` owns the class.
    async fn list_in_class(
        &self,
        owner: UserId,
        class_id: ClassId,
    ) -> Result<Vec<Student>, RosterPersistenceError>;

    /// Insert a student into `class_id`.
    ///
    /// Callers must have resolved the class under the ownership rule first.
    async fn create(
        &self,
        class_id: ClassId,
        draft: &StudentDraft,
    ) -> Result<Student, RosterPersistenceError>;

    /// Fetch a student whose parent class is owned by `owner`.
    async fn find_owned(
        &self,
        owner: UserId,
        id: StudentId,
    ) -> Result<Option<Student>, RosterPersistenceError>;

    /// Overwrite name and age of a student reachable by `owner`.
    async fn update_owned(
        &self,
        owner: UserId,
        id: StudentId,
        draft: &StudentDraft,
    ) -> Result<Option<Student>, RosterPersistenceError>;

    /// Delete a student reachable by `owner`; `false` when nothing matched.
    async fn delete_owned(
        &self,
        owner: UserId,
        id: StudentId,
    ) -> Result<bool, RosterPersistenceError>;
}
