//! Port for class persistence.
//!
//! Every lookup and mutation takes the acting [`UserId`] and folds it into the
//! same statement as the id filter. A class owned by someone else is
//! indistinguishable from one that does not exist.

use async_trait::async_trait;

use crate::domain::{ClassId, ClassName, Classroom, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by class and student repository adapters.
    pub enum RosterPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "roster repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "roster repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassroomRepository: Send + Sync {
    /// All classes owned by `owner`, ascending by id.
    async fn list_owned(&self, owner: UserId) -> Result<Vec<Classroom>, RosterPersistenceError>;

    /// Insert a class owned by `owner`.
    async fn create(
        &self,
        owner: UserId,
        name: &ClassName,
    ) -> Result<Classroom, RosterPersistenceError>;

    /// Fetch a class by id when owned by `owner`.
    async fn find_owned(
        &self,
        owner: UserId,
        id: ClassId,
    ) -> Result<Option<Classroom>, RosterPersistenceError>;

    /// Rename a class owned by `owner`; `None` when no such class exists.
    async fn rename_owned(
        &self,
        owner: UserId,
        id: ClassId,
        name: &ClassName,
    ) -> Result<Option<Classroom>, RosterPersistenceError>;

    /// Delete a class owned by `owner` along with its students.
    ///
    /// Returns `false` when nothing matched.
    async fn delete_owned(&self, owner: UserId, id: ClassId)
    -> Result<bool, RosterPersistenceError>;
}
