//! Driving port for reading the caller's classes.

use async_trait::async_trait;

use crate::domain::{ClassId, Classroom, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassesQuery: Send + Sync {
    /// All and only the classes owned by `owner`.
    async fn list_classes(&self, owner: UserId) -> Result<Vec<Classroom>, Error>;

    /// One class owned by `owner`; not found otherwise.
    async fn find_class(&self, owner: UserId, id: ClassId) -> Result<Classroom, Error>;
}
