//! Driving port for class mutations.
//!
//! Names arrive unvalidated. For mutations on an existing class the
//! ownership lookup happens first, so a foreign class id yields
//! [`crate::domain::ErrorCode::NotFound`] even when the name is also invalid.

use async_trait::async_trait;

use crate::domain::{ClassId, Classroom, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassesCommand: Send + Sync {
    /// Create a class owned by `owner`.
    async fn create_class(&self, owner: UserId, name: Option<String>) -> Result<Classroom, Error>;

    /// Rename a class owned by `owner`.
    async fn rename_class(
        &self,
        owner: UserId,
        id: ClassId,
        name: Option<String>,
    ) -> Result<Classroom, Error>;

    /// Delete a class owned by `owner` together with its students.
    async fn delete_class(&self, owner: UserId, id: ClassId) -> Result<(), Error>;
}
