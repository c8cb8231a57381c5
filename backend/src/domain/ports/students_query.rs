//! Driving port for reading students of a class.

use async_trait::async_trait;

use crate::domain::{ClassId, Error, Student, StudentId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsQuery: Send + Sync {
    /// Students of a class owned by `owner`; not found otherwise.
    async fn list_students(&self, owner: UserId, class_id: ClassId) -> Result<Vec<Student>, Error>;

    /// One student whose class is owned by `owner`; not found otherwise.
    async fn find_student(&self, owner: UserId, id: StudentId) -> Result<Student, Error>;
}
