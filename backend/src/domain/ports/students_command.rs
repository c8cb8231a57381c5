//! Driving port for student mutations.
//!
//! Ownership is transitive: a student is reachable only when its parent class
//! belongs to `owner`. The scoped lookup runs before payload validation.

use async_trait::async_trait;

use crate::domain::{ClassId, Error, Student, StudentId, StudentInput, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsCommand: Send + Sync {
    /// Add a student to a class owned by `owner`.
    async fn add_student(
        &self,
        owner: UserId,
        class_id: ClassId,
        input: StudentInput,
    ) -> Result<Student, Error>;

    /// Replace name and age of a student reachable by `owner`.
    async fn update_student(
        &self,
        owner: UserId,
        id: StudentId,
        input: StudentInput,
    ) -> Result<Student, Error>;

    /// Remove a student reachable by `owner`.
    async fn delete_student(&self, owner: UserId, id: StudentId) -> Result<(), Error>;
}
