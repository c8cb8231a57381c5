//! Class and student use-cases.
//!
//! Every operation starts from the acting user's id. Lookups of an existing
//! class or student are scoped by that id inside the repository, and run
//! before the payload is validated; only then is the scoped mutation issued.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    ClassesCommand, ClassesQuery, ClassroomRepository, RosterPersistenceError, StudentRepository,
    StudentsCommand, StudentsQuery,
};
use crate::domain::{
    ClassId, ClassName, Classroom, Error, Student, StudentDraft, StudentId, StudentInput, UserId,
};

/// Message returned when a class is absent or owned by someone else.
pub const CLASS_NOT_FOUND: &str = "class not found";

/// Message returned when a student is absent or outside the caller's classes.
pub const STUDENT_NOT_FOUND: &str = "student not found";

/// Roster service implementing the class and student driving ports.
pub struct RosterService<C, S> {
    classes: Arc<C>,
    students: Arc<S>,
}

impl<C, S> Clone for RosterService<C, S> {
    fn clone(&self) -> Self {
        Self {
            classes: Arc::clone(&self.classes),
            students: Arc::clone(&self.students),
        }
    }
}

impl<C, S> RosterService<C, S> {
    /// Create a new service with the given repositories.
    pub fn new(classes: Arc<C>, students: Arc<S>) -> Self {
        Self { classes, students }
    }
}

fn map_persistence_error(error: RosterPersistenceError) -> Error {
    match error {
        RosterPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("roster repository unavailable: {message}"))
        }
        RosterPersistenceError::Query { message } => {
            Error::internal(format!("roster repository error: {message}"))
        }
    }
}

impl<C, S> RosterService<C, S>
where
    C: ClassroomRepository,
    S: StudentRepository,
{
    async fn owned_class(&self, owner: UserId, id: ClassId) -> Result<Classroom, Error> {
        self.classes
            .find_owned(owner, id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(CLASS_NOT_FOUND))
    }

    async fn owned_student(&self, owner: UserId, id: StudentId) -> Result<Student, Error> {
        self.students
            .find_owned(owner, id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))
    }
}

fn validate_class_name(name: Option<String>) -> Result<ClassName, Error> {
    ClassName::from_input(name.as_deref()).map_err(|err| Error::invalid_request(err.to_string()))
}

fn validate_student(input: StudentInput) -> Result<StudentDraft, Error> {
    StudentDraft::try_from(input).map_err(|err| Error::invalid_request(err.to_string()))
}

#[async_trait]
impl<C, S> ClassesQuery for RosterService<C, S>
where
    C: ClassroomRepository,
    S: StudentRepository,
{
    async fn list_classes(&self, owner: UserId) -> Result<Vec<Classroom>, Error> {
        self.classes
            .list_owned(owner)
            .await
            .map_err(map_persistence_error)
    }

    async fn find_class(&self, owner: UserId, id: ClassId) -> Result<Classroom, Error> {
        self.owned_class(owner, id).await
    }
}

#[async_trait]
impl<C, S> ClassesCommand for RosterService<C, S>
where
    C: ClassroomRepository,
    S: StudentRepository,
{
    async fn create_class(&self, owner: UserId, name: Option<String>) -> Result<Classroom, Error> {
        let name = validate_class_name(name)?;
        let class = self
            .classes
            .create(owner, &name)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %owner, class_id = %class.id(), "class created");
        Ok(class)
    }

    async fn rename_class(
        &self,
        owner: UserId,
        id: ClassId,
        name: Option<String>,
    ) -> Result<Classroom, Error> {
        self.owned_class(owner, id).await?;
        let name = validate_class_name(name)?;
        let renamed = self
            .classes
            .rename_owned(owner, id, &name)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(CLASS_NOT_FOUND))?;
        info!(user_id = %owner, class_id = %id, "class renamed");
        Ok(renamed)
    }

    async fn delete_class(&self, owner: UserId, id: ClassId) -> Result<(), Error> {
        let deleted = self
            .classes
            .delete_owned(owner, id)
            .await
            .map_err(map_persistence_error)?;
        if !deleted {
            debug!(user_id = %owner, class_id = %id, "delete of unreachable class");
            return Err(Error::not_found(CLASS_NOT_FOUND));
        }
        info!(user_id = %owner, class_id = %id, "class deleted");
        Ok(())
    }
}

#[async_trait]
impl<C, S> StudentsQuery for RosterService<C, S>
where
    C: ClassroomRepository,
    S: StudentRepository,
{
    async fn list_students(&self, owner: UserId, class_id: ClassId) -> Result<Vec<Student>, Error> {
        self.owned_class(owner, class_id).await?;
        self.students
            .list_in_class(owner, class_id)
            .await
            .map_err(map_persistence_error)
    }

    async fn find_student(&self, owner: UserId, id: StudentId) -> Result<Student, Error> {
        self.owned_student(owner, id).await
    }
}

#[async_trait]
impl<C, S> StudentsCommand for RosterService<C, S>
where
    C: ClassroomRepository,
    S: StudentRepository,
{
    async fn add_student(
        &self,
        owner: UserId,
        class_id: ClassId,
        input: StudentInput,
    ) -> Result<Student, Error> {
        let class = self.owned_class(owner, class_id).await?;
        let draft = validate_student(input)?;
        let student = self
            .students
            .create(class.id(), &draft)
            .await
            .map_err(map_persistence_error)?;
        info!(
            user_id = %owner,
            class_id = %class.id(),
            student_id = %student.id(),
            "student added"
        );
        Ok(student)
    }

    async fn update_student(
        &self,
        owner: UserId,
        id: StudentId,
        input: StudentInput,
    ) -> Result<Student, Error> {
        self.owned_student(owner, id).await?;
        let draft = validate_student(input)?;
        let student = self
            .students
            .update_owned(owner, id, &draft)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))?;
        info!(user_id = %owner, student_id = %id, "student updated");
        Ok(student)
    }

    async fn delete_student(&self, owner: UserId, id: StudentId) -> Result<(), Error> {
        let deleted = self
            .students
            .delete_owned(owner, id)
            .await
            .map_err(map_persistence_error)?;
        if !deleted {
            debug!(user_id = %owner, student_id = %id, "delete of unreachable student");
            return Err(Error::not_found(STUDENT_NOT_FOUND));
        }
        info!(user_id = %owner, student_id = %id, "student deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "roster_service_tests.rs"]
mod tests;
