//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters. Driving ports (`*Service`, `*Command`, `*Query`) are
//! implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod classes_command;
mod classes_query;
mod classroom_repository;
mod login_service;
mod password_hasher;
mod registration_service;
mod student_repository;
mod students_command;
mod students_query;
mod user_repository;

pub use classes_command::ClassesCommand;
#[cfg(test)]
pub use classes_command::MockClassesCommand;
pub use classes_query::ClassesQuery;
#[cfg(test)]
pub use classes_query::MockClassesQuery;
pub use classroom_repository::{ClassroomRepository, RosterPersistenceError};
#[cfg(test)]
pub use classroom_repository::MockClassroomRepository;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::StudentRepository;
#[cfg(test)]
pub use students_command::MockStudentsCommand;
pub use students_command::StudentsCommand;
#[cfg(test)]
pub use students_query::MockStudentsQuery;
pub use students_query::StudentsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
