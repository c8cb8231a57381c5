//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed roster entities used by the API and
//! persistence layers, plus the services that enforce the ownership chain
//! `User → Class → Student`. Keep types immutable and document invariants in
//! each type's Rustdoc.
//!
//! Public surface:
//! - DomainError (aliased as Error), ErrorCode: transport agnostic failure
//!   payload.
//! - Credentials, PasswordHash: authentication primitives.
//! - User, UserId, Username: account identity.
//! - Classroom, ClassId, ClassName: classes owned by a user.
//! - Student, StudentId, StudentName, Age, StudentDraft: class members.
//! - AccountService, RosterService: use-case implementations behind the
//!   driving ports in [`ports`].

pub mod account_service;
pub mod auth;
pub mod classroom;
pub mod error;
pub mod ports;
pub mod roster_service;
pub mod student;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{Credentials, CredentialsValidationError, PasswordHash};
pub use self::classroom::{ClassId, ClassName, ClassValidationError, Classroom};
pub use self::error::{DomainError, Error, ErrorCode};
pub use self::roster_service::RosterService;
pub use self::student::{
    Age, AgeInput, Student, StudentDraft, StudentId, StudentInput, StudentName,
    StudentValidationError,
};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, Username, UserValidationError};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use roster::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("class not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
