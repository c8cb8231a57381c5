//! Shared translation of pool and Diesel failures into port errors.
//!
//! Raw driver messages are logged at `debug` and replaced with stable text so
//! SQL fragments never reach API clients.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{RosterPersistenceError, UserPersistenceError};

use super::pool::PoolError;

/// Storage failure categories the repositories care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureKind {
    Connection,
    Query,
    UniqueViolation,
}

/// Classify a Diesel error, logging the driver detail.
pub(crate) fn classify_diesel_error(error: &DieselError) -> (FailureKind, &'static str) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            (FailureKind::UniqueViolation, "unique constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            (FailureKind::Connection, "database connection error")
        }
        DieselError::NotFound => (FailureKind::Query, "record not found"),
        DieselError::QueryBuilderError(_) => (FailureKind::Query, "database query error"),
        _ => (FailureKind::Query, "database error"),
    }
}

pub(crate) fn roster_pool_error(error: PoolError) -> RosterPersistenceError {
    RosterPersistenceError::connection(error.message())
}

pub(crate) fn roster_diesel_error(error: DieselError) -> RosterPersistenceError {
    match classify_diesel_error(&error) {
        (FailureKind::Connection, message) => RosterPersistenceError::connection(message),
        (_, message) => RosterPersistenceError::query(message),
    }
}

pub(crate) fn user_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.message())
}

/// Map a user-table failure; a unique violation can only be the username.
pub(crate) fn user_diesel_error(error: DieselError, username: &str) -> UserPersistenceError {
    match classify_diesel_error(&error) {
        (FailureKind::UniqueViolation, _) => UserPersistenceError::duplicate_username(username),
        (FailureKind::Connection, message) => UserPersistenceError::connection(message),
        (FailureKind::Query, message) => UserPersistenceError::query(message),
    }
}
