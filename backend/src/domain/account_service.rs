//! Account domain service.
//!
//! Implements the [`LoginService`] and [`RegistrationService`] driving ports
//! on top of a [`UserRepository`] and a [`PasswordHasher`]. Argon2 work is
//! pushed onto the blocking pool so it never stalls the async executor.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegistrationService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Credentials, Error, PasswordHash, TraceId, UserId};

/// Message shared by every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Message returned when registration hits the username constraint.
pub const USERNAME_TAKEN: &str = "username already exists";

/// Registration and login over injected persistence and hashing.
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> Clone for AccountService<U, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<U, H> AccountService<U, H> {
    /// Create a new service from its collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateUsername { .. } => Error::conflict(USERNAME_TAKEN),
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(error.to_string())
    }

    /// Run a hasher operation on the blocking pool.
    async fn with_hasher<T, F>(&self, op: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&H) -> T + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        let trace_id = TraceId::current();
        tokio::task::spawn_blocking(move || TraceId::in_blocking(trace_id, || op(hasher.as_ref())))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let password = Zeroizing::new(credentials.password().to_owned());
        let found = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(Self::map_user_error)?;

        let Some(user) = found else {
            self.with_hasher(move |hasher| hasher.verify_decoy(password.as_str()))
                .await?;
            info!(username = %credentials.username(), "login rejected: unknown user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let stored: PasswordHash = user.password_hash().clone();
        let verified = self
            .with_hasher(move |hasher| hasher.verify(password.as_str(), &stored))
            .await?
            .map_err(|err| {
                warn!(user_id = %user.id(), error = %err, "stored password hash unusable");
                Self::map_hash_error(err)
            })?;

        if verified {
            debug!(user_id = %user.id(), "login accepted");
            Ok(user.id())
        } else {
            info!(user_id = %user.id(), "login rejected: password mismatch");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }

    async fn session_user(&self, id: UserId) -> Result<Option<UserId>, Error> {
        let found = self
            .users
            .find_by_id(id)
            .await
            .map_err(Self::map_user_error)?;
        if found.is_none() {
            info!(user_id = %id, "session refers to a missing user");
        }
        Ok(found.map(|user| user.id()))
    }
}

#[async_trait]
impl<U, H> RegistrationService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let password = Zeroizing::new(credentials.password().to_owned());
        let hash = self
            .with_hasher(move |hasher| hasher.hash(password.as_str()))
            .await?
            .map_err(Self::map_hash_error)?;

        let user = self
            .users
            .create(credentials.username(), &hash)
            .await
            .map_err(|err| {
                if matches!(err, UserPersistenceError::DuplicateUsername { .. }) {
                    info!(
                        username = %credentials.username(),
                        "registration rejected: username taken"
                    );
                }
                Self::map_user_error(err)
            })?;

        info!(user_id = %user.id(), "user registered");
        Ok(user.id())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
