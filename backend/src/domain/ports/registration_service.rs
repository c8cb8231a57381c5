//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Store a new account with a salted hash of its password.
    ///
    /// Fails with [`crate::domain::ErrorCode::Conflict`] when the username is
    /// already taken.
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error>;
}
