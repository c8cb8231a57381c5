//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this to authenticate credentials without knowing the
//! backing infrastructure, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown usernames and wrong passwords fail with the same
    /// [`crate::domain::ErrorCode::Unauthorized`] error.
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error>;

    /// Confirm that a user id carried by a session still names an account.
    async fn session_user(&self, id: UserId) -> Result<Option<UserId>, Error>;
}
