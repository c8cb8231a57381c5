//! Wiring of repositories and services into [`HttpState`].

use std::sync::Arc;

use crate::domain::ports::PasswordHashError;
use crate::domain::{AccountService, RosterService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryRosterStore;
use crate::outbound::password::Argon2PasswordHasher;
use crate::outbound::persistence::{
    DbPool, DieselClassroomRepository, DieselStudentRepository, DieselUserRepository,
};

/// Build handler state over PostgreSQL when a pool is given, otherwise over
/// a fresh in-memory store.
///
/// # Errors
///
/// Fails when the Argon2 hasher cannot be initialised.
pub fn build_http_state(db_pool: Option<&DbPool>) -> Result<HttpState, PasswordHashError> {
    let hasher = Arc::new(Argon2PasswordHasher::new()?);
    Ok(match db_pool {
        Some(pool) => HttpState::from_services(
            AccountService::new(Arc::new(DieselUserRepository::new(pool.clone())), hasher),
            RosterService::new(
                Arc::new(DieselClassroomRepository::new(pool.clone())),
                Arc::new(DieselStudentRepository::new(pool.clone())),
            ),
        ),
        None => memory_state(hasher),
    })
}

fn memory_state(hasher: Arc<Argon2PasswordHasher>) -> HttpState {
    let store = Arc::new(InMemoryRosterStore::new());
    HttpState::from_services(
        AccountService::new(store.clone(), hasher),
        RosterService::new(store.clone(), store),
    )
}
