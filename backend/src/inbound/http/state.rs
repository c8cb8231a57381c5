//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ClassesCommand, ClassesQuery, LoginService, RegistrationService, StudentsCommand,
    StudentsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub classes: Arc<dyn ClassesCommand>,
    pub classes_query: Arc<dyn ClassesQuery>,
    pub students: Arc<dyn StudentsCommand>,
    pub students_query: Arc<dyn StudentsQuery>,
}

impl HttpState {
    /// Build state from one account service and one roster service.
    ///
    /// Each service backs every port it implements, so the handlers share a
    /// single set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use roster::domain::{AccountService, RosterService};
    /// use roster::inbound::http::state::HttpState;
    /// use roster::outbound::memory::InMemoryRosterStore;
    /// use roster::outbound::password::Argon2PasswordHasher;
    ///
    /// let store = Arc::new(InMemoryRosterStore::new());
    /// let hasher = Arc::new(Argon2PasswordHasher::new().unwrap());
    /// let state = HttpState::from_services(
    ///     AccountService::new(store.clone(), hasher),
    ///     RosterService::new(store.clone(), store),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn from_services<A, R>(accounts: A, roster: R) -> Self
    where
        A: LoginService + RegistrationService + 'static,
        R: ClassesCommand + ClassesQuery + StudentsCommand + StudentsQuery + 'static,
    {
        let accounts = Arc::new(accounts);
        let roster = Arc::new(roster);
        Self {
            login: accounts.clone(),
            registration: accounts,
            classes: roster.clone(),
            classes_query: roster.clone(),
            students: roster.clone(),
            students_query: roster,
        }
    }
}
