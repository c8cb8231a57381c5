//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the roster repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) are private
//! to this module; only domain types cross the port boundary.
//!
//! # Example
//!
//! ```no_run
//! use roster::outbound::persistence::{
//!     DbPool, DieselClassroomRepository, DieselStudentRepository, DieselUserRepository,
//!     PoolConfig,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/roster")).await?;
//! let users = DieselUserRepository::new(pool.clone());
//! let classes = DieselClassroomRepository::new(pool.clone());
//! let students = DieselStudentRepository::new(pool);
//! # let _ = (users, classes, students);
//! # Ok(())
//! # }
//! ```

mod diesel_classroom_repository;
mod diesel_error_mapping;
mod diesel_student_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_classroom_repository::DieselClassroomRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
