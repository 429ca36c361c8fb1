//! # Blogicum Infrastructure
//!
//! Concrete implementations of the ports defined in `blogicum-core`:
//! SeaORM/Postgres repositories for the entity store and the JWT/Argon2
//! identity services.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use database::{
    DatabaseConfig, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresLocationRepository, PostgresPostRepository, PostgresUserRepository,
};
