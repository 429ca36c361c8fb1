//! Database layer: connection bootstrap, SeaORM entities, query
//! shapes, and the Postgres repositories.

mod connections;
mod postgres_base;
pub mod postgres_repo;
pub mod queries;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use postgres_base::PostgresBaseRepository;
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresLocationRepository,
    PostgresPostRepository, PostgresUserRepository,
};
