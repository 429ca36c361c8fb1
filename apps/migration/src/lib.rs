//! Database schema migrations.

pub use sea_orm_migration::prelude::*;

mod m20251103_000001_create_users_table;
mod m20251103_000002_create_taxonomy_tables;
mod m20251103_000003_create_posts_and_comments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251103_000001_create_users_table::Migration),
            Box::new(m20251103_000002_create_taxonomy_tables::Migration),
            Box::new(m20251103_000003_create_posts_and_comments::Migration),
        ]
    }
}
