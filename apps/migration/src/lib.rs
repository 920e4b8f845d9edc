//! Schema migrations for the yap database.

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_yaps_and_votes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_yaps_and_votes::Migration)]
    }
}
