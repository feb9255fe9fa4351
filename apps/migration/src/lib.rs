//! Schema migrations for the pharmacy CMS.

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_cms_tables;
mod m20240601_000002_seed_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_cms_tables::Migration),
            Box::new(m20240601_000002_seed_categories::Migration),
        ]
    }
}
