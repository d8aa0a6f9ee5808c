//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_actor;
mod m20240301_000002_create_film;
mod m20240301_000003_create_actor_film;
mod m20240301_000004_create_app_user;
mod m20240301_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_actor::Migration),
            Box::new(m20240301_000002_create_film::Migration),
            Box::new(m20240301_000003_create_actor_film::Migration),
            Box::new(m20240301_000004_create_app_user::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000010_add_indexes::Migration),
        ]
    }
}
