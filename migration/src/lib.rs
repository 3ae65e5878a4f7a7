pub use sea_orm_migration::prelude::*;

mod m20260601_000001_create_users_table;
mod m20260601_000002_create_categories_table;
mod m20260601_000003_create_services_table;
mod m20260601_000004_create_service_images_table;
mod m20260601_000005_create_contracts_table;
mod m20260601_000006_create_messages_table;
mod m20260601_000007_create_ratings_table;
mod m20260601_000008_create_notifications_table;
mod m20260601_000009_create_favorites_table;
mod m20260615_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_users_table::Migration),
            Box::new(m20260601_000002_create_categories_table::Migration),
            Box::new(m20260601_000003_create_services_table::Migration),
            Box::new(m20260601_000004_create_service_images_table::Migration),
            Box::new(m20260601_000005_create_contracts_table::Migration),
            Box::new(m20260601_000006_create_messages_table::Migration),
            Box::new(m20260601_000007_create_ratings_table::Migration),
            Box::new(m20260601_000008_create_notifications_table::Migration),
            Box::new(m20260601_000009_create_favorites_table::Migration),
            Box::new(m20260615_000001_add_indexes::Migration),
        ]
    }
}
