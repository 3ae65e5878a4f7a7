use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum ServiceImages {
    Table,
    Id,
    ServiceId,
    ImageUrl,
    Description,
    IsThumbnail,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceImages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceImages::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(ServiceImages::ImageUrl).string().not_null())
                    .col(ColumnDef::new(ServiceImages::Description).string())
                    .col(
                        ColumnDef::new(ServiceImages::IsThumbnail)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ServiceImages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_images_service_id")
                            .from(ServiceImages::Table, ServiceImages::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceImages::Table).to_owned())
            .await
    }
}
