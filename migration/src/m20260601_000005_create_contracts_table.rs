use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `contracts` table and its columns.
#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
    ServiceId,
    ClientId,
    ProviderId,
    Title,
    Description,
    ProposedPrice,
    AgreedPrice,
    EstimatedDuration,
    Location,
    Status,
    StartDate,
    EndDate,
    CompletionDate,
    ClientNotes,
    ProviderNotes,
    CancellationReason,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::ProviderId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::Title).string().not_null())
                    .col(ColumnDef::new(Contracts::Description).text().not_null())
                    .col(ColumnDef::new(Contracts::ProposedPrice).double().not_null())
                    .col(ColumnDef::new(Contracts::AgreedPrice).double())
                    .col(ColumnDef::new(Contracts::EstimatedDuration).string())
                    .col(ColumnDef::new(Contracts::Location).string().not_null())
                    .col(ColumnDef::new(Contracts::Status).string().not_null())
                    .col(ColumnDef::new(Contracts::StartDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Contracts::EndDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Contracts::CompletionDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Contracts::ClientNotes).string())
                    .col(ColumnDef::new(Contracts::ProviderNotes).string())
                    .col(ColumnDef::new(Contracts::CancellationReason).string())
                    .col(
                        ColumnDef::new(Contracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contracts::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_service_id")
                            .from(Contracts::Table, Contracts::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_client_id")
                            .from(Contracts::Table, Contracts::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_provider_id")
                            .from(Contracts::Table, Contracts::ProviderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await
    }
}
