use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Ratings {
    Table,
    Id,
    ContractId,
    ServiceId,
    RaterId,
    RatedId,
    RatingValue,
    Comment,
    IsAnonymous,
    RaterRole,
    RatedRole,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
}

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
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ratings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Ratings::ContractId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::RaterId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::RatedId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::RatingValue).small_integer().not_null())
                    .col(ColumnDef::new(Ratings::Comment).string())
                    .col(
                        ColumnDef::new(Ratings::IsAnonymous)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Ratings::RaterRole).string().not_null())
                    .col(ColumnDef::new(Ratings::RatedRole).string().not_null())
                    .col(
                        ColumnDef::new(Ratings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Ratings::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_contract_id")
                            .from(Ratings::Table, Ratings::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_service_id")
                            .from(Ratings::Table, Ratings::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_rated_id")
                            .from(Ratings::Table, Ratings::RatedId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Each party may rate the other at most once per contract.
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_contract_rater_rated_unique")
                    .table(Ratings::Table)
                    .col(Ratings::ContractId)
                    .col(Ratings::RaterId)
                    .col(Ratings::RatedId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await
    }
}
