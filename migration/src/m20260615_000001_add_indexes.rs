use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Contracts {
    Table,
    ClientId,
    ProviderId,
}

#[derive(DeriveIden)]
enum Services {
    Table,
    UserId,
    CategoryId,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    ContractId,
    ReceiverId,
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    ServiceId,
    RatedId,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Contract lists are filtered by either party.
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_client_id")
                    .table(Contracts::Table)
                    .col(Contracts::ClientId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_provider_id")
                    .table(Contracts::Table)
                    .col(Contracts::ProviderId)
                    .to_owned(),
            )
            .await?;

        // Service listings filter by owner and category.
        manager
            .create_index(
                Index::create()
                    .name("idx_services_user_id")
                    .table(Services::Table)
                    .col(Services::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_services_category_id")
                    .table(Services::Table)
                    .col(Services::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Message threads and unread counts.
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_contract_id")
                    .table(Messages::Table)
                    .col(Messages::ContractId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_receiver_id")
                    .table(Messages::Table)
                    .col(Messages::ReceiverId)
                    .to_owned(),
            )
            .await?;

        // Rating recomputes scan by service and rated user.
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_service_id")
                    .table(Ratings::Table)
                    .col(Ratings::ServiceId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_rated_id")
                    .table(Ratings::Table)
                    .col(Ratings::RatedId)
                    .to_owned(),
            )
            .await?;

        // Notification feeds are per-user.
        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_id")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_contracts_client_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contracts_provider_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_services_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_services_category_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_messages_contract_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_messages_receiver_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ratings_service_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ratings_rated_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_notifications_user_id").to_owned())
            .await?;

        Ok(())
    }
}
