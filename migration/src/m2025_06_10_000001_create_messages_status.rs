//! Migration to create the messages_status table.
//!
//! This migration creates the messages_status table which stores one
//! append-only row per delivery-status callback received from the provider.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MessagesStatus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MessagesStatus::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MessagesStatus::MessageId).text().not_null())
                    .col(ColumnDef::new(MessagesStatus::Status).text().not_null())
                    .col(
                        ColumnDef::new(MessagesStatus::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Plain (non-unique) index: duplicate webhook deliveries are allowed
        // to produce duplicate rows for the same message id.
        manager
            .get_connection()
            .execute(Statement::from_string(
                manager.get_database_backend(),
                "CREATE INDEX IF NOT EXISTS idx_messages_status_message_id ON messages_status (message_id)"
                    .to_string(),
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_messages_status_message_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MessagesStatus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MessagesStatus {
    Table,
    Id,
    MessageId,
    Status,
    CreatedAt,
}
