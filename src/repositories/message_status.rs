//! # Message Status Repository
//!
//! This module contains the repository implementation for message status
//! rows, providing append-only writes and message-scoped lookups.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::message_status::{self, Entity as MessagesStatus, Model};

/// Repository for message status database operations
pub struct MessageStatusRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MessageStatusRepository<'a> {
    /// Create a new MessageStatusRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert one status row for a provider message.
    ///
    /// The table is append-only and carries no uniqueness constraint, so
    /// repeated deliveries for the same message id produce additional rows.
    pub async fn insert(&self, message_id: &str, status: &str) -> Result<Model, RepositoryError> {
        let row = message_status::ActiveModel {
            id: Set(Uuid::new_v4()),
            message_id: Set(message_id.to_string()),
            status: Set(status.to_string()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        Ok(row.insert(self.db).await?)
    }

    /// List all status rows recorded for a provider message, oldest first.
    pub async fn find_by_message_id(
        &self,
        message_id: &str,
    ) -> Result<Vec<Model>, RepositoryError> {
        let rows = MessagesStatus::find()
            .filter(message_status::Column::MessageId.eq(message_id))
            .order_by_asc(message_status::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(rows)
    }
}
