//! Message status entity model
//!
//! This module contains the SeaORM entity model for the messages_status
//! table, which stores one append-only row per delivery-status callback
//! received from the provider.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

/// Row recording a single delivery-status update for a provider message.
///
/// Rows are write-once: there is no update or delete lifecycle, and no
/// uniqueness constraint on `message_id` (repeated deliveries append).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages_status")]
pub struct Model {
    /// Unique identifier for the row (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Identifier of the provider message this status refers to
    pub message_id: String,

    /// Delivery status, normalized to upper-case on write
    pub status: String,

    /// Timestamp when the row was written
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
