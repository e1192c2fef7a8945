//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM
//! operations for database entities.

pub mod message_status;

pub use message_status::MessageStatusRepository;
