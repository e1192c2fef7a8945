//! # API Handlers
//!
//! This module contains the HTTP endpoint handlers for the status webhook
//! service.

pub mod types;
pub mod webhooks;
