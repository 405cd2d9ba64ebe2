//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and the users/cards/user_cards schema
//! - SQLite pragma configuration (foreign keys are enforced per connection)
//! - Repository layer for entity reads, writes and association lookups

pub mod migrations;
pub mod repo;

pub use migrations::init_db;
pub use repo::Repository;
