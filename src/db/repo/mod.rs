//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by entity:
//! - `users.rs` - User rows and the Card → Users association
//! - `cards.rs` - Card rows, the phrase filter and the User → Cards association
//! - `user_cards.rs` - Join rows linking Users to Cards

mod cards;
mod user_cards;
mod users;

use crate::domain::{Card, CardId, TimeMs, User, UserCard, UserCardId, UserId};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use std::sync::atomic::{AtomicU64, Ordering};

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
    round_trips: AtomicU64,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository {
            pool,
            round_trips: AtomicU64::new(0),
        }
    }

    /// Number of data statements sent to SQLite since construction.
    ///
    /// Transaction control (`BEGIN`/`COMMIT`) is not counted.
    pub fn round_trips(&self) -> u64 {
        self.round_trips.load(Ordering::Relaxed)
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Must be called once per statement handed to the pool or a transaction.
    pub(crate) fn record_round_trip(&self) {
        self.round_trips.fetch_add(1, Ordering::Relaxed);
    }
}

pub(crate) fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: UserId::new(row.get("id")),
        created_at: TimeMs::new(row.get("created_at")),
        updated_at: TimeMs::new(row.get("updated_at")),
    }
}

pub(crate) fn card_from_row(row: &SqliteRow) -> Card {
    Card {
        id: CardId::new(row.get("id")),
        phrase: row.get("phrase"),
        created_at: TimeMs::new(row.get("created_at")),
        updated_at: TimeMs::new(row.get("updated_at")),
    }
}

pub(crate) fn user_card_from_row(row: &SqliteRow) -> UserCard {
    UserCard {
        id: UserCardId::new(row.get("id")),
        user_id: UserId::new(row.get("user_id")),
        card_id: CardId::new(row.get("card_id")),
        created_at: TimeMs::new(row.get("created_at")),
        updated_at: TimeMs::new(row.get("updated_at")),
    }
}
