//! Domain types for users, phrase cards and the join entity linking them.
//!
//! This module provides:
//! - Id newtypes and the millisecond timestamp
//! - `User`, `Card` and `UserCard` rows
//! - `UserWithCards`, the result shape of phrase queries

pub mod card;
pub mod primitives;
pub mod user;
pub mod user_card;

pub use card::{Card, HELLO_PHRASE};
pub use primitives::{CardId, TimeMs, UserCardId, UserId};
pub use user::{User, UserWithCards};
pub use user_card::UserCard;
