//! UserCard join entity.

use crate::domain::{CardId, TimeMs, UserCardId, UserId};
use serde::{Deserialize, Serialize};

/// One membership edge between a User and a Card. Carries no payload.
///
/// Nothing prevents the same (user, card) pair from being linked twice;
/// readers deduplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCard {
    pub id: UserCardId,
    pub user_id: UserId,
    pub card_id: CardId,
    pub created_at: TimeMs,
    pub updated_at: TimeMs,
}
