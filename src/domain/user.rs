//! User entity.

use crate::domain::{Card, TimeMs, UserId};
use serde::{Deserialize, Serialize};

/// Root entity. Owns zero or more `UserCard` edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub created_at: TimeMs,
    pub updated_at: TimeMs,
}

/// A User returned by a phrase query, with its matching Cards when they were
/// eager-loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWithCards {
    #[serde(flatten)]
    pub user: User,
    /// `None` means the collection was not loaded, not that it is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
}

impl UserWithCards {
    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn cards_loaded(&self) -> bool {
        self.cards.is_some()
    }
}
