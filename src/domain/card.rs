//! Card entity.

use crate::domain::{CardId, TimeMs};
use serde::{Deserialize, Serialize};

/// Phrase used by the default card filter.
pub const HELLO_PHRASE: &str = "hello";

/// A phrase token shared between Users through `UserCard` edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub phrase: String,
    pub created_at: TimeMs,
    pub updated_at: TimeMs,
}
