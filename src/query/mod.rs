//! Typed query plans over the users/cards/user_cards join.
//!
//! Each plan is a fixed SQL shape parameterized by a phrase. `UsersWithPhrase`
//! optionally eager-loads the matching Cards with one extra statement keyed by
//! the User id set of the primary result, so the number of statements does not
//! depend on how many Users match.

use crate::db::repo::{card_from_row, user_from_row};
use crate::db::Repository;
use crate::domain::{Card, UserId, UserWithCards, HELLO_PHRASE};
use crate::error::StoreError;
use sqlx::sqlite::SqliteConnection;
use sqlx::Row;
use std::collections::HashMap;
use tracing::debug;

const CARDS_BY_PHRASE_SQL: &str = r#"
    SELECT id, phrase, created_at, updated_at
    FROM cards
    WHERE phrase = ?
    ORDER BY id ASC
"#;

const USERS_WITH_PHRASE_SQL: &str = r#"
    SELECT DISTINCT u.id, u.created_at, u.updated_at
    FROM users u
    JOIN user_cards uc ON uc.user_id = u.id
    JOIN cards c ON c.id = uc.card_id
    WHERE c.phrase = ?
    ORDER BY u.id ASC
"#;

// The id set is bound as one JSON array so the statement has a fixed
// parameter count however many Users matched.
const MATCHING_CARDS_FOR_USERS_SQL: &str = r#"
    SELECT DISTINCT uc.user_id, c.id, c.phrase, c.created_at, c.updated_at
    FROM user_cards uc
    JOIN cards c ON c.id = uc.card_id
    WHERE c.phrase = ?
      AND uc.user_id IN (SELECT value FROM json_each(?))
    ORDER BY uc.user_id ASC, c.id ASC
"#;

/// Whether a User query also loads each User's matching Cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardLoading {
    /// Cards are left unloaded (`UserWithCards::cards` is `None`).
    #[default]
    Lazy,
    /// Matching Cards are loaded with one batched statement.
    Eager,
}

impl From<bool> for CardLoading {
    fn from(eager: bool) -> Self {
        if eager {
            CardLoading::Eager
        } else {
            CardLoading::Lazy
        }
    }
}

/// Cards whose phrase equals a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardsByPhrase {
    phrase: String,
}

impl CardsByPhrase {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
        }
    }

    /// Cards with the phrase `"hello"`.
    pub fn hello() -> Self {
        Self::new(HELLO_PHRASE)
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Run the plan. One statement.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn fetch(&self, repo: &Repository) -> Result<Vec<Card>, StoreError> {
        repo.record_round_trip();
        let rows = sqlx::query(CARDS_BY_PHRASE_SQL)
            .bind(&self.phrase)
            .fetch_all(repo.pool())
            .await?;

        debug!(phrase = %self.phrase, cards = rows.len(), "Fetched cards by phrase");
        Ok(rows.iter().map(card_from_row).collect())
    }
}

/// Distinct Users owning at least one Card with a given phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersWithPhrase {
    phrase: String,
    loading: CardLoading,
}

impl UsersWithPhrase {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            loading: CardLoading::Lazy,
        }
    }

    /// Users holding a `"hello"` Card.
    pub fn hello() -> Self {
        Self::new(HELLO_PHRASE)
    }

    pub fn eager_load(self, eager: bool) -> Self {
        self.with_loading(eager.into())
    }

    pub fn with_loading(mut self, loading: CardLoading) -> Self {
        self.loading = loading;
        self
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn loading(&self) -> CardLoading {
        self.loading
    }

    /// Run the plan.
    ///
    /// Lazy: one statement. Eager: two statements when any User matched,
    /// one otherwise. Eager collections hold only the Cards matching the
    /// phrase, not the User's whole collection. Both statements read from one
    /// transaction, so a concurrent delete cannot leave a returned User with
    /// an empty collection.
    ///
    /// # Errors
    /// Returns an error if either statement fails.
    pub async fn fetch(&self, repo: &Repository) -> Result<Vec<UserWithCards>, StoreError> {
        let mut tx = repo.pool().begin().await?;

        let mut users = self.matching_users(repo, &mut tx).await?;

        if self.loading == CardLoading::Eager && !users.is_empty() {
            let ids: Vec<UserId> = users.iter().map(UserWithCards::id).collect();
            let mut by_user = self.matching_cards_for(repo, &mut tx, &ids).await?;
            for entry in &mut users {
                entry.cards = Some(by_user.remove(&entry.id()).unwrap_or_default());
            }
        }

        tx.commit().await?;
        Ok(users)
    }

    async fn matching_users(
        &self,
        repo: &Repository,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<UserWithCards>, StoreError> {
        repo.record_round_trip();
        let rows = sqlx::query(USERS_WITH_PHRASE_SQL)
            .bind(&self.phrase)
            .fetch_all(&mut *conn)
            .await?;

        debug!(
            phrase = %self.phrase,
            users = rows.len(),
            loading = ?self.loading,
            "Fetched users with phrase"
        );

        Ok(rows
            .iter()
            .map(|row| UserWithCards {
                user: user_from_row(row),
                cards: None,
            })
            .collect())
    }

    async fn matching_cards_for(
        &self,
        repo: &Repository,
        conn: &mut SqliteConnection,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, Vec<Card>>, StoreError> {
        let id_set = serde_json::to_string(ids)?;

        repo.record_round_trip();
        let rows = sqlx::query(MATCHING_CARDS_FOR_USERS_SQL)
            .bind(&self.phrase)
            .bind(id_set)
            .fetch_all(&mut *conn)
            .await?;

        let mut by_user: HashMap<UserId, Vec<Card>> = HashMap::with_capacity(ids.len());
        for row in &rows {
            let user_id = UserId::new(row.get("user_id"));
            by_user.entry(user_id).or_default().push(card_from_row(row));
        }

        debug!(
            phrase = %self.phrase,
            users = ids.len(),
            cards = rows.len(),
            "Eager-loaded matching cards"
        );
        Ok(by_user)
    }
}

impl Repository {
    /// Distinct Users having at least one Card with `phrase`, optionally with
    /// those Cards eager-loaded.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_users_with_phrase(
        &self,
        phrase: &str,
        eager_load: bool,
    ) -> Result<Vec<UserWithCards>, StoreError> {
        UsersWithPhrase::new(phrase)
            .eager_load(eager_load)
            .fetch(self)
            .await
    }
}
