//! Card operations and the User → Cards association.

use crate::domain::{Card, CardId, TimeMs, UserId};
use crate::error::StoreError;
use crate::query::CardsByPhrase;
use tracing::debug;

use super::{card_from_row, Repository};

impl Repository {
    /// Insert a new Card with the given phrase.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_card(&self, phrase: &str) -> Result<Card, StoreError> {
        let now = TimeMs::now();
        self.record_round_trip();
        let result =
            sqlx::query("INSERT INTO cards (phrase, created_at, updated_at) VALUES (?, ?, ?)")
                .bind(phrase)
                .bind(now.as_i64())
                .bind(now.as_i64())
                .execute(self.pool())
                .await?;

        Ok(Card {
            id: CardId::new(result.last_insert_rowid()),
            phrase: phrase.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a Card by id.
    pub async fn get_card(&self, id: CardId) -> Result<Option<Card>, StoreError> {
        self.record_round_trip();
        let row =
            sqlx::query("SELECT id, phrase, created_at, updated_at FROM cards WHERE id = ?")
                .bind(id.as_i64())
                .fetch_optional(self.pool())
                .await?;

        Ok(row.as_ref().map(card_from_row))
    }

    /// Delete a Card. Its `user_cards` rows are removed by the cascade.
    ///
    /// Returns false if no such Card existed.
    pub async fn delete_card(&self, id: CardId) -> Result<bool, StoreError> {
        self.record_round_trip();
        let result = sqlx::query("DELETE FROM cards WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All Cards whose phrase equals `phrase`, ordered by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_cards_by_phrase(&self, phrase: &str) -> Result<Vec<Card>, StoreError> {
        CardsByPhrase::new(phrase).fetch(self).await
    }

    /// Every Card linked to a User, regardless of phrase.
    ///
    /// This is the per-User lazy fetch; phrase queries with eager loading
    /// avoid calling it in a loop.
    pub async fn cards_for_user(&self, user_id: UserId) -> Result<Vec<Card>, StoreError> {
        self.record_round_trip();
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT c.id, c.phrase, c.created_at, c.updated_at
            FROM cards c
            JOIN user_cards uc ON uc.card_id = c.id
            WHERE uc.user_id = ?
            ORDER BY c.id ASC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(self.pool())
        .await?;

        debug!(user_id = %user_id, cards = rows.len(), "Loaded cards for user");
        Ok(rows.iter().map(card_from_row).collect())
    }
}
