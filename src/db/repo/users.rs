//! User operations and the Card → Users association.

use crate::domain::{CardId, TimeMs, User, UserId};
use crate::error::StoreError;
use tracing::debug;

use super::{user_from_row, Repository};

impl Repository {
    /// Insert a new User stamped with the current time.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_user(&self) -> Result<User, StoreError> {
        let now = TimeMs::now();
        self.record_round_trip();
        let result = sqlx::query("INSERT INTO users (created_at, updated_at) VALUES (?, ?)")
            .bind(now.as_i64())
            .bind(now.as_i64())
            .execute(self.pool())
            .await?;

        Ok(User {
            id: UserId::new(result.last_insert_rowid()),
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a User by id.
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.record_round_trip();
        let row = sqlx::query("SELECT id, created_at, updated_at FROM users WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(self.pool())
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Delete a User. Its `user_cards` rows are removed by the cascade.
    ///
    /// Returns false if no such User existed.
    pub async fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        self.record_round_trip();
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Distinct Users linked to a Card, ordered by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn users_for_card(&self, card_id: CardId) -> Result<Vec<User>, StoreError> {
        self.record_round_trip();
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT u.id, u.created_at, u.updated_at
            FROM users u
            JOIN user_cards uc ON uc.user_id = u.id
            WHERE uc.card_id = ?
            ORDER BY u.id ASC
            "#,
        )
        .bind(card_id.as_i64())
        .fetch_all(self.pool())
        .await?;

        debug!(card_id = %card_id, users = rows.len(), "Loaded users for card");
        Ok(rows.iter().map(user_from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::repo::test_support::setup_test_db;
    use crate::domain::UserId;

    #[tokio::test]
    async fn test_insert_and_get_user() {
        let (repo, _temp) = setup_test_db().await;

        let user = repo.insert_user().await.unwrap();
        let fetched = repo.get_user(user.id).await.unwrap();

        assert_eq!(fetched, Some(user));
    }

    #[tokio::test]
    async fn test_get_missing_user_is_none() {
        let (repo, _temp) = setup_test_db().await;

        let fetched = repo.get_user(UserId::new(999)).await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_delete_user_reports_existence() {
        let (repo, _temp) = setup_test_db().await;

        let user = repo.insert_user().await.unwrap();
        assert!(repo.delete_user(user.id).await.unwrap());
        assert!(!repo.delete_user(user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_users_for_card_deduplicates_edges() {
        let (repo, _temp) = setup_test_db().await;

        let a = repo.insert_user().await.unwrap();
        let b = repo.insert_user().await.unwrap();
        let card = repo.insert_card("hello").await.unwrap();
        repo.link_user_card(b.id, card.id).await.unwrap();
        repo.link_user_card(a.id, card.id).await.unwrap();
        repo.link_user_card(a.id, card.id).await.unwrap();

        let users = repo.users_for_card(card.id).await.unwrap();
        assert_eq!(users, vec![a, b]);
    }
}
